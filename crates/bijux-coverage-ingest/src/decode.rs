// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::ObservationRecord;
use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::IngestError;

/// One decoded data row together with its original fields.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub line: u64,
    pub fields: Vec<String>,
    pub record: ObservationRecord,
}

/// Streaming reader over one `metric-report-raw-data-*.csv` file.
///
/// The header is checked on open; each data row must carry exactly the
/// header's field count.
pub struct RawDataFile {
    path: PathBuf,
    records: StringRecordsIntoIter<File>,
}

impl RawDataFile {
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let mut reader: Reader<File> = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| csv_error(path, &e))?;
        let mut header = StringRecord::new();
        let has_header = reader
            .read_record(&mut header)
            .map_err(|e| csv_error(path, &e))?;
        if !has_header {
            return Err(IngestError::MissingHeader {
                path: path.to_path_buf(),
            });
        }
        let fields: Vec<&str> = header.iter().collect();
        ObservationRecord::check_header(&fields).map_err(|source| IngestError::Decode {
            path: path.to_path_buf(),
            line: 1,
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            records: reader.into_records(),
        })
    }
}

impl Iterator for RawDataFile {
    type Item = Result<RawRow, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(csv_error(&self.path, &e))),
        };
        let line = row.position().map_or(0, csv::Position::line);
        let fields: Vec<String> = row.iter().map(ToString::to_string).collect();
        Some(
            ObservationRecord::from_fields(&fields)
                .map(|record| RawRow {
                    line,
                    fields,
                    record,
                })
                .map_err(|source| IngestError::Decode {
                    path: self.path.clone(),
                    line,
                    source,
                }),
        )
    }
}

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
