// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::{Arch, RAW_DATA_HEADER};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::IngestError;

pub const ARCH_COLUMN: &str = "arch";

/// Combined, unfiltered copy of every raw data row seen during a run.
///
/// The file is created with the raw data header plus an `arch` column and
/// stays open for the whole run.
pub struct RawCollection {
    path: PathBuf,
    writer: Writer<File>,
    rows: u64,
}

impl RawCollection {
    pub fn create(path: &Path) -> Result<Self, IngestError> {
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .map_err(|e| write_error(path, &e))?;
        writer
            .write_record(RAW_DATA_HEADER.iter().copied().chain([ARCH_COLUMN]))
            .map_err(|e| write_error(path, &e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    pub fn append(&mut self, fields: &[String], arch: Option<Arch>) -> Result<(), IngestError> {
        let label = arch.map_or("", Arch::as_str);
        self.writer
            .write_record(fields.iter().map(String::as_str).chain([label]))
            .map_err(|e| write_error(&self.path, &e))?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn finish(mut self) -> Result<PathBuf, IngestError> {
        self.writer
            .flush()
            .map_err(|e| IngestError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(self.path)
    }
}

fn write_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::Csv {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::RawCollection;
    use bijux_coverage_model::Arch;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rows_carry_arch_label_and_requote() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("raw-collected-data-x.csv");
        let mut collection = RawCollection::create(&path).expect("create");
        let row: Vec<String> = ["t1", "sqs", "SendMessage", "QueueUrl,MessageBody", "", "200", "", "False"]
            .iter()
            .map(ToString::to_string)
            .collect();
        collection.append(&row, Some(Arch::Arm64)).expect("append");
        collection.append(&row, None).expect("append");
        assert_eq!(collection.rows(), 2);
        collection.finish().expect("finish");

        let text = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "node_id,service,operation,parameters,exception,response_code,response_data,xfail,arch"
        );
        assert_eq!(
            lines[1],
            "t1,sqs,SendMessage,\"QueueUrl,MessageBody\",,200,,False,arm64"
        );
        assert_eq!(lines[2], "t1,sqs,SendMessage,\"QueueUrl,MessageBody\",,200,,False,");
    }
}
