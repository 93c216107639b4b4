// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod aggregate;
mod catalog;
mod collect;
mod decode;
mod discover;
mod job;
mod logging;
mod skeleton;

use bijux_coverage_model::{AggregateReport, Arch, ModelError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tracing::info;

pub const CRATE_NAME: &str = "bijux-coverage-ingest";

pub use aggregate::{fold_record, AggregateError, ErrorAttribution, FoldOutcome};
pub use catalog::{CatalogError, JsonServiceCatalog, ServiceCatalog};
pub use collect::{RawCollection, ARCH_COLUMN};
pub use decode::{RawDataFile, RawRow};
pub use discover::{discover_raw_data_files, is_raw_data_file_name};
pub use job::AggregationJob;
pub use logging::{IngestEvent, IngestLog, IngestStage};
pub use skeleton::{build_coverage_skeleton, CoverageSkeleton, SkippedService};

#[derive(Debug)]
#[non_exhaustive]
pub enum IngestError {
    Io {
        path: PathBuf,
        message: String,
    },
    Csv {
        path: PathBuf,
        message: String,
    },
    MissingHeader {
        path: PathBuf,
    },
    Decode {
        path: PathBuf,
        line: u64,
        source: ModelError,
    },
    Aggregate {
        path: PathBuf,
        line: u64,
        source: AggregateError,
    },
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::Csv { path, message } => write!(f, "{}: csv error: {message}", path.display()),
            Self::MissingHeader { path } => {
                write!(f, "{}: raw data file has no header row", path.display())
            }
            Self::Decode { path, line, source } => {
                write!(f, "{}:{line}: {source}", path.display())
            }
            Self::Aggregate { path, line, source } => {
                write!(f, "{}:{line}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Aggregate { source, .. } => Some(source),
            Self::Io { .. } | Self::Csv { .. } | Self::MissingHeader { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AggregateOptions {
    pub base_dir: PathBuf,
    /// Only aggregate rows from files whose path contains this architecture.
    pub arch_filter: Option<Arch>,
    /// Where to write the unfiltered raw collection; `None` disables it.
    pub raw_collection: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub files: u64,
    pub rows: u64,
    pub aggregated: u64,
    pub xfail_suppressed: u64,
    pub arch_filtered: u64,
    pub errors_explicit: u64,
    pub errors_assumed: u64,
    pub errors_unmatched: u64,
    pub raw_collected: u64,
}

impl AggregationStats {
    fn record(&mut self, outcome: &FoldOutcome) {
        match outcome {
            FoldOutcome::SuppressedXfail => self.xfail_suppressed += 1,
            FoldOutcome::FilteredArch => self.arch_filtered += 1,
            FoldOutcome::Aggregated(attribution) => {
                self.aggregated += 1;
                match attribution {
                    ErrorAttribution::Explicit(_) => self.errors_explicit += 1,
                    ErrorAttribution::Assumed(_) => self.errors_assumed += 1,
                    ErrorAttribution::Unmatched => self.errors_unmatched += 1,
                    ErrorAttribution::None => {}
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregationOutcome {
    pub report: AggregateReport,
    pub stats: AggregationStats,
    pub files: Vec<PathBuf>,
    pub skipped_services: Vec<SkippedService>,
    pub raw_collection_path: Option<PathBuf>,
    pub events: Vec<IngestEvent>,
}

/// Builds the coverage skeleton from `catalog` and folds every raw data row
/// found under `opts.base_dir` into it.
pub fn aggregate_recorded_raw_data<C: ServiceCatalog + ?Sized>(
    catalog: &C,
    opts: &AggregateOptions,
) -> Result<AggregationOutcome, IngestError> {
    let mut log = IngestLog::default();
    log.emit(IngestStage::Prepare, "aggregate.start", BTreeMap::new());

    let CoverageSkeleton {
        mut report,
        skipped,
    } = build_coverage_skeleton(catalog);
    log.emit(
        IngestStage::Prepare,
        "aggregate.skeleton.complete",
        BTreeMap::from([
            ("services".to_string(), report.len().to_string()),
            ("skipped".to_string(), skipped.len().to_string()),
        ]),
    );

    let job = AggregationJob::discover(opts)?;
    log.emit(
        IngestStage::Discover,
        "aggregate.discover.complete",
        BTreeMap::from([("files".to_string(), job.files.len().to_string())]),
    );

    let mut collection = match &opts.raw_collection {
        Some(path) => Some(RawCollection::create(path)?),
        None => None,
    };
    let mut stats = AggregationStats::default();

    for path in &job.files {
        info!(path = %path.display(), "checking");
        let source = path.to_string_lossy();
        let arch_label = Arch::detect_from_path(&source);
        stats.files += 1;

        for row in RawDataFile::open(path)? {
            let row = row?;
            stats.rows += 1;
            if let Some(collection) = collection.as_mut() {
                collection.append(&row.fields, arch_label)?;
            }
            let outcome = fold_record(&mut report, &row.record, &source, opts.arch_filter)
                .map_err(|err| IngestError::Aggregate {
                    path: path.clone(),
                    line: row.line,
                    source: err,
                })?;
            stats.record(&outcome);
        }
        log.emit(
            IngestStage::Decode,
            "aggregate.file.complete",
            BTreeMap::from([("path".to_string(), path.display().to_string())]),
        );
    }

    let raw_collection_path = match collection {
        Some(collection) => {
            stats.raw_collected = collection.rows();
            Some(collection.finish()?)
        }
        None => None,
    };
    log.emit(
        IngestStage::Aggregate,
        "aggregate.fold.complete",
        BTreeMap::from([
            ("rows".to_string(), stats.rows.to_string()),
            ("aggregated".to_string(), stats.aggregated.to_string()),
        ]),
    );
    info!(
        files = stats.files,
        rows = stats.rows,
        aggregated = stats.aggregated,
        xfail_suppressed = stats.xfail_suppressed,
        arch_filtered = stats.arch_filtered,
        "aggregation complete"
    );
    log.emit(IngestStage::Finalize, "aggregate.complete", BTreeMap::new());

    Ok(AggregationOutcome {
        report,
        stats,
        files: job.files,
        skipped_services: skipped,
        raw_collection_path,
        events: log.into_events(),
    })
}
