// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::Arch;
use std::path::{Path, PathBuf};

pub const METRICS_DIR_NAME: &str = "metrics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub metrics_dir: PathBuf,
    pub raw_collection: PathBuf,
    pub json: PathBuf,
    pub markdown: PathBuf,
}

/// Output layout under `<base>/metrics/` for a run stamped with `timestamp`.
///
/// The architecture filter, when set, is appended to the report file stems
/// but not to the raw collection, which always holds every row.
#[must_use]
pub fn report_paths(base_dir: &Path, timestamp: &str, arch: Option<Arch>) -> ReportPaths {
    let metrics_dir = base_dir.join(METRICS_DIR_NAME);
    let arch_suffix = arch.map_or("", Arch::as_str);
    ReportPaths {
        raw_collection: metrics_dir.join(format!("raw-collected-data-{timestamp}.csv")),
        json: metrics_dir.join(format!("metric-report-{timestamp}{arch_suffix}.json")),
        markdown: metrics_dir.join(format!("metric-report-{timestamp}{arch_suffix}.md")),
        metrics_dir,
    }
}
