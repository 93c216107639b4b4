// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::IngestError;

pub const RAW_DATA_FILE_PREFIX: &str = "metric-report-raw-data-";
pub const RAW_DATA_FILE_SUFFIX: &str = ".csv";

#[must_use]
pub fn is_raw_data_file_name(name: &str) -> bool {
    name.len() >= RAW_DATA_FILE_PREFIX.len() + RAW_DATA_FILE_SUFFIX.len()
        && name.starts_with(RAW_DATA_FILE_PREFIX)
        && name.ends_with(RAW_DATA_FILE_SUFFIX)
}

/// Recursively finds `metric-report-raw-data-*.csv` files under `base_dir`.
///
/// Entries are visited in file-name order within each directory so the
/// discovery order is reproducible across filesystems.
pub fn discover_raw_data_files(base_dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut out = Vec::new();
    for entry in WalkDir::new(base_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| IngestError::Io {
            path: base_dir.to_path_buf(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_str()
            .is_some_and(is_raw_data_file_name)
        {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}
