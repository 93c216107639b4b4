// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use crate::discover::discover_raw_data_files;
use crate::{AggregateOptions, IngestError};

/// Raw data files of one aggregation run, in discovery order.
#[derive(Debug, Clone)]
pub struct AggregationJob {
    pub files: Vec<PathBuf>,
}

impl AggregationJob {
    pub fn discover(options: &AggregateOptions) -> Result<Self, IngestError> {
        if !options.base_dir.is_dir() {
            return Err(IngestError::Io {
                path: options.base_dir.clone(),
                message: "base directory does not exist".to_string(),
            });
        }
        Ok(Self {
            files: discover_raw_data_files(&options.base_dir)?,
        })
    }
}
