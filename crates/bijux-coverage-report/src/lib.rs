// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod json;
mod markdown;
mod paths;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CRATE_NAME: &str = "bijux-coverage-report";

pub use json::{render_json, write_json};
pub use markdown::{
    coverage_summary, render_markdown, render_service_block, write_markdown_report,
    ServiceSummary, MARKDOWN_PREAMBLE,
};
pub use paths::{report_paths, ReportPaths, METRICS_DIR_NAME};

#[derive(Debug)]
#[non_exhaustive]
pub enum RenderError {
    /// A service without operations has no defined coverage percentage.
    EmptyService(String),
    Encode(String),
    Io { path: PathBuf, message: String },
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyService(service) => write!(
                f,
                "service `{service}` declares no operations; coverage percentage is undefined"
            ),
            Self::Encode(message) => write!(f, "failed to encode report: {message}"),
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
        }
    }
}

impl std::error::Error for RenderError {}
