// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Coverage model SSOT.
//!
//! ```compile_fail
//! use bijux_coverage_model::Arch;
//!
//! fn exhaustive_match(a: Arch) -> &'static str {
//!     match a {
//!         Arch::Amd64 => "amd64",
//!         Arch::Arm64 => "arm64",
//!     }
//! }
//! ```

mod arch;
mod catalog;
mod coverage;
mod error;
mod record;
mod serde_helpers;

pub use arch::Arch;
pub use catalog::{OperationSpec, ServiceSpec};
pub use coverage::{
    AggregateReport, CoverageRatio, ErrorCounts, OperationCoverage, ServiceAttributes,
    ServiceCoverage, NONE_PARAMETER_KEY,
};
pub use error::ModelError;
pub use record::{ObservationRecord, RAW_DATA_FIELD_COUNT, RAW_DATA_HEADER};

pub const CRATE_NAME: &str = "bijux-coverage-model";
