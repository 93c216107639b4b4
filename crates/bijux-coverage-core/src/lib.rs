// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod canonical;
mod config;
mod errors;

pub use canonical::sha256_hex;
pub use config::{
    env_bool, resolve_catalog_path, resolve_catalog_path_with, CatalogPathSource,
    ResolvedCatalogPath, CATALOG_FILE_NAME,
};
pub use errors::{ExitCode, MachineError};

pub const CRATE_NAME: &str = "bijux-coverage-core";

pub const ENV_BIJUX_LOG_LEVEL: &str = "BIJUX_LOG_LEVEL";
pub const ENV_BIJUX_LOG_JSON: &str = "BIJUX_LOG_JSON";
pub const ENV_BIJUX_COVERAGE_CATALOG: &str = "BIJUX_COVERAGE_CATALOG";
