// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::{AggregateReport, Arch, ObservationRecord, NONE_PARAMETER_KEY};
use std::fmt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AggregateError {
    UnknownService {
        service: String,
    },
    UnknownOperation {
        service: String,
        operation: String,
    },
    UnknownParameter {
        service: String,
        operation: String,
        parameter: String,
    },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownService { service } => {
                write!(f, "service `{service}` is not in the catalog")
            }
            Self::UnknownOperation { service, operation } => {
                write!(f, "operation `{service}.{operation}` is not in the catalog")
            }
            Self::UnknownParameter {
                service,
                operation,
                parameter,
            } => write!(
                f,
                "parameter `{parameter}` is not declared for `{service}.{operation}`"
            ),
        }
    }
}

impl std::error::Error for AggregateError {}

/// How an error was attributed to an aggregated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorAttribution {
    None,
    Explicit(String),
    /// Best-effort substring match of a declared error name in the response body.
    Assumed(String),
    /// Error response without any declared error name in its body.
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldOutcome {
    Aggregated(ErrorAttribution),
    SuppressedXfail,
    FilteredArch,
}

/// Folds one record into `report`.
///
/// `source` is the path of the raw file the record came from; it is only
/// consulted for the architecture filter.
pub fn fold_record(
    report: &mut AggregateReport,
    record: &ObservationRecord,
    source: &str,
    arch_filter: Option<Arch>,
) -> Result<FoldOutcome, AggregateError> {
    if record.xfail {
        info!(node_id = %record.node_id, "test marked as xfail");
        return Ok(FoldOutcome::SuppressedXfail);
    }
    if let Some(arch) = arch_filter {
        if !arch.matches_path(source) {
            return Ok(FoldOutcome::FilteredArch);
        }
    }

    let Some(op) = report.operation_mut(&record.service, &record.operation) else {
        return Err(if report.service(&record.service).is_none() {
            AggregateError::UnknownService {
                service: record.service.clone(),
            }
        } else {
            AggregateError::UnknownOperation {
                service: record.service.clone(),
                operation: record.operation.clone(),
            }
        });
    };

    // Parameters are validated before any counter moves so a rejected record
    // leaves the operation untouched.
    let names: Vec<&str> = record.parameter_names().collect();
    if let Some(unknown) = names.iter().find(|n| !op.parameters.contains_key(**n)) {
        return Err(AggregateError::UnknownParameter {
            service: record.service.clone(),
            operation: record.operation.clone(),
            parameter: (*unknown).to_string(),
        });
    }

    let attribution = if !record.exception.is_empty() {
        op.errors.record(&record.exception);
        ErrorAttribution::Explicit(record.exception.clone())
    } else if record.is_error_response() {
        // Catalog order first, then names added by explicit exceptions; the
        // first substring hit wins.
        let matched = op
            .errors
            .first_named_in(&record.response_data)
            .map(str::to_string);
        match matched {
            Some(name) => {
                op.errors.record(&name);
                warn!(
                    service = %record.service,
                    operation = %record.operation,
                    code = record.response_code.unwrap_or_default(),
                    error = %name,
                    "exception assumed from response data"
                );
                ErrorAttribution::Assumed(name)
            }
            None => {
                debug!(
                    service = %record.service,
                    operation = %record.operation,
                    code = record.response_code.unwrap_or_default(),
                    "error response without a declared error name"
                );
                ErrorAttribution::Unmatched
            }
        }
    } else {
        ErrorAttribution::None
    };

    op.invoked += 1;

    if names.is_empty() {
        *op.parameters
            .entry(NONE_PARAMETER_KEY.to_string())
            .or_insert(0) += 1;
    } else {
        for name in names {
            if let Some(count) = op.parameters.get_mut(name) {
                *count += 1;
            }
        }
    }

    if !op.tests.contains(&record.node_id) {
        op.tests.insert(record.node_id.clone());
    }

    Ok(FoldOutcome::Aggregated(attribution))
}
