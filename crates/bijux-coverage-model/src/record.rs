// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Column contract of `metric-report-raw-data-*.csv` files.
pub const RAW_DATA_HEADER: [&str; RAW_DATA_FIELD_COUNT] = [
    "node_id",
    "service",
    "operation",
    "parameters",
    "exception",
    "response_code",
    "response_data",
    "xfail",
];

pub const RAW_DATA_FIELD_COUNT: usize = 8;

/// One instrumented service call recorded by a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ObservationRecord {
    pub node_id: String,
    pub service: String,
    pub operation: String,
    /// Comma-separated parameter names, empty when the call had none.
    pub parameters: String,
    pub exception: String,
    pub response_code: Option<u16>,
    pub response_data: String,
    pub xfail: bool,
}

impl ObservationRecord {
    #[must_use]
    pub fn new(node_id: &str, service: &str, operation: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            service: service.to_string(),
            operation: operation.to_string(),
            parameters: String::new(),
            exception: String::new(),
            response_code: None,
            response_data: String::new(),
            xfail: false,
        }
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: &str) -> Self {
        self.parameters = parameters.to_string();
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: &str) -> Self {
        self.exception = exception.to_string();
        self
    }

    #[must_use]
    pub fn with_response(mut self, code: u16, data: &str) -> Self {
        self.response_code = Some(code);
        self.response_data = data.to_string();
        self
    }

    #[must_use]
    pub fn with_xfail(mut self, xfail: bool) -> Self {
        self.xfail = xfail;
        self
    }

    /// Checks a header row against [`RAW_DATA_HEADER`].
    pub fn check_header<S: AsRef<str>>(fields: &[S]) -> Result<(), ModelError> {
        let found: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        if found != RAW_DATA_HEADER {
            return Err(ModelError::HeaderMismatch {
                expected: RAW_DATA_HEADER.join(","),
                found: found.join(","),
            });
        }
        Ok(())
    }

    /// Decodes one positional raw data row.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, ModelError> {
        if fields.len() != RAW_DATA_FIELD_COUNT {
            return Err(ModelError::FieldCount {
                expected: RAW_DATA_FIELD_COUNT,
                found: fields.len(),
            });
        }
        let field = |idx: usize| fields[idx].as_ref();
        Ok(Self {
            node_id: field(0).to_string(),
            service: field(1).to_string(),
            operation: field(2).to_string(),
            parameters: field(3).to_string(),
            exception: field(4).to_string(),
            response_code: parse_response_code(field(5))?,
            response_data: field(6).to_string(),
            xfail: parse_xfail(field(7))?,
        })
    }

    /// Parameter names touched by the call; empty when the call had none.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        let raw = self.parameters.as_str();
        raw.split(',').filter(move |_| !raw.is_empty())
    }

    #[must_use]
    pub fn is_error_response(&self) -> bool {
        self.response_code.is_some_and(|code| code >= 300)
    }
}

fn parse_response_code(raw: &str) -> Result<Option<u16>, ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u16>()
        .map(Some)
        .map_err(|_| ModelError::InvalidField {
            field: "response_code",
            value: raw.to_string(),
            reason: "expected an integer status code",
        })
}

fn parse_xfail(raw: &str) -> Result<bool, ModelError> {
    match raw.trim() {
        "True" | "true" => Ok(true),
        "False" | "false" | "" => Ok(false),
        _ => Err(ModelError::InvalidField {
            field: "xfail",
            value: raw.to_string(),
            reason: "expected True or False",
        }),
    }
}
