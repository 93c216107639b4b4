// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}

#[cfg(test)]
mod tests {
    use super::{ExitCode, MachineError};

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::Usage as u8, 2);
        assert_eq!(ExitCode::Validation as u8, 3);
        assert_eq!(ExitCode::DependencyFailure as u8, 4);
        assert_eq!(ExitCode::Internal as u8, 10);
        assert_eq!(ExitCode::DependencyFailure.as_str(), "dependency_failure");
    }

    #[test]
    fn machine_error_serializes_details_sorted() {
        let err = MachineError::new("validation_error", "bad row")
            .with_detail("path", "a.csv")
            .with_detail("line", "3");
        let encoded = serde_json::to_string(&err).expect("encode");
        assert_eq!(
            encoded,
            r#"{"code":"validation_error","message":"bad row","details":{"line":"3","path":"a.csv"}}"#
        );
        assert_eq!(err.to_string(), "validation_error: bad row");
    }
}
