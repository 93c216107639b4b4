// SPDX-License-Identifier: Apache-2.0

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    FieldCount { expected: usize, found: usize },
    HeaderMismatch { expected: String, found: String },
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    UnknownArch(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "raw data row has {found} fields, expected {expected}")
            }
            Self::HeaderMismatch { expected, found } => {
                write!(f, "raw data header mismatch: expected `{expected}`, found `{found}`")
            }
            Self::InvalidField {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} `{value}`: {reason}"),
            Self::UnknownArch(value) => {
                write!(f, "unknown architecture `{value}` (expected amd64 or arm64)")
            }
        }
    }
}

impl std::error::Error for ModelError {}
