// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// CPU architecture a raw data file was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }

    /// Infers the architecture from a source path by substring match.
    ///
    /// `arm64` is tested before `amd64`.
    #[must_use]
    pub fn detect_from_path(path: &str) -> Option<Self> {
        if path.contains(Self::Arm64.as_str()) {
            Some(Self::Arm64)
        } else if path.contains(Self::Amd64.as_str()) {
            Some(Self::Amd64)
        } else {
            None
        }
    }

    #[must_use]
    pub fn matches_path(self, path: &str) -> bool {
        path.contains(self.as_str())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amd64" => Ok(Self::Amd64),
            "arm64" => Ok(Self::Arm64),
            other => Err(ModelError::UnknownArch(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Arch;

    #[test]
    fn arm64_wins_when_both_tokens_appear() {
        assert_eq!(
            Arch::detect_from_path("/runs/amd64/retry-arm64/metric-report-raw-data-1.csv"),
            Some(Arch::Arm64)
        );
        assert_eq!(
            Arch::detect_from_path("/runs/amd64/metric-report-raw-data-1.csv"),
            Some(Arch::Amd64)
        );
        assert_eq!(Arch::detect_from_path("/runs/x86/raw.csv"), None);
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!("arm64".parse::<Arch>(), Ok(Arch::Arm64));
        assert!("arch64".parse::<Arch>().is_err());
        assert!("AMD64".parse::<Arch>().is_err());
    }
}
