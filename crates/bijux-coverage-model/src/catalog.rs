// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coverage::{OperationCoverage, ServiceAttributes, ServiceCoverage};

/// Declared shape of one operation as published by the service catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationSpec {
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl OperationSpec {
    #[must_use]
    pub fn new(parameters: Vec<String>, errors: Vec<String>) -> Self {
        Self { parameters, errors }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSpec {
    pub attributes: ServiceAttributes,
    pub operations: BTreeMap<String, OperationSpec>,
}

impl ServiceSpec {
    #[must_use]
    pub fn new(attributes: ServiceAttributes) -> Self {
        Self {
            attributes,
            operations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_operation(mut self, name: &str, spec: OperationSpec) -> Self {
        self.operations.insert(name.to_string(), spec);
        self
    }

    /// Zero-initialized coverage for every declared operation.
    #[must_use]
    pub fn empty_coverage(&self) -> ServiceCoverage {
        let mut coverage = ServiceCoverage::new(self.attributes);
        for (name, op) in &self.operations {
            coverage.operations.insert(
                name.clone(),
                OperationCoverage::seeded(op.parameters.iter().cloned(), op.errors.iter().cloned()),
            );
        }
        coverage
    }
}
