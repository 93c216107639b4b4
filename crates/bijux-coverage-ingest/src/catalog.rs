// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::{OperationSpec, ServiceAttributes, ServiceSpec};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Read-only view of the service specification catalog.
pub trait ServiceCatalog {
    /// Every service identifier the catalog knows about, in a stable order.
    fn service_names(&self) -> Vec<String>;

    fn lookup(&self, service: &str) -> Result<ServiceSpec, CatalogError>;
}

#[derive(Debug)]
#[non_exhaustive]
pub enum CatalogError {
    Io(String),
    Document(String),
    UnknownService(String),
    MalformedService { service: String, message: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(message) => write!(f, "cannot read service catalog: {message}"),
            Self::Document(message) => write!(f, "invalid service catalog document: {message}"),
            Self::UnknownService(service) => write!(f, "unknown service `{service}`"),
            Self::MalformedService { service, message } => {
                write!(f, "cannot load service `{service}`: {message}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl ServiceCatalog for BTreeMap<String, ServiceSpec> {
    fn service_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn lookup(&self, service: &str) -> Result<ServiceSpec, CatalogError> {
        self.get(service)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownService(service.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    services: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceDocument {
    providers: Vec<String>,
    #[serde(default)]
    operations: BTreeMap<String, OperationSpec>,
}

/// Catalog backed by a JSON document of the form
/// `{"services": {"<name>": {"providers": [...], "operations": {...}}}}`.
///
/// Service entries are decoded on lookup, so one malformed entry does not
/// prevent the others from loading.
#[derive(Debug, Clone)]
pub struct JsonServiceCatalog {
    services: BTreeMap<String, Value>,
}

impl JsonServiceCatalog {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument =
            serde_json::from_str(raw).map_err(|e| CatalogError::Document(e.to_string()))?;
        Ok(Self {
            services: doc.services,
        })
    }
}

impl ServiceCatalog for JsonServiceCatalog {
    fn service_names(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    fn lookup(&self, service: &str) -> Result<ServiceSpec, CatalogError> {
        let raw = self
            .services
            .get(service)
            .ok_or_else(|| CatalogError::UnknownService(service.to_string()))?;
        let doc = ServiceDocument::deserialize(raw).map_err(|e| CatalogError::MalformedService {
            service: service.to_string(),
            message: e.to_string(),
        })?;
        Ok(ServiceSpec {
            attributes: ServiceAttributes::from_providers(&doc.providers),
            operations: doc.operations,
        })
    }
}
