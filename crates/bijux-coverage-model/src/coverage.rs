// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Index;

use crate::serde_helpers::{map_is_empty, set_is_empty};

/// Parameter key counting calls made without any parameter.
pub const NONE_PARAMETER_KEY: &str = "_none_";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceAttributes {
    pub pro: bool,
    pub community: bool,
}

impl ServiceAttributes {
    #[must_use]
    pub const fn new(pro: bool, community: bool) -> Self {
        Self { pro, community }
    }

    /// Derives tiers from plugin provider names: `default` is community, `pro` is pro.
    #[must_use]
    pub fn from_providers<S: AsRef<str>>(providers: &[S]) -> Self {
        let has = |name: &str| providers.iter().any(|p| p.as_ref() == name);
        Self {
            pro: has("pro"),
            community: has("default"),
        }
    }

    #[must_use]
    pub const fn tier_label(self) -> &'static str {
        if !self.pro {
            "community"
        } else if !self.community {
            "pro only"
        } else {
            "community, and pro features"
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationCoverage {
    pub invoked: u64,
    #[serde(default, skip_serializing_if = "map_is_empty")]
    pub parameters: BTreeMap<String, u64>,
    #[serde(default, skip_serializing_if = "ErrorCounts::is_empty")]
    pub errors: ErrorCounts,
    #[serde(default, skip_serializing_if = "set_is_empty")]
    pub tests: BTreeSet<String>,
}

impl OperationCoverage {
    #[must_use]
    pub fn seeded<P, E>(parameters: P, errors: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            invoked: 0,
            parameters: parameters.into_iter().map(|p| (p.into(), 0)).collect(),
            errors: ErrorCounts::seeded(errors),
            tests: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn is_covered(&self) -> bool {
        self.invoked > 0
    }
}

/// Error hit counts that remember the order in which names became known.
///
/// Catalog-declared names come first, in declaration order, followed by names
/// first seen as explicit exceptions. That order drives [`Self::first_named_in`];
/// serialization is a plain name-sorted map and equality compares counts only.
/// A deserialized value has no declaration order left, so it scans by name.
#[derive(Debug, Clone, Default)]
pub struct ErrorCounts {
    counts: BTreeMap<String, u64>,
    order: Vec<String>,
}

impl ErrorCounts {
    #[must_use]
    pub fn seeded<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut out = Self::default();
        for name in names {
            let name = name.into();
            if out.counts.insert(name.clone(), 0).is_none() {
                out.order.push(name);
            }
        }
        out
    }

    /// Adds one hit to `name`, registering it at the end of the scan order when new.
    pub fn record(&mut self, name: &str) -> u64 {
        if let Some(count) = self.counts.get_mut(name) {
            *count += 1;
            return *count;
        }
        self.counts.insert(name.to_string(), 1);
        self.order.push(name.to_string());
        1
    }

    /// First known name, in scan order, that occurs as a substring of `text`.
    #[must_use]
    pub fn first_named_in(&self, text: &str) -> Option<&str> {
        self.order
            .iter()
            .map(String::as_str)
            .find(|name| text.contains(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&u64> {
        self.counts.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

impl PartialEq for ErrorCounts {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for ErrorCounts {}

impl<'a> Index<&'a str> for ErrorCounts {
    type Output = u64;

    fn index(&self, name: &'a str) -> &u64 {
        &self.counts[name]
    }
}

impl Serialize for ErrorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.counts.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ErrorCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts = BTreeMap::<String, u64>::deserialize(deserializer)?;
        let order = counts.keys().cloned().collect();
        Ok(Self { counts, order })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCoverage {
    pub service_attributes: ServiceAttributes,
    #[serde(flatten)]
    pub operations: BTreeMap<String, OperationCoverage>,
}

impl ServiceCoverage {
    #[must_use]
    pub fn new(service_attributes: ServiceAttributes) -> Self {
        Self {
            service_attributes,
            operations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn coverage(&self) -> CoverageRatio {
        CoverageRatio {
            tested: self.operations.values().filter(|op| op.is_covered()).count(),
            total: self.operations.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageRatio {
    pub tested: usize,
    pub total: usize,
}

impl CoverageRatio {
    /// Percentage of covered operations; `None` for a service without operations.
    #[must_use]
    pub fn percent(self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.tested as f64 / self.total as f64 * 100.0)
    }
}

/// Coverage of every catalog service, keyed by service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateReport {
    services: BTreeMap<String, ServiceCoverage>,
}

impl AggregateReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_service(&mut self, name: impl Into<String>, coverage: ServiceCoverage) {
        self.services.insert(name.into(), coverage);
    }

    #[must_use]
    pub fn service(&self, name: &str) -> Option<&ServiceCoverage> {
        self.services.get(name)
    }

    #[must_use]
    pub fn operation(&self, service: &str, operation: &str) -> Option<&OperationCoverage> {
        self.services.get(service)?.operations.get(operation)
    }

    pub fn operation_mut(
        &mut self,
        service: &str,
        operation: &str,
    ) -> Option<&mut OperationCoverage> {
        self.services.get_mut(service)?.operations.get_mut(operation)
    }

    pub fn services(&self) -> impl Iterator<Item = (&str, &ServiceCoverage)> {
        self.services.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AggregateReport, ErrorCounts, OperationCoverage, ServiceAttributes, ServiceCoverage,
    };

    #[test]
    fn tier_labels_follow_attribute_combinations() {
        assert_eq!(ServiceAttributes::new(false, true).tier_label(), "community");
        assert_eq!(ServiceAttributes::new(true, false).tier_label(), "pro only");
        assert_eq!(
            ServiceAttributes::new(true, true).tier_label(),
            "community, and pro features"
        );
        assert_eq!(
            ServiceAttributes::from_providers(&["default", "pro"]),
            ServiceAttributes::new(true, true)
        );
        assert_eq!(
            ServiceAttributes::from_providers(&["pro"]),
            ServiceAttributes::new(true, false)
        );
    }

    #[test]
    fn coverage_ratio_counts_invoked_operations() {
        let mut svc = ServiceCoverage::new(ServiceAttributes::new(false, true));
        svc.operations
            .insert("A".to_string(), OperationCoverage::default());
        let mut hit = OperationCoverage::default();
        hit.invoked = 3;
        svc.operations.insert("B".to_string(), hit);
        let ratio = svc.coverage();
        assert_eq!((ratio.tested, ratio.total), (1, 2));
        assert_eq!(ratio.percent(), Some(50.0));
        assert_eq!(ServiceCoverage::default().coverage().percent(), None);
    }

    #[test]
    fn operation_lookup_misses_are_none() {
        let mut report = AggregateReport::new();
        report.insert_service("S1", ServiceCoverage::default());
        assert!(report.operation("S1", "Op1").is_none());
        assert!(report.operation_mut("S2", "Op1").is_none());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn error_scan_follows_declaration_then_first_sighting() {
        let mut errors = ErrorCounts::seeded(["ResourceNotFound", "NotFound"]);
        assert_eq!(
            errors.first_named_in("ResourceNotFound: queue missing"),
            Some("ResourceNotFound")
        );
        assert_eq!(errors.record("Throttled"), 1);
        assert_eq!(errors.record("Throttled"), 2);
        assert_eq!(errors.first_named_in("Throttled and NotFound"), Some("NotFound"));
        assert_eq!(errors.first_named_in("Throttled"), Some("Throttled"));

        let encoded = serde_json::to_string(&errors).expect("encode");
        assert_eq!(encoded, r#"{"NotFound":0,"ResourceNotFound":0,"Throttled":2}"#);
        let decoded: ErrorCounts = serde_json::from_str(&encoded).expect("decode");
        assert_eq!(decoded, errors);
    }
}
