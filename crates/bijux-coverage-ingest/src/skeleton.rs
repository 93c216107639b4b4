// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::AggregateReport;
use serde::Serialize;
use tracing::warn;

use crate::catalog::ServiceCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedService {
    pub service: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct CoverageSkeleton {
    pub report: AggregateReport,
    pub skipped: Vec<SkippedService>,
}

/// Builds the zero-initialized coverage structure for every loadable catalog service.
///
/// Services whose catalog entry fails to load are skipped with a warning.
pub fn build_coverage_skeleton<C: ServiceCatalog + ?Sized>(catalog: &C) -> CoverageSkeleton {
    let mut skeleton = CoverageSkeleton::default();
    for service in catalog.service_names() {
        match catalog.lookup(&service) {
            Ok(spec) => skeleton
                .report
                .insert_service(service, spec.empty_coverage()),
            Err(err) => {
                warn!(service = %service, error = %err, "cannot load service, skipping");
                skeleton.skipped.push(SkippedService {
                    service,
                    reason: err.to_string(),
                });
            }
        }
    }
    skeleton
}

#[cfg(test)]
mod tests {
    use super::build_coverage_skeleton;
    use crate::catalog::JsonServiceCatalog;

    #[test]
    fn every_declared_operation_is_present_and_bad_entries_are_skipped() {
        let catalog = JsonServiceCatalog::from_json_str(
            r#"{"services": {
                "s3": {"providers": ["default"], "operations": {
                    "PutObject": {"parameters": ["Bucket", "Key"], "errors": ["NoSuchBucket"]},
                    "ListBuckets": {}
                }},
                "kinesis": {"providers": ["default"], "operations": {"Bad": {"params": []}}}
            }}"#,
        )
        .expect("catalog");
        let skeleton = build_coverage_skeleton(&catalog);
        assert_eq!(skeleton.report.len(), 1);
        assert_eq!(skeleton.skipped.len(), 1);
        assert_eq!(skeleton.skipped[0].service, "kinesis");

        let put = skeleton
            .report
            .operation("s3", "PutObject")
            .expect("PutObject");
        assert_eq!(put.invoked, 0);
        assert_eq!(put.parameters.len(), 2);
        assert_eq!(put.errors.get("NoSuchBucket"), Some(&0));
        let list = skeleton
            .report
            .operation("s3", "ListBuckets")
            .expect("ListBuckets");
        assert!(list.parameters.is_empty() && list.errors.is_empty());
    }
}
