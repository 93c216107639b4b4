// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_core::canonical::stable_json_pretty;
use bijux_coverage_model::AggregateReport;
use std::fs;
use std::path::Path;

use crate::RenderError;

/// Pretty JSON snapshot of the aggregate with every object's keys sorted.
pub fn render_json(report: &AggregateReport) -> Result<String, RenderError> {
    stable_json_pretty(report).map_err(|e| RenderError::Encode(e.to_string()))
}

pub fn write_json(path: &Path, report: &AggregateReport) -> Result<String, RenderError> {
    let text = render_json(report)?;
    fs::write(path, &text).map_err(|e| RenderError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use bijux_coverage_model::{
        AggregateReport, OperationSpec, ServiceAttributes, ServiceSpec,
    };

    #[test]
    fn snapshot_is_sorted_and_round_trips() {
        let spec = ServiceSpec::new(ServiceAttributes::new(false, true))
            .with_operation("Zeta", OperationSpec::default())
            .with_operation(
                "Alpha",
                OperationSpec::new(vec!["b".to_string(), "a".to_string()], vec![]),
            );
        let mut report = AggregateReport::new();
        report.insert_service("svc", spec.empty_coverage());

        let text = render_json(&report).expect("render");
        let alpha = text.find("\"Alpha\"").expect("Alpha");
        let zeta = text.find("\"Zeta\"").expect("Zeta");
        let attrs = text.find("\"service_attributes\"").expect("attributes");
        assert!(alpha < zeta && zeta < attrs);
        assert!(text.find("\"a\"").expect("a") < text.find("\"b\"").expect("b"));

        let decoded: AggregateReport = serde_json::from_str(&text).expect("decode");
        assert_eq!(decoded, report);
    }
}
