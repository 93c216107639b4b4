// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_model::{AggregateReport, ServiceCoverage};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;
use tracing::debug;

use crate::RenderError;

pub const MARKDOWN_PREAMBLE: &str = "# Metric Collection Report of Integration Tests #\n\n\
**__Disclaimer__**: naive calculation of test coverage - if operation is called at least once, it is considered as 'covered'.\n";

const ITEM_CHECKED: &str = "- [X] ";
const ITEM_UNCHECKED: &str = "- [ ] ";
// The double space is part of the established report format.
const PARAMETERS_TITLE: &str = "parameters  hit";
const ERRORS_TITLE: &str = "errors hit";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub service: String,
    pub tier: &'static str,
    pub tested: usize,
    pub total: usize,
    pub percent: f64,
}

/// Per-service coverage, sorted by service name.
pub fn coverage_summary(report: &AggregateReport) -> Result<Vec<ServiceSummary>, RenderError> {
    report
        .services()
        .map(|(name, svc)| summarize(name, svc))
        .collect()
}

fn summarize(name: &str, svc: &ServiceCoverage) -> Result<ServiceSummary, RenderError> {
    let ratio = svc.coverage();
    let percent = ratio
        .percent()
        .ok_or_else(|| RenderError::EmptyService(name.to_string()))?;
    Ok(ServiceSummary {
        service: name.to_string(),
        tier: svc.service_attributes.tier_label(),
        tested: ratio.tested,
        total: ratio.total,
        percent,
    })
}

fn item(out: &mut String, indent: &str, checked: bool, label: &str) {
    let mark = if checked { ITEM_CHECKED } else { ITEM_UNCHECKED };
    let _ = writeln!(out, "{indent}{mark}{label}");
}

fn details_block(out: &mut String, title: &str, counts: &BTreeMap<String, u64>) {
    let _ = write!(out, "  <details><summary>{title}</summary>\n\n");
    for (name, count) in counts {
        item(out, "  ", *count > 0, name);
    }
    out.push_str("  </details>\n");
}

/// Markdown block for one service: heading, tier line and a collapsible
/// operation checklist titled with the coverage percentage.
pub fn render_service_block(name: &str, svc: &ServiceCoverage) -> Result<String, RenderError> {
    let summary = summarize(name, svc)?;
    let mut operations = String::new();
    for (op_name, op) in &svc.operations {
        item(&mut operations, "", op.is_covered(), op_name);
        if !op.parameters.is_empty() {
            details_block(&mut operations, PARAMETERS_TITLE, &op.parameters);
        }
        if !op.errors.is_empty() {
            details_block(&mut operations, ERRORS_TITLE, op.errors.as_map());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "## {name} ##");
    let _ = writeln!(out, "{}", summary.tier);
    let _ = write!(
        out,
        "<details><summary>{:.2}% test coverage</summary>\n\n{operations}\n</details>\n",
        summary.percent
    );
    Ok(out)
}

/// Whole report as one string, identical to what [`write_markdown_report`] appends.
pub fn render_markdown(report: &AggregateReport) -> Result<String, RenderError> {
    let mut out = String::new();
    for (idx, (name, svc)) in report.services().enumerate() {
        if idx == 0 {
            out.push_str(MARKDOWN_PREAMBLE);
        }
        out.push_str(&render_service_block(name, svc)?);
        out.push('\n');
    }
    Ok(out)
}

/// Appends the report to `path` one service block at a time.
///
/// Every service is checked for a defined coverage percentage before the
/// first write, so a rejected report leaves the file untouched.
pub fn write_markdown_report(path: &Path, report: &AggregateReport) -> Result<(), RenderError> {
    coverage_summary(report)?;
    let io_error = |e: std::io::Error| RenderError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    for (idx, (name, svc)) in report.services().enumerate() {
        let mut block = String::new();
        if idx == 0 {
            block.push_str(MARKDOWN_PREAMBLE);
        }
        block.push_str(&render_service_block(name, svc)?);
        block.push('\n');
        file.write_all(block.as_bytes()).map_err(io_error)?;
        debug!(service = name, "markdown block written");
    }
    file.flush().map_err(io_error)
}
