// SPDX-License-Identifier: Apache-2.0

use bijux_coverage_ingest::{aggregate_recorded_raw_data, AggregateOptions, JsonServiceCatalog};
use criterion::{criterion_group, criterion_main, Criterion};
use std::fmt::Write as _;
use std::fs;
use tempfile::tempdir;

const OPERATIONS: usize = 200;
const ROWS: usize = 20_000;

fn catalog() -> JsonServiceCatalog {
    let mut ops = String::new();
    for i in 0..OPERATIONS {
        if i > 0 {
            ops.push(',');
        }
        let _ = write!(
            ops,
            r#""Op{i}": {{"parameters": ["Name", "Tags"], "errors": ["NotFound", "Conflict{i}"]}}"#
        );
    }
    JsonServiceCatalog::from_json_str(&format!(
        r#"{{"services": {{"bench": {{"providers": ["default"], "operations": {{{ops}}}}}}}}}"#
    ))
    .expect("catalog")
}

fn bench_aggregate_throughput(c: &mut Criterion) {
    let tmp = tempdir().expect("tempdir");
    let mut body =
        String::from("node_id,service,operation,parameters,exception,response_code,response_data,xfail\n");
    for i in 0..ROWS {
        let op = i % OPERATIONS;
        let row = match i % 4 {
            0 => format!("t{i},bench,Op{op},Name,,200,,False\n"),
            1 => format!("t{i},bench,Op{op},\"Name,Tags\",NotFound,404,,False\n"),
            2 => format!("t{i},bench,Op{op},,,409,Conflict{op} on write,False\n"),
            _ => format!("t{i},bench,Op{op},,,200,,True\n"),
        };
        body.push_str(&row);
    }
    fs::write(tmp.path().join("metric-report-raw-data-bench.csv"), body).expect("write");
    let catalog = catalog();
    let opts = AggregateOptions {
        base_dir: tmp.path().to_path_buf(),
        ..AggregateOptions::default()
    };

    c.bench_function("aggregate_20k_rows", |b| {
        b.iter(|| aggregate_recorded_raw_data(&catalog, &opts).expect("aggregate"))
    });
}

criterion_group!(benches, bench_aggregate_throughput);
criterion_main!(benches);
