//! Benchmarks for template driven row transformation
//!
//! Copyright (c) 2025 Rowform Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowform_core::{template_from_value, Row, RowTransformer};
use serde_json::json;

fn create_template() -> RowTransformer {
    let template = template_from_value(json!([
        {"field": "id", "name": "ID", "transformations": [{"type": "generate-uuid", "version": "v4"}]},
        {"field": "name", "name": "Name", "transformations": [
            {"type": "findreplace", "find": "\\s+", "replace": " "},
            {"type": "string", "changeCase": "capitalCase"}
        ]},
        {"field": "gender", "name": "Gender", "transformations": [
            {"type": "substitution", "mapping": {"M": "Male", "F": "Female"}}
        ]},
        {"field": "dob", "name": "Birthday", "transformations": [
            {"type": "date", "inputFormat": "yyyy-MM-dd", "outputFormat": "MM/dd/yyyy"}
        ]},
        {"field": "phone", "name": "Phone", "transformations": [
            {"type": "phone-number", "countryCode": "US", "outputFormat": "national"}
        ]},
        {"field": "plain", "name": "Plain"}
    ]))
    .expect("benchmark template");

    RowTransformer::new(template)
}

fn create_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let row = json!({
                "id": i,
                "name": format!("user   number {}", i),
                "gender": if i % 2 == 0 { "M" } else { "F" },
                "dob": format!("19{:02}-0{}-1{}", i % 100, i % 9 + 1, i % 10),
                "phone": "213-373-4253",
                "plain": i,
                "unused": "x"
            });
            match row {
                serde_json::Value::Object(map) => map,
                _ => Row::new(),
            }
        })
        .collect()
}

fn bench_single_row(c: &mut Criterion) {
    let transformer = create_template();
    let rows = create_rows(1);

    c.bench_function("transform_row", |b| {
        b.iter(|| transformer.transform_row(black_box(&rows[0])))
    });
}

fn bench_row_batches(c: &mut Criterion) {
    let transformer = create_template();
    let mut group = c.benchmark_group("transform_batch");

    for size in [10, 100, 1000] {
        let rows = create_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| transformer.transform(black_box(rows)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_row, bench_row_batches);
criterion_main!(benches);
