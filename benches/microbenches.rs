//! Criterion microbenches for the lowering pipeline.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Raw document JSON parsing
//! - The full lowering pipeline over a realistic screen
//! - Repeated-style extraction over a wide synthetic tree

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use framelift::normalize::NormalizeOptions;
use framelift::pipeline::lower;
use framelift::raw::io_json::from_json_str;
use framelift::raw::RawNode;

// Include test fixtures at compile time (no file I/O during benchmark)
const CHECKOUT_FIXTURE: &str = include_str!("../tests/fixtures/checkout_screen.json");
const MODAL_FIXTURE: &str = include_str!("../tests/fixtures/modal_screen.json");

/// Benchmark raw document parsing from string.
fn bench_raw_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_parse");
    group.throughput(Throughput::Bytes(CHECKOUT_FIXTURE.len() as u64));

    group.bench_function("from_json_str", |b| {
        b.iter(|| {
            let raw = from_json_str(black_box(CHECKOUT_FIXTURE)).unwrap();
            black_box(raw)
        })
    });

    group.finish();
}

/// Benchmark the full pipeline over the checkout fixture.
fn bench_lower_checkout(c: &mut Criterion) {
    let raw = from_json_str(CHECKOUT_FIXTURE).expect("fixture should parse");
    let opts = NormalizeOptions::default();

    let mut group = c.benchmark_group("lower");
    group.bench_function("checkout_screen", |b| {
        b.iter(|| {
            let output = lower(black_box(&raw), &opts);
            black_box(output)
        })
    });

    group.bench_function("modal_screen", |b| {
        let raw = from_json_str(MODAL_FIXTURE).expect("fixture should parse");
        b.iter(|| {
            let output = lower(black_box(&raw), &opts);
            black_box(output)
        })
    });

    group.finish();
}

/// Benchmark lowering a wide tree of identical rows, the shape that
/// stresses fingerprint grouping and style dedup.
fn bench_lower_wide_tree(c: &mut Criterion) {
    let raw = wide_tree(200);
    let opts = NormalizeOptions::default();

    let mut group = c.benchmark_group("lower");
    group.throughput(Throughput::Elements(200));
    group.bench_function("wide_tree_200_rows", |b| {
        b.iter(|| {
            let output = lower(black_box(&raw), &opts);
            black_box(output)
        })
    });

    group.finish();
}

fn wide_tree(rows: usize) -> RawNode {
    let row_json = |i: usize| {
        format!(
            r#"{{
                "id": "row-{i}",
                "name": "Row",
                "type": "FRAME",
                "cornerRadius": 8,
                "strokes": [{{"type": "SOLID", "color": {{"r": 0.9, "g": 0.9, "b": 0.9, "a": 1}}}}],
                "absoluteBoundingBox": {{"x": 0, "y": {y}, "width": 343, "height": 56}},
                "children": [
                    {{"id": "label-{i}", "name": "Label", "type": "TEXT", "characters": "Row {i}",
                      "absoluteBoundingBox": {{"x": 12, "y": {ty}, "width": 100, "height": 20}}}}
                ]
            }}"#,
            i = i,
            y = i * 64,
            ty = i * 64 + 18,
        )
    };

    let children: Vec<String> = (0..rows).map(row_json).collect();
    let json = format!(
        r#"{{
            "id": "root", "name": "Long List", "type": "FRAME",
            "absoluteBoundingBox": {{"x": 0, "y": 0, "width": 343, "height": {h}}},
            "children": [{children}]
        }}"#,
        h = rows * 64,
        children = children.join(","),
    );
    from_json_str(&json).expect("synthetic tree should parse")
}

criterion_group!(
    benches,
    bench_raw_parse,
    bench_lower_checkout,
    bench_lower_wide_tree,
);
criterion_main!(benches);
