//! Synthesis Operations Benchmarks
//!
//! Benchmarks for descriptor extraction, strategy generation, scoring and
//! dialect rendering.
//!
//! Run with: `cargo bench --bench synthesis_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pinpoint::prelude::*;
use pinpoint::{generate_all, specificity};

const SNAPSHOT: &str = r#"{
    "tag": "body",
    "children": [
        {"tag": "main", "attributes": {"class": "layout wide"}, "children": [
            {"tag": "section", "children": [
                {"tag": "label", "attributes": {"for": "q"}, "text": "Search"},
                {"tag": "input", "attributes": {"id": "q", "type": "search", "placeholder": "Find…"}},
                {"tag": "button", "attributes": {"data-testid": "go"}, "text": "Go"},
                {"tag": "span"}, {"tag": "span"}, {"tag": "span"}
            ]}
        ]}
    ]
}"#;

fn descriptors() -> Vec<(&'static str, ElementDescriptor)> {
    let tree = DomTree::from_json(SNAPSHOT).unwrap();
    [
        ("labelled_input", &[0, 0, 1][..]),
        ("test_id_button", &[0, 0, 2][..]),
        ("anonymous_span", &[0, 0, 5][..]),
    ]
    .into_iter()
    .map(|(name, path)| (name, extract(&tree.at_path(path).unwrap()).unwrap()))
    .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let tree = DomTree::from_json(SNAPSHOT).unwrap();
    let input = tree.find_by_id("q").unwrap();

    c.bench_function("extract_labelled_input", |bench| {
        bench.iter(|| {
            let descriptor = extract(black_box(&input)).unwrap();
            black_box(descriptor);
        });
    });
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all");

    for (name, descriptor) in descriptors() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &descriptor, |bench, d| {
            bench.iter(|| black_box(generate_all(black_box(d))));
        });
    }

    group.finish();
}

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for (name, descriptor) in descriptors() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &descriptor, |bench, d| {
            bench.iter(|| black_box(synthesize(black_box(d)).unwrap()));
        });
    }

    group.finish();
}

fn bench_specificity(c: &mut Criterion) {
    let mut group = c.benchmark_group("specificity");

    let paths = vec![
        ("id", "#submit-btn"),
        ("nth_child", "span:nth-child(3)"),
        ("deep", "main.layout.wide > section > span:nth-child(3)"),
        ("escaped", "div.md\\:flex > div.\\32 col"),
        ("attribute", "[data-testid=\"a.b#c\"]"),
    ];

    for (name, path) in paths {
        group.bench_with_input(BenchmarkId::from_parameter(name), &path, |bench, p| {
            bench.iter(|| black_box(specificity(black_box(p))));
        });
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let sets: Vec<_> = descriptors()
        .into_iter()
        .map(|(name, d)| (name, synthesize(&d).unwrap()))
        .collect();

    for dialect in Dialect::ALL {
        for (name, set) in &sets {
            group.bench_with_input(
                BenchmarkId::new(dialect.name(), name),
                set,
                |bench, set| {
                    bench.iter(|| black_box(render(black_box(set), dialect)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extraction,
    bench_generation,
    bench_synthesis,
    bench_specificity,
    bench_rendering
);
criterion_main!(benches);
