//! Hit-test performance benchmarks for O(log n) verification.
//!
//! The row lookup is a binary search over cached row tops, so hit-test time
//! should stay flat as the document grows; only the hit row is measured.
//!
//! Run with: cargo bench --bench hit_test

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rowview::model::StyleConfig;
use rowview::surface::HeadlessSurface;
use rowview::view_state::{HitTester, LayoutCache};

/// Rows of 40 characters, laid out with a 12px font and 2px spacing.
fn generate_layout(num_rows: usize) -> (Vec<String>, LayoutCache, HeadlessSurface) {
    let rows: Vec<String> = (0..num_rows)
        .map(|i| format!("{i:>8} the quick brown fox jumps over"))
        .collect();
    let mut surface = HeadlessSurface::new(800.0, 600.0);
    let mut cache = LayoutCache::new(StyleConfig::new("monospace", 12.0, 2.0));
    cache.rebuild_all(&rows, &mut surface);
    (rows, cache, surface)
}

/// Benchmark hit tests with varying row counts to verify O(log n) scaling.
fn benchmark_hit_test_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test_scaling");

    for num_rows in [1_000, 10_000, 100_000] {
        let (rows, cache, mut surface) = generate_layout(num_rows);
        let total_height = cache.document_height();
        let tester = HitTester::new(&cache, &rows);

        group.bench_with_input(BenchmarkId::new("locate", num_rows), &total_height, |b, &total| {
            b.iter(|| {
                for fraction in [0.0, 0.25, 0.5, 0.75, 0.999] {
                    surface.set_scroll(0.0, total * fraction);
                    let _result = tester.locate(black_box(120.0), black_box(7.0), &surface);
                }
            });
        });
    }

    group.finish();
}

/// Benchmark a single hit test at different positions in a 100k row document.
fn benchmark_hit_test_positions(c: &mut Criterion) {
    let (rows, cache, mut surface) = generate_layout(100_000);
    let total_height = cache.document_height();
    let tester = HitTester::new(&cache, &rows);

    let mut group = c.benchmark_group("hit_test_positions_100k");

    let positions = [
        ("start", 0.0),
        ("quarter", total_height / 4.0),
        ("middle", total_height / 2.0),
        ("three_quarters", total_height * 0.75),
        ("end", total_height - 14.0),
    ];

    for (name, scroll_top) in positions {
        surface.set_scroll(0.0, scroll_top);
        group.bench_function(BenchmarkId::new("position", name), |b| {
            b.iter(|| tester.locate(black_box(120.0), black_box(7.0), &surface));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(10));
    targets = benchmark_hit_test_scaling, benchmark_hit_test_positions
}

criterion_main!(benches);
