//! Aggregation benchmarks on synthetic recent-trades windows.
//!
//! Run with: `cargo bench --package hlbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hlbars_aggregate::aggregate_ticks;
use hlbars_bench::{WindowConfig, synthetic_ticks, synthetic_trades};
use hlbars_format::{OutputFormat, ReportOptions};
use hlbars_store::{BarStore, SqliteBarStore};
use std::hint::black_box;

fn window_configs() -> Vec<(&'static str, WindowConfig)> {
    vec![
        (
            "quiet",
            WindowConfig {
                trades: 100,
                seconds: 60,
                shuffled: false,
            },
        ),
        ("typical", WindowConfig::default()),
        (
            "burst",
            WindowConfig {
                trades: 2_000,
                seconds: 5,
                shuffled: false,
            },
        ),
        (
            "unordered",
            WindowConfig {
                trades: 500,
                seconds: 60,
                shuffled: true,
            },
        ),
    ]
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for (name, config) in window_configs() {
        let ticks = synthetic_ticks(config);
        group.throughput(Throughput::Elements(ticks.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &ticks, |b, ticks| {
            b.iter(|| aggregate_ticks(black_box(ticks)).expect("aggregate"));
        });
    }

    group.finish();
}

fn normalize_benchmark(c: &mut Criterion) {
    let trades = synthetic_trades(WindowConfig::default());

    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(trades.len() as u64));
    group.bench_function("typical", |b| {
        b.iter(|| {
            black_box(&trades)
                .iter()
                .map(|t| t.normalize())
                .collect::<Result<Vec<_>, _>>()
        });
    });
    group.finish();
}

fn upsert_benchmark(c: &mut Criterion) {
    let bars =
        aggregate_ticks(&synthetic_ticks(WindowConfig::default())).expect("aggregate");
    let mut store = SqliteBarStore::in_memory().expect("in-memory store");

    c.bench_function("upsert_latest", |b| {
        let latest = bars.last().copied().expect("non-empty window");
        b.iter(|| store.upsert(black_box(&latest)).expect("upsert"));
    });
}

fn report_benchmark(c: &mut Criterion) {
    let bars = aggregate_ticks(&synthetic_ticks(WindowConfig {
        trades: 10_000,
        seconds: 3_600,
        shuffled: false,
    }))
    .expect("aggregate");

    let mut group = c.benchmark_group("report");
    group.throughput(Throughput::Elements(bars.len() as u64));
    for format in OutputFormat::all() {
        group.bench_with_input(BenchmarkId::from_parameter(format), &bars, |b, bars| {
            b.iter(|| {
                let mut out = Vec::with_capacity(bars.len() * 80);
                format
                    .write_bars(black_box(bars), &mut out, ReportOptions::default())
                    .expect("write");
                out
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    aggregate_benchmark,
    normalize_benchmark,
    upsert_benchmark,
    report_benchmark
);
criterion_main!(benches);
