//! Performance benchmarks for quickverse.
//!
//! Run with: cargo bench
//!
//! Target performance:
//! - Selector canonicalization: < 1µs
//! - Cached verse read: < 10µs

use std::sync::Arc;

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quickverse::provider::selector::{canonicalize, LatestPointer};
use quickverse::provider::{
    EngineOptions, FetchError, RemoteTextSource, UpdateBus, VerseSetData, ViewEngine,
};

struct StaticSource;

#[async_trait]
impl RemoteTextSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, key: &str) -> Result<String, FetchError> {
        Ok(format!("text of {key}"))
    }
}

/// Benchmark selector canonicalization.
fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    let latest = LatestPointer::default();

    let selectors = [
        ("reference", "Romans 1:16"),
        ("latest_alias", "latest"),
        ("long_reference", "1 Corinthians 13:4-8"),
    ];

    for (name, selector) in selectors {
        group.bench_with_input(BenchmarkId::from_parameter(name), &selector, |b, selector| {
            b.iter(|| black_box(canonicalize(black_box(selector), &latest)))
        });
    }

    group.finish();
}

/// Benchmark reads served from the cache.
fn bench_cached_reads(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let engine = ViewEngine::new(
        Arc::new(StaticSource),
        UpdateBus::new("bench.provider"),
        EngineOptions::default(),
    );

    runtime.block_on(async {
        engine.get("john 3:16").await;
        engine.set("romans 1:16", VerseSetData::heresy("changed")).await;
    });

    let mut group = c.benchmark_group("cached_read");

    group.bench_function("fetched", |b| {
        b.iter(|| runtime.block_on(engine.get(black_box("John 3:16"))))
    });

    group.bench_function("mutated_with_banner", |b| {
        b.iter(|| runtime.block_on(engine.get(black_box("Romans 1:16"))))
    });

    group.bench_function("latest_alias", |b| {
        b.iter(|| runtime.block_on(engine.get(black_box("latest"))))
    });

    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_cached_reads);
criterion_main!(benches);
