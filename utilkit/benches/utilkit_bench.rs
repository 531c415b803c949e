//! Benchmarks for log formatting and deferred settlement.

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use utilkit::deferred::Deferred;
use utilkit::log::{format_line, LogConfig, LogLevel, LogOutput, LogRegistry};
use utilkit::utils::hex_encode;

fn logging_benchmark(c: &mut Criterion) {
    let now = Utc::now();
    c.bench_function("format_line", |b| {
        b.iter(|| {
            format_line(
                black_box(&now),
                LogLevel::Info,
                Some("req-1"),
                Some("worker"),
                &"processed batch",
            )
        })
    });

    let registry = LogRegistry::new();
    registry.set_output(LogOutput::Silent);
    registry.set_level(LogLevel::Warn);
    let logger = registry.logger(LogConfig::default().with_context("bench"));
    c.bench_function("filtered_log", |b| {
        b.iter(|| logger.debug(black_box("dropped")))
    });
}

fn deferred_benchmark(c: &mut Criterion) {
    c.bench_function("deferred_resolve", |b| {
        b.iter(|| {
            let deferred = Deferred::<u64>::new();
            let promise = deferred.promise();
            deferred.resolve(black_box(7));
            promise.try_result()
        })
    });
}

fn helpers_benchmark(c: &mut Criterion) {
    c.bench_function("hex_encode", |b| {
        b.iter(|| hex_encode(black_box("Hello, World!")))
    });
}

criterion_group!(benches, logging_benchmark, deferred_benchmark, helpers_benchmark);
criterion_main!(benches);
