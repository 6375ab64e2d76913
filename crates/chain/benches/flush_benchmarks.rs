use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use tracebuf_chain::{Logger, MemorySink, NoopSink, Severity};
use tracebuf_core::args;

fn buffered_chain(logger: &Arc<Logger>, entries: usize) {
    let root = logger.context().enter("bench");
    let child = root.enter("child");
    for i in 0..entries {
        let severity = if i + 1 == entries {
            Severity::Error
        } else {
            Severity::Debug
        };
        child.log(severity, args!["step", i]);
    }
    black_box(root.catch_info());
}

fn bench_buffer_and_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_and_flush");

    for entries in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(entries as u64));

        let quiet = Arc::new(Logger::default());
        group.bench_with_input(BenchmarkId::new("noop_sinks", entries), &entries, |b, &n| {
            b.iter(|| buffered_chain(&quiet, n))
        });

        let recording = Arc::new(Logger::default());
        let unified = MemorySink::new();
        recording.register_unified(unified.clone());
        recording.register_debug(NoopSink);
        group.bench_with_input(BenchmarkId::new("memory_unified", entries), &entries, |b, &n| {
            b.iter(|| {
                buffered_chain(&recording, n);
                unified.clear();
            })
        });
    }

    group.finish();
}

fn bench_standalone(c: &mut Criterion) {
    let logger = Arc::new(Logger::default());
    let cx = logger.context();
    c.bench_function("standalone_log", |b| {
        b.iter(|| cx.log(Severity::Info, args![black_box("hello"), black_box(42)]))
    });
}

criterion_group!(benches, bench_buffer_and_flush, bench_standalone);
criterion_main!(benches);
