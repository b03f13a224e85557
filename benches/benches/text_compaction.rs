//! Benchmarks for string compaction and assertion messages
//!
//! Performance-critical paths:
//! - `compact_diff`: shared prefix/suffix scan in chars
//! - `expected_but_was`: compaction plus whitespace escaping

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use seqdiff::report::expected_but_was;
use seqdiff::text::{MAX_CONTEXT_LENGTH, compact_diff};

fn pair(len: usize) -> (String, String) {
    let shared: String = "lorem ipsum dolor sit amet\n".chars().cycle().take(len).collect();
    (
        format!("{shared}expected\tvalue{shared}"),
        format!("{shared}actual value{shared}"),
    )
}

fn bench_compact_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("text/compact_diff");

    for len in [64usize, 1_024, 16_384] {
        let (old, new) = pair(len);
        group.throughput(Throughput::Bytes((old.len() + new.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &(old, new), |b, (old, new)| {
            b.iter(|| compact_diff(black_box(old), black_box(new), MAX_CONTEXT_LENGTH));
        });
    }

    group.finish();
}

fn bench_expected_but_was(c: &mut Criterion) {
    let (old, new) = pair(1_024);
    c.bench_function("text/expected_but_was", |b| {
        b.iter(|| expected_but_was(black_box(&old), black_box(&new), MAX_CONTEXT_LENGTH));
    });
}

criterion_group!(benches, bench_compact_diff, bench_expected_but_was);
criterion_main!(benches);
