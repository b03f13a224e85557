//! Benchmarks for the reconciliation engine
//!
//! Performance-critical paths:
//! - `reconcile`: middle-snake search plus status tables
//! - move detection: the backward scan for partners of unmatched items
//! - `DiffResult::updates`: dispatch through the batcher

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use seqdiff::reconcile::reconcile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    id: u32,
    revision: u32,
}

/// A list of rows and a shuffled, edited copy of it.
fn snapshots(len: usize) -> (Vec<Row>, Vec<Row>) {
    let old: Vec<Row> = (0..len as u32).map(|id| Row { id, revision: 0 }).collect();
    let mut new = old.clone();
    let mut state = 0x9e37_79b9_u32;
    let mut next = |bound: usize| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as usize % bound
    };

    for _ in 0..len / 20 {
        let from = next(new.len());
        let row = new.remove(from);
        let to = next(new.len() + 1);
        new.insert(to, row);
    }
    for _ in 0..len / 20 {
        let at = next(new.len());
        new[at].revision += 1;
    }
    for i in 0..len / 50 {
        let at = next(new.len() + 1);
        new.insert(at, Row { id: len as u32 + i as u32, revision: 0 });
    }
    (old, new)
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile/reconcile");

    for len in [100usize, 1_000, 4_000] {
        let (old, new) = snapshots(len);
        group.throughput(Throughput::Elements(len as u64));
        for detect_moves in [false, true] {
            group.bench_with_input(
                BenchmarkId::new(if detect_moves { "moves" } else { "no_moves" }, len),
                &(&old, &new),
                |b, (old, new)| {
                    b.iter(|| {
                        reconcile(
                            black_box(old.as_slice()),
                            black_box(new.as_slice()),
                            |a, b| a.id == b.id,
                            |a, b| a == b,
                            detect_moves,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile/dispatch");

    for len in [1_000usize, 4_000] {
        let (old, new) = snapshots(len);
        let result = reconcile(&old, &new, |a, b| a.id == b.id, |a, b| a == b, true);
        group.bench_with_input(BenchmarkId::from_parameter(len), &result, |b, result| {
            b.iter(|| black_box(result).updates());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile, bench_dispatch);
criterion_main!(benches);
