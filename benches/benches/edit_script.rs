//! Benchmarks for the greedy Myers edit-script computer
//!
//! Performance-critical paths:
//! - `compute_edit_script`: forward search plus backtracking, O((N+M)·D)
//! - `edit_distance`: forward search only

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use seqdiff::edit::{compute_edit_script, edit_distance};

/// Deterministic pseudo-random sequence with `percent` of its entries rewritten.
fn perturbed(len: usize, percent: usize) -> (Vec<u32>, Vec<u32>) {
    let old: Vec<u32> = (0..len as u32).collect();
    let mut state = 0x2545_f491_u32;
    let new = old
        .iter()
        .map(|&value| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            if (state >> 8) as usize % 100 < percent {
                value + len as u32
            } else {
                value
            }
        })
        .collect();
    (old, new)
}

fn bench_compute_edit_script(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit/compute_edit_script");

    for len in [100usize, 1_000, 5_000] {
        let (old, new) = perturbed(len, 5);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &(old, new), |b, (old, new)| {
            b.iter(|| compute_edit_script(black_box(old), black_box(new)));
        });
    }

    group.finish();
}

fn bench_edit_distance_by_difference(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit/edit_distance");

    // Cost grows with D, the number of differences.
    for percent in [0usize, 1, 10, 50] {
        let (old, new) = perturbed(2_000, percent);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{percent}pct")),
            &(old, new),
            |b, (old, new)| b.iter(|| edit_distance(black_box(old), black_box(new))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_edit_script, bench_edit_distance_by_difference);
criterion_main!(benches);
