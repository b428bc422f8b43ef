//! Benchmark for OrderedTree vs standard BTreeMap.
//!
//! Compares the AVL-backed OrderedTree against Rust's standard BTreeMap for
//! insertion, lookup, removal and in-order iteration.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ordered_tree::OrderedTree;
use std::collections::BTreeMap;

/// Deterministic scrambled key order (multiplicative hashing modulo size).
fn scrambled(size: i32) -> Vec<i32> {
    (0..size)
        .map(|index| (index.wrapping_mul(7919)).rem_euclid(size))
        .collect()
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        // Ascending keys force a rotation on almost every insert
        group.bench_with_input(
            BenchmarkId::new("OrderedTree/ascending", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut tree = OrderedTree::new();
                    for index in 0..size {
                        tree.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap/ascending", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for index in 0..size {
                        map.insert(black_box(index), black_box(index * 2));
                    }
                    black_box(map)
                });
            },
        );

        let keys = scrambled(size);

        group.bench_with_input(
            BenchmarkId::new("OrderedTree/scrambled", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut tree = OrderedTree::new();
                    for &key in keys {
                        tree.insert(black_box(key), black_box(key));
                    }
                    black_box(tree)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("BTreeMap/scrambled", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut map = BTreeMap::new();
                    for &key in keys {
                        map.insert(black_box(key), black_box(key));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// search Benchmark
// =============================================================================

fn benchmark_search(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("search");

    for size in [100, 1000, 10000] {
        let tree: OrderedTree<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(BenchmarkId::new("OrderedTree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for index in 0..size {
                    black_box(tree.search(black_box(&index)).ok());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                for index in 0..size {
                    black_box(standard_map.get(black_box(&index)));
                }
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [100, 1000, 10000] {
        let tree: OrderedTree<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let keys = scrambled(size);

        group.bench_with_input(BenchmarkId::new("OrderedTree", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for key in keys {
                        black_box(tree.remove(black_box(key)));
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter_batched(
                || standard_map.clone(),
                |mut map| {
                    for key in keys {
                        black_box(map.remove(black_box(key)));
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [100, 1000, 10000] {
        let tree: OrderedTree<i32, i32> = (0..size).map(|index| (index, index)).collect();
        let standard_map: BTreeMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(BenchmarkId::new("OrderedTree", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = tree.values().sum();
                black_box(sum)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("OrderedTree/pre_order", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let sum: i32 = tree.pre_order().map(|(_, value)| value).sum();
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: i32 = standard_map.values().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_search,
    benchmark_remove,
    benchmark_iteration
);

criterion_main!(benches);
