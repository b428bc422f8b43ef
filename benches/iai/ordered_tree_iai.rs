//! IAI-Callgrind benchmark for OrderedTree construction and removal.
//!
//! Measures instruction counts for building a tree from ascending versus
//! scrambled keys, and for draining it again.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use ordered_tree::OrderedTree;
use std::hint::black_box;

fn setup_ascending(size: i32) -> Vec<i32> {
    (0..size).collect()
}

fn setup_scrambled(size: i32) -> Vec<i32> {
    (0..size)
        .map(|index| (index.wrapping_mul(7919)).rem_euclid(size))
        .collect()
}

fn setup_tree(size: i32) -> (OrderedTree<i32, i32>, Vec<i32>) {
    let tree = (0..size).map(|index| (index, index)).collect();
    (tree, setup_scrambled(size))
}

// insert benchmarks
#[library_benchmark]
#[bench::ascending_1000(setup_ascending(1000))]
#[bench::ascending_10000(setup_ascending(10000))]
#[bench::scrambled_1000(setup_scrambled(1000))]
#[bench::scrambled_10000(setup_scrambled(10000))]
fn insert(keys: Vec<i32>) -> OrderedTree<i32, i32> {
    let mut tree = OrderedTree::new();
    for key in black_box(keys) {
        tree.insert(key, key);
    }
    black_box(tree)
}

// remove benchmarks
#[library_benchmark]
#[bench::size_1000(setup_tree(1000))]
#[bench::size_10000(setup_tree(10000))]
fn remove(input: (OrderedTree<i32, i32>, Vec<i32>)) -> OrderedTree<i32, i32> {
    let (mut tree, keys) = input;
    for key in black_box(keys) {
        tree.remove(&key);
    }
    black_box(tree)
}

// search benchmarks
#[library_benchmark]
#[bench::size_1000(setup_tree(1000))]
#[bench::size_10000(setup_tree(10000))]
fn search(input: (OrderedTree<i32, i32>, Vec<i32>)) -> usize {
    let (tree, keys) = input;
    black_box(keys.iter().filter(|key| tree.search(key).is_ok()).count())
}

library_benchmark_group!(
    name = ordered_tree_group;
    benchmarks = insert, remove, search
);

main!(library_benchmark_groups = ordered_tree_group);
