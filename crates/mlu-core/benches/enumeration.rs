//! Simple-path enumeration cost on complete graphs.
//!
//! Unbounded enumeration on K_n grows factorially; the bounded runs show how
//! much `max_hops` buys back.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mlu_core::{NodeId, Topology, enumerate_simple_paths, find_optimal_path};

fn complete_graph(n: u64) -> Topology {
    let mut topology = Topology::new();
    for u in 0..n {
        for v in (u + 1)..n {
            topology
                .add_link(u, v, ((u + v) % 5) as f64)
                .expect("non-negative load");
        }
    }
    topology
}

fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_simple_paths");
    for n in [5u64, 6, 7, 8] {
        let topology = complete_graph(n);
        let (source, target) = (NodeId::from(0u64), NodeId::from(n - 1));

        group.bench_with_input(BenchmarkId::new("unbounded", n), &topology, |b, t| {
            b.iter(|| enumerate_simple_paths(black_box(t), &source, &target, None))
        });
        group.bench_with_input(BenchmarkId::new("max_hops_3", n), &topology, |b, t| {
            b.iter(|| enumerate_simple_paths(black_box(t), &source, &target, Some(3)))
        });
    }
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let topology = complete_graph(8);
    let (source, target) = (NodeId::from(0u64), NodeId::from(7u64));
    c.bench_function("find_optimal_path_k8_max_hops_4", |b| {
        b.iter(|| find_optimal_path(black_box(&topology), &source, &target, 2.0, Some(4)))
    });
}

criterion_group!(benches, bench_enumeration, bench_selection);
criterion_main!(benches);
