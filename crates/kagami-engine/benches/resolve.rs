use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use kagami_engine::{
    ClassSpec, MemberIndex, MemberKind, MemberResolver, ResolutionCache, TraversalPolicy, TypeId,
    TypeRegistry,
};

/// Linear hierarchy of `depth + 1` classes. The root declares `origin`;
/// every level declares one field of its own.
fn deep_registry(depth: usize) -> (TypeRegistry, TypeId) {
    let mut registry = TypeRegistry::new();
    let int = registry.int_type();
    let mut current = registry
        .define_class(ClassSpec::new("Class0").field("origin", int))
        .unwrap();
    for level in 1..=depth {
        current = registry
            .define_class(
                ClassSpec::new(format!("Class{level}"))
                    .extends(current)
                    .field(format!("field{level}"), int),
            )
            .unwrap();
    }
    (registry, current)
}

fn bench_resolve_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_field");

    // Member at the far end of the chain: cost grows with depth
    for depth in [1usize, 8, 32] {
        let (registry, leaf) = deep_registry(depth);
        let resolver = MemberResolver::new(&registry);
        group.bench_with_input(BenchmarkId::new("root_member", depth), &depth, |b, _| {
            b.iter(|| {
                resolver
                    .resolve_field(
                        black_box(leaf),
                        black_box("origin"),
                        TraversalPolicy::default(),
                    )
                    .unwrap()
            });
        });
    }

    // Member on the leaf itself: first-match stops before the walk starts
    // climbing, so depth should not matter
    let (registry, leaf) = deep_registry(32);
    let resolver = MemberResolver::new(&registry);
    group.bench_with_input(BenchmarkId::new("leaf_member", 32), &32, |b, _| {
        b.iter(|| {
            resolver
                .resolve_field(
                    black_box(leaf),
                    black_box("field32"),
                    TraversalPolicy::default(),
                )
                .unwrap()
        });
    });

    group.finish();
}

fn bench_resolve_method(c: &mut Criterion) {
    let mut registry = TypeRegistry::new();
    let int = registry.int_type();
    let base = registry
        .define_class(
            ClassSpec::new("Base")
                .method("get", &[])
                .method("get", &[int])
                .method("set", &[int])
                .method("clear", &[]),
        )
        .unwrap();
    let derived = registry
        .define_class(ClassSpec::new("Derived").extends(base))
        .unwrap();
    let resolver = MemberResolver::new(&registry);

    c.bench_function("resolve_method_overloaded", |b| {
        b.iter(|| {
            resolver
                .resolve_method(
                    black_box(derived),
                    black_box("get"),
                    black_box(&[int]),
                    TraversalPolicy::default(),
                )
                .unwrap()
        });
    });
}

fn bench_enumerate_fields(c: &mut Criterion) {
    let (registry, leaf) = deep_registry(32);
    let mut group = c.benchmark_group("enumerate_fields");

    let cold = MemberIndex::new(&registry);
    group.bench_function("uncached", |b| {
        b.iter(|| {
            cold.members(
                black_box(leaf),
                MemberKind::Field,
                TraversalPolicy::default(),
            )
            .unwrap()
        });
    });

    let cache = Arc::new(ResolutionCache::new());
    let warm = MemberIndex::with_cache(&registry, cache);
    group.bench_function("cached", |b| {
        b.iter(|| {
            warm.members(
                black_box(leaf),
                MemberKind::Field,
                TraversalPolicy::default(),
            )
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_field,
    bench_resolve_method,
    bench_enumerate_fields
);

criterion_main!(benches);
