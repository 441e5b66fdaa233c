//! # Churn Benchmark
//!
//! Entities and components are created and destroyed every step in a
//! real simulation. This measures attach/detach and destroy under that
//! kind of churn, where swap-removal keeps storage dense.
//!
//! Run with: `cargo bench --package strata_core --bench churn_benchmark`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use strata_core::{Component, EntityId, Registry};

const ENTITY_COUNT: usize = 100_000;
const CHURN: usize = 10_000;

struct Bullet {
    ttl: u32,
}
impl Component for Bullet {}

struct Sprite(char);
impl Component for Sprite {}

fn spawn_bullets(registry: &mut Registry, count: usize) -> Vec<EntityId> {
    (0..count)
        .map(|_| {
            let id = registry.create();
            registry.add(id, Bullet { ttl: 3 });
            registry.add(id, Sprite('|'));
            id
        })
        .collect()
}

fn bench_toggle_component(c: &mut Criterion) {
    let mut registry = Registry::new();
    let ids = spawn_bullets(&mut registry, ENTITY_COUNT);

    c.bench_function("remove_add_sprite_10K", |b| {
        b.iter(|| {
            for id in ids.iter().step_by(ENTITY_COUNT / CHURN) {
                let sprite = registry.remove::<Sprite>(*id);
                registry.add(*id, Sprite(black_box(sprite.0)));
            }
        });
    });
}

fn bench_destroy_respawn(c: &mut Criterion) {
    let mut registry = Registry::new();
    let mut ids = spawn_bullets(&mut registry, ENTITY_COUNT);

    c.bench_function("destroy_respawn_10K", |b| {
        b.iter(|| {
            for id in ids.iter_mut().take(CHURN) {
                registry.destroy(*id);
                *id = registry.create();
                registry.add(*id, Bullet { ttl: 3 });
                registry.add(*id, Sprite('|'));
            }
            black_box(registry.len())
        });
    });
}

fn bench_expire_pass(c: &mut Criterion) {
    c.bench_function("expire_pass_100K", |b| {
        b.iter(|| {
            let mut registry = Registry::new();
            spawn_bullets(&mut registry, ENTITY_COUNT);
            while !registry.is_empty() {
                for id in registry.filter::<Bullet>() {
                    let bullet = registry.get_mut::<Bullet>(id);
                    bullet.ttl -= 1;
                    if bullet.ttl == 0 {
                        registry.destroy(id);
                    }
                }
            }
            black_box(registry.count::<Sprite>())
        });
    });
}

criterion_group!(
    benches,
    bench_toggle_component,
    bench_destroy_respawn,
    bench_expire_pass,
);

criterion_main!(benches);
