//! Tick-loop benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use formic_core::Position;
use formic_grid::Surface;
use formic_world::{PopulationRule, SpawnPolicy, TrailBehavior, World, WorldConfig};

fn colony(rows: u32, cols: u32, agents: usize) -> World {
    let config = WorldConfig {
        surface: Surface::new(rows, cols).unwrap(),
        sites: vec![Position::new(rows as i32 / 2, cols as i32 / 2)],
        behavior: Box::new(TrailBehavior::default()),
        spawn: SpawnPolicy::FirstSite,
        evaporation: 0.95,
        max_pheromone: None,
        rule: PopulationRule::default(),
        seed: 7,
    };
    let mut world = World::new(config).unwrap();
    for _ in 0..agents {
        world.spawn().unwrap();
    }
    world
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    let mut small = colony(32, 32, 16);
    group.bench_function("32x32_16_agents", |b| {
        b.iter(|| small.step(1).unwrap());
    });

    let mut large = colony(128, 128, 256);
    group.bench_function("128x128_256_agents", |b| {
        b.iter(|| large.step(1).unwrap());
    });

    group.finish();
}

fn bench_evaporation(c: &mut Criterion) {
    let mut world = colony(256, 256, 0);
    c.bench_function("evaporate_256x256", |b| {
        b.iter(|| world.evaporate().unwrap());
    });
}

criterion_group!(benches, bench_step, bench_evaporation);
criterion_main!(benches);
