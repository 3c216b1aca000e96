//! Benchmarks for link search: all pairs vs spatial grid

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

use neural_field::particles::{all_pairs, via_grid, Particle, SpatialGrid};

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;
const THRESHOLD: f32 = 150.0;

fn particles(count: usize) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| Particle::random(&mut rng, WIDTH, HEIGHT, 0.6))
        .collect()
}

fn bench_link_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_search");

    for count in [80usize, 320, 1280, 5120] {
        let field = particles(count);
        let mut links = Vec::new();

        group.bench_with_input(BenchmarkId::new("all_pairs", count), &field, |b, field| {
            b.iter(|| {
                all_pairs(black_box(field), THRESHOLD, 0.6, &mut links);
                black_box(links.len())
            })
        });

        let mut grid = SpatialGrid::new(THRESHOLD, WIDTH, HEIGHT);
        group.bench_with_input(BenchmarkId::new("grid", count), &field, |b, field| {
            b.iter(|| {
                via_grid(black_box(field), THRESHOLD, 0.6, &mut grid, &mut links);
                black_box(links.len())
            })
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut field = particles(80);
    c.bench_function("step_80", |b| {
        b.iter(|| {
            for p in field.iter_mut() {
                p.step(WIDTH, HEIGHT);
            }
            black_box(field[0].position)
        })
    });
}

criterion_group!(benches, bench_link_search, bench_step);
criterion_main!(benches);
