//! Benchmarks for the pure stacking recompute.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lamina_core::{WindowId, WindowState};
use lamina_stack::plan::{self, BASE_Z, Layer};

fn layers(n: usize) -> Vec<Layer> {
    (0..n)
        .map(|i| Layer {
            id: WindowId::from_raw(i as u64 + 1),
            modal: i % 4 == 0,
            state: if i % 7 == 0 {
                WindowState::Hidden
            } else {
                WindowState::Disabled
            },
            z: BASE_Z + i as u32,
        })
        .collect()
}

fn bench_plan_show(c: &mut Criterion) {
    let set = layers(64);
    let target = WindowId::from_raw(2);
    c.bench_function("plan_show_64", |b| {
        b.iter(|| plan::plan_show(black_box(&set), target, false));
    });
}

fn bench_plan_close(c: &mut Criterion) {
    let set = layers(64);
    let target = WindowId::from_raw(2);
    c.bench_function("plan_close_64", |b| {
        b.iter(|| plan::plan_close(black_box(&set), target));
    });
}

criterion_group!(benches, bench_plan_show, bench_plan_close);
criterion_main!(benches);
