// Copyright 2026 the Waypoint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use waypoint_model::{FeatureId, FeatureStore, Style};
use waypoint_snap::{SnapConfig, SnapList, try_snap_point};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A field of short random polylines around the origin, `n` per side.
fn gen_line_field(n: usize, extent: f64) -> FeatureStore {
    let mut store = FeatureStore::new();
    let mut rng = Rng::new(0xC0FF_EE11);
    for _ in 0..n * n {
        let x = (rng.next_f64() - 0.5) * extent;
        let y = (rng.next_f64() - 0.5) * extent;
        let verts: Vec<FeatureId> = (0..4)
            .map(|_| {
                let dx = (rng.next_f64() - 0.5) * extent * 0.01;
                let dy = (rng.next_f64() - 0.5) * extent * 0.01;
                store.insert_point(Point::new(x + dx, y + dy), 4.0, Style::default())
            })
            .collect();
        let _ = store.insert_line(&verts, 2.0, Style::default());
    }
    store
}

fn bench_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_list_collect");
    for n in [8_usize, 16, 32] {
        let store = gen_line_field(n, 1.0);
        let viewport = Rect::new(-0.1, -0.1, 0.1, 0.1);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("field_{n}x{n}"), |b| {
            b.iter(|| black_box(SnapList::collect(&store, black_box(viewport), None)));
        });
    }
    group.finish();
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("try_snap_point");
    for n in [8_usize, 16, 32] {
        let store = gen_line_field(n, 1.0);
        let viewport = Rect::new(-0.1, -0.1, 0.1, 0.1);
        let list = SnapList::collect(&store, viewport, None);
        let config = SnapConfig::default();
        group.bench_function(format!("field_{n}x{n}"), |b| {
            b.iter(|| {
                black_box(try_snap_point(
                    &store,
                    black_box(Point::new(0.01, 0.01)),
                    &list,
                    14.0,
                    &config,
                ))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collect, bench_snap);
criterion_main!(benches);
