// Copyright 2025 the Hoverlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use hoverlay_dispatch::engine::Engine;
use hoverlay_dispatch::types::{FilterPolicy, IndicatorId, IndicatorKind, NullHandler};
use hoverlay_tree::{LocalWidget, Tree, WidgetId};
use kurbo::{Point, Rect};

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

fn widget(bounds: Rect) -> LocalWidget {
    LocalWidget {
        local_bounds: bounds,
        ..Default::default()
    }
}

/// An n×n grid of panes under one root, each pane holding one inner widget.
/// Returns the tree, its world side length, and the pane ids.
fn build_grid_tree(n: usize, cell: f64) -> (Tree, f64, Vec<WidgetId>) {
    let side = n as f64 * cell;
    let mut tree = Tree::new();
    let root = tree.insert(None, widget(Rect::new(0.0, 0.0, side, side)));
    let mut panes = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let pane = tree.insert(
                Some(root),
                widget(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
            let inset = cell * 0.2;
            let _ = tree.insert(
                Some(pane),
                widget(Rect::new(
                    x0 + inset,
                    y0 + inset,
                    x0 + cell - inset,
                    y0 + cell - inset,
                )),
            );
            panes.push(pane);
        }
    }
    tree.commit();
    (tree, side, panes)
}

fn gen_sweep(side: f64, count: usize, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
        .collect()
}

fn bench_sample_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_sweep");
    for &n in &[8usize, 16, 32] {
        let (tree, side, _) = build_grid_tree(n, 10.0);
        let points = gen_sweep(side, 256, 0x5eed);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                Engine::<WidgetId>::new,
                |mut engine| {
                    let mut handler = NullHandler;
                    let ind = IndicatorId(1);
                    for &pt in &points {
                        let out = engine.sample_move(
                            ind,
                            IndicatorKind::Grabbable,
                            pt,
                            &tree,
                            &mut handler,
                        );
                        black_box(out.dispatches.len());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_static_updates(c: &mut Criterion) {
    let mut group = c.benchmark_group("static_updates");
    let (tree, side, _) = build_grid_tree(16, 10.0);
    let pt = Point::new(side * 0.5 + 1.0, side * 0.5 + 1.0);
    group.throughput(Throughput::Elements(256));
    group.bench_function("grid_n16_update_only", |b| {
        b.iter_batched(
            Engine::<WidgetId>::new,
            |mut engine| {
                let mut handler = NullHandler;
                let ind = IndicatorId(1);
                for _ in 0..256 {
                    let out = engine.sample_move(
                        ind,
                        IndicatorKind::Grabbable,
                        pt,
                        &tree,
                        &mut handler,
                    );
                    black_box(out.dispatches.len());
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_filtered_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered_sweep");
    let (tree, side, panes) = build_grid_tree(16, 10.0);
    let points = gen_sweep(side, 256, 0xf11e);
    // Self-collide on every pane: the gate runs per container per sample.
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("grid_n16_self_collide", |b| {
        b.iter_batched(
            || {
                let mut engine = Engine::<WidgetId>::new();
                for &p in &panes {
                    engine.set_filter(p, FilterPolicy::SelfCollide);
                }
                engine
            },
            |mut engine| {
                let mut handler = NullHandler;
                let ind = IndicatorId(1);
                for &pt in &points {
                    let out = engine.sample_move(
                        ind,
                        IndicatorKind::Grabbable,
                        pt,
                        &tree,
                        &mut handler,
                    );
                    black_box(out.dispatches.len());
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_sample_sweep, bench_static_updates, bench_filtered_sweep);
criterion_main!(benches);
