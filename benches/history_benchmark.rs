#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for history pushes and the full edit path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use color_wrap::prelude::*;

fn history_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    for capacity in [10, 50, 500] {
        group.bench_with_input(BenchmarkId::new("push", capacity), &capacity, |b, &capacity| {
            b.iter(|| {
                let mut history = HistoryStack::with_capacity(0u32, capacity);
                for i in 0..1_000 {
                    history.push(black_box(i));
                }
                history.len()
            });
        });

        group.bench_with_input(
            BenchmarkId::new("undo_then_push", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut history = HistoryStack::with_capacity(0u32, capacity);
                    for i in 0..1_000 {
                        history.push(i);
                        if i % 3 == 0 {
                            history.undo();
                        }
                    }
                    black_box(history.index())
                });
            },
        );
    }

    group.finish();
}

fn edit_benchmark(c: &mut Criterion) {
    let descriptions: Vec<ColorDescription> = (0..360)
        .map(|h| ColorDescription::hsl(h as f32, 0.6, 0.5))
        .collect();

    c.bench_function("shell_handle_change", |b| {
        let mut shell = ColorShell::builder()
            .listeners(Listeners::new().on_change(|state: &ColorState, _: Option<&()>| {
                black_box(state.hue());
            }))
            .clock(ManualClock::new())
            .build()
            .unwrap();
        b.iter(|| {
            for description in &descriptions {
                shell.handle_change(black_box(description), ());
            }
        });
    });

    c.bench_function("parse_description", |b| {
        b.iter(|| {
            for text in ["#ff8800", "rgb(12, 34, 56)", "hsla(250, 50%, 20%, 0.5)", "navy"] {
                black_box(text.parse::<ColorDescription>().unwrap());
            }
        });
    });
}

criterion_group!(benches, history_benchmark, edit_benchmark);
criterion_main!(benches);
