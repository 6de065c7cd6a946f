// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_scale_bar::{
    MercatorMap, OverlayElement, Position, ScaleBarControl, ScaleBarOptions, UnitFamily,
    compute_scale, round_to_nice,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

/// Distances spread over many orders of magnitude, from inches to continents.
fn sample_distances(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| 10_f64.powf(rng.next_f64() * 8.0 - 5.0))
        .collect()
}

#[derive(Debug, Default)]
struct Sink {
    width: f64,
    len: usize,
}

impl OverlayElement for Sink {
    fn set_width_px(&mut self, width: f64) {
        self.width = width;
    }

    fn set_text(&mut self, text: &str) {
        self.len = text.len();
    }

    fn remove(&mut self) {}
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_scale_bar");
    let distances = sample_distances(4_096, 0x5CA1_EBA2_0000_0001);

    group.bench_function("round_to_nice(n=4096)", |b| {
        b.iter(|| {
            let sum: f64 = distances.iter().map(|&d| round_to_nice(black_box(d))).sum();
            black_box(sum);
        });
    });

    for family in [UnitFamily::Imperial, UnitFamily::Metric, UnitFamily::NauticalMiles] {
        group.bench_function(format!("compute_scale({family},n=4096)"), |b| {
            b.iter(|| {
                let sum: f64 = distances
                    .iter()
                    .filter_map(|&d| compute_scale(black_box(d), family, 100.0).ok())
                    .map(|r| r.width_ratio)
                    .sum();
                black_box(sum);
            });
        });
    }

    group.finish();
}

fn bench_control(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_scale_bar_control");

    group.bench_function("zoom_sweep_with_attached_control(steps=200)", |b| {
        b.iter_batched(
            || {
                let mut map = MercatorMap::new(Size::new(1024.0, 768.0));
                map.set_center(Position::new(-0.1276, 51.5072));
                let mut control = ScaleBarControl::new(ScaleBarOptions::default());
                control.attach(&mut map, Sink::default());
                (map, control)
            },
            |(mut map, mut control)| {
                for step in 0..200 {
                    map.set_zoom(f64::from(step) * 0.1);
                }
                black_box(control.last_result());
                control.detach(&mut map);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_compute, bench_control);
criterion_main!(benches);
