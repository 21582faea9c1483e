// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for declutter matrix placement behavior.
//!
//! These use deterministic synthetic scenes: a jittered grid of anchors
//! approximating a mid-density chart, and a saturation scene that forces the
//! outward search through progressively longer ring walks.

use core::time::Duration;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

use cartouche_declutter::{DeclutterMatrix, LabelMeasurer, MonospaceMeasurer};

const SURFACE: Size = Size::new(1024.0, 768.0);

/// Deterministic anchor set: a coarse grid with a per-index jitter so
/// neighboring labels collide without any two scenes differing run to run.
fn synthetic_anchors(count: usize) -> Vec<Point> {
    let cols = 16;
    let cell_w = SURFACE.width / cols as f64;
    let cell_h = SURFACE.height / ((count / cols) + 1) as f64;
    (0..count)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            // Small deterministic jitter keeps anchors off exact lattice
            // points, which is where real scenes fight hardest.
            let jx = ((i * 37) % 11) as f64 - 5.0;
            let jy = ((i * 53) % 7) as f64 - 3.0;
            Point::new(
                col as f64 * cell_w + cell_w * 0.5 + jx,
                row as f64 * cell_h + cell_h * 0.5 + jy,
            )
        })
        .collect()
}

fn synthetic_labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Waypoint {i}")).collect()
}

fn bench_dense_placement(c: &mut Criterion) {
    let mut g = c.benchmark_group("declutter_place");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    let measurer = MonospaceMeasurer::new(7.0, 12.0);
    let anchors = synthetic_anchors(256);
    let labels = synthetic_labels(256);
    let footprints: Vec<Size> = labels.iter().map(|l| measurer.measure(l)).collect();

    g.bench_function("place_256_labels", |b| {
        b.iter_batched(
            || DeclutterMatrix::new(SURFACE.width, SURFACE.height),
            |mut matrix| {
                for (anchor, footprint) in anchors.iter().zip(&footprints) {
                    black_box(matrix.find_next_open_slot(*anchor, *footprint));
                }
            },
            BatchSize::SmallInput,
        );
    });

    g.bench_function("place_256_labels_coarse_cells", |b| {
        b.iter_batched(
            || DeclutterMatrix::with_intervals(SURFACE.width, SURFACE.height, 4.0, 4.0),
            |mut matrix| {
                for (anchor, footprint) in anchors.iter().zip(&footprints) {
                    black_box(matrix.find_next_open_slot(*anchor, *footprint));
                }
            },
            BatchSize::SmallInput,
        );
    });

    g.finish();
}

fn bench_saturated_search(c: &mut Criterion) {
    let mut g = c.benchmark_group("declutter_saturate");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    let size = Size::new(48.0, 12.0);
    let anchor = Point::new(SURFACE.width / 2.0, SURFACE.height / 2.0);

    // Every search below lands on the same anchor, so ring `n` of the last
    // search is only reached after every earlier ring filled up.
    g.bench_function("worst_case_single_anchor", |b| {
        b.iter_batched(
            || DeclutterMatrix::new(SURFACE.width, SURFACE.height),
            |mut matrix| {
                for _ in 0..64 {
                    black_box(matrix.find_next_open_slot(anchor, size));
                }
            },
            BatchSize::SmallInput,
        );
    });

    g.bench_function("bounded_search_falls_back_fast", |b| {
        b.iter_batched(
            || {
                let mut matrix = DeclutterMatrix::new(SURFACE.width, SURFACE.height);
                // Saturate the center so the bounded search always exhausts.
                matrix.mark_region_taken(Point::new(256.0, 128.0), Size::new(512.0, 512.0));
                matrix
            },
            |mut matrix| {
                black_box(matrix.find_next_open_slot_within(anchor, size, 96.0));
            },
            BatchSize::SmallInput,
        );
    });

    g.finish();
}

criterion_group!(benches, bench_dense_placement, bench_saturated_search);
criterion_main!(benches);
