// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declutters a handful of place labels on a terminal-sized surface and
//! prints the result, once with partial placements allowed and once
//! without.

use cartouche_declutter::{DeclutterMatrix, LabelMeasurer, MonospaceMeasurer};
use cartouche_demos::AsciiCanvas;
use kurbo::Point;

const COLS: usize = 72;
const ROWS: usize = 20;

/// Place names anchored close enough together that naive rendering would
/// overprint them.
const PLACES: &[(&str, Point)] = &[
    ("Port Alder", Point::new(24.0, 8.0)),
    ("Alder Mills", Point::new(26.0, 8.0)),
    ("Alderfield", Point::new(25.0, 9.0)),
    ("North Quay", Point::new(52.0, 4.0)),
    ("Quayside", Point::new(54.0, 4.0)),
    ("Westmoor", Point::new(2.0, 14.0)),
    ("Moorgate", Point::new(0.0, 15.0)),
    ("Lighthouse", Point::new(66.0, 18.0)),
];

fn run_pass(allow_partials: bool) -> String {
    let mut matrix = DeclutterMatrix::new(COLS as f64, ROWS as f64);
    matrix.set_allow_partials(allow_partials);
    // One character cell is one "pixel".
    let measurer = MonospaceMeasurer::new(1.0, 1.0);
    let mut canvas = AsciiCanvas::new(COLS, ROWS);

    for (name, anchor) in PLACES {
        let footprint = measurer.measure(name);
        let at = matrix.find_next_open_slot(*anchor, footprint);
        if at.x < 0.0 || at.y < 0.0 {
            println!("  (no room for {name:?}, hiding it)");
            continue;
        }
        canvas.draw_anchor(*anchor);
        canvas.draw_label(at, name);
    }
    canvas.render()
}

fn main() {
    println!("With partial placements (labels may hang off the edge):\n");
    print!("{}", run_pass(true));
    println!("\nWithout partial placements (labels stay fully on the surface):\n");
    print!("{}", run_pass(false));
}
