// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Cartouche demos.
//!
//! Nothing here is part of the library API; it exists so the demos can show
//! placement results without pulling in a real rendering backend.

use kurbo::Point;

/// A character-cell surface the demos "render" decluttered labels onto.
///
/// One character cell stands in for one pixel cell of the matrix, which
/// makes collisions (or their absence) directly visible in terminal output.
#[derive(Debug)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl AsciiCanvas {
    /// Creates an empty canvas of `cols` by `rows` character cells.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec!['.'; cols * rows],
        }
    }

    /// Writes `text` starting at `at`, clipping at the canvas edges.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Demo canvases are far smaller than isize."
    )]
    pub fn draw_label(&mut self, at: Point, text: &str) {
        let row = at.y.floor() as isize;
        if row < 0 || row >= self.rows as isize {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = at.x.floor() as isize + i as isize;
            if col < 0 || col >= self.cols as isize {
                continue;
            }
            self.cells[row as usize * self.cols + col as usize] = ch;
        }
    }

    /// Marks a single anchor position, if it is on the canvas.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Demo canvases are far smaller than isize."
    )]
    pub fn draw_anchor(&mut self, at: Point) {
        let row = at.y.floor() as isize;
        let col = at.x.floor() as isize;
        if row < 0 || row >= self.rows as isize || col < 0 || col >= self.cols as isize {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = '+';
    }

    /// Renders the canvas as newline-separated rows.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            out.extend(&self.cells[row * self.cols..(row + 1) * self.cols]);
            out.push('\n');
        }
        out
    }
}
