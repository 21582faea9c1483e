// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label measurement: turning label text into a pixel footprint.
//!
//! The matrix itself only understands footprints. How big a label is
//! depends on the renderer's fonts, so measurement is an explicit service
//! the caller passes in rather than anything global. Renderer-backed
//! implementations live with the renderer; [`MonospaceMeasurer`] is a
//! deterministic stand-in for tests, benches, and headless servers.

use kurbo::Size;

/// Measures the pixel footprint of a label.
///
/// Implementations must be deterministic for a given label so that
/// repeated declutter passes over the same scene produce the same
/// placements.
pub trait LabelMeasurer {
    /// Returns the pixel footprint of `label`.
    ///
    /// Multi-line labels measure as the widest line by the line count.
    fn measure(&self, label: &str) -> Size;
}

/// Fixed-advance measurement: every character is `advance` pixels wide and
/// every line `line_height` pixels tall.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasurer {
    /// Horizontal advance per character, in pixels.
    pub advance: f64,
    /// Height per line, in pixels.
    pub line_height: f64,
}

impl MonospaceMeasurer {
    /// Creates a measurer with the given per-character advance and line
    /// height.
    #[must_use]
    pub fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl LabelMeasurer for MonospaceMeasurer {
    fn measure(&self, label: &str) -> Size {
        let mut lines = 0_usize;
        let mut widest = 0_usize;
        for line in label.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        // An empty label still occupies one empty line.
        let lines = lines.max(1);
        Size::new(
            widest as f64 * self.advance,
            lines as f64 * self.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelMeasurer, MonospaceMeasurer};

    #[test]
    fn single_line_measures_width_by_line_height() {
        let m = MonospaceMeasurer::new(7.0, 12.0);
        let size = m.measure("Harbor");
        assert_eq!(size.width, 42.0);
        assert_eq!(size.height, 12.0);
    }

    #[test]
    fn multi_line_measures_the_widest_line() {
        let m = MonospaceMeasurer::new(7.0, 12.0);
        let size = m.measure("Cape\nFlattery");
        assert_eq!(size.width, 56.0);
        assert_eq!(size.height, 24.0);
    }

    #[test]
    fn empty_label_still_occupies_one_line() {
        let m = MonospaceMeasurer::new(7.0, 12.0);
        let size = m.measure("");
        assert_eq!(size.width, 0.0);
        assert_eq!(size.height, 12.0);
    }
}
