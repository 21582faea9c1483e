// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use kurbo::{Point, Size};

use crate::search::ring_blocks;

/// Occupancy grid over a rendering surface for label decluttering.
///
/// `DeclutterMatrix` tracks which parts of a map surface are already covered
/// by placed labels. It can be used to:
/// - Mark a rectangular pixel region as taken.
/// - Ask whether a region is still clear.
/// - Find the nearest open slot for a label footprint, searching outward from
///   a desired anchor in footprint-sized rings, and claim it.
///
/// The grid is a fixed-resolution boolean matrix: one cell per
/// `x_interval` by `y_interval` pixels (1 by 1 by default). Cell `(i, j)`
/// covers the pixel region `[i*x_interval, (i+1)*x_interval)` by
/// `[j*y_interval, (j+1)*y_interval)`. Changing the surface dimensions or the
/// intervals schedules a reallocation; the grid is actually rebuilt on the
/// next placement operation, and rebuilding discards all occupancy state.
///
/// ## Boundary policy
///
/// The `allow_partials` setting decides how footprints that extend past the
/// surface edge are treated. When `true` (the default), off-surface cells are
/// considered clear, so a label may hang off the edge of the map. When
/// `false`, any footprint that would spill off the surface is rejected as
/// not clear.
///
/// ## Failure behavior
///
/// Nothing here returns a `Result`. Out-of-range accesses resolve inline to
/// the boundary policy, a matrix with non-positive dimensions fails closed
/// (nothing is clear, nothing is marked), and an exhausted slot search
/// returns an off-surface sentinel point so the caller can skip drawing that
/// label. See [`DeclutterMatrix::find_next_open_slot`].
#[derive(Clone, Debug)]
pub struct DeclutterMatrix {
    width: f64,
    height: f64,
    x_interval: f64,
    y_interval: f64,
    max_x: isize,
    max_y: isize,
    allow_partials: bool,
    needs_recreate: bool,
    /// Column-major occupancy cells; empty when the grid is unallocated.
    cells: Vec<bool>,
}

/// A placement footprint reduced to inclusive grid-index bounds.
///
/// Built fresh for every operation from an anchor point and a pixel
/// footprint. `x0..=x1` and `y0..=y1` are clamped to the grid; the flags
/// remember what the clamping removed.
#[derive(Clone, Copy, Debug)]
struct CellRect {
    x0: isize,
    y0: isize,
    x1: isize,
    y1: isize,
    /// True if the unclamped rect extended past any grid edge.
    partial: bool,
    /// True if the unclamped rect had no overlap with the grid at all.
    off_grid: bool,
}

impl CellRect {
    fn new(x0: isize, y0: isize, len: isize, rows: isize, max_x: isize, max_y: isize) -> Self {
        let x1 = x0 + len - 1;
        let y1 = y0 + rows - 1;
        let off_grid = max_x < 0 || max_y < 0 || x0 > max_x || x1 < 0 || y0 > max_y || y1 < 0;
        let partial = x0 < 0 || y0 < 0 || x1 > max_x || y1 > max_y;
        Self {
            x0: x0.max(0),
            y0: y0.max(0),
            x1: x1.min(max_x),
            y1: y1.min(max_y),
            partial,
            off_grid,
        }
    }
}

impl DeclutterMatrix {
    /// Creates a matrix over a `width` by `height` pixel surface with dense
    /// 1 by 1 pixel cells.
    ///
    /// Non-positive dimensions are allowed: the grid stays unallocated and
    /// every placement operation fails closed until the dimensions are set.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_intervals(width, height, 1.0, 1.0)
    }

    /// Creates a matrix with explicit cell intervals in pixels per cell.
    ///
    /// Coarser intervals trade placement precision for memory and scan cost.
    /// Non-finite or non-positive intervals fall back to `1.0`.
    #[must_use]
    pub fn with_intervals(width: f64, height: f64, x_interval: f64, y_interval: f64) -> Self {
        let mut m = Self {
            width,
            height,
            x_interval: sanitize_interval(x_interval),
            y_interval: sanitize_interval(y_interval),
            max_x: -1,
            max_y: -1,
            allow_partials: true,
            needs_recreate: true,
            cells: Vec::new(),
        };
        m.recompute_extents();
        m.recreate();
        m
    }

    /// Returns the surface width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sets the surface width in pixels and schedules a grid reallocation.
    pub fn set_width(&mut self, width: f64) {
        if self.width == width {
            return;
        }
        self.width = width;
        self.recompute_extents();
        self.needs_recreate = true;
    }

    /// Returns the surface height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the surface height in pixels and schedules a grid reallocation.
    pub fn set_height(&mut self, height: f64) {
        if self.height == height {
            return;
        }
        self.height = height;
        self.recompute_extents();
        self.needs_recreate = true;
    }

    /// Returns the horizontal cell interval in pixels per cell.
    #[must_use]
    pub fn x_interval(&self) -> f64 {
        self.x_interval
    }

    /// Sets the horizontal cell interval and schedules a grid reallocation.
    ///
    /// Non-finite or non-positive values fall back to `1.0`.
    pub fn set_x_interval(&mut self, x_interval: f64) {
        let x_interval = sanitize_interval(x_interval);
        if self.x_interval == x_interval {
            return;
        }
        self.x_interval = x_interval;
        self.recompute_extents();
        self.needs_recreate = true;
    }

    /// Returns the vertical cell interval in pixels per cell.
    #[must_use]
    pub fn y_interval(&self) -> f64 {
        self.y_interval
    }

    /// Sets the vertical cell interval and schedules a grid reallocation.
    ///
    /// Non-finite or non-positive values fall back to `1.0`.
    pub fn set_y_interval(&mut self, y_interval: f64) {
        let y_interval = sanitize_interval(y_interval);
        if self.y_interval == y_interval {
            return;
        }
        self.y_interval = y_interval;
        self.recompute_extents();
        self.needs_recreate = true;
    }

    /// Returns whether partially off-surface placements are allowed.
    #[must_use]
    pub fn allow_partials(&self) -> bool {
        self.allow_partials
    }

    /// Sets whether partially off-surface placements are allowed.
    ///
    /// This only affects subsequent queries; cells already marked stay
    /// marked.
    pub fn set_allow_partials(&mut self, allow_partials: bool) {
        self.allow_partials = allow_partials;
    }

    /// Clears all occupancy state without changing dimensions.
    ///
    /// Call this at the start of a frame before re-placing the frame's
    /// labels.
    pub fn reset(&mut self) {
        if self.needs_recreate {
            self.recreate();
        } else {
            self.cells.fill(false);
        }
    }

    /// Marks the footprint anchored at `anchor` as taken.
    ///
    /// The footprint is rounded up to whole cells. Returns `false` if the
    /// grid is unallocated. A footprint entirely outside the surface returns
    /// the `allow_partials` policy without touching any cell. Otherwise the
    /// on-grid portion is marked (off-grid cells are skipped) and the call
    /// returns `true`.
    pub fn mark_region_taken(&mut self, anchor: Point, size: Size) -> bool {
        if !self.ensure_grid() {
            return false;
        }
        let rect = self.cell_rect(anchor, size);
        if rect.off_grid {
            return self.allow_partials;
        }
        for x in rect.x0..=rect.x1 {
            self.mark_column(x, rect.y0, rect.y1);
        }
        true
    }

    /// Returns whether the footprint anchored at `anchor` is clear.
    ///
    /// This never marks anything. On an unallocated grid the answer is
    /// always `false`. A footprint entirely outside the surface is reported
    /// clear: there is nothing visible to collide with.
    pub fn is_region_clear(&mut self, anchor: Point, size: Size) -> bool {
        if !self.ensure_grid() {
            return false;
        }
        let rect = self.cell_rect(anchor, size);
        self.region_clear(&rect, false)
    }

    /// Finds the nearest open slot for the footprint anchored at `anchor`,
    /// marks it taken, and returns its position in pixels.
    ///
    /// If the anchor region itself is clear it is claimed and `anchor` is
    /// returned unchanged. Otherwise the search walks outward in rings of
    /// footprint-sized blocks, checking each ring in a fixed direction
    /// order (east, north, south, west, then the NE, SE, SW, NW corners)
    /// so that identical inputs always produce identical placements. Each
    /// candidate is also probed sideways for a clear horizontal run that
    /// still overlaps it (see the module docs on the both-ways scan).
    ///
    /// The search gives up after a ring cap of half the grid height in
    /// cells and returns the off-surface sentinel: the anchor's grid
    /// indices, negated. Callers treat a sentinel result as "hide this
    /// label". An anchor whose footprint lies entirely outside the surface
    /// is returned unchanged, as is any anchor when the grid is
    /// unallocated.
    pub fn find_next_open_slot(&mut self, anchor: Point, size: Size) -> Point {
        self.search_slot(anchor, size, None)
    }

    /// Like [`DeclutterMatrix::find_next_open_slot`], but gives up once a
    /// ring would imply moving the label more than `max_pixel_distance`
    /// pixels from its anchor.
    ///
    /// A limit of `0.0` permits only the anchor position itself. A negative
    /// limit behaves as if no limit were given.
    pub fn find_next_open_slot_within(
        &mut self,
        anchor: Point,
        size: Size,
        max_pixel_distance: f64,
    ) -> Point {
        self.search_slot(anchor, size, Some(max_pixel_distance))
    }

    /// Snapshot of the current matrix state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> DeclutterMatrixDebugInfo {
        DeclutterMatrixDebugInfo {
            width: self.width,
            height: self.height,
            x_interval: self.x_interval,
            y_interval: self.y_interval,
            max_x: self.max_x,
            max_y: self.max_y,
            allow_partials: self.allow_partials,
            allocated: !self.cells.is_empty(),
            needs_recreation: self.needs_recreate,
            taken_cells: self.cells.iter().filter(|c| **c).count(),
        }
    }

    fn search_slot(&mut self, anchor: Point, size: Size, max_pixel_distance: Option<f64>) -> Point {
        if !self.ensure_grid() {
            return anchor;
        }
        let (ox, oy) = self.cell_index(anchor);
        let len = cell_span(size.width, self.x_interval);
        let rows = cell_span(size.height, self.y_interval);

        let origin = CellRect::new(ox, oy, len, rows, self.max_x, self.max_y);
        if origin.off_grid {
            // Entirely off the surface: nothing to declutter against.
            return anchor;
        }
        if self.region_clear(&origin, true) {
            return anchor;
        }

        let round_limit = self.round_limit(len, rows, max_pixel_distance);
        for round in 1..=round_limit {
            for (bx, by) in ring_blocks((ox, oy), (len, rows), round) {
                if let Some((sx, sy)) = self.check_both_ways(bx, by, len, rows) {
                    return Point::new(sx as f64 * self.x_interval, sy as f64 * self.y_interval);
                }
            }
        }
        // Exhausted: report the anchor's grid indices, negated, as the
        // off-surface sentinel.
        Point::new(-(ox as f64), -(oy as f64))
    }

    /// Tests a candidate block directly, then probes sideways.
    ///
    /// The sideways scan admits any start column whose footprint still
    /// overlaps the candidate's column span, walking right to left so the
    /// rightmost clear run wins. Returns the winning block origin after
    /// marking it, or `None` if the candidate and every overlapping run are
    /// blocked.
    fn check_both_ways(
        &mut self,
        bx: isize,
        by: isize,
        len: isize,
        rows: isize,
    ) -> Option<(isize, isize)> {
        let direct = CellRect::new(bx, by, len, rows, self.max_x, self.max_y);
        if direct.off_grid {
            // An invisible slot is no use as a search result; keep looking
            // on the surface.
            return None;
        }
        if self.region_clear(&direct, true) {
            return Some((bx, by));
        }

        let y1 = by + rows - 1;
        let mut run = 0;
        for x in ((bx - len + 1)..=(bx + 2 * len - 2)).rev() {
            if self.column_taken(x, by, y1) {
                run = 0;
                continue;
            }
            run += 1;
            if run < len {
                continue;
            }
            // Columns x..x+len-1 are clear and still overlap the candidate.
            let slid = CellRect::new(x, by, len, rows, self.max_x, self.max_y);
            if slid.off_grid {
                continue;
            }
            if self.region_clear(&slid, true) {
                return Some((x, by));
            }
        }
        None
    }

    /// Clearance check over an index rect, optionally claiming it.
    ///
    /// A rect entirely off the grid is clear by definition. A partial rect
    /// is rejected outright when partials are disallowed. Otherwise every
    /// column is scanned, short-circuiting on the first overlap; when
    /// `mark_if_clear` is set and all columns were clear, a second pass
    /// marks them taken.
    fn region_clear(&mut self, rect: &CellRect, mark_if_clear: bool) -> bool {
        if rect.off_grid {
            return true;
        }
        if !self.allow_partials && rect.partial {
            return false;
        }
        for x in rect.x0..=rect.x1 {
            if self.column_taken(x, rect.y0, rect.y1) {
                return false;
            }
        }
        if mark_if_clear {
            for x in rect.x0..=rect.x1 {
                self.mark_column(x, rect.y0, rect.y1);
            }
        }
        true
    }

    /// Returns whether any cell of column `x` in rows `y0..=y1` is taken.
    ///
    /// Out-of-range columns and rows resolve to the boundary policy: clear
    /// when partials are allowed, taken when they are not.
    fn column_taken(&self, x: isize, y0: isize, y1: isize) -> bool {
        if x < 0 || x > self.max_x {
            return !self.allow_partials;
        }
        let rows = self.max_y as usize + 1;
        let base = x as usize * rows;
        for y in y0..=y1 {
            if y < 0 || y > self.max_y {
                if !self.allow_partials {
                    return true;
                }
                continue;
            }
            if self.cells[base + y as usize] {
                return true;
            }
        }
        false
    }

    /// Marks the in-range cells of column `x` in rows `y0..=y1` taken.
    fn mark_column(&mut self, x: isize, y0: isize, y1: isize) {
        if x < 0 || x > self.max_x {
            return;
        }
        let rows = self.max_y as usize + 1;
        let base = x as usize * rows;
        for y in y0.max(0)..=y1.min(self.max_y) {
            self.cells[base + y as usize] = true;
        }
    }

    fn cell_rect(&self, anchor: Point, size: Size) -> CellRect {
        let (x0, y0) = self.cell_index(anchor);
        let len = cell_span(size.width, self.x_interval);
        let rows = cell_span(size.height, self.y_interval);
        CellRect::new(x0, y0, len, rows, self.max_x, self.max_y)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid indices fit isize for any realistic surface."
    )]
    fn cell_index(&self, anchor: Point) -> (isize, isize) {
        (
            (anchor.x / self.x_interval).floor() as isize,
            (anchor.y / self.y_interval).floor() as isize,
        )
    }

    /// Ring cap for one search: either derived from the pixel distance
    /// limit, or half the grid height in cells by default.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The quotient is a small ring count."
    )]
    fn round_limit(&self, len: isize, rows: isize, max_pixel_distance: Option<f64>) -> isize {
        match max_pixel_distance {
            Some(d) if d >= 0.0 => {
                // One ring steps a whole block; divide by the larger block
                // extent so no accepted slot can exceed the limit.
                let step = (len as f64 * self.x_interval).max(rows as f64 * self.y_interval);
                (d / step).floor() as isize
            }
            _ => (self.max_y + 1) / 2,
        }
    }

    /// Rebuilds the grid if a setting changed. Returns whether a usable
    /// grid exists afterwards.
    fn ensure_grid(&mut self) -> bool {
        if self.needs_recreate {
            self.recreate();
        }
        !self.cells.is_empty()
    }

    fn recreate(&mut self) {
        self.needs_recreate = false;
        self.cells.clear();
        if self.max_x >= 0 && self.max_y >= 0 {
            let len = (self.max_x as usize + 1) * (self.max_y as usize + 1);
            self.cells.resize(len, false);
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell counts fit isize for any realistic surface."
    )]
    fn recompute_extents(&mut self) {
        self.max_x = if self.width > 0.0 {
            (self.width / self.x_interval) as isize - 1
        } else {
            -1
        };
        self.max_y = if self.height > 0.0 {
            (self.height / self.y_interval) as isize - 1
        } else {
            -1
        };
    }
}

/// Number of whole cells covering `extent` pixels, at least one.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Footprint spans fit isize for any realistic surface."
)]
fn cell_span(extent: f64, interval: f64) -> isize {
    let cells = (extent / interval).ceil() as isize;
    cells.max(1)
}

fn sanitize_interval(interval: f64) -> f64 {
    if interval.is_finite() && interval > 0.0 {
        interval
    } else {
        1.0
    }
}

/// Debug snapshot of a [`DeclutterMatrix`] state.
#[derive(Clone, Copy, Debug)]
pub struct DeclutterMatrixDebugInfo {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Horizontal cell interval in pixels per cell.
    pub x_interval: f64,
    /// Vertical cell interval in pixels per cell.
    pub y_interval: f64,
    /// Largest valid column index, `-1` when unallocated.
    pub max_x: isize,
    /// Largest valid row index, `-1` when unallocated.
    pub max_y: isize,
    /// Whether partially off-surface placements are allowed.
    pub allow_partials: bool,
    /// Whether the grid is currently allocated.
    pub allocated: bool,
    /// Whether the next placement operation will rebuild the grid.
    pub needs_recreation: bool,
    /// Number of cells currently marked taken.
    pub taken_cells: usize,
}
