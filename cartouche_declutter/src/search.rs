// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring enumeration for the outward slot search.
//!
//! The slot search examines candidate positions in square rings of
//! footprint-sized blocks around the anchor. Ring `r` is the set of blocks
//! at Chebyshev block-distance `r`; together the rings tile the plane, so a
//! search that runs long enough considers every block exactly once.
//!
//! The order within a ring is a contract, not an accident: callers rely on
//! identical inputs producing identical placements. Each ring yields the
//! four sides first, east, north, south, west, then the four corners NE,
//! SE, SW, NW. The east and west sides are scanned top to bottom and the
//! north and south sides left to right, each covering the perpendicular
//! offsets `-(r-1)..=(r-1)`; the corners close the ring.

use smallvec::SmallVec;

/// Block origins of ring `round` around `origin`, in search order.
///
/// `origin` is the anchor block's origin in grid indices and `step` the
/// block extent in cells (columns, rows). Ring 1 yields exactly eight
/// blocks; ring `r` yields `8 * r`. A non-positive `round` yields nothing.
///
/// ```rust
/// use cartouche_declutter::ring_blocks;
///
/// let ring: Vec<_> = ring_blocks((0, 0), (1, 1), 1).collect();
/// assert_eq!(ring[0], (1, 0)); // east comes first
/// assert_eq!(ring.len(), 8);
/// ```
pub fn ring_blocks(
    origin: (isize, isize),
    step: (isize, isize),
    round: isize,
) -> impl Iterator<Item = (isize, isize)> {
    let (ox, oy) = origin;
    let (sx, sy) = step;
    let mut out = SmallVec::<[(isize, isize); 8]>::new();
    if round > 0 {
        let side = -(round - 1)..=(round - 1);
        for j in side.clone() {
            out.push((ox + round * sx, oy + j * sy));
        }
        for i in side.clone() {
            out.push((ox + i * sx, oy - round * sy));
        }
        for i in side.clone() {
            out.push((ox + i * sx, oy + round * sy));
        }
        for j in side {
            out.push((ox - round * sx, oy + j * sy));
        }
        out.push((ox + round * sx, oy - round * sy));
        out.push((ox + round * sx, oy + round * sy));
        out.push((ox - round * sx, oy + round * sy));
        out.push((ox - round * sx, oy - round * sy));
    }
    out.into_iter()
}
