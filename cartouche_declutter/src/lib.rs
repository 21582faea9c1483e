// Copyright 2026 the Cartouche Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=cartouche_declutter --heading-base-level=0

//! Cartouche Declutter: an occupancy grid for placing map labels without overlap.
//!
//! Cartouche Declutter is a reusable building block for map renderers, chart
//! plotters, and anything else that draws many small labels onto a surface.
//!
//! - Tracks which parts of a rendering surface are already covered, at a
//!   configurable cell resolution (dense 1x1 pixel cells by default).
//! - Finds the nearest open slot for a label footprint by searching outward
//!   from the desired anchor in footprint-sized rings, with a deterministic
//!   direction order so identical scenes always lay out identically.
//! - Applies a configurable boundary policy for labels that would hang off
//!   the surface edge.
//!
//! ## Where this fits
//!
//! A map rendering pipeline projects features to screen space, measures each
//! label, and then asks this crate where the label may actually go:
//!
//! 1. Projection and styling produce an anchor point per feature (out of
//!    scope here).
//! 2. A [`LabelMeasurer`] turns the label text into a pixel footprint.
//! 3. [`DeclutterMatrix::find_next_open_slot`] nudges the anchor to the
//!    nearest position where the footprint does not collide with anything
//!    placed earlier, and claims it.
//! 4. The renderer draws the label at the returned position, or skips it
//!    when the search reports the off-surface sentinel.
//!
//! ## Not a layout engine
//!
//! This crate does not choose which labels to show, rank their importance,
//! or measure real fonts. Upstream code decides the candidate set and
//! ordering (placement is first come, first served) and supplies real
//! metrics through the [`LabelMeasurer`] seam; [`MonospaceMeasurer`] is a
//! deterministic stand-in for headless use.
//!
//! ## Minimal example
//!
//! ```rust
//! use cartouche_declutter::DeclutterMatrix;
//! use kurbo::{Point, Size};
//!
//! let mut matrix = DeclutterMatrix::new(800.0, 600.0);
//! let footprint = Size::new(60.0, 12.0);
//!
//! // The first label gets its preferred spot.
//! let a = matrix.find_next_open_slot(Point::new(400.0, 300.0), footprint);
//! assert_eq!(a, Point::new(400.0, 300.0));
//!
//! // A second label with the same anchor is pushed to a clear slot.
//! let b = matrix.find_next_open_slot(Point::new(400.0, 300.0), footprint);
//! assert_ne!(a, b);
//! ```
//!
//! ## Design notes
//!
//! - All coordinates are device pixels as `f64`, using [`kurbo`] geometry
//!   types.
//! - Operations never fail with errors: out-of-range accesses resolve to
//!   the boundary policy, an unallocated grid fails closed, and an
//!   exhausted search degrades to an off-surface sentinel the caller can
//!   treat as "hide this label".
//! - The matrix is a single mutable resource; every placement operation
//!   takes `&mut self`, so cross-thread use requires external
//!   serialization, typically one lock around a whole declutter pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod matrix;
mod measure;
mod search;

pub use matrix::{DeclutterMatrix, DeclutterMatrixDebugInfo};
pub use measure::{LabelMeasurer, MonospaceMeasurer};
pub use search::ring_blocks;
