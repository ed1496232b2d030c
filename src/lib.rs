//! Counts how many identical rectangular panels fit inside a roof.
//!
//! Three roof shapes are supported: a plain rectangle, an isosceles triangle
//! and the union of two congruent rectangles shifted against each other.
//! Small roofs are solved exactly by a memoized search over an occupancy
//! bitmask; large ones fall back to strip decompositions.

pub mod cases;
pub mod exact;
pub mod grid;
pub mod mask;
pub mod normalize;
pub mod overlap;
pub mod render;
pub mod solver;
pub mod strip;
pub mod triangle;
pub mod types;

pub use solver::{Solver, pack, pack_overlap, pack_rectangle, pack_triangle};
pub use types::{Limits, Method, PanelSpec, Region, Solution};
