//! Occupancy masks for the exact search.
//!
//! A set bit marks a cell that cannot take a new panel, either because it lies
//! outside the roof or because a panel already covers it. Bit `row * W + col`
//! belongs to cell `(col, row)`.

use std::hash::Hash;

use bitvec::prelude::*;

/// Bit set with no fixed width, for grids of more than 64 cells.
pub type WideMask = BitVec<u64, Lsb0>;

pub trait OccupancyMask: Clone + Eq + Hash {
    /// Mask for a grid of `cells` cells with every cell free.
    fn blank(cells: usize) -> Self;

    fn is_occupied(&self, idx: usize) -> bool;

    fn occupy(&mut self, idx: usize);

    /// Lowest free cell, or `None` once every cell is occupied.
    fn first_free(&self) -> Option<usize>;
}

/// Single-word mask for grids of up to 64 cells.
///
/// Bits at and above `cells` start out set, so a full grid is `u64::MAX`.
impl OccupancyMask for u64 {
    fn blank(cells: usize) -> Self {
        debug_assert!(cells <= 64);
        u64::MAX.checked_shl(cells as u32).unwrap_or(0)
    }

    #[inline(always)]
    fn is_occupied(&self, idx: usize) -> bool {
        (self >> idx) & 1 == 1
    }

    #[inline(always)]
    fn occupy(&mut self, idx: usize) {
        *self |= 1 << idx;
    }

    #[inline(always)]
    fn first_free(&self) -> Option<usize> {
        // trailing ones equal the index of the first 0 bit
        (*self != u64::MAX).then(|| self.trailing_ones() as usize)
    }
}

impl OccupancyMask for WideMask {
    fn blank(cells: usize) -> Self {
        bitvec![u64, Lsb0; 0; cells]
    }

    #[inline]
    fn is_occupied(&self, idx: usize) -> bool {
        self[idx]
    }

    #[inline]
    fn occupy(&mut self, idx: usize) {
        self.set(idx, true);
    }

    #[inline]
    fn first_free(&self) -> Option<usize> {
        self.first_zero()
    }
}
