//! Cell grid of a normalized roof.

use crate::mask::OccupancyMask;

/// `width x height` cells, each either inside the roof or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    valid: Vec<bool>,
}

impl CellGrid {
    /// Grid whose every cell lies inside the roof.
    pub fn rectangle(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            valid: vec![true; width * height],
        }
    }

    /// Grid where `inside(col, row)` decides which cells belong to the roof.
    pub fn from_fn(width: usize, height: usize, inside: impl Fn(usize, usize) -> bool) -> Self {
        let valid = (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .map(|(col, row)| inside(col, row))
            .collect();
        Self {
            width,
            height,
            valid,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    pub fn valid_cells(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.valid[row * self.width + col]
    }

    /// The same grid mirrored along the diagonal.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.height, self.width, |col, row| self.is_valid(row, col))
    }

    /// Starting mask of the search: cells outside the roof are occupied.
    pub fn initial_mask<M: OccupancyMask>(&self) -> M {
        let mut mask = M::blank(self.cells());
        for (idx, _) in self.valid.iter().enumerate().filter(|(_, v)| !**v) {
            mask.occupy(idx);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::WideMask;

    #[test]
    fn test_rectangle_all_valid() {
        let grid = CellGrid::rectangle(3, 2);
        assert_eq!(grid.cells(), 6);
        assert_eq!(grid.valid_cells(), 6);
        assert!(grid.is_valid(2, 1));
        assert!(!grid.is_valid(3, 0));
        assert!(!grid.is_valid(0, 2));
        assert_eq!(grid.initial_mask::<u64>(), !0b11_1111);
    }

    #[test]
    fn test_transposed_swaps_axes() {
        let grid = CellGrid::from_fn(3, 2, |col, row| !(col == 2 && row == 0));
        let flipped = grid.transposed();
        assert_eq!((flipped.width(), flipped.height()), (2, 3));
        assert!(!flipped.is_valid(0, 2));
        assert!(flipped.is_valid(1, 2));
        assert_eq!(flipped.valid_cells(), 5);
        assert_eq!(flipped.transposed(), grid);
    }

    #[test]
    fn test_initial_mask_marks_outside_cells() {
        // L shape: the top-right cell is missing
        let grid = CellGrid::from_fn(2, 2, |col, row| !(col == 1 && row == 0));
        assert_eq!(grid.valid_cells(), 3);

        let word: u64 = grid.initial_mask();
        assert!(word.is_occupied(1));
        assert_eq!(word.first_free(), Some(0));

        let wide: WideMask = grid.initial_mask();
        assert!(wide.is_occupied(1));
        assert!(!wide.is_occupied(2));
    }
}
