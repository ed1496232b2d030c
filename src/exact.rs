//! Exact packing by memoized exhaustive search over an occupancy mask.
//!
//! The search always resolves the lowest free cell first: it either puts a
//! panel there (in one of its two orientations, top-left corner on that cell)
//! or leaves the cell empty. Fixing this visiting order makes the best count a
//! pure function of the mask, which is what the memo table stores.

use rustc_hash::FxHashMap;

use crate::grid::CellGrid;
use crate::mask::{OccupancyMask, WideMask};
use crate::types::{Placement, Rect};

/// Widest grid that fits a single-word mask.
const WORD_CELLS: usize = 64;

/// Best count and one layout that reaches it.
#[derive(Debug, Clone)]
pub struct ExactOutcome {
    pub count: u64,
    pub placements: Vec<Placement>,
}

/// Solves `grid` exactly for `a x b` panels, picking the mask width from the
/// grid size.
///
/// The memo holds one entry per frontier shape, and the frontier spans about
/// one grid row, so wide grids are searched transposed with rows along the
/// short side. Placements are mapped back to `grid` coordinates.
///
/// The caller is responsible for keeping the grid small enough; the running
/// time still grows exponentially with the shorter side.
pub fn solve(grid: &CellGrid, a: usize, b: usize) -> ExactOutcome {
    if grid.width() <= grid.height() {
        return solve_rows(grid, a, b);
    }

    let outcome = solve_rows(&grid.transposed(), a, b);
    let upright = Rect::new(a as u32, b as u32);
    let placements = outcome
        .placements
        .into_iter()
        .map(|p| {
            let rect = p.rect.rotated();
            Placement {
                rect,
                x: p.y,
                y: p.x,
                rotated: rect != upright,
            }
        })
        .collect();
    ExactOutcome {
        count: outcome.count,
        placements,
    }
}

fn solve_rows(grid: &CellGrid, a: usize, b: usize) -> ExactOutcome {
    if grid.cells() <= WORD_CELLS {
        ExactSolver::<u64>::new(grid, a, b).run()
    } else {
        ExactSolver::<WideMask>::new(grid, a, b).run()
    }
}

pub struct ExactSolver<'g, M> {
    grid: &'g CellGrid,
    panel: (usize, usize),
    memo: FxHashMap<M, u32>,
}

impl<'g, M: OccupancyMask> ExactSolver<'g, M> {
    pub fn new(grid: &'g CellGrid, a: usize, b: usize) -> Self {
        Self {
            grid,
            panel: (a, b),
            memo: FxHashMap::default(),
        }
    }

    /// Computes the optimum from the grid's initial mask and rebuilds a layout.
    pub fn run(mut self) -> ExactOutcome {
        let initial: M = self.grid.initial_mask();
        let count = self.best(initial.clone());
        tracing::trace!(states = self.memo.len(), count, "exact search finished");
        let placements = self.layout(initial);
        debug_assert_eq!(placements.len() as u32, count);
        ExactOutcome {
            count: count as u64,
            placements,
        }
    }

    /// Panel shapes to try, the rotated one only when it differs.
    fn shapes(&self) -> ([(usize, usize); 2], usize) {
        let (a, b) = self.panel;
        ([(a, b), (b, a)], if a == b { 1 } else { 2 })
    }

    /// Most panels that still fit once `mask` is fixed.
    pub fn best(&mut self, mask: M) -> u32 {
        let Some(k) = mask.first_free() else {
            return 0;
        };
        if let Some(&hit) = self.memo.get(&mask) {
            return hit;
        }

        let width = self.grid.width();
        let (col, row) = (k % width, k / width);
        let (shapes, count) = self.shapes();

        let mut best = 0;
        for &(w, h) in &shapes[..count] {
            if self.fits(&mask, col, row, w, h) {
                let next = self.cover(&mask, col, row, w, h);
                best = best.max(1 + self.best(next));
            }
        }

        let mut skipped = mask.clone();
        skipped.occupy(k);
        best = best.max(self.best(skipped));

        self.memo.insert(mask, best);
        best
    }

    fn fits(&self, mask: &M, col: usize, row: usize, w: usize, h: usize) -> bool {
        let width = self.grid.width();
        if col + w > width || row + h > self.grid.height() {
            return false;
        }
        (row..row + h).all(|r| (col..col + w).all(|c| !mask.is_occupied(r * width + c)))
    }

    fn cover(&self, mask: &M, col: usize, row: usize, w: usize, h: usize) -> M {
        let width = self.grid.width();
        let mut next = mask.clone();
        for r in row..row + h {
            for c in col..col + w {
                next.occupy(r * width + c);
            }
        }
        next
    }

    /// Walks from `mask` along branches whose value matches the optimum.
    fn layout(&mut self, mut mask: M) -> Vec<Placement> {
        let width = self.grid.width();
        let (shapes, count) = self.shapes();
        let upright = Rect::new(self.panel.0 as u32, self.panel.1 as u32);
        let mut placements = Vec::new();

        'walk: while let Some(k) = mask.first_free() {
            let target = self.best(mask.clone());
            let (col, row) = (k % width, k / width);

            for (i, &(w, h)) in shapes[..count].iter().enumerate() {
                if !self.fits(&mask, col, row, w, h) {
                    continue;
                }
                let next = self.cover(&mask, col, row, w, h);
                if 1 + self.best(next.clone()) == target {
                    placements.push(Placement {
                        rect: if i == 1 { upright.rotated() } else { upright },
                        x: col as u32,
                        y: row as u32,
                        rotated: i == 1,
                    });
                    mask = next;
                    continue 'walk;
                }
            }

            mask.occupy(k);
        }

        placements
    }
}
