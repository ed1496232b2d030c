//! Geometry and strip packing for the union of two shifted rectangles.
//!
//! Coordinates are normalized cells, shifted so the bounding box of the union
//! starts at the origin. They are kept as `i128` so extreme shifts cannot
//! overflow.

use crate::grid::CellGrid;

/// Half-open cell rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x0: i128,
    pub x1: i128,
    pub y0: i128,
    pub y1: i128,
}

impl Span {
    pub fn area(&self) -> u128 {
        ((self.x1 - self.x0).max(0) * (self.y1 - self.y0).max(0)) as u128
    }

    pub fn intersection(&self, other: &Span) -> Span {
        Span {
            x0: self.x0.max(other.x0),
            x1: self.x1.min(other.x1),
            y0: self.y0.max(other.y0),
            y1: self.y1.min(other.y1),
        }
    }

    /// True when a gap of at least one cell separates the two spans.
    pub fn apart(&self, other: &Span) -> bool {
        self.x1 < other.x0 || other.x1 < self.x0 || self.y1 < other.y0 || other.y1 < self.y0
    }

    pub fn contains(&self, col: i128, row: i128) -> bool {
        (self.x0..self.x1).contains(&col) && (self.y0..self.y1).contains(&row)
    }

    fn transposed(&self) -> Span {
        Span {
            x0: self.y0,
            x1: self.y1,
            y0: self.x0,
            y1: self.x1,
        }
    }
}

/// Two congruent rectangles and the bounding box of their union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Union {
    pub rects: [Span; 2],
    pub width: i128,
    pub height: i128,
}

impl Union {
    /// `width x height` rectangle at the origin plus a copy shifted by `(dx, dy)`.
    pub fn new(width: i64, height: i64, dx: i64, dy: i64) -> Self {
        let (w, h, dx, dy) = (width as i128, height as i128, dx as i128, dy as i128);
        let shift_x = -dx.min(0);
        let shift_y = -dy.min(0);
        let first = Span {
            x0: shift_x,
            x1: shift_x + w,
            y0: shift_y,
            y1: shift_y + h,
        };
        let second = Span {
            x0: shift_x + dx,
            x1: shift_x + dx + w,
            y0: shift_y + dy,
            y1: shift_y + dy + h,
        };
        Self {
            width: first.x1.max(second.x1),
            height: first.y1.max(second.y1),
            rects: [first, second],
        }
    }

    /// Cells inside at least one of the rectangles.
    pub fn valid_cells(&self) -> u128 {
        let [first, second] = &self.rects;
        first.area() + second.area() - first.intersection(second).area()
    }

    pub fn is_separated(&self) -> bool {
        self.rects[0].apart(&self.rects[1])
    }

    /// Cell grid over the bounding box. Only sensible for small unions.
    pub fn grid(&self) -> CellGrid {
        CellGrid::from_fn(self.width as usize, self.height as usize, |col, row| {
            self.rects
                .iter()
                .any(|r| r.contains(col as i128, row as i128))
        })
    }

    /// The same union mirrored along the diagonal.
    pub fn transposed(&self) -> Self {
        Self {
            rects: self.rects.map(|r| r.transposed()),
            width: self.height,
            height: self.width,
        }
    }
}

/// Sorts and merges overlapping or touching intervals.
pub fn merge_intervals(mut intervals: Vec<(i128, i128)>) -> Vec<(i128, i128)> {
    intervals.sort_unstable();
    let mut merged: Vec<(i128, i128)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Unbounded knapsack over a strip of `height` rows.
///
/// A row of thickness `b` holds `cap_ab` panels, a row of thickness `a` holds
/// `cap_ba`. Rows may leave part of the strip unused.
pub fn row_knapsack(height: usize, a: usize, b: usize, cap_ab: u64, cap_ba: u64) -> u64 {
    let mut dp = vec![0u64; height + 1];
    for t in 0..=height {
        if t + b <= height {
            dp[t + b] = dp[t + b].max(dp[t] + cap_ab);
        }
        if t + a <= height {
            dp[t + a] = dp[t + a].max(dp[t] + cap_ba);
        }
    }
    dp.into_iter().max().unwrap_or(0)
}

/// Packs horizontal strips bounded by the rectangles' top and bottom edges.
///
/// Rows of thickness `b` hold `a`-wide panels, rows of thickness `a` hold
/// `b`-wide panels.
pub fn horizontal_strips(union: &Union, a: u64, b: u64) -> u64 {
    let mut cuts = vec![0, union.height];
    for r in &union.rects {
        cuts.push(r.y0.clamp(0, union.height));
        cuts.push(r.y1.clamp(0, union.height));
    }
    cuts.sort_unstable();
    cuts.dedup();

    let mut total = 0;
    for pair in cuts.windows(2) {
        let (low, high) = (pair[0], pair[1]);
        let intervals: Vec<(i128, i128)> = union
            .rects
            .iter()
            .filter(|r| r.y0 <= low && high <= r.y1)
            .map(|r| (r.x0.max(0), r.x1.min(union.width)))
            .filter(|(start, end)| end > start)
            .collect();
        if intervals.is_empty() {
            continue;
        }

        let lengths: Vec<u64> = merge_intervals(intervals)
            .into_iter()
            .map(|(start, end)| (end - start) as u64)
            .collect();
        let cap_ab = lengths.iter().map(|len| len / a).sum();
        let cap_ba = lengths.iter().map(|len| len / b).sum();

        total += row_knapsack((high - low) as usize, a as usize, b as usize, cap_ab, cap_ba);
    }
    total
}

/// Best of horizontal strips and vertical strips (the transposed problem).
pub fn pack_strips(union: &Union, a: u64, b: u64) -> u64 {
    let by_rows = horizontal_strips(union, a, b);
    let by_columns = horizontal_strips(&union.transposed(), b, a);
    by_rows.max(by_columns)
}
