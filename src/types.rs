use serde::{Deserialize, Serialize};

use crate::grid::CellGrid;

/// Panel size as supplied by the caller. Either orientation may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelSpec {
    pub width: i64,
    pub height: i64,
}

impl PanelSpec {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for PanelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Roof shape to be covered with panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Region {
    Rectangle { width: i64, height: i64 },
    /// Isosceles triangle, apex centred over the base.
    Triangle { base: i64, height: i64 },
    /// Two `width x height` rectangles, the second shifted by `(dx, dy)`.
    Overlap {
        width: i64,
        height: i64,
        dx: i64,
        dy: i64,
    },
}

impl Region {
    /// Sizes that must be strictly positive for the roof to hold anything.
    pub fn extents(&self) -> [i64; 2] {
        match *self {
            Region::Rectangle { width, height } => [width, height],
            Region::Triangle { base, height } => [base, height],
            Region::Overlap { width, height, .. } => [width, height],
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Rectangle { width, height } => write!(f, "rectangle {width}x{height}"),
            Region::Triangle { base, height } => {
                write!(f, "triangle base {base} height {height}")
            }
            Region::Overlap {
                width,
                height,
                dx,
                dy,
            } => write!(f, "two {width}x{height} rectangles shifted by ({dx}, {dy})"),
        }
    }
}

/// Width and height in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A panel placed on the cell grid, `(x, y)` being its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub rect: Rect,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl Placement {
    pub fn covers(&self, col: u32, row: u32) -> bool {
        (self.x..self.x + self.rect.w).contains(&col)
            && (self.y..self.y + self.rect.h).contains(&row)
    }
}

/// Which algorithm produced a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// A size was zero or negative.
    Degenerate,
    Exact,
    StripFallback,
    TriangleStrips,
    OverlapStrips,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Degenerate => "degenerate input",
            Method::Exact => "exact search",
            Method::StripFallback => "strip fallback",
            Method::TriangleStrips => "triangle strips",
            Method::OverlapStrips => "overlap strips",
        };
        f.write_str(name)
    }
}

/// Cell-count thresholds for the exact search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum `W * H` of a rectangular roof grid.
    pub rectangle_cells: usize,
    /// Maximum number of valid cells in an overlap union.
    pub overlap_cells: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            rectangle_cells: 64,
            overlap_cells: 80,
        }
    }
}

/// Exact packing found on a cell grid.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: CellGrid,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub count: u64,
    pub method: Method,
    /// Length of one grid cell in caller units.
    pub cell_size: u64,
    pub layout: Option<Layout>,
}

impl Solution {
    pub fn degenerate() -> Self {
        Self {
            count: 0,
            method: Method::Degenerate,
            cell_size: 1,
            layout: None,
        }
    }

    /// Fraction of the valid roof cells covered by panels, if a layout is known.
    pub fn coverage_percent(&self) -> Option<f64> {
        let layout = self.layout.as_ref()?;
        let valid = layout.grid.valid_cells() as u64;
        if valid == 0 {
            return Some(0.0);
        }
        let used: u64 = layout.placements.iter().map(|p| p.rect.area()).sum();
        Some(used as f64 / valid as f64 * 100.0)
    }
}
