use crate::exact;
use crate::grid::CellGrid;
use crate::normalize;
use crate::overlap::{self, Union};
use crate::strip;
use crate::triangle;
use crate::types::{Layout, Limits, Method, PanelSpec, Region, Solution};

pub struct Solver {
    panel: PanelSpec,
    region: Region,
    limits: Limits,
}

impl Solver {
    pub fn new(panel: PanelSpec, region: Region) -> Self {
        Self {
            panel,
            region,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn solve(&self) -> Solution {
        let [extent_a, extent_b] = self.region.extents();
        if normalize::any_non_positive(&[self.panel.width, self.panel.height, extent_a, extent_b]) {
            tracing::debug!(panel = %self.panel, region = %self.region, "non-positive size, nothing fits");
            return Solution::degenerate();
        }

        let solution = match self.region {
            Region::Rectangle { width, height } => self.solve_rectangle(width, height),
            Region::Triangle { base, height } => self.solve_triangle(base, height),
            Region::Overlap {
                width,
                height,
                dx,
                dy,
            } => self.solve_overlap(width, height, dx, dy),
        };
        tracing::debug!(
            panel = %self.panel,
            region = %self.region,
            count = solution.count,
            method = %solution.method,
            cell_size = solution.cell_size,
            "packed"
        );
        solution
    }

    fn solve_rectangle(&self, width: i64, height: i64) -> Solution {
        let (scale, [a, b, x, y]) =
            normalize::normalize([self.panel.width, self.panel.height, width, height]);
        let cells = x as u128 * y as u128;
        tracing::debug!(a, b, x, y, cells, "normalized rectangle");

        if cells <= self.limits.rectangle_cells as u128 {
            let grid = CellGrid::rectangle(x as usize, y as usize);
            let outcome = exact::solve(&grid, a as usize, b as usize);
            return Solution {
                count: outcome.count,
                method: Method::Exact,
                cell_size: scale,
                layout: Some(Layout {
                    grid,
                    placements: outcome.placements,
                }),
            };
        }

        Solution {
            count: strip::pack(a as u64, b as u64, x as u64, y as u64),
            method: Method::StripFallback,
            cell_size: scale,
            layout: None,
        }
    }

    fn solve_triangle(&self, base: i64, height: i64) -> Solution {
        let (scale, [a, b, x, h]) =
            normalize::normalize([self.panel.width, self.panel.height, base, height]);
        tracing::debug!(a, b, base = x, height = h, "normalized triangle");

        Solution {
            count: triangle::pack(a as u64, b as u64, x as u64, h as u64),
            method: Method::TriangleStrips,
            cell_size: scale,
            layout: None,
        }
    }

    fn solve_overlap(&self, width: i64, height: i64, dx: i64, dy: i64) -> Solution {
        let (scale, [a, b, x, y, dx, dy]) = normalize::normalize([
            self.panel.width,
            self.panel.height,
            width,
            height,
            dx,
            dy,
        ]);
        let union = Union::new(x, y, dx, dy);
        let valid = union.valid_cells();
        tracing::debug!(a, b, x, y, dx, dy, valid, "normalized overlap");

        if valid > self.limits.overlap_cells as u128 {
            return Solution {
                count: overlap::pack_strips(&union, a as u64, b as u64),
                method: Method::OverlapStrips,
                cell_size: scale,
                layout: None,
            };
        }

        if union.is_separated() {
            // no panel can bridge the gap: two independent copies
            let grid = CellGrid::rectangle(x as usize, y as usize);
            let single = exact::solve(&grid, a as usize, b as usize);
            return Solution {
                count: 2 * single.count,
                method: Method::Exact,
                cell_size: scale,
                layout: None,
            };
        }

        let grid = union.grid();
        let outcome = exact::solve(&grid, a as usize, b as usize);
        Solution {
            count: outcome.count,
            method: Method::Exact,
            cell_size: scale,
            layout: Some(Layout {
                grid,
                placements: outcome.placements,
            }),
        }
    }
}

pub fn pack(panel: PanelSpec, region: Region) -> u64 {
    Solver::new(panel, region).solve().count
}

/// Panels of `panel_w x panel_h` in a `roof_w x roof_h` rectangle.
///
/// Above the exact gate the strip fallback loops once per normalized unit of
/// each roof side, so sides near `i64::MAX` do not finish in practice.
pub fn pack_rectangle(panel_w: i64, panel_h: i64, roof_w: i64, roof_h: i64) -> u64 {
    pack(
        PanelSpec::new(panel_w, panel_h),
        Region::Rectangle {
            width: roof_w,
            height: roof_h,
        },
    )
}

/// Panels in an isosceles triangle with base `base_x` and height `height_h`.
///
/// The staircase table holds one entry per normalized unit of height, so a
/// height too large to allocate panics.
pub fn pack_triangle(panel_w: i64, panel_h: i64, base_x: i64, height_h: i64) -> u64 {
    pack(
        PanelSpec::new(panel_w, panel_h),
        Region::Triangle {
            base: base_x,
            height: height_h,
        },
    )
}

/// Panels in the union of two `rect_w x rect_h` rectangles, the second shifted
/// by `(dx, dy)`.
///
/// Above the exact gate each strip runs a knapsack over its normalized height,
/// so cost grows linearly with the rectangle sides.
pub fn pack_overlap(panel_w: i64, panel_h: i64, rect_w: i64, rect_h: i64, dx: i64, dy: i64) -> u64 {
    pack(
        PanelSpec::new(panel_w, panel_h),
        Region::Overlap {
            width: rect_w,
            height: rect_h,
            dx,
            dy,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(panel: (i64, i64), region: Region) -> Solution {
        Solver::new(PanelSpec::new(panel.0, panel.1), region).solve()
    }

    fn rectangle(width: i64, height: i64) -> Region {
        Region::Rectangle { width, height }
    }

    #[test]
    fn test_unit_panels_tile() {
        assert_eq!(pack_rectangle(1, 1, 5, 5), 25);
    }

    #[test]
    fn test_two_by_three_in_square() {
        assert_eq!(pack_rectangle(2, 3, 6, 6), 6);
    }

    #[test]
    fn test_square_panels_waste_border() {
        let sol = solve((3, 3), rectangle(10, 10));
        assert_eq!(sol.count, 9);
        assert_eq!(sol.method, Method::StripFallback);
    }

    #[test]
    fn test_triangle_staircase() {
        assert_eq!(pack_triangle(1, 1, 4, 4), 6);
        // same staircase at twice the scale
        assert_eq!(pack_triangle(2, 2, 8, 8), 6);
    }

    #[test]
    fn test_overlap_small_union_is_exact() {
        let sol = solve(
            (2, 2),
            Region::Overlap {
                width: 4,
                height: 4,
                dx: 2,
                dy: 2,
            },
        );
        assert_eq!(sol.count, 7);
        assert_eq!(sol.method, Method::Exact);
        assert_eq!(sol.cell_size, 2);
        let layout = sol.layout.as_ref().expect("exact overlap keeps its layout");
        assert_eq!(layout.grid.valid_cells(), 7);
        assert_eq!(layout.placements.len(), 7);
        assert_eq!(sol.coverage_percent(), Some(100.0));
    }

    #[test]
    fn test_overlap_negative_shift() {
        assert_eq!(pack_overlap(1, 1, 3, 3, -1, -1), 14);
        assert_eq!(pack_overlap(1, 1, 3, 3, -1, -1), pack_overlap(1, 1, 3, 3, 1, 1));
    }

    #[test]
    fn test_overlap_without_shift_is_rectangle() {
        assert_eq!(pack_overlap(2, 3, 6, 6, 0, 0), pack_rectangle(2, 3, 6, 6));
    }

    #[test]
    fn test_overlap_touching_rectangles_join() {
        // two 3x3 squares side by side form a 6x3 roof: nine dominoes
        assert_eq!(pack_overlap(1, 2, 3, 3, 3, 0), 9);
    }

    #[test]
    fn test_overlap_separated_rectangles() {
        let sol = solve(
            (1, 2),
            Region::Overlap {
                width: 3,
                height: 3,
                dx: 10,
                dy: -40,
            },
        );
        assert_eq!(sol.count, 8);
        assert_eq!(sol.method, Method::Exact);
        assert!(sol.layout.is_none());
    }

    #[test]
    fn test_overlap_large_union_uses_strips() {
        let sol = solve(
            (2, 1),
            Region::Overlap {
                width: 20,
                height: 10,
                dx: 5,
                dy: 5,
            },
        );
        assert_eq!(sol.method, Method::OverlapStrips);
        assert_eq!(sol.count, 162);
    }

    #[test]
    fn test_overlap_gate_boundary() {
        let stacked = |width| Region::Overlap {
            width,
            height: 5,
            dx: 0,
            dy: 5,
        };

        // 8x10 union: exactly 80 cells
        let sol = solve((1, 2), stacked(8));
        assert_eq!(sol.method, Method::Exact);
        assert_eq!(sol.count, 40);

        // 9x10 union: 90 cells, the column strips beat the row strips
        let sol = solve((1, 2), stacked(9));
        assert_eq!(sol.method, Method::OverlapStrips);
        assert_eq!(sol.count, 45);
    }

    #[test]
    fn test_thin_roofs_inside_gate() {
        let sol = solve((1, 2), rectangle(32, 2));
        assert_eq!(sol.method, Method::Exact);
        assert_eq!(sol.count, 32);
        assert_eq!(sol.coverage_percent(), Some(100.0));

        let sol = solve(
            (1, 2),
            Region::Overlap {
                width: 40,
                height: 1,
                dx: 0,
                dy: 1,
            },
        );
        assert_eq!(sol.method, Method::Exact);
        assert_eq!(sol.count, 40);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(pack_rectangle(0, 1, 5, 5), 0);
        assert_eq!(pack_rectangle(1, -1, 5, 5), 0);
        assert_eq!(pack_rectangle(1, 1, 0, 5), 0);
        assert_eq!(pack_rectangle(1, 1, 5, -5), 0);
        assert_eq!(pack_triangle(1, 1, 0, 4), 0);
        assert_eq!(pack_triangle(-2, 1, 4, 4), 0);
        assert_eq!(pack_overlap(1, 1, 0, 4, 1, 1), 0);
        assert_eq!(solve((0, 0), rectangle(3, 3)).method, Method::Degenerate);
    }

    #[test]
    fn test_scale_invariance() {
        for k in 1..=5 {
            for (a, b, x, y) in [(1, 2, 5, 7), (2, 3, 7, 8), (3, 5, 40, 31)] {
                assert_eq!(
                    pack_rectangle(k * a, k * b, k * x, k * y),
                    pack_rectangle(a, b, x, y),
                    "k={k} panel {a}x{b} roof {x}x{y}"
                );
            }
            assert_eq!(pack_triangle(k, 2 * k, 9 * k, 7 * k), pack_triangle(1, 2, 9, 7));
            assert_eq!(
                pack_overlap(k, 2 * k, 5 * k, 4 * k, -2 * k, 3 * k),
                pack_overlap(1, 2, 5, 4, -2, 3)
            );
        }
    }

    #[test]
    fn test_square_panels_tile_trivially() {
        for a in 1..=4 {
            for x in 1..=20 {
                for y in [1, 3, 7, 8, 15, 20] {
                    assert_eq!(
                        pack_rectangle(a, a, x, y),
                        ((x / a) * (y / a)) as u64,
                        "{a}x{a} in {x}x{y}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_exact_never_below_strip_fallback() {
        for (a, b, side) in [(1, 2, 8), (2, 3, 8), (3, 5, 8), (1, 4, 6)] {
            for x in 1..=side {
                for y in 1..=side {
                    let sol = solve((a, b), rectangle(x, y));
                    assert_eq!(sol.method, Method::Exact);
                    assert!(
                        sol.count >= strip::pack(a as u64, b as u64, x as u64, y as u64),
                        "{a}x{b} in {x}x{y}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_threshold_switches_method() {
        // 8x8 = 64 cells is still searched, 13x5 = 65 is not
        assert_eq!(solve((1, 2), rectangle(8, 8)).method, Method::Exact);
        assert_eq!(solve((1, 2), rectangle(13, 5)).method, Method::StripFallback);

        let forced = Solver::new(PanelSpec::new(2, 3), rectangle(6, 6))
            .with_limits(Limits {
                rectangle_cells: 0,
                ..Limits::default()
            })
            .solve();
        assert_eq!(forced.method, Method::StripFallback);
        assert_eq!(forced.count, 6);
    }

    #[test]
    fn test_monotone_in_roof_size() {
        let exact_range = 1..=7;
        for x in exact_range.clone() {
            for y in exact_range.clone() {
                let here = pack_rectangle(2, 3, x, y);
                assert!(here <= pack_rectangle(2, 3, x + 1, y), "x grows from {x}x{y}");
                assert!(here <= pack_rectangle(2, 3, x, y + 1), "y grows from {x}x{y}");
            }
        }
        for x in (10..=40).step_by(3) {
            for y in (10..=40).step_by(3) {
                let here = pack_rectangle(3, 5, x, y);
                assert!(here <= pack_rectangle(3, 5, x + 1, y));
                assert!(here <= pack_rectangle(3, 5, x, y + 1));
            }
        }
    }

    #[test]
    fn test_large_roof_strip_mix() {
        assert_eq!(pack_rectangle(3, 5, 100, 100), 666);
    }

    #[test]
    fn test_exact_layout_reported() {
        let sol = solve((1, 2), rectangle(3, 3));
        assert_eq!(sol.count, 4);
        let layout = sol.layout.unwrap();
        assert_eq!(layout.placements.len(), 4);
        assert_eq!(layout.grid.cells(), 9);
    }
}
