use crate::grid::CellGrid;
use crate::types::Placement;

const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Draws one character per cell: blank outside the roof, `.` for uncovered
/// roof cells, and a letter per panel.
pub fn render_layout(grid: &CellGrid, placements: &[Placement]) -> String {
    let mut result = String::new();
    for row in 0..grid.height() {
        let line: String = (0..grid.width())
            .map(|col| {
                if !grid.is_valid(col, row) {
                    return ' ';
                }
                placements
                    .iter()
                    .position(|p| p.covers(col as u32, row as u32))
                    .map_or('.', |i| LABELS[i % LABELS.len()] as char)
            })
            .collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    #[test]
    fn test_render_two_panels() {
        let grid = CellGrid::rectangle(3, 2);
        let placements = vec![
            Placement {
                rect: Rect::new(2, 1),
                x: 0,
                y: 0,
                rotated: false,
            },
            Placement {
                rect: Rect::new(1, 2),
                x: 2,
                y: 0,
                rotated: true,
            },
        ];
        assert_eq!(render_layout(&grid, &placements), "AAB\n..B\n");
    }

    #[test]
    fn test_render_outside_cells_blank() {
        let grid = CellGrid::from_fn(3, 2, |col, row| !(row == 0 && col == 0));
        assert_eq!(render_layout(&grid, &[]), " ..\n...\n");
    }

    #[test]
    fn test_render_trims_trailing_blanks() {
        let grid = CellGrid::from_fn(3, 1, |col, _| col == 0);
        assert_eq!(render_layout(&grid, &[]), ".\n");
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render_layout(&CellGrid::rectangle(0, 0), &[]), "");
    }
}
