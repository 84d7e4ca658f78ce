// src/sprite/
// ├── mod.rs       sheet layout : cell size, frames per row, direction -> row
// ├── state.rs     PlayerState + arena bounds
// ├── animation.rs timer gated frame counter
// ├── motion.rs    one movement step, rejected at the walls
// └── hero.rs      the drawable player : state + sheet + image

pub mod animation;
pub mod hero;
pub mod motion;
pub mod state;

use crate::engine::{Direction, Rect};
use serde::Deserialize;

/// Which sheet row holds the walk cycle for each heading.
///
/// This is art layout, not game logic: a sheet drawn in another order only
/// needs a different table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectionRows {
    pub down: u8,
    pub left: u8,
    pub up: u8,
    pub right: u8,
}

impl Default for DirectionRows {
    fn default() -> Self {
        DirectionRows {
            down: 0,
            left: 1,
            up: 2,
            right: 3,
        }
    }
}

impl DirectionRows {
    pub fn row(&self, direction: Direction) -> u8 {
        match direction {
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Up => self.up,
            Direction::Right => self.right,
        }
    }
}

/// Cell of the sheet, `row` picks the heading and `col` the animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetCell {
    pub row: u8,
    pub col: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    pub cell_width: i32,
    pub cell_height: i32,
    pub frames_per_row: u8,
    pub rows: DirectionRows,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        SpriteSheet {
            cell_width: 48,
            cell_height: 48,
            frames_per_row: 4,
            rows: DirectionRows::default(),
        }
    }
}

impl SpriteSheet {
    pub fn frame_rect(&self, direction: Direction, frame: u8) -> SheetCell {
        SheetCell {
            row: self.rows.row(direction),
            col: frame,
        }
    }

    /// Pixel rectangle of a cell inside the sheet image
    pub fn source(&self, cell: SheetCell) -> Rect {
        Rect::new_from_x_y(
            i32::from(cell.col) * self.cell_width,
            i32::from(cell.row) * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_rows() {
        let rows = DirectionRows::default();
        assert_eq!(rows.row(Direction::Down), 0);
        assert_eq!(rows.row(Direction::Left), 1);
        assert_eq!(rows.row(Direction::Up), 2);
        assert_eq!(rows.row(Direction::Right), 3);
    }

    #[test]
    fn frame_rect_is_row_by_direction_col_by_frame() {
        let sheet = SpriteSheet::default();
        assert_eq!(
            sheet.frame_rect(Direction::Up, 3),
            SheetCell { row: 2, col: 3 }
        );
        assert_eq!(
            sheet.frame_rect(Direction::Down, 0),
            SheetCell { row: 0, col: 0 }
        );
    }

    #[test]
    fn swapped_table_changes_only_the_row() {
        // the left/right swapped, up/down inverted layout seen in other sheets
        let sheet = SpriteSheet {
            rows: DirectionRows {
                down: 2,
                left: 3,
                up: 0,
                right: 1,
            },
            ..SpriteSheet::default()
        };
        assert_eq!(sheet.frame_rect(Direction::Left, 1), SheetCell { row: 3, col: 1 });
        assert_eq!(sheet.frame_rect(Direction::Up, 1), SheetCell { row: 0, col: 1 });
    }

    #[test]
    fn source_rect_in_pixels() {
        let sheet = SpriteSheet::default();
        let source = sheet.source(SheetCell { row: 1, col: 2 });
        assert_eq!(source, Rect::new_from_x_y(96, 48, 48, 48));
    }

    #[test]
    fn partial_rows_keep_defaults() {
        let rows: DirectionRows = serde_json::from_str(r#"{ "up": 0, "down": 2 }"#).unwrap();
        assert_eq!(rows.row(Direction::Up), 0);
        assert_eq!(rows.row(Direction::Down), 2);
        assert_eq!(rows.row(Direction::Left), 1);
        assert_eq!(rows.row(Direction::Right), 3);
    }
}
