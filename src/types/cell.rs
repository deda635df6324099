use serde::Serialize;

use crate::color::Rgb;
use crate::render::RectHandle;

/// Integer grid coordinates of a cell (column, row), 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellCoord {
    pub col: u32,
    pub row: u32,
}

impl CellCoord {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// One square of the grid and the rectangle that draws it.
#[derive(Debug, Clone)]
pub struct Cell {
    pub coord: CellCoord,
    /// Left edge in logical pixels.
    pub x: u32,
    /// Top edge in logical pixels.
    pub y: u32,
    pub size: u32,
    pub handle: RectHandle,
    /// Current fill: the paper color, or the draw color active when it was painted.
    pub fill: Rgb,
}

/// Serializable view of a single cell.
#[derive(Debug, Clone, Serialize)]
pub struct CellSnapshot {
    pub col: u32,
    pub row: u32,
    pub fill: Rgb,
}

impl From<&Cell> for CellSnapshot {
    fn from(cell: &Cell) -> Self {
        Self {
            col: cell.coord.col,
            row: cell.coord.row,
            fill: cell.fill,
        }
    }
}
