//! Pure geometry of a uniform grid.
//!
//! Cells are stored column-major (x outer, y inner), the order in which they
//! are built, so `index_of` and `origins` must agree.

use crate::types::{CellCoord, GridConfig};

/// Rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cell positions for one grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl GridLayout {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            columns: config.columns(),
            rows: config.rows(),
            cell_size: config.cell_size(),
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        usize::try_from(u64::from(self.columns) * u64::from(self.rows)).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Left edge of column `col`.
    pub fn column_origin(&self, col: u32) -> u32 {
        col.saturating_mul(self.cell_size)
    }

    /// Top edge of row `row`.
    pub fn row_origin(&self, row: u32) -> u32 {
        row.saturating_mul(self.cell_size)
    }

    /// Bounds of the cell at `coord`, or None when it lies outside the grid.
    pub fn cell_rect(&self, coord: CellCoord) -> Option<CellRect> {
        if !self.contains(coord) {
            return None;
        }
        Some(CellRect {
            x: self.column_origin(coord.col),
            y: self.row_origin(coord.row),
            width: self.cell_size,
            height: self.cell_size,
        })
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.col < self.columns && coord.row < self.rows
    }

    /// Every cell in storage order.
    pub fn origins(&self) -> impl Iterator<Item = (CellCoord, CellRect)> + '_ {
        (0..self.columns).flat_map(move |col| {
            (0..self.rows).filter_map(move |row| {
                let coord = CellCoord::new(col, row);
                self.cell_rect(coord).map(|rect| (coord, rect))
            })
        })
    }

    /// Position of `coord` in storage order.
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let index = u64::from(coord.col) * u64::from(self.rows) + u64::from(coord.row);
        usize::try_from(index).ok()
    }

    /// Find the cell under a point in logical pixels.
    ///
    /// Each cell owns the half-open square `[x, x + size) × [y, y + size)`.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<CellCoord> {
        let col = Self::span_at(x, self.cell_size)?;
        let row = Self::span_at(y, self.cell_size)?;
        let coord = CellCoord::new(col, row);
        self.contains(coord).then_some(coord)
    }

    fn span_at(pos: f64, cell_size: u32) -> Option<u32> {
        if !pos.is_finite() || pos < 0.0 || cell_size == 0 {
            return None;
        }
        let index = (pos / f64::from(cell_size)).floor();
        if index > f64::from(u32::MAX) {
            return None;
        }
        // Non-negative and bounded above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(index as u32)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::BoundaryPolicy;
    use test_case::test_case;

    fn layout(width: u32, height: u32, size: u32, boundary: BoundaryPolicy) -> GridLayout {
        GridLayout::new(&GridConfig::new(width, height, size, boundary).unwrap())
    }

    #[test]
    fn test_origins_follow_build_order() {
        let l = layout(50, 50, 25, BoundaryPolicy::Clip);
        let coords: Vec<_> = l.origins().map(|(c, r)| (c.col, c.row, r.x, r.y)).collect();
        assert_eq!(
            coords,
            vec![(0, 0, 0, 0), (0, 1, 0, 25), (1, 0, 25, 0), (1, 1, 25, 25)]
        );
    }

    #[test]
    fn test_index_matches_origins() {
        let l = layout(110, 60, 25, BoundaryPolicy::Inclusive);
        for (i, (coord, _)) in l.origins().enumerate() {
            assert_eq!(l.index_of(coord), Some(i));
        }
        assert_eq!(l.origins().count(), l.len());
    }

    #[test]
    fn test_inclusive_last_column_starts_at_edge() {
        let l = layout(100, 50, 25, BoundaryPolicy::Inclusive);
        let last = l.origins().last().unwrap().1;
        assert_eq!((last.x, last.y), (100, 50));
    }

    #[test]
    fn test_clip_last_column_starts_inside() {
        let l = layout(110, 60, 25, BoundaryPolicy::Clip);
        let last = l.origins().last().unwrap().1;
        assert_eq!((last.x, last.y), (100, 50));
        assert!(last.x < 110 && last.y < 60);
    }

    #[test_case(0.0, 0.0, Some((0, 0)) ; "origin")]
    #[test_case(24.9, 24.9, Some((0, 0)) ; "inside first cell")]
    #[test_case(25.0, 0.0, Some((1, 0)) ; "shared edge belongs to next cell")]
    #[test_case(99.0, 49.0, Some((3, 1)) ; "last clipped cell")]
    #[test_case(100.0, 0.0, None ; "past right edge")]
    #[test_case(-0.5, 3.0, None ; "negative")]
    #[test_case(f64::NAN, 3.0, None ; "nan")]
    fn test_cell_at(x: f64, y: f64, expected: Option<(u32, u32)>) {
        let l = layout(100, 50, 25, BoundaryPolicy::Clip);
        assert_eq!(
            l.cell_at(x, y),
            expected.map(|(col, row)| CellCoord::new(col, row))
        );
    }

    #[test]
    fn test_cell_rect_out_of_range() {
        let l = layout(100, 50, 25, BoundaryPolicy::Clip);
        assert!(l.cell_rect(CellCoord::new(4, 0)).is_none());
        assert_eq!(
            l.cell_rect(CellCoord::new(3, 1)),
            Some(CellRect {
                x: 75,
                y: 25,
                width: 25,
                height: 25
            })
        );
    }
}
