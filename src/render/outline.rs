//! Pixel-exact cell outlines.
//!
//! A 1px line stroked on an integer coordinate straddles two pixel columns
//! and lands half-strength in both. Every outline here is snapped to pixel
//! centers and kept inside the cell's own pixels: a cell draws its left and
//! top edge, plus its right and bottom edge when it touches the far side of
//! the surface. Neighbours then share exactly one line, and repainting a
//! cell (fill, then outline) never touches a pixel of another cell.

use crate::layout::CellRect;

/// A straight line between two points in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Helper to get crisp pixel position for 1px lines
pub fn crisp(x: f64) -> f64 {
    x.floor() + 0.5
}

/// Outline of `rect` on a `surface_width` x `surface_height` surface.
///
/// Empty when no part of the cell is visible.
pub fn cell_outline(rect: CellRect, surface_width: u32, surface_height: u32) -> Vec<Segment> {
    let right = rect.x.saturating_add(rect.width).min(surface_width);
    let bottom = rect.y.saturating_add(rect.height).min(surface_height);
    if right <= rect.x || bottom <= rect.y {
        return Vec::new();
    }

    let (left, top) = (f64::from(rect.x), f64::from(rect.y));
    let (right_px, bottom_px) = (f64::from(right), f64::from(bottom));

    let mut segments = vec![
        // Left
        Segment {
            x1: crisp(left),
            y1: top,
            x2: crisp(left),
            y2: bottom_px,
        },
        // Top
        Segment {
            x1: left,
            y1: crisp(top),
            x2: right_px,
            y2: crisp(top),
        },
    ];
    if right == surface_width {
        segments.push(Segment {
            x1: crisp(right_px - 1.0),
            y1: top,
            x2: crisp(right_px - 1.0),
            y2: bottom_px,
        });
    }
    if bottom == surface_height {
        segments.push(Segment {
            x1: left,
            y1: crisp(bottom_px - 1.0),
            x2: right_px,
            y2: crisp(bottom_px - 1.0),
        });
    }
    segments
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;
    use crate::layout::GridLayout;
    use crate::types::{BoundaryPolicy, GridConfig};
    use std::collections::HashMap;
    use test_case::test_case;

    fn rect(x: u32, y: u32, size: u32) -> CellRect {
        CellRect {
            x,
            y,
            width: size,
            height: size,
        }
    }

    /// Pixel column (vertical) or row (horizontal) a 1px segment covers.
    fn covered_line(segment: &Segment) -> (bool, u32) {
        if segment.x1 == segment.x2 {
            (true, segment.x1.floor() as u32)
        } else {
            (false, segment.y1.floor() as u32)
        }
    }

    #[test]
    fn test_crisp() {
        assert_eq!(crisp(25.0), 25.5);
        assert_eq!(crisp(25.7), 25.5);
    }

    #[test]
    fn test_interior_cell_draws_left_and_top() {
        let segments = cell_outline(rect(25, 25, 25), 100, 100);
        assert_eq!(
            segments,
            vec![
                Segment {
                    x1: 25.5,
                    y1: 25.0,
                    x2: 25.5,
                    y2: 50.0
                },
                Segment {
                    x1: 25.0,
                    y1: 25.5,
                    x2: 50.0,
                    y2: 25.5
                },
            ]
        );
    }

    #[test]
    fn test_corner_cell_closes_the_grid() {
        let segments = cell_outline(rect(75, 25, 25), 100, 50);
        assert_eq!(segments.len(), 4);
        assert!(segments.contains(&Segment {
            x1: 99.5,
            y1: 25.0,
            x2: 99.5,
            y2: 50.0
        }));
        assert!(segments.contains(&Segment {
            x1: 75.0,
            y1: 49.5,
            x2: 100.0,
            y2: 49.5
        }));
    }

    #[test]
    fn test_partial_cell_is_cut_at_the_surface() {
        let segments = cell_outline(rect(100, 50, 25), 110, 60);
        assert!(segments.iter().all(|s| s.x2 <= 110.0 && s.y2 <= 60.0));
        assert!(segments.iter().any(|s| s.x1 == 109.5));
    }

    #[test]
    fn test_cell_outside_surface_draws_nothing() {
        assert!(cell_outline(rect(100, 0, 25), 100, 50).is_empty());
    }

    #[test_case(100, 50, 25, BoundaryPolicy::Clip ; "exact clipped")]
    #[test_case(110, 60, 25, BoundaryPolicy::Clip ; "partial clipped")]
    #[test_case(100, 50, 25, BoundaryPolicy::Inclusive ; "exact inclusive")]
    fn test_outlines_stay_inside_their_cell(
        width: u32,
        height: u32,
        size: u32,
        boundary: BoundaryPolicy,
    ) {
        let layout = GridLayout::new(&GridConfig::new(width, height, size, boundary).unwrap());
        let mut lines: HashMap<(bool, u32), usize> = HashMap::new();
        for (_, cell) in layout.origins() {
            for segment in cell_outline(cell, width, height) {
                let (vertical, px) = covered_line(&segment);
                let (lo, hi) = if vertical {
                    (cell.x, cell.x + cell.width)
                } else {
                    (cell.y, cell.y + cell.height)
                };
                assert!((lo..hi).contains(&px), "{segment:?} leaves cell {cell:?}");
                assert!(segment.x1 >= f64::from(cell.x) && segment.y1 >= f64::from(cell.y));
                *lines.entry((vertical, px)).or_default() += 1;
            }
        }
        // Every boundary is drawn, including the far edges
        assert!(lines.contains_key(&(true, 0)));
        assert!(lines.contains_key(&(true, width - 1)));
        assert!(lines.contains_key(&(false, 0)));
        assert!(lines.contains_key(&(false, height - 1)));
    }
}
