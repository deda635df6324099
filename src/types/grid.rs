use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphPaperError, Result};

/// Upper bound on the number of cells a single grid may hold.
pub const MAX_CELLS: u64 = 250_000;

/// Upper bound on the surface width and height in logical pixels.
///
/// Browsers refuse canvases much past this (before the device pixel ratio is
/// applied), leaving them blank.
pub const MAX_SURFACE: u32 = 16_384;

/// Default surface width in logical pixels.
pub const DEFAULT_WIDTH: u32 = 600;
/// Default surface height in logical pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default edge length of a cell in logical pixels.
pub const DEFAULT_CELL_SIZE: u32 = 25;

/// The three numeric inputs that define a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimensionField {
    Width,
    Height,
    CellSize,
}

impl DimensionField {
    pub const ALL: [Self; 3] = [Self::Width, Self::Height, Self::CellSize];
}

impl fmt::Display for DimensionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::CellSize => "cell size",
        })
    }
}

/// How cells are laid out along the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Only cells whose origin lies strictly inside the surface.
    /// A partial cell is created when the size is not a multiple of the cell size.
    #[default]
    Clip,
    /// One extra row and column whose origin sits at or before the far edge,
    /// as produced by stepping `0..=width` by the cell size.
    Inclusive,
}

/// Grid dimensions. Always holds positive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    width: u32,
    height: u32,
    cell_size: u32,
    boundary: BoundaryPolicy,
}

impl GridConfig {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// Returns `InvalidDimension` for a zero value, `SurfaceTooLarge` when the
    /// width or height exceeds [`MAX_SURFACE`] and `GridTooLarge` when the
    /// resulting grid would exceed [`MAX_CELLS`].
    pub fn new(width: u32, height: u32, cell_size: u32, boundary: BoundaryPolicy) -> Result<Self> {
        for (field, value) in [
            (DimensionField::Width, width),
            (DimensionField::Height, height),
            (DimensionField::CellSize, cell_size),
        ] {
            if value == 0 {
                return Err(GraphPaperError::InvalidDimension {
                    field,
                    value: value.to_string(),
                });
            }
        }

        for (field, value) in [(DimensionField::Width, width), (DimensionField::Height, height)] {
            if value > MAX_SURFACE {
                return Err(GraphPaperError::SurfaceTooLarge {
                    field,
                    value,
                    max: MAX_SURFACE,
                });
            }
        }

        let config = Self {
            width,
            height,
            cell_size,
            boundary,
        };
        let cells = u64::from(config.columns()) * u64::from(config.rows());
        if cells > MAX_CELLS {
            return Err(GraphPaperError::GridTooLarge {
                cells,
                max: MAX_CELLS,
            });
        }
        Ok(config)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }

    /// Same dimensions under a different boundary policy.
    ///
    /// # Errors
    /// `Inclusive` adds a row and a column, which can push the grid over [`MAX_CELLS`].
    pub fn with_boundary(self, boundary: BoundaryPolicy) -> Result<Self> {
        Self::new(self.width, self.height, self.cell_size, boundary)
    }

    /// Number of cell columns.
    pub fn columns(&self) -> u32 {
        span_count(self.width, self.cell_size, self.boundary)
    }

    /// Number of cell rows.
    pub fn rows(&self) -> u32 {
        span_count(self.height, self.cell_size, self.boundary)
    }

    /// Value of one of the three dimensions.
    pub fn get(&self, field: DimensionField) -> u32 {
        match field {
            DimensionField::Width => self.width,
            DimensionField::Height => self.height,
            DimensionField::CellSize => self.cell_size,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            boundary: BoundaryPolicy::default(),
        }
    }
}

fn span_count(extent: u32, cell_size: u32, boundary: BoundaryPolicy) -> u32 {
    match boundary {
        BoundaryPolicy::Clip => extent.div_ceil(cell_size),
        BoundaryPolicy::Inclusive => extent / cell_size + 1,
    }
}

/// Parse the text of a numeric form field.
///
/// Accepts anything that reads as a finite, positive, whole number
/// ("25", " 25 ", "25.0", "2.5e1"). Empty input, NaN, fractions and values
/// that do not fit a `u32` are rejected rather than coerced.
///
/// # Errors
/// Returns `InvalidDimension` naming the field and the offending text.
pub fn parse_dimension(field: DimensionField, text: &str) -> Result<u32> {
    let invalid = || GraphPaperError::InvalidDimension {
        field,
        value: text.to_string(),
    };
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return if value == 0 { Err(invalid()) } else { Ok(value) };
    }
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    dimension_from_f64(field, value).map_err(|_| invalid())
}

/// Validate a numeric dimension coming from a JS number.
///
/// # Errors
/// Returns `InvalidDimension` for NaN, infinities, fractions, zero, negative
/// values and values above `u32::MAX`.
pub fn dimension_from_f64(field: DimensionField, value: f64) -> Result<u32> {
    let invalid = || GraphPaperError::InvalidDimension {
        field,
        value: value.to_string(),
    };
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX)
    {
        return Err(invalid());
    }
    // Range and integrality checked above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(value as u32)
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
    use test_case::test_case;

    #[test_case(100, 50, 25, BoundaryPolicy::Clip, 4, 2 ; "exact multiple clipped")]
    #[test_case(100, 50, 25, BoundaryPolicy::Inclusive, 5, 3 ; "exact multiple inclusive")]
    #[test_case(110, 60, 25, BoundaryPolicy::Clip, 5, 3 ; "partial cells clipped")]
    #[test_case(110, 60, 25, BoundaryPolicy::Inclusive, 5, 3 ; "partial cells inclusive")]
    #[test_case(600, 600, 25, BoundaryPolicy::Clip, 24, 24 ; "defaults clipped")]
    #[test_case(600, 600, 25, BoundaryPolicy::Inclusive, 25, 25 ; "defaults inclusive")]
    #[test_case(10, 10, 25, BoundaryPolicy::Clip, 1, 1 ; "cell larger than surface clipped")]
    #[test_case(10, 10, 25, BoundaryPolicy::Inclusive, 1, 1 ; "cell larger than surface inclusive")]
    fn test_counts(
        width: u32,
        height: u32,
        size: u32,
        boundary: BoundaryPolicy,
        columns: u32,
        rows: u32,
    ) {
        let config = GridConfig::new(width, height, size, boundary).unwrap();
        assert_eq!(config.columns(), columns);
        assert_eq!(config.rows(), rows);
    }

    #[test_case(0, 10, 10, DimensionField::Width ; "zero width")]
    #[test_case(10, 0, 10, DimensionField::Height ; "zero height")]
    #[test_case(10, 10, 0, DimensionField::CellSize ; "zero cell size")]
    fn test_zero_rejected(width: u32, height: u32, size: u32, expected: DimensionField) {
        let err = GridConfig::new(width, height, size, BoundaryPolicy::Clip).unwrap_err();
        match err {
            GraphPaperError::InvalidDimension { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_too_many_cells() {
        let err = GridConfig::new(1000, 1000, 1, BoundaryPolicy::Clip).unwrap_err();
        assert!(matches!(
            err,
            GraphPaperError::GridTooLarge {
                cells: 1_000_000,
                ..
            }
        ));
    }

    #[test_case(MAX_SURFACE + 1, 100, DimensionField::Width ; "wide")]
    #[test_case(100, 4_000_000_000, DimensionField::Height ; "tall")]
    fn test_surface_too_large(width: u32, height: u32, expected: DimensionField) {
        let err = GridConfig::new(width, height, 1_000_000_000, BoundaryPolicy::Clip).unwrap_err();
        match err {
            GraphPaperError::SurfaceTooLarge { field, max, .. } => {
                assert_eq!(field, expected);
                assert_eq!(max, MAX_SURFACE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_surface_at_limit_accepted() {
        let config = GridConfig::new(MAX_SURFACE, MAX_SURFACE, 64, BoundaryPolicy::Clip).unwrap();
        assert_eq!(config.columns(), 256);
    }

    #[test]
    fn test_inclusive_can_cross_the_limit() {
        let config = GridConfig::new(500, 500, 1, BoundaryPolicy::Clip).unwrap();
        assert!(config.with_boundary(BoundaryPolicy::Inclusive).is_err());
    }

    #[test_case("25", 25 ; "plain")]
    #[test_case(" 25 ", 25 ; "padded")]
    #[test_case("25.0", 25 ; "integral float")]
    #[test_case("2.5e1", 25 ; "exponent")]
    fn test_parse_dimension_accepts(text: &str, expected: u32) {
        assert_eq!(parse_dimension(DimensionField::Width, text).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("abc" ; "letters")]
    #[test_case("NaN" ; "nan")]
    #[test_case("inf" ; "infinity")]
    #[test_case("0" ; "zero")]
    #[test_case("-5" ; "negative")]
    #[test_case("12.5" ; "fraction")]
    #[test_case("99999999999" ; "overflow")]
    fn test_parse_dimension_rejects(text: &str) {
        let err = parse_dimension(DimensionField::CellSize, text).unwrap_err();
        match err {
            GraphPaperError::InvalidDimension { field, value } => {
                assert_eq!(field, DimensionField::CellSize);
                assert_eq!(value, text);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dimension_from_f64() {
        assert_eq!(dimension_from_f64(DimensionField::Height, 40.0).unwrap(), 40);
        assert!(dimension_from_f64(DimensionField::Height, f64::NAN).is_err());
        assert!(dimension_from_f64(DimensionField::Height, 0.5).is_err());
        assert!(dimension_from_f64(DimensionField::Height, -1.0).is_err());
    }
}
