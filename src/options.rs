//! Construction options.
//!
//! Every field is optional. Field names follow the JavaScript convention
//! (`cellSize`, `paperColor`, ...). The short form names (`w`, `h`, `box`,
//! `paper`, `hex`, `draw`, `grid`) are accepted as aliases.

use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::color::Rgb;
use crate::error::{GraphPaperError, Result};
use crate::types::{
    dimension_from_f64, BoundaryPolicy, DimensionField, GridConfig, Palette, DEFAULT_CELL_SIZE,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

/// Raw options as supplied by the host page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridOptions {
    #[serde(alias = "w")]
    pub width: Option<f64>,
    #[serde(alias = "h")]
    pub height: Option<f64>,
    #[serde(alias = "box")]
    pub cell_size: Option<f64>,
    #[serde(alias = "paper")]
    pub paper_color: Option<String>,
    /// Hex form of the paper color. Used when `paper_color` is absent.
    #[serde(alias = "hex")]
    pub paper_color_hex: Option<String>,
    #[serde(alias = "draw")]
    pub draw_color: Option<String>,
    #[serde(alias = "grid")]
    pub grid_color: Option<String>,
    pub boundary: Option<BoundaryPolicy>,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: Option<String>,
    pub controls: ControlSelectors,
}

/// CSS selectors of the host page controls.
///
/// Defaults match the element ids of the stock graph-paper page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlSelectors {
    pub width: String,
    pub height: String,
    pub cell_size: String,
    pub draw_picker: String,
    pub paper_picker: String,
    pub grid_picker: String,
    pub draw_dropper: String,
    pub paper_dropper: String,
    pub grid_dropper: String,
    pub redraw: String,
    pub hint: String,
}

impl Default for ControlSelectors {
    fn default() -> Self {
        Self {
            width: "#w".into(),
            height: "#h".into(),
            cell_size: "#box".into(),
            draw_picker: "#color".into(),
            paper_picker: "#paper".into(),
            grid_picker: "#gridcolor".into(),
            draw_dropper: "#colordrop".into(),
            paper_dropper: "#paperdrop".into(),
            grid_dropper: "#griddrop".into(),
            redraw: "#update".into(),
            hint: ".dropperhelp".into(),
        }
    }
}

/// Options after validation and defaulting.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub config: GridConfig,
    pub palette: Palette,
    pub controls: ControlSelectors,
    pub log_level: LevelFilter,
}

impl GridOptions {
    /// Parse options from a JSON object.
    ///
    /// # Errors
    /// Returns `Options` if the JSON is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every field and fill in defaults.
    ///
    /// # Errors
    /// `InvalidDimension`, `SurfaceTooLarge`, `GridTooLarge`, `InvalidColor` or `Options` for a
    /// bad log level.
    pub fn resolve(&self) -> Result<ResolvedOptions> {
        let dimension = |field: DimensionField, value: Option<f64>, default: u32| -> Result<u32> {
            value.map_or(Ok(default), |v| dimension_from_f64(field, v))
        };
        let config = GridConfig::new(
            dimension(DimensionField::Width, self.width, DEFAULT_WIDTH)?,
            dimension(DimensionField::Height, self.height, DEFAULT_HEIGHT)?,
            dimension(DimensionField::CellSize, self.cell_size, DEFAULT_CELL_SIZE)?,
            self.boundary.unwrap_or_default(),
        )?;

        let defaults = Palette::default();
        let paper = parse_color(self.paper_color.as_deref())?;
        let paper_hex = parse_color(self.paper_color_hex.as_deref())?;
        if let (Some(paper), Some(hex)) = (paper, paper_hex) {
            if paper != hex {
                log::warn!("paperColor {paper} and paperColorHex {hex} disagree; using {paper}");
            }
        }
        let palette = Palette {
            paper: paper.or(paper_hex).unwrap_or(defaults.paper),
            draw: parse_color(self.draw_color.as_deref())?.unwrap_or(defaults.draw),
            grid: parse_color(self.grid_color.as_deref())?.unwrap_or(defaults.grid),
        };

        let log_level = match self.log_level.as_deref() {
            None => LevelFilter::Info,
            Some(level) => LevelFilter::from_str(level.trim()).map_err(|_| {
                GraphPaperError::Options(format!("unknown log level {level:?}"))
            })?,
        };

        Ok(ResolvedOptions {
            config,
            palette,
            controls: self.controls.clone(),
            log_level,
        })
    }
}

fn parse_color(value: Option<&str>) -> Result<Option<Rgb>> {
    value.map(str::parse::<Rgb>).transpose()
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
    use crate::color::palette;

    #[test]
    fn test_empty_options_use_defaults() {
        let resolved = GridOptions::default().resolve().unwrap();
        assert_eq!(resolved.config.width(), 600);
        assert_eq!(resolved.config.height(), 600);
        assert_eq!(resolved.config.cell_size(), 25);
        assert_eq!(resolved.config.boundary(), BoundaryPolicy::Clip);
        assert_eq!(resolved.palette.paper, palette::PAPER);
        assert_eq!(resolved.palette.draw, palette::DRAW);
        assert_eq!(resolved.palette.grid, palette::GRID);
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.controls, ControlSelectors::default());
    }

    #[test]
    fn test_camel_case_fields() {
        let opts = GridOptions::from_json(
            r##"{"width": 100, "height": 50, "cellSize": 25,
                 "paperColor": "#000000", "drawColor": "rgb(255, 0, 0)",
                 "gridColor": "#00f", "boundary": "inclusive", "logLevel": "debug"}"##,
        )
        .unwrap();
        let resolved = opts.resolve().unwrap();
        assert_eq!(resolved.config.columns(), 5);
        assert_eq!(resolved.config.rows(), 3);
        assert_eq!(resolved.palette.paper, Rgb::BLACK);
        assert_eq!(resolved.palette.draw, Rgb::new(255, 0, 0));
        assert_eq!(resolved.palette.grid, Rgb::new(0, 0, 255));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_short_name_aliases() {
        let opts = GridOptions::from_json(
            r##"{"w": 200, "h": 100, "box": 10, "paper": "#eeeeee",
                 "draw": "#111111", "grid": "#222222"}"##,
        )
        .unwrap();
        let resolved = opts.resolve().unwrap();
        assert_eq!(resolved.config.width(), 200);
        assert_eq!(resolved.config.cell_size(), 10);
        assert_eq!(resolved.palette.paper, Rgb::new(0xee, 0xee, 0xee));
        assert_eq!(resolved.palette.draw, Rgb::new(0x11, 0x11, 0x11));
        assert_eq!(resolved.palette.grid, Rgb::new(0x22, 0x22, 0x22));
    }

    #[test]
    fn test_paper_hex_used_when_paper_missing() {
        let opts = GridOptions::from_json(r##"{"hex": "#ffeedd"}"##).unwrap();
        let resolved = opts.resolve().unwrap();
        assert_eq!(resolved.palette.paper, Rgb::new(0xff, 0xee, 0xdd));
    }

    #[test]
    fn test_paper_color_wins_over_hex() {
        let opts =
            GridOptions::from_json(r##"{"paperColor": "#000000", "paperColorHex": "#ffffff"}"##)
                .unwrap();
        assert_eq!(opts.resolve().unwrap().palette.paper, Rgb::BLACK);
    }

    #[test]
    fn test_partial_selector_override() {
        let opts = GridOptions::from_json(r##"{"controls": {"redraw": "#go"}}"##).unwrap();
        let resolved = opts.resolve().unwrap();
        assert_eq!(resolved.controls.redraw, "#go");
        assert_eq!(resolved.controls.width, "#w");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_size = GridOptions {
            cell_size: Some(0.0),
            ..GridOptions::default()
        };
        assert!(matches!(
            bad_size.resolve(),
            Err(GraphPaperError::InvalidDimension {
                field: DimensionField::CellSize,
                ..
            })
        ));

        let bad_width = GridOptions {
            width: Some(f64::NAN),
            ..GridOptions::default()
        };
        assert!(bad_width.resolve().is_err());

        let bad_color = GridOptions {
            draw_color: Some("chartreuse-ish".into()),
            ..GridOptions::default()
        };
        assert!(matches!(
            bad_color.resolve(),
            Err(GraphPaperError::InvalidColor(_))
        ));

        let bad_level = GridOptions {
            log_level: Some("loud".into()),
            ..GridOptions::default()
        };
        assert!(matches!(bad_level.resolve(), Err(GraphPaperError::Options(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GridOptions::from_json("{\"width\": \"wide\"}"),
            Err(GraphPaperError::Options(_))
        ));
    }
}
