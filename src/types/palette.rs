use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{palette, Rgb};
use crate::error::{GraphPaperError, Result};

/// One of the three independently configurable colors.
///
/// Each slot has its own color picker and its own eyedropper button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteSlot {
    /// Fill applied when a cell is painted.
    Draw,
    /// Fill of unpainted cells.
    Paper,
    /// Stroke of every cell.
    Grid,
}

impl PaletteSlot {
    pub const ALL: [Self; 3] = [Self::Draw, Self::Paper, Self::Grid];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Paper => "paper",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for PaletteSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteSlot {
    type Err = GraphPaperError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draw" | "color" => Ok(Self::Draw),
            "paper" => Ok(Self::Paper),
            "grid" | "gridcolor" => Ok(Self::Grid),
            _ => Err(GraphPaperError::Options(format!(
                "unknown color target {s:?} (expected draw, paper or grid)"
            ))),
        }
    }
}

/// The paper, draw and grid colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub paper: Rgb,
    pub draw: Rgb,
    pub grid: Rgb,
}

impl Palette {
    pub fn get(&self, slot: PaletteSlot) -> Rgb {
        match slot {
            PaletteSlot::Draw => self.draw,
            PaletteSlot::Paper => self.paper,
            PaletteSlot::Grid => self.grid,
        }
    }

    pub fn set(&mut self, slot: PaletteSlot, color: Rgb) {
        match slot {
            PaletteSlot::Draw => self.draw = color,
            PaletteSlot::Paper => self.paper = color,
            PaletteSlot::Grid => self.grid = color,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            paper: palette::PAPER,
            draw: palette::DRAW,
            grid: palette::GRID,
        }
    }
}
