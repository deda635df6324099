//! Structured error types for graphpaper.

use crate::render::RectHandle;
use crate::types::DimensionField;

/// All errors that can occur while configuring or driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum GraphPaperError {
    /// A grid dimension was non-numeric, fractional, or not positive.
    #[error("Invalid {field}: {value:?} (expected a positive whole number)")]
    InvalidDimension {
        field: DimensionField,
        value: String,
    },

    /// The requested grid would create more cells than the renderer is allowed to hold.
    #[error("Grid too large: {cells} cells (limit {max})")]
    GridTooLarge { cells: u64, max: u64 },

    /// The drawing surface would exceed what a browser canvas can hold.
    #[error("Surface too large: {field} {value}px (limit {max}px)")]
    SurfaceTooLarge {
        field: DimensionField,
        value: u32,
        max: u32,
    },

    /// A color string could not be parsed.
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// The renderer was handed a handle it does not own.
    #[error("Unknown rectangle handle {0:?}")]
    UnknownRect(RectHandle),

    /// Construction options could not be deserialized.
    #[error("Options: {0}")]
    Options(String),

    /// A DOM control or drawing context was unavailable.
    #[error("DOM: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphPaperError>;

impl From<serde_json::Error> for GraphPaperError {
    fn from(e: serde_json::Error) -> Self {
        Self::Options(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GraphPaperError> for wasm_bindgen::JsValue {
    fn from(e: GraphPaperError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
