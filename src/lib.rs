//! graphpaper - interactive graph paper for the web
//!
//! Draws a grid of square cells on a `<canvas>` via WebAssembly and Canvas 2D:
//! - Click or drag to paint cells with the draw color
//! - Change the paper color without losing painted cells
//! - Restroke the grid lines in any color
//! - Eyedropper: sample a cell's color into any palette slot
//!
//! The grid logic (`grid`) is independent of the browser. It talks to a
//! [`render::RectRenderer`] and to host controls through the traits in
//! [`controls`]; in-memory implementations of both drive it natively.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GraphPaper } from 'graphpaper';
//! await init();
//! const paper = new GraphPaper(canvas, { width: 600, height: 600, cellSize: 25 }, dpr);
//! paper.arm_eyedropper('paper');
//! ```

pub mod color;
pub mod controls;
pub mod error;
pub mod grid;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod options;
pub mod types;

// Rendering modules (Canvas 2D)
pub mod layout;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main viewer struct
#[cfg(target_arch = "wasm32")]
pub use viewer::GraphPaper;

pub use color::Rgb;
pub use error::{GraphPaperError, Result};
pub use grid::{connect_pickers, GridCanvas, GridSnapshot, SharedGrid};
pub use options::{ControlSelectors, GridOptions, ResolvedOptions};
pub use types::*;

/// Validate construction options and return the resolved grid as JSON
///
/// Reports the columns and rows a `GraphPaper` built from `options` would
/// have, without touching the DOM.
///
/// # Errors
/// Returns an error if the options are malformed or describe an invalid grid.
#[wasm_bindgen]
pub fn resolve_options(options: &str) -> std::result::Result<String, JsValue> {
    let resolved = GridOptions::from_json(options)
        .and_then(|options| options.resolve())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let summary = serde_json::json!({
        "config": resolved.config,
        "columns": resolved.config.columns(),
        "rows": resolved.config.rows(),
        "palette": resolved.palette,
    });
    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
