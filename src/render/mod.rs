//! Rendering engine with pluggable backends.
//!
//! This module provides:
//! - The backend-agnostic `RectRenderer` trait
//! - An in-memory backend (native builds and tests)
//! - Pixel-exact cell outline geometry
//! - A Canvas 2D backend (wasm32)

pub mod backend;
pub mod memory;
pub mod outline;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use backend::{RectHandle, RectRenderer, RectStyle, STROKE_WIDTH};
pub use memory::MemoryRenderer;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRectRenderer;
