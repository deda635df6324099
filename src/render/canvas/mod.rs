//! Canvas 2D rendering backend.
//!
//! Keeps every rectangle in a [`RectStore`](super::store::RectStore) and
//! repaints only the rectangle whose attributes changed.

mod renderer;

pub use renderer::CanvasRectRenderer;
