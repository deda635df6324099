//! Render backend trait for pluggable rectangle renderers.
//!
//! The grid only ever needs axis-aligned rectangles with a fill and a
//! stroke. Backends keep those rectangles addressable by handle so a single
//! attribute can change without redrawing the whole grid.

use crate::color::Rgb;
use crate::error::Result;
use crate::layout::CellRect;

/// Stroke width of every cell outline, in logical pixels.
pub const STROKE_WIDTH: f64 = 1.0;

/// Opaque reference to a rectangle owned by a backend.
///
/// Handles are tagged with the generation of the backend that issued them;
/// after `clear()` every older handle is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectHandle {
    pub(crate) generation: u32,
    pub(crate) index: usize,
}

/// Paint attributes of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub stroke_width: f64,
}

impl RectStyle {
    pub fn new(fill: Rgb, stroke: Rgb) -> Self {
        Self {
            fill,
            stroke,
            stroke_width: STROKE_WIDTH,
        }
    }
}

/// Trait for rectangle render backends
///
/// Implementations own the rectangles they create. Setters on a handle from a
/// previous generation fail with `UnknownRect`.
pub trait RectRenderer {
    /// Resize the drawing surface (logical pixels).
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Create a rectangle and draw it.
    fn create_rect(&mut self, rect: CellRect, style: RectStyle) -> Result<RectHandle>;

    /// Change the fill of an existing rectangle.
    fn set_fill(&mut self, handle: RectHandle, color: Rgb) -> Result<()>;

    /// Change the stroke of an existing rectangle.
    fn set_stroke(&mut self, handle: RectHandle, color: Rgb) -> Result<()>;

    /// Current fill, or None for an unknown handle.
    fn fill(&self, handle: RectHandle) -> Option<Rgb>;

    /// Current stroke, or None for an unknown handle.
    fn stroke(&self, handle: RectHandle) -> Option<Rgb>;

    /// Remove every rectangle and blank the surface.
    fn clear(&mut self);

    /// Number of live rectangles.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
