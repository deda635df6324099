//! In-memory render backend.
//!
//! Records rectangles without drawing them. Used by native builds and tests
//! to observe exactly what the grid asked the renderer to do.

use crate::color::Rgb;
use crate::error::Result;
use crate::layout::CellRect;

use super::backend::{RectHandle, RectRenderer, RectStyle};
use super::store::{RectEntry, RectStore};

#[derive(Debug, Default)]
pub struct MemoryRenderer {
    store: RectStore,
    width: u32,
    height: u32,
    /// Number of individual fill/stroke writes since creation.
    attribute_writes: usize,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size set by the last `resize`.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of fill and stroke updates applied to existing rectangles.
    pub fn attribute_writes(&self) -> usize {
        self.attribute_writes
    }

    /// Live rectangles in creation order.
    pub fn rects(&self) -> impl Iterator<Item = &RectEntry> {
        self.store.iter()
    }

    pub fn entry(&self, handle: RectHandle) -> Option<&RectEntry> {
        self.store.get(handle)
    }
}

impl RectRenderer for MemoryRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn create_rect(&mut self, rect: CellRect, style: RectStyle) -> Result<RectHandle> {
        Ok(self.store.insert(rect, style))
    }

    fn set_fill(&mut self, handle: RectHandle, color: Rgb) -> Result<()> {
        self.store.set_fill(handle, color)?;
        self.attribute_writes += 1;
        Ok(())
    }

    fn set_stroke(&mut self, handle: RectHandle, color: Rgb) -> Result<()> {
        self.store.set_stroke(handle, color)?;
        self.attribute_writes += 1;
        Ok(())
    }

    fn fill(&self, handle: RectHandle) -> Option<Rgb> {
        self.store.get(handle).map(|e| e.style.fill)
    }

    fn stroke(&self, handle: RectHandle) -> Option<Rgb> {
        self.store.get(handle).map(|e| e.style.stroke)
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
