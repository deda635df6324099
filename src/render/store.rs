//! Generation-tagged rectangle storage shared by the render backends.

use crate::color::Rgb;
use crate::error::{GraphPaperError, Result};
use crate::layout::CellRect;

use super::backend::{RectHandle, RectStyle};

/// A rectangle and its current attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectEntry {
    pub rect: CellRect,
    pub style: RectStyle,
}

/// Slab of rectangles addressed by [`RectHandle`].
#[derive(Debug, Default)]
pub struct RectStore {
    entries: Vec<RectEntry>,
    generation: u32,
}

impl RectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rect: CellRect, style: RectStyle) -> RectHandle {
        let handle = RectHandle {
            generation: self.generation,
            index: self.entries.len(),
        };
        self.entries.push(RectEntry { rect, style });
        handle
    }

    pub fn get(&self, handle: RectHandle) -> Option<&RectEntry> {
        if handle.generation != self.generation {
            return None;
        }
        self.entries.get(handle.index)
    }

    /// Apply `update` to the entry behind `handle` and return the new entry.
    ///
    /// # Errors
    /// `UnknownRect` for a stale or foreign handle.
    pub fn update(
        &mut self,
        handle: RectHandle,
        update: impl FnOnce(&mut RectStyle),
    ) -> Result<RectEntry> {
        if handle.generation != self.generation {
            return Err(GraphPaperError::UnknownRect(handle));
        }
        let entry = self
            .entries
            .get_mut(handle.index)
            .ok_or(GraphPaperError::UnknownRect(handle))?;
        update(&mut entry.style);
        Ok(*entry)
    }

    pub fn set_fill(&mut self, handle: RectHandle, color: Rgb) -> Result<RectEntry> {
        self.update(handle, |style| style.fill = color)
    }

    pub fn set_stroke(&mut self, handle: RectHandle, color: Rgb) -> Result<RectEntry> {
        self.update(handle, |style| style.stroke = color)
    }

    /// Drop every entry and invalidate all outstanding handles.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RectEntry> {
        self.entries.iter()
    }
}
