//! In-memory controls for native builds and tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Rgb;
use crate::types::DimensionField;

use super::{ChangeHandler, ColorPicker, FormFields};

#[derive(Default)]
struct PickerInner {
    color: Rgb,
    handler: Option<ChangeHandler>,
    programmatic_sets: usize,
}

/// Color picker backed by shared memory.
///
/// Clones share state, so a test can keep a clone after handing the picker
/// to a grid and use it to play the user.
#[derive(Clone, Default)]
pub struct MemoryPicker {
    inner: Rc<RefCell<PickerInner>>,
}

impl MemoryPicker {
    pub fn new(color: Rgb) -> Self {
        let picker = Self::default();
        picker.inner.borrow_mut().color = color;
        picker
    }

    /// Simulate the user choosing `color`: update the widget, then fire the handler.
    ///
    /// The handler runs with no borrow of the picker held, so it may reach
    /// back into whatever owns the picker. A rejected change restores the
    /// previous color.
    pub fn user_pick(&self, color: Rgb) {
        let (previous, handler) = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.color;
            inner.color = color;
            (previous, inner.handler.take())
        };
        if let Some(mut handler) = handler {
            let accepted = handler(color);
            let mut inner = self.inner.borrow_mut();
            if !accepted {
                inner.color = previous;
            }
            if inner.handler.is_none() {
                inner.handler = Some(handler);
            }
        }
    }

    pub fn has_handler(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }

    /// Number of `set_color` calls made by the program (not the user).
    pub fn programmatic_sets(&self) -> usize {
        self.inner.borrow().programmatic_sets
    }
}

impl std::fmt::Debug for MemoryPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryPicker")
            .field("color", &inner.color)
            .field("has_handler", &inner.handler.is_some())
            .finish()
    }
}

impl ColorPicker for MemoryPicker {
    fn color(&self) -> Rgb {
        self.inner.borrow().color
    }

    fn set_color(&mut self, color: Rgb) {
        let mut inner = self.inner.borrow_mut();
        inner.color = color;
        inner.programmatic_sets += 1;
    }

    fn on_change(&mut self, handler: ChangeHandler) {
        self.inner.borrow_mut().handler = Some(handler);
    }
}

/// Form fields held as plain strings.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    width: String,
    height: String,
    cell_size: String,
    hint_visible: bool,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type text into a field, as a user would.
    pub fn set_text(&mut self, field: DimensionField, text: &str) {
        *self.slot_mut(field) = text.to_string();
    }

    pub fn text(&self, field: DimensionField) -> &str {
        match field {
            DimensionField::Width => &self.width,
            DimensionField::Height => &self.height,
            DimensionField::CellSize => &self.cell_size,
        }
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    fn slot_mut(&mut self, field: DimensionField) -> &mut String {
        match field {
            DimensionField::Width => &mut self.width,
            DimensionField::Height => &mut self.height,
            DimensionField::CellSize => &mut self.cell_size,
        }
    }
}

impl FormFields for MemoryForm {
    fn read(&self, field: DimensionField) -> String {
        self.text(field).to_string()
    }

    fn write(&mut self, field: DimensionField, value: u32) {
        *self.slot_mut(field) = value.to_string();
    }

    fn set_hint_visible(&mut self, visible: bool) {
        self.hint_visible = visible;
    }
}
