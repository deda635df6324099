//! Host controls the grid talks to: color pickers and form fields.
//!
//! The grid never owns a widget toolkit. It sees three [`ColorPicker`]s and
//! one [`FormFields`] through these traits; the DOM implementations live in
//! `dom` (wasm32 only) and the in-memory ones in `memory`.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod memory;

use crate::color::Rgb;
use crate::types::{DimensionField, PaletteSlot};

/// Callback fired when the user picks a color.
///
/// Returns false when the change could not be applied; the picker then
/// shows its previous color again.
pub type ChangeHandler = Box<dyn FnMut(Rgb) -> bool>;

/// A color input widget.
pub trait ColorPicker {
    /// Color currently shown by the widget.
    fn color(&self) -> Rgb;

    /// Show `color` without firing the change handler.
    ///
    /// Callers that need the usual side effects of a change invoke them
    /// explicitly after setting.
    fn set_color(&mut self, color: Rgb);

    /// Install the handler fired when the user changes the color.
    /// Replaces any previous handler.
    fn on_change(&mut self, handler: ChangeHandler);
}

/// The numeric inputs and the eyedropper hint of the host page.
pub trait FormFields {
    /// Raw text of a dimension input.
    fn read(&self, field: DimensionField) -> String;

    /// Show a validated dimension in its input.
    fn write(&mut self, field: DimensionField, value: u32);

    /// Show or hide the "pick a cell" hint.
    fn set_hint_visible(&mut self, visible: bool);
}

/// One picker per palette slot.
#[derive(Debug, Clone, Default)]
pub struct Pickers<P> {
    pub draw: P,
    pub paper: P,
    pub grid: P,
}

impl<P> Pickers<P> {
    pub fn new(draw: P, paper: P, grid: P) -> Self {
        Self { draw, paper, grid }
    }

    pub fn get(&self, slot: PaletteSlot) -> &P {
        match slot {
            PaletteSlot::Draw => &self.draw,
            PaletteSlot::Paper => &self.paper,
            PaletteSlot::Grid => &self.grid,
        }
    }

    pub fn get_mut(&mut self, slot: PaletteSlot) -> &mut P {
        match slot {
            PaletteSlot::Draw => &mut self.draw,
            PaletteSlot::Paper => &mut self.paper,
            PaletteSlot::Grid => &mut self.grid,
        }
    }
}
