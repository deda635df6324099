//! Connecting picker change events to a shared `GridCanvas`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::controls::{ChangeHandler, ColorPicker, FormFields};
use crate::render::RectRenderer;
use crate::types::PaletteSlot;

use super::GridCanvas;

/// A canvas shared between event listeners.
pub type SharedGrid<R, P, F> = Rc<RefCell<GridCanvas<R, P, F>>>;

/// Route each picker's change event to the matching palette handler.
///
/// Handlers hold a weak reference, so the canvas (which owns the pickers,
/// which own the handlers) is not kept alive by its own listeners. A change
/// that arrives while the canvas is borrowed is rejected and the picker
/// reverts, so widget and palette never disagree.
pub fn connect_pickers<R, P, F>(grid: &SharedGrid<R, P, F>)
where
    R: RectRenderer + 'static,
    P: ColorPicker + 'static,
    F: FormFields + 'static,
{
    for slot in PaletteSlot::ALL {
        let handler = change_handler(Rc::downgrade(grid), slot);
        grid.borrow_mut().pickers_mut().get_mut(slot).on_change(handler);
    }
}

fn change_handler<R, P, F>(
    grid: Weak<RefCell<GridCanvas<R, P, F>>>,
    slot: PaletteSlot,
) -> ChangeHandler
where
    R: RectRenderer + 'static,
    P: ColorPicker + 'static,
    F: FormFields + 'static,
{
    Box::new(move |color| {
        // Nothing left to keep in sync with
        let Some(shared) = grid.upgrade() else {
            return true;
        };
        let Ok(mut canvas) = shared.try_borrow_mut() else {
            log::warn!("{slot} color change to {color} dropped: grid busy");
            return false;
        };
        // The palette slot is updated before any renderer write, so the
        // picker keeps the new color even if repainting fails.
        if let Err(e) = canvas.on_color_changed(slot, color) {
            log::error!("{slot} color change to {color} failed: {e}");
        }
        true
    })
}
