//! Event handling for GraphPaper.
//!
//! Handlers that can change the drawing return whether they did, so the
//! caller can notify the host once the grid borrow is released.

use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

use crate::types::{PaletteSlot, PointerOutcome};

use super::{DomGrid, GraphPaper};

/// Position of a mouse event relative to the canvas, in CSS pixels.
pub(super) fn surface_point(canvas: &HtmlCanvasElement, event: &Event) -> Option<(f64, f64)> {
    let event = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();
    Some((
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    ))
}

impl GraphPaper {
    pub(crate) fn internal_mouse_down(grid: &DomGrid, x: f64, y: f64) -> bool {
        let Ok(mut g) = grid.try_borrow_mut() else {
            return false;
        };
        let Some(coord) = g.cell_at_point(x, y) else {
            return false;
        };
        match g.pointer_down(coord) {
            Ok(PointerOutcome::Sampled { slot, color }) => {
                log::info!("{slot} color set to {color} by eyedropper");
                true
            }
            Ok(PointerOutcome::Painted(_)) => true,
            Ok(PointerOutcome::Ignored) => false,
            Err(e) => {
                log::error!("pointer down at ({x}, {y}) failed: {e}");
                false
            }
        }
    }

    pub(crate) fn internal_mouse_move(grid: &DomGrid, x: f64, y: f64) -> bool {
        let Ok(mut g) = grid.try_borrow_mut() else {
            return false;
        };
        // Only a drag paints; skip hit testing otherwise
        if !g.interaction().is_pointer_down() {
            return false;
        }
        let Some(coord) = g.cell_at_point(x, y) else {
            return false;
        };
        match g.pointer_over(coord) {
            Ok(outcome) => outcome != PointerOutcome::Ignored,
            Err(e) => {
                log::error!("pointer move at ({x}, {y}) failed: {e}");
                false
            }
        }
    }

    pub(crate) fn internal_mouse_up(grid: &DomGrid) {
        if let Ok(mut g) = grid.try_borrow_mut() {
            g.pointer_up();
        }
    }

    pub(crate) fn internal_arm(grid: &DomGrid, slot: PaletteSlot) {
        if let Ok(mut g) = grid.try_borrow_mut() {
            g.arm_eyedropper(slot);
        }
    }

    pub(crate) fn internal_redraw(grid: &DomGrid) -> bool {
        let Ok(mut g) = grid.try_borrow_mut() else {
            return false;
        };
        // Rejected input is already logged by the grid
        g.redraw().is_ok()
    }
}
