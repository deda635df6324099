//! Pointer and eyedropper handling for `GridCanvas`.
//!
//! Every handler receives the acting cell explicitly; the host resolves
//! surface coordinates with [`GridCanvas::cell_at_point`] first.

use crate::controls::{ColorPicker, FormFields};
use crate::error::Result;
use crate::render::RectRenderer;
use crate::types::{CellCoord, Interaction, PaletteSlot, PointerOutcome};

use super::GridCanvas;

impl<R, P, F> GridCanvas<R, P, F>
where
    R: RectRenderer,
    P: ColorPicker,
    F: FormFields,
{
    /// Pointer pressed on a cell.
    ///
    /// Paints the cell and starts a drag, or, with the eyedropper armed,
    /// samples the cell instead of painting it.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn pointer_down(&mut self, coord: CellCoord) -> Result<PointerOutcome> {
        match self.interaction {
            Interaction::EyedropperArmed { target } => self.sample(target, coord),
            Interaction::Idle | Interaction::Painting { .. } => {
                if !self.paint(coord)? {
                    return Ok(PointerOutcome::Ignored);
                }
                self.interaction = Interaction::Painting { last: coord };
                Ok(PointerOutcome::Painted(coord))
            }
        }
    }

    /// Pointer moved over a cell.
    ///
    /// While dragging, entering a different cell paints it.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn pointer_over(&mut self, coord: CellCoord) -> Result<PointerOutcome> {
        let Interaction::Painting { last } = self.interaction else {
            return Ok(PointerOutcome::Ignored);
        };
        if last == coord || !self.paint(coord)? {
            return Ok(PointerOutcome::Ignored);
        }
        self.interaction = Interaction::Painting { last: coord };
        Ok(PointerOutcome::Painted(coord))
    }

    /// Pointer released anywhere. Ends a drag.
    pub fn pointer_up(&mut self) {
        if self.interaction.is_pointer_down() {
            self.interaction = Interaction::Idle;
        }
    }

    /// Make the next press sample a cell into `target`.
    ///
    /// Ends a drag in progress. Arming again switches the target.
    pub fn arm_eyedropper(&mut self, target: PaletteSlot) {
        self.interaction = Interaction::EyedropperArmed { target };
        self.form.set_hint_visible(true);
        log::debug!("eyedropper armed for {target} color");
    }

    /// Disarm the eyedropper without sampling. Returns whether it was armed.
    pub fn cancel_eyedropper(&mut self) -> bool {
        if self.interaction.eyedropper_target().is_none() {
            return false;
        }
        self.interaction = Interaction::Idle;
        self.form.set_hint_visible(false);
        true
    }

    /// Fill `coord` with the draw color. Returns false when no such cell exists.
    fn paint(&mut self, coord: CellCoord) -> Result<bool> {
        let color = self.palette.draw;
        let Some(cell) = self.cell_mut(coord) else {
            return Ok(false);
        };
        cell.fill = color;
        let handle = cell.handle;
        self.renderer.set_fill(handle, color)?;
        Ok(true)
    }

    fn sample(&mut self, target: PaletteSlot, coord: CellCoord) -> Result<PointerOutcome> {
        let Some(color) = self.cell(coord).map(|cell| cell.fill) else {
            return Ok(PointerOutcome::Ignored);
        };

        // Setting the picker does not fire its handler; apply the change here.
        self.pickers.get_mut(target).set_color(color);
        self.on_color_changed(target, color)?;

        self.interaction = Interaction::Idle;
        self.form.set_hint_visible(false);
        log::debug!(
            "sampled {color} from cell ({}, {}) into {target} color",
            coord.col,
            coord.row
        );
        Ok(PointerOutcome::Sampled {
            slot: target,
            color,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use crate::color::Rgb;
    use crate::controls::memory::{MemoryForm, MemoryPicker};
    use crate::controls::Pickers;
    use crate::grid::GridCanvas;
    use crate::render::MemoryRenderer;
    use crate::types::{
        BoundaryPolicy, CellCoord, GridConfig, Interaction, Palette, PaletteSlot, PointerOutcome,
    };

    fn grid() -> GridCanvas<MemoryRenderer, MemoryPicker, MemoryForm> {
        GridCanvas::new(
            GridConfig::new(100, 100, 25, BoundaryPolicy::Clip).unwrap(),
            Palette::default(),
            MemoryRenderer::new(),
            Pickers::default(),
            MemoryForm::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_hover_without_press_does_nothing() {
        let mut g = grid();
        let outcome = g.pointer_over(CellCoord::new(1, 1)).unwrap();
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(g.cell(CellCoord::new(1, 1)).unwrap().fill, Rgb::WHITE);
    }

    #[test]
    fn test_hover_same_cell_is_ignored() {
        let mut g = grid();
        let c = CellCoord::new(0, 0);
        g.pointer_down(c).unwrap();
        assert_eq!(g.pointer_over(c).unwrap(), PointerOutcome::Ignored);
    }

    #[test]
    fn test_press_outside_grid_keeps_state() {
        let mut g = grid();
        let outcome = g.pointer_down(CellCoord::new(9, 9)).unwrap();
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(g.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_arming_ends_drag() {
        let mut g = grid();
        g.pointer_down(CellCoord::new(0, 0)).unwrap();
        g.arm_eyedropper(PaletteSlot::Grid);
        assert_eq!(
            g.interaction(),
            Interaction::EyedropperArmed {
                target: PaletteSlot::Grid
            }
        );
        assert_eq!(
            g.pointer_over(CellCoord::new(1, 0)).unwrap(),
            PointerOutcome::Ignored
        );
    }

    #[test]
    fn test_rearm_switches_target() {
        let mut g = grid();
        g.arm_eyedropper(PaletteSlot::Grid);
        g.arm_eyedropper(PaletteSlot::Paper);
        assert_eq!(g.interaction().eyedropper_target(), Some(PaletteSlot::Paper));
    }

    #[test]
    fn test_cancel_eyedropper() {
        let mut g = grid();
        assert!(!g.cancel_eyedropper());
        g.arm_eyedropper(PaletteSlot::Draw);
        assert!(g.form().hint_visible());
        assert!(g.cancel_eyedropper());
        assert!(!g.form().hint_visible());
        assert_eq!(g.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_sample_outside_grid_stays_armed() {
        let mut g = grid();
        g.arm_eyedropper(PaletteSlot::Draw);
        let outcome = g.pointer_down(CellCoord::new(40, 0)).unwrap();
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert_eq!(g.interaction().eyedropper_target(), Some(PaletteSlot::Draw));
        assert!(g.form().hint_visible());
    }

    #[test]
    fn test_release_while_armed_keeps_armed() {
        let mut g = grid();
        g.arm_eyedropper(PaletteSlot::Paper);
        g.pointer_up();
        assert_eq!(g.interaction().eyedropper_target(), Some(PaletteSlot::Paper));
    }
}
