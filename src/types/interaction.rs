use crate::color::Rgb;

use super::{CellCoord, PaletteSlot};

/// Pointer interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// Pointer up, no tool armed.
    #[default]
    Idle,
    /// Pointer held down; `last` is the most recently painted cell.
    Painting { last: CellCoord },
    /// The next press samples a cell into `target` instead of painting.
    EyedropperArmed { target: PaletteSlot },
}

impl Interaction {
    pub fn is_pointer_down(&self) -> bool {
        matches!(self, Self::Painting { .. })
    }

    /// Slot the eyedropper will write into, if armed.
    pub fn eyedropper_target(&self) -> Option<PaletteSlot> {
        match self {
            Self::EyedropperArmed { target } => Some(*target),
            _ => None,
        }
    }
}

/// What a pointer event did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// The cell was filled with the draw color.
    Painted(CellCoord),
    /// The cell's fill was copied into a palette slot.
    Sampled { slot: PaletteSlot, color: Rgb },
    /// Nothing changed.
    Ignored,
}
