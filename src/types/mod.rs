//! Data types for the grid, its palette and pointer interaction.

mod cell;
mod grid;
mod interaction;
mod palette;

pub use cell::*;
pub use grid::*;
pub use interaction::*;
pub use palette::*;
