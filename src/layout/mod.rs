//! Layout engine for computing cell positions.
//!
//! This module handles:
//! - Cell origins under the configured boundary policy
//! - Hit testing of surface coordinates to cells
//! - The storage order shared by the grid and its renderer

mod grid_layout;

pub use grid_layout::{CellRect, GridLayout};
