//! Common test utilities and assertion helpers.
//!
//! Builds grids over the in-memory renderer and controls, and keeps clones
//! of the pickers so tests can act as the user.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use graphpaper::controls::memory::{MemoryForm, MemoryPicker};
use graphpaper::controls::Pickers;
use graphpaper::render::{MemoryRenderer, RectRenderer};
use graphpaper::{
    connect_pickers, BoundaryPolicy, CellCoord, GridCanvas, GridConfig, Palette, Rgb, SharedGrid,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestGrid = GridCanvas<MemoryRenderer, MemoryPicker, MemoryForm>;

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 128, 0);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);

// ============================================================================
// Grid Construction
// ============================================================================

/// Route the crate's `log` output to the test harness.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Grid with the default palette and clipping boundary.
#[must_use]
pub fn grid(width: u32, height: u32, cell_size: u32) -> TestGrid {
    grid_with(width, height, cell_size, BoundaryPolicy::Clip, Palette::default())
}

#[must_use]
pub fn grid_with(
    width: u32,
    height: u32,
    cell_size: u32,
    boundary: BoundaryPolicy,
    palette: Palette,
) -> TestGrid {
    init_logging();
    GridCanvas::new(
        GridConfig::new(width, height, cell_size, boundary).unwrap(),
        palette,
        MemoryRenderer::new(),
        Pickers::default(),
        MemoryForm::new(),
    )
    .unwrap()
}

/// A shared grid with picker handlers connected, plus user-side picker clones.
#[must_use]
pub fn shared_grid(
    width: u32,
    height: u32,
    cell_size: u32,
) -> (
    SharedGrid<MemoryRenderer, MemoryPicker, MemoryForm>,
    Pickers<MemoryPicker>,
) {
    init_logging();
    let pickers = Pickers::default();
    let user = pickers.clone();
    let canvas = GridCanvas::new(
        GridConfig::new(width, height, cell_size, BoundaryPolicy::Clip).unwrap(),
        Palette::default(),
        MemoryRenderer::new(),
        pickers,
        MemoryForm::new(),
    )
    .unwrap();
    let shared = Rc::new(RefCell::new(canvas));
    connect_pickers(&shared);
    (shared, user)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Fill of a cell, read back from the renderer rather than the cell model.
pub fn rendered_fill(grid: &TestGrid, col: u32, row: u32) -> Rgb {
    let cell = grid
        .cell(CellCoord::new(col, row))
        .unwrap_or_else(|| panic!("no cell at ({col}, {row})"));
    grid.renderer().fill(cell.handle).unwrap()
}

/// Assert that the model and the renderer agree on every cell.
pub fn assert_in_sync(grid: &TestGrid) {
    assert_eq!(grid.cells().len(), grid.renderer().len());
    for cell in grid.cells() {
        let entry = grid.renderer().entry(cell.handle).unwrap();
        assert_eq!(entry.style.fill, cell.fill, "fill of {:?}", cell.coord);
        assert_eq!(entry.style.stroke, grid.palette().grid, "stroke of {:?}", cell.coord);
    }
}

/// Coordinates of every cell not showing `color`.
pub fn cells_not(grid: &TestGrid, color: Rgb) -> Vec<CellCoord> {
    grid.cells()
        .iter()
        .filter(|cell| cell.fill != color)
        .map(|cell| cell.coord)
        .collect()
}
