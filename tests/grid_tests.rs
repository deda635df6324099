//! Grid construction and rebuild tests for graphpaper
//!
//! Tests for cell counts under both boundary policies, the initial state of
//! fills and strokes, option defaults, and redraw from the form fields.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_in_sync, grid, grid_with, TestGrid};
use graphpaper::controls::memory::{MemoryForm, MemoryPicker};
use graphpaper::controls::{ColorPicker, Pickers};
use graphpaper::render::{MemoryRenderer, RectRenderer};
use graphpaper::{
    BoundaryPolicy, CellCoord, DimensionField, GraphPaperError, GridCanvas, GridOptions,
    Interaction, Palette, PaletteSlot, Rgb,
};
use test_case::test_case;

// ============================================================================
// Cell Counts
// ============================================================================

#[test_case(100, 50, 25, 4, 2 ; "exact multiples")]
#[test_case(110, 60, 25, 5, 3 ; "partial edge cells")]
#[test_case(600, 600, 25, 24, 24 ; "defaults")]
#[test_case(10, 10, 25, 1, 1 ; "cell larger than surface")]
#[test_case(1, 1, 1, 1, 1 ; "single pixel")]
fn test_clip_counts(width: u32, height: u32, size: u32, columns: u32, rows: u32) {
    let g = grid(width, height, size);
    assert_eq!(g.dimensions(), (columns, rows));
    assert_eq!(g.cell_count(), (columns * rows) as usize);
    assert_eq!(g.renderer().len(), g.cell_count());
}

#[test_case(100, 50, 25, 5, 3 ; "exact multiples")]
#[test_case(110, 60, 25, 5, 3 ; "partial edge cells")]
#[test_case(600, 600, 25, 25, 25 ; "defaults")]
#[test_case(10, 10, 25, 1, 1 ; "cell larger than surface")]
fn test_inclusive_counts(width: u32, height: u32, size: u32, columns: u32, rows: u32) {
    let g = grid_with(width, height, size, BoundaryPolicy::Inclusive, Palette::default());
    assert_eq!(g.dimensions(), (columns, rows));
    assert_eq!(g.cell_count(), (columns * rows) as usize);
}

#[test]
fn test_build_order_is_column_major() {
    let g = grid(75, 50, 25);
    let coords: Vec<(u32, u32)> = g.cells().iter().map(|c| (c.coord.col, c.coord.row)).collect();
    assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
}

// ============================================================================
// Initial State
// ============================================================================

#[test]
fn test_fresh_grid_is_blank_paper() {
    let palette = Palette {
        paper: Rgb::new(250, 240, 230),
        draw: Rgb::BLACK,
        grid: Rgb::new(10, 20, 30),
    };
    let g = grid_with(200, 120, 20, BoundaryPolicy::Clip, palette);
    for cell in g.cells() {
        let entry = g.renderer().entry(cell.handle).unwrap();
        assert_eq!(entry.style.fill, palette.paper);
        assert_eq!(entry.style.stroke, palette.grid);
        assert_eq!(entry.style.stroke_width, 1.0);
        assert_eq!(entry.rect.width, 20);
        assert_eq!(entry.rect.height, 20);
    }
    assert_in_sync(&g);
    assert_eq!(g.interaction(), Interaction::Idle);
}

#[test]
fn test_edge_cells_keep_full_size() {
    let g = grid(110, 60, 25);
    let corner = g.cell(CellCoord::new(4, 2)).unwrap();
    assert_eq!((corner.x, corner.y, corner.size), (100, 50, 25));
}

#[test]
fn test_default_options() {
    let g: TestGrid = GridCanvas::from_options(
        &GridOptions::default(),
        MemoryRenderer::new(),
        Pickers::default(),
        MemoryForm::new(),
    )
    .unwrap();
    assert_eq!(g.config().width(), 600);
    assert_eq!(g.config().height(), 600);
    assert_eq!(g.config().cell_size(), 25);
    assert_eq!(g.palette().paper, Rgb::WHITE);
    assert_eq!(g.palette().draw, Rgb::new(200, 200, 200));
    assert_eq!(g.palette().grid, Rgb::new(190, 190, 190));
    assert_eq!(g.pickers().get(PaletteSlot::Grid).color(), Rgb::new(190, 190, 190));
}

#[test]
fn test_options_from_json() {
    let options = GridOptions::from_json(
        r#"{"width": 100, "height": 50, "cellSize": 25, "boundary": "inclusive"}"#,
    )
    .unwrap();
    let g: GridCanvas<MemoryRenderer, MemoryPicker, MemoryForm> = GridCanvas::from_options(
        &options,
        MemoryRenderer::new(),
        Pickers::default(),
        MemoryForm::new(),
    )
    .unwrap();
    assert_eq!(g.dimensions(), (5, 3));
    assert_eq!(g.renderer().surface_size(), (100, 50));
}

#[test_case(r#"{"width": 0}"# ; "zero width")]
#[test_case(r#"{"height": -5}"# ; "negative height")]
#[test_case(r#"{"cellSize": 2.5}"# ; "fractional cell size")]
#[test_case(r#"{"paperColor": "not a color"}"# ; "bad color")]
#[test_case(r#"{"logLevel": "loud"}"# ; "bad log level")]
#[test_case(r#"{"width": "wide"}"# ; "wrong type")]
fn test_invalid_options_rejected(json: &str) {
    let result = GridOptions::from_json(json).and_then(|options| options.resolve());
    assert!(result.is_err(), "{json} should be rejected");
}

#[test]
fn test_oversized_grid_rejected() {
    let err = GridOptions::from_json(r#"{"width": 10000, "height": 10000, "cellSize": 1}"#)
        .unwrap()
        .resolve()
        .unwrap_err();
    assert!(matches!(err, GraphPaperError::GridTooLarge { .. }));
}

// ============================================================================
// Redraw
// ============================================================================

#[test]
fn test_redraw_reads_form_fields() {
    let mut g = grid(100, 100, 25);
    g.form_mut().set_text(DimensionField::Width, "300");
    g.form_mut().set_text(DimensionField::Height, " 150 ");
    g.form_mut().set_text(DimensionField::CellSize, "50");
    g.redraw().unwrap();
    assert_eq!(g.dimensions(), (6, 3));
    assert_eq!(g.renderer().surface_size(), (300, 150));
    assert_eq!(g.form().text(DimensionField::Height), "150");
    assert_in_sync(&g);
}

#[test]
fn test_redraw_clears_paint() {
    let mut g = grid(100, 100, 25);
    g.pointer_down(CellCoord::new(1, 1)).unwrap();
    g.pointer_up();
    g.redraw().unwrap();
    assert!(g.cells().iter().all(|c| c.fill == Rgb::WHITE));
    assert_eq!(g.renderer().len(), 16);
}

#[test]
fn test_redraw_picks_up_draw_picker() {
    let mut g = grid(100, 100, 25);
    g.pickers_mut().draw.set_color(Rgb::new(1, 2, 3));
    g.redraw().unwrap();
    assert_eq!(g.palette().draw, Rgb::new(1, 2, 3));
    g.pointer_down(CellCoord::new(0, 0)).unwrap();
    assert_eq!(g.cell(CellCoord::new(0, 0)).unwrap().fill, Rgb::new(1, 2, 3));
}

#[test_case(DimensionField::Width, "" ; "empty")]
#[test_case(DimensionField::Width, "abc" ; "non numeric")]
#[test_case(DimensionField::Height, "NaN" ; "nan")]
#[test_case(DimensionField::Height, "-25" ; "negative")]
#[test_case(DimensionField::CellSize, "0" ; "zero cell size")]
#[test_case(DimensionField::CellSize, "12.5" ; "fractional")]
fn test_redraw_rejects_bad_input(field: DimensionField, text: &str) {
    let mut g = grid(100, 50, 25);
    g.pointer_down(CellCoord::new(2, 1)).unwrap();
    g.pointer_up();
    let handles: Vec<_> = g.cells().iter().map(|c| c.handle).collect();

    g.form_mut().set_text(field, text);
    let err = g.redraw().unwrap_err();
    assert!(matches!(err, GraphPaperError::InvalidDimension { field: f, .. } if f == field));

    // The existing grid, including its paint, is untouched
    assert_eq!(g.dimensions(), (4, 2));
    assert_eq!(g.cell(CellCoord::new(2, 1)).unwrap().fill, Rgb::new(200, 200, 200));
    let after: Vec<_> = g.cells().iter().map(|c| c.handle).collect();
    assert_eq!(handles, after);
}

#[test]
fn test_redraw_rejects_oversized_grid() {
    let mut g = grid(100, 50, 25);
    g.form_mut().set_text(DimensionField::Width, "5000");
    g.form_mut().set_text(DimensionField::Height, "5000");
    g.form_mut().set_text(DimensionField::CellSize, "1");
    assert!(matches!(
        g.redraw().unwrap_err(),
        GraphPaperError::GridTooLarge { .. }
    ));
    assert_eq!(g.cell_count(), 8);
}

#[test]
fn test_redraw_rejects_oversized_surface() {
    let mut g = grid(100, 50, 25);
    g.pointer_down(CellCoord::new(1, 1)).unwrap();
    g.pointer_up();
    g.form_mut().set_text(DimensionField::Width, "4000000000");
    g.form_mut().set_text(DimensionField::Height, "4000000000");
    g.form_mut().set_text(DimensionField::CellSize, "1000000000");

    assert!(matches!(
        g.redraw().unwrap_err(),
        GraphPaperError::SurfaceTooLarge {
            field: DimensionField::Width,
            ..
        }
    ));
    assert_eq!(g.dimensions(), (4, 2));
    assert_eq!(g.renderer().surface_size(), (100, 50));
    assert_eq!(g.cell(CellCoord::new(1, 1)).unwrap().fill, Rgb::new(200, 200, 200));
}

#[test]
fn test_oversized_surface_option_rejected() {
    let err = GridOptions::from_json(r#"{"width": 20000, "height": 100, "cellSize": 100}"#)
        .unwrap()
        .resolve()
        .unwrap_err();
    assert!(matches!(err, GraphPaperError::SurfaceTooLarge { .. }));
}

#[test]
fn test_redraw_ends_drag_but_keeps_eyedropper() {
    let mut g = grid(100, 50, 25);
    g.pointer_down(CellCoord::new(0, 0)).unwrap();
    g.redraw().unwrap();
    assert_eq!(g.interaction(), Interaction::Idle);

    g.arm_eyedropper(PaletteSlot::Paper);
    g.redraw().unwrap();
    assert_eq!(g.interaction().eyedropper_target(), Some(PaletteSlot::Paper));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_builders_route_logs_to_harness() {
    let mut g = grid(100, 50, 25);
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    // Installing twice is harmless
    common::init_logging();
    g.form_mut().set_text(DimensionField::CellSize, "oops");
    assert!(g.redraw().is_err());
}
