//! Eyedropper tests for graphpaper
//!
//! Tests for sampling a cell into each palette slot: the target picker is
//! updated without firing, the matching color handler runs, the hint is
//! hidden and the pointer state returns to idle.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{assert_in_sync, cells_not, grid, rendered_fill, shared_grid, BLUE, RED};
use graphpaper::controls::ColorPicker;
use graphpaper::{CellCoord, Interaction, PaletteSlot, PointerOutcome, Rgb};
use test_case::test_case;

/// Grid with cell (1, 0) painted red and every other cell white.
fn painted_grid() -> common::TestGrid {
    let mut g = grid(100, 50, 25);
    g.on_draw_color_changed(RED);
    g.pointer_down(CellCoord::new(1, 0)).unwrap();
    g.pointer_up();
    g.on_draw_color_changed(Rgb::new(200, 200, 200));
    g
}

#[test_case(PaletteSlot::Draw ; "draw")]
#[test_case(PaletteSlot::Paper ; "paper")]
#[test_case(PaletteSlot::Grid ; "grid")]
fn test_sample_sets_picker_and_palette(slot: PaletteSlot) {
    let mut g = painted_grid();
    let sets_before = g.pickers().get(slot).programmatic_sets();

    g.arm_eyedropper(slot);
    assert!(g.form().hint_visible());

    let outcome = g.pointer_down(CellCoord::new(1, 0)).unwrap();
    assert_eq!(outcome, PointerOutcome::Sampled { slot, color: RED });

    assert_eq!(g.palette().get(slot), RED);
    assert_eq!(g.pickers().get(slot).color(), RED);
    assert_eq!(g.pickers().get(slot).programmatic_sets(), sets_before + 1);
    assert_eq!(g.interaction(), Interaction::Idle);
    assert!(!g.form().hint_visible());
    assert_in_sync(&g);
}

#[test]
fn test_sampled_draw_color_paints() {
    let mut g = painted_grid();
    g.arm_eyedropper(PaletteSlot::Draw);
    g.pointer_down(CellCoord::new(1, 0)).unwrap();

    // The sampled cell itself is not repainted
    assert_eq!(cells_not(&g, Rgb::WHITE), vec![CellCoord::new(1, 0)]);

    g.pointer_down(CellCoord::new(3, 1)).unwrap();
    assert_eq!(rendered_fill(&g, 3, 1), RED);
    assert_eq!(g.interaction(), Interaction::Painting { last: CellCoord::new(3, 1) });
}

#[test]
fn test_sampled_paper_color_repaints_blank_cells() {
    let mut g = painted_grid();
    g.on_draw_color_changed(BLUE);
    g.pointer_down(CellCoord::new(0, 1)).unwrap();
    g.pointer_up();

    g.arm_eyedropper(PaletteSlot::Paper);
    g.pointer_down(CellCoord::new(0, 1)).unwrap();

    // Every former paper cell is now blue; the red cell keeps its paint
    assert_eq!(cells_not(&g, BLUE), vec![CellCoord::new(1, 0)]);
    assert_eq!(g.palette().paper, BLUE);
}

#[test]
fn test_sampled_grid_color_restrokes() {
    let mut g = painted_grid();
    g.arm_eyedropper(PaletteSlot::Grid);
    g.pointer_down(CellCoord::new(1, 0)).unwrap();
    for cell in g.cells() {
        assert_eq!(
            graphpaper::render::RectRenderer::stroke(g.renderer(), cell.handle),
            Some(RED)
        );
    }
}

#[test]
fn test_sample_blank_cell_into_paper_is_a_no_op_for_cells() {
    let mut g = painted_grid();
    let fills: Vec<Rgb> = g.cells().iter().map(|c| c.fill).collect();
    g.arm_eyedropper(PaletteSlot::Paper);
    let outcome = g.pointer_down(CellCoord::new(0, 0)).unwrap();
    assert_eq!(
        outcome,
        PointerOutcome::Sampled {
            slot: PaletteSlot::Paper,
            color: Rgb::WHITE
        }
    );
    let after: Vec<Rgb> = g.cells().iter().map(|c| c.fill).collect();
    assert_eq!(fills, after);
}

#[test]
fn test_hover_while_armed_does_nothing() {
    let mut g = painted_grid();
    g.arm_eyedropper(PaletteSlot::Draw);
    assert_eq!(
        g.pointer_over(CellCoord::new(2, 0)).unwrap(),
        PointerOutcome::Ignored
    );
    g.pointer_up();
    assert_eq!(g.interaction().eyedropper_target(), Some(PaletteSlot::Draw));
    assert_eq!(cells_not(&g, Rgb::WHITE), vec![CellCoord::new(1, 0)]);
}

#[test]
fn test_sample_does_not_fire_picker_handler() {
    let (shared, user) = shared_grid(100, 50, 25);
    shared.borrow_mut().arm_eyedropper(PaletteSlot::Grid);

    // Sampling runs with the grid mutably borrowed; a firing set would be
    // dropped by the busy handler and leave the stroke stale.
    let outcome = shared.borrow_mut().pointer_down(CellCoord::new(0, 0)).unwrap();
    assert_eq!(
        outcome,
        PointerOutcome::Sampled {
            slot: PaletteSlot::Grid,
            color: Rgb::WHITE
        }
    );
    assert_eq!(user.grid.color(), Rgb::WHITE);
    let g = shared.borrow();
    assert_eq!(g.palette().grid, Rgb::WHITE);
    assert_in_sync(&g);
}
