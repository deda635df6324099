//! The grid canvas: cells, palette and pointer interaction.
//!
//! `GridCanvas` owns all mutable state of the drawing surface and drives
//! three collaborators through traits:
//! - a [`RectRenderer`] that draws one rectangle per cell
//! - three [`ColorPicker`]s (draw, paper, grid)
//! - the host [`FormFields`] (dimension inputs and eyedropper hint)
//!
//! Pointer handling lives in `events`, picker wiring in `wiring`.

mod events;
mod wiring;

pub use wiring::{connect_pickers, SharedGrid};

use serde::Serialize;

use crate::color::Rgb;
use crate::controls::{ColorPicker, FormFields, Pickers};
use crate::error::Result;
use crate::layout::GridLayout;
use crate::options::GridOptions;
use crate::render::{RectRenderer, RectStyle};
use crate::types::{
    parse_dimension, Cell, CellCoord, CellSnapshot, DimensionField, GridConfig, Interaction,
    Palette, PaletteSlot,
};

/// Interactive grid of paintable cells.
pub struct GridCanvas<R, P, F> {
    config: GridConfig,
    layout: GridLayout,
    palette: Palette,
    /// Fill that marks a cell as unpainted; compared on every paper change.
    default_fill: Rgb,
    cells: Vec<Cell>,
    interaction: Interaction,
    renderer: R,
    pickers: Pickers<P>,
    form: F,
}

/// Serializable view of the whole grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub config: GridConfig,
    pub columns: u32,
    pub rows: u32,
    pub palette: Palette,
    pub pointer_down: bool,
    pub eyedropper: Option<PaletteSlot>,
    pub cells: Vec<CellSnapshot>,
}

impl<R, P, F> GridCanvas<R, P, F>
where
    R: RectRenderer,
    P: ColorPicker,
    F: FormFields,
{
    /// Create the canvas and build the initial grid.
    ///
    /// Each picker is set to its palette color and the form fields are filled
    /// with the dimensions. Picker change handlers are installed separately by
    /// [`connect_pickers`] once the canvas is shared.
    ///
    /// # Errors
    /// Propagates renderer failures from the initial build.
    pub fn new(
        config: GridConfig,
        palette: Palette,
        renderer: R,
        pickers: Pickers<P>,
        form: F,
    ) -> Result<Self> {
        let mut canvas = Self {
            config,
            layout: GridLayout::new(&config),
            palette,
            default_fill: palette.paper,
            cells: Vec::new(),
            interaction: Interaction::Idle,
            renderer,
            pickers,
            form,
        };
        for slot in PaletteSlot::ALL {
            canvas.pickers.get_mut(slot).set_color(palette.get(slot));
        }
        canvas.write_fields();
        canvas.form.set_hint_visible(false);
        canvas.build_grid()?;
        Ok(canvas)
    }

    /// Resolve `options` (defaults for omitted fields) and create the canvas.
    ///
    /// # Errors
    /// Invalid options, or a renderer failure during the initial build.
    pub fn from_options(
        options: &GridOptions,
        renderer: R,
        pickers: Pickers<P>,
        form: F,
    ) -> Result<Self> {
        let resolved = options.resolve()?;
        Self::new(resolved.config, resolved.palette, renderer, pickers, form)
    }

    /// Destroy every cell and build the grid again from the current
    /// configuration and palette.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn build_grid(&mut self) -> Result<()> {
        self.cells.clear();
        self.renderer.clear();
        self.renderer
            .resize(self.config.width(), self.config.height())?;

        let layout = GridLayout::new(&self.config);
        let style = RectStyle::new(self.palette.paper, self.palette.grid);
        self.cells.reserve(layout.len());
        for (coord, rect) in layout.origins() {
            let handle = self.renderer.create_rect(rect, style)?;
            self.cells.push(Cell {
                coord,
                x: rect.x,
                y: rect.y,
                size: rect.width,
                handle,
                fill: self.palette.paper,
            });
        }
        self.layout = layout;
        self.default_fill = self.palette.paper;

        if self.interaction.is_pointer_down() {
            self.interaction = Interaction::Idle;
        }

        log::debug!(
            "built {}x{} grid ({} cells of {}px, {:?} boundary)",
            layout.columns,
            layout.rows,
            self.cells.len(),
            self.config.cell_size(),
            self.config.boundary()
        );
        Ok(())
    }

    /// Read the dimension fields and the draw picker, then rebuild.
    ///
    /// Invalid field text leaves the current grid untouched.
    ///
    /// # Errors
    /// `InvalidDimension`, `SurfaceTooLarge` or `GridTooLarge` for bad input; renderer failures.
    pub fn redraw(&mut self) -> Result<()> {
        let config = match self.read_config() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("redraw rejected: {e}");
                return Err(e);
            }
        };
        self.palette.draw = self.pickers.draw.color();
        self.config = config;
        self.write_fields();
        self.build_grid()
    }

    fn read_config(&self) -> Result<GridConfig> {
        let width = parse_dimension(
            DimensionField::Width,
            &self.form.read(DimensionField::Width),
        )?;
        let height = parse_dimension(
            DimensionField::Height,
            &self.form.read(DimensionField::Height),
        )?;
        let cell_size = parse_dimension(
            DimensionField::CellSize,
            &self.form.read(DimensionField::CellSize),
        )?;
        GridConfig::new(width, height, cell_size, self.config.boundary())
    }

    fn write_fields(&mut self) {
        for field in DimensionField::ALL {
            self.form.write(field, self.config.get(field));
        }
    }

    /// Apply a new color to a palette slot, as if chosen in its picker.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn on_color_changed(&mut self, slot: PaletteSlot, color: Rgb) -> Result<()> {
        match slot {
            PaletteSlot::Draw => {
                self.on_draw_color_changed(color);
                Ok(())
            }
            PaletteSlot::Paper => self.on_paper_color_changed(color),
            PaletteSlot::Grid => self.on_grid_color_changed(color),
        }
    }

    /// Restroke every cell. Fills are not touched.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn on_grid_color_changed(&mut self, color: Rgb) -> Result<()> {
        self.palette.grid = color;
        for cell in &self.cells {
            self.renderer.set_stroke(cell.handle, color)?;
        }
        Ok(())
    }

    /// Change the paper color, repainting only cells that still show the
    /// previous paper color.
    ///
    /// # Errors
    /// Propagates renderer failures.
    pub fn on_paper_color_changed(&mut self, color: Rgb) -> Result<()> {
        let previous = self.default_fill;
        self.palette.paper = color;
        self.default_fill = color;
        if previous == color {
            return Ok(());
        }
        for cell in &mut self.cells {
            if cell.fill == previous {
                cell.fill = color;
                self.renderer.set_fill(cell.handle, color)?;
            }
        }
        Ok(())
    }

    /// Change the color used by future paints.
    pub fn on_draw_color_changed(&mut self, color: Rgb) {
        self.palette.draw = color;
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Columns and rows of the current grid.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.layout.columns, self.layout.rows)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(self.layout.index_of(coord)?)
    }

    fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        let index = self.layout.index_of(coord)?;
        self.cells.get_mut(index)
    }

    /// Cell under a point of the drawing surface (logical pixels).
    pub fn cell_at_point(&self, x: f64, y: f64) -> Option<CellCoord> {
        self.layout.cell_at(x, y)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn pickers(&self) -> &Pickers<P> {
        &self.pickers
    }

    pub fn pickers_mut(&mut self) -> &mut Pickers<P> {
        &mut self.pickers
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            config: self.config,
            columns: self.layout.columns,
            rows: self.layout.rows,
            palette: self.palette,
            pointer_down: self.interaction.is_pointer_down(),
            eyedropper: self.interaction.eyedropper_target(),
            cells: self.cells.iter().map(CellSnapshot::from).collect(),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::controls::memory::{MemoryForm, MemoryPicker};
    use crate::render::MemoryRenderer;
    use crate::types::BoundaryPolicy;

    type TestGrid = GridCanvas<MemoryRenderer, MemoryPicker, MemoryForm>;

    fn grid(width: u32, height: u32, size: u32) -> TestGrid {
        GridCanvas::new(
            GridConfig::new(width, height, size, BoundaryPolicy::Clip).unwrap(),
            Palette::default(),
            MemoryRenderer::new(),
            Pickers::default(),
            MemoryForm::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_initializes_collaborators() {
        let g = grid(100, 50, 25);
        assert_eq!(g.pickers().draw.color(), Palette::default().draw);
        assert_eq!(g.pickers().paper.color(), Palette::default().paper);
        assert_eq!(g.pickers().grid.color(), Palette::default().grid);
        assert_eq!(g.form().text(DimensionField::Width), "100");
        assert_eq!(g.form().text(DimensionField::Height), "50");
        assert_eq!(g.form().text(DimensionField::CellSize), "25");
        assert!(!g.form().hint_visible());
        assert_eq!(g.renderer().surface_size(), (100, 50));
    }

    #[test]
    fn test_cells_mirror_renderer() {
        let g = grid(100, 50, 25);
        assert_eq!(g.cell_count(), 8);
        assert_eq!(g.renderer().len(), 8);
        for cell in g.cells() {
            let entry = g.renderer().entry(cell.handle).unwrap();
            assert_eq!(entry.rect.x, cell.x);
            assert_eq!(entry.rect.y, cell.y);
            assert_eq!(entry.rect.width, 25);
            assert_eq!(entry.style.stroke_width, 1.0);
            assert_eq!(cell.coord.col * 25, cell.x);
            assert_eq!(cell.coord.row * 25, cell.y);
        }
    }

    #[test]
    fn test_cell_lookup_by_coord() {
        let g = grid(100, 50, 25);
        let cell = g.cell(CellCoord::new(3, 1)).unwrap();
        assert_eq!((cell.x, cell.y), (75, 25));
        assert!(g.cell(CellCoord::new(4, 0)).is_none());
    }

    #[test]
    fn test_rebuild_invalidates_old_handles() {
        let mut g = grid(50, 50, 25);
        let old = g.cells()[0].handle;
        g.build_grid().unwrap();
        assert!(g.renderer().fill(old).is_none());
        assert_eq!(g.renderer().len(), 4);
    }

    #[test]
    fn test_paper_change_to_same_color_is_a_no_op() {
        let mut g = grid(50, 50, 25);
        let writes = g.renderer().attribute_writes();
        g.on_paper_color_changed(Rgb::WHITE).unwrap();
        assert_eq!(g.renderer().attribute_writes(), writes);
    }

    #[test]
    fn test_snapshot_serializes() {
        let g = grid(50, 25, 25);
        let json = serde_json::to_value(g.snapshot()).unwrap();
        assert_eq!(json["columns"], 2);
        assert_eq!(json["rows"], 1);
        assert_eq!(json["config"]["cellSize"], 25);
        assert_eq!(json["palette"]["draw"], "#C8C8C8");
        assert_eq!(json["cells"][1]["col"], 1);
        assert_eq!(json["cells"][1]["fill"], "#FFFFFF");
        assert_eq!(json["pointerDown"], false);
        assert!(json["eyedropper"].is_null());
    }
}
