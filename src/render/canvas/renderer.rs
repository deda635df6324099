//! Canvas 2D rendering backend.
//!
//! Implements the `RectRenderer` trait using the HTML Canvas 2D API via web-sys.
//! Outlines are stroked as pixel-centered segments inside each cell, so a
//! repaint never bleeds into a neighbour.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::color::Rgb;
use crate::error::{GraphPaperError, Result};
use crate::layout::CellRect;
use crate::render::backend::{RectHandle, RectRenderer, RectStyle};
use crate::render::outline::cell_outline;
use crate::render::store::{RectEntry, RectStore};

/// Rectangle renderer drawing into a `<canvas>` element.
pub struct CanvasRectRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    store: RectStore,
    /// Logical surface size.
    width: u32,
    height: u32,
    dpr: f64,
}

impl CanvasRectRenderer {
    /// Create a new Canvas renderer from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GraphPaperError::Dom("Failed to get 2d context".into()))?
            .ok_or_else(|| GraphPaperError::Dom("No 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GraphPaperError::Dom("Failed to cast to CanvasRenderingContext2d".into()))?;

        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };

        Ok(Self {
            width: canvas.width(),
            height: canvas.height(),
            canvas,
            ctx,
            store: RectStore::new(),
            dpr,
        })
    }

    /// The canvas this renderer draws into.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Convert a logical length to a canvas buffer length.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn physical(&self, logical: u32) -> u32 {
        (f64::from(logical) * self.dpr).round().clamp(1.0, f64::from(u32::MAX)) as u32
    }

    fn draw_entry(&self, entry: &RectEntry) {
        let CellRect {
            x,
            y,
            width,
            height,
        } = entry.rect;

        self.ctx.set_fill_style_str(&entry.style.fill.to_hex());
        self.ctx.fill_rect(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );

        let segments = cell_outline(entry.rect, self.width, self.height);
        if segments.is_empty() {
            return;
        }
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&entry.style.stroke.to_hex());
        self.ctx.set_line_width(entry.style.stroke_width);
        for segment in segments {
            self.ctx.move_to(segment.x1, segment.y1);
            self.ctx.line_to(segment.x2, segment.y2);
        }
        self.ctx.stroke();
    }

    fn redraw_all(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        for entry in self.store.iter() {
            self.draw_entry(entry);
        }
    }
}

impl RectRenderer for CanvasRectRenderer {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));

        // Setting the buffer size resets the context, including its transform.
        self.canvas.set_width(self.physical(width));
        self.canvas.set_height(self.physical(height));
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .map_err(|_| GraphPaperError::Dom("Failed to scale 2d context".into()))?;

        self.redraw_all();
        Ok(())
    }

    fn create_rect(&mut self, rect: CellRect, style: RectStyle) -> Result<RectHandle> {
        let handle = self.store.insert(rect, style);
        self.draw_entry(&RectEntry { rect, style });
        Ok(handle)
    }

    fn set_fill(&mut self, handle: RectHandle, color: Rgb) -> Result<()> {
        let entry = self.store.set_fill(handle, color)?;
        self.draw_entry(&entry);
        Ok(())
    }

    fn set_stroke(&mut self, handle: RectHandle, color: Rgb) -> Result<()> {
        let entry = self.store.set_stroke(handle, color)?;
        self.draw_entry(&entry);
        Ok(())
    }

    fn fill(&self, handle: RectHandle) -> Option<Rgb> {
        self.store.get(handle).map(|e| e.style.fill)
    }

    fn stroke(&self, handle: RectHandle) -> Option<Rgb> {
        self.store.get(handle).map(|e| e.style.stroke)
    }

    fn clear(&mut self) {
        self.store.clear();
        self.redraw_all();
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
