//! Main GraphPaper struct - the primary entry point for the browser.
//!
//! This module provides the WASM-exported `GraphPaper` struct that:
//! - Resolves the host page controls (numeric inputs, color pickers,
//!   eyedropper buttons, redraw button, hint element)
//! - Builds the grid on a `<canvas>` through the Canvas 2D backend
//! - Forwards mouse, click and picker events to the grid
//! - Notifies an optional JavaScript callback whenever the drawing changes
//!
//! Event handlers are registered when the viewer is created and removed when
//! it is dropped - no manual JavaScript wiring required.

mod events;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement};

use crate::color::Rgb;
use crate::controls::dom::{query, DomColorPicker, DomForm};
use crate::controls::Pickers;
use crate::error::GraphPaperError;
use crate::grid::{connect_pickers, GridCanvas, SharedGrid};
use crate::logging;
use crate::options::{ControlSelectors, GridOptions};
use crate::render::CanvasRectRenderer;
use crate::types::PaletteSlot;

pub(crate) type DomGrid = SharedGrid<CanvasRectRenderer, DomColorPicker, DomForm>;

/// Host callback fired after the drawing changes.
pub(crate) type ChangeCallback = Rc<RefCell<Option<Function>>>;

/// Invoke the change callback, if any. Must not be called while the grid is borrowed.
pub(crate) fn notify(callback: &ChangeCallback) {
    let callback = callback.borrow().clone();
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::error!("change callback failed: {e:?}");
        }
    }
}

/// A DOM event listener owned by the viewer.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .ok();
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// The interactive graph paper exported to JavaScript
#[wasm_bindgen]
pub struct GraphPaper {
    grid: DomGrid,
    change_callback: ChangeCallback,
    #[allow(dead_code)] // Kept alive for the lifetime of the viewer
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl GraphPaper {
    /// Create a new graph paper on `canvas`.
    ///
    /// `options` is an optional object (`width`, `height`, `cellSize`,
    /// `paperColor`, `drawColor`, `gridColor`, `boundary`, `logLevel`,
    /// `controls`). `dpr` is the device pixel ratio.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        options: JsValue,
        dpr: f64,
    ) -> Result<GraphPaper, JsValue> {
        console_error_panic_hook::set_once();

        let options: GridOptions = if options.is_undefined() || options.is_null() {
            GridOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| GraphPaperError::Options(e.to_string()))?
        };
        let resolved = options.resolve()?;
        logging::init(resolved.log_level);

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| GraphPaperError::Dom("no document".into()))?;
        let controls = &resolved.controls;

        let pickers = Pickers::new(
            DomColorPicker::new(query::<HtmlInputElement>(&document, &controls.draw_picker)?),
            DomColorPicker::new(query::<HtmlInputElement>(&document, &controls.paper_picker)?),
            DomColorPicker::new(query::<HtmlInputElement>(&document, &controls.grid_picker)?),
        );
        let form = DomForm::new(
            query::<HtmlInputElement>(&document, &controls.width)?,
            query::<HtmlInputElement>(&document, &controls.height)?,
            query::<HtmlInputElement>(&document, &controls.cell_size)?,
            query::<HtmlElement>(&document, &controls.hint)?,
        );
        let renderer = CanvasRectRenderer::new(canvas.clone(), dpr)?;

        let grid = GridCanvas::new(
            resolved.config,
            resolved.palette,
            renderer,
            pickers,
            form,
        )?;
        let grid: DomGrid = Rc::new(RefCell::new(grid));
        connect_pickers(&grid);

        let change_callback: ChangeCallback = Rc::new(RefCell::new(None));
        let mut listeners = Self::attach_pointer_listeners(&grid, &change_callback, &canvas)?;
        listeners.extend(Self::attach_button_listeners(
            &grid,
            &change_callback,
            &document,
            controls,
        )?);

        log::info!(
            "graph paper ready: {}x{} cells",
            grid.borrow().dimensions().0,
            grid.borrow().dimensions().1
        );

        Ok(GraphPaper {
            grid,
            change_callback,
            listeners,
        })
    }

    fn attach_pointer_listeners(
        grid: &DomGrid,
        callback: &ChangeCallback,
        canvas: &HtmlCanvasElement,
    ) -> Result<Vec<Listener>, GraphPaperError> {
        let window = web_sys::window().ok_or_else(|| GraphPaperError::Dom("no window".into()))?;
        let mut listeners = Vec::new();

        // Mouse down
        {
            let grid = Rc::clone(grid);
            let callback = Rc::clone(callback);
            let canvas_ref = canvas.clone();
            listeners.push(Listener::attach(canvas, "mousedown", move |event| {
                if let Some((x, y)) = events::surface_point(&canvas_ref, &event) {
                    // Keep the browser from starting a text/image drag.
                    event.prevent_default();
                    if Self::internal_mouse_down(&grid, x, y) {
                        notify(&callback);
                    }
                }
            }));
        }

        // Mouse move (drag painting)
        {
            let grid = Rc::clone(grid);
            let callback = Rc::clone(callback);
            let canvas_ref = canvas.clone();
            listeners.push(Listener::attach(canvas, "mousemove", move |event| {
                if let Some((x, y)) = events::surface_point(&canvas_ref, &event) {
                    if Self::internal_mouse_move(&grid, x, y) {
                        notify(&callback);
                    }
                }
            }));
        }

        // Mouse up on the window, so a drag released outside the canvas still ends
        {
            let grid = Rc::clone(grid);
            listeners.push(Listener::attach(&window, "mouseup", move |_event| {
                Self::internal_mouse_up(&grid);
            }));
        }

        Ok(listeners)
    }

    fn attach_button_listeners(
        grid: &DomGrid,
        callback: &ChangeCallback,
        document: &Document,
        controls: &ControlSelectors,
    ) -> Result<Vec<Listener>, GraphPaperError> {
        let mut listeners = Vec::new();

        for (slot, selector) in [
            (PaletteSlot::Draw, &controls.draw_dropper),
            (PaletteSlot::Paper, &controls.paper_dropper),
            (PaletteSlot::Grid, &controls.grid_dropper),
        ] {
            let button = query::<HtmlElement>(document, selector)?;
            let grid = Rc::clone(grid);
            listeners.push(Listener::attach(&button, "click", move |event| {
                event.prevent_default();
                Self::internal_arm(&grid, slot);
            }));
        }

        // Runs after the picker's own change handler has updated the grid
        for selector in [
            &controls.draw_picker,
            &controls.paper_picker,
            &controls.grid_picker,
        ] {
            let input = query::<HtmlInputElement>(document, selector)?;
            let callback = Rc::clone(callback);
            listeners.push(Listener::attach(&input, "change", move |_event| {
                notify(&callback);
            }));
        }

        let redraw = query::<HtmlElement>(document, &controls.redraw)?;
        let grid = Rc::clone(grid);
        let callback = Rc::clone(callback);
        listeners.push(Listener::attach(&redraw, "click", move |event| {
            event.prevent_default();
            if Self::internal_redraw(&grid) {
                notify(&callback);
            }
        }));

        Ok(listeners)
    }

    /// Register a function called with no arguments after every change to
    /// the drawing. Pass `undefined` to remove it.
    #[wasm_bindgen]
    pub fn set_change_callback(&mut self, callback: Option<Function>) {
        *self.change_callback.borrow_mut() = callback;
    }

    /// Rebuild the grid from the dimension inputs.
    #[wasm_bindgen]
    pub fn redraw(&mut self) -> Result<(), JsValue> {
        self.grid.borrow_mut().redraw()?;
        notify(&self.change_callback);
        Ok(())
    }

    /// Arm the eyedropper for `target` (`"draw"`, `"paper"` or `"grid"`).
    #[wasm_bindgen]
    pub fn arm_eyedropper(&mut self, target: &str) -> Result<(), JsValue> {
        let slot: PaletteSlot = target.parse()?;
        self.grid.borrow_mut().arm_eyedropper(slot);
        Ok(())
    }

    /// Disarm the eyedropper. Returns whether it was armed.
    #[wasm_bindgen]
    pub fn cancel_eyedropper(&mut self) -> bool {
        self.grid.borrow_mut().cancel_eyedropper()
    }

    /// Set a palette color from script, updating its picker and the grid.
    #[wasm_bindgen]
    pub fn set_color(&mut self, target: &str, color: &str) -> Result<(), JsValue> {
        let slot: PaletteSlot = target.parse()?;
        let color: Rgb = color.parse()?;
        {
            let mut grid = self.grid.borrow_mut();
            grid.pickers_mut().get_mut(slot).set_color(color);
            grid.on_color_changed(slot, color)?;
        }
        notify(&self.change_callback);
        Ok(())
    }

    /// Current color of a palette slot as `#RRGGBB`.
    #[wasm_bindgen]
    pub fn color(&self, target: &str) -> Result<String, JsValue> {
        let slot: PaletteSlot = target.parse()?;
        Ok(self.grid.borrow().palette().get(slot).to_hex())
    }

    /// Number of cell columns.
    #[wasm_bindgen]
    pub fn columns(&self) -> u32 {
        self.grid.borrow().dimensions().0
    }

    /// Number of cell rows.
    #[wasm_bindgen]
    pub fn rows(&self) -> u32 {
        self.grid.borrow().dimensions().1
    }

    /// Configuration, palette, mode and every cell fill as a JS object.
    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.grid.borrow().snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}
