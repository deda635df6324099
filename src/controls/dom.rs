//! DOM-backed controls.
//!
//! - `DomColorPicker` wraps an `<input type="color">`. Assigning its `value`
//!   from script does not dispatch `change`, which is exactly the
//!   non-firing `set_color` contract.
//! - `DomForm` wraps the three numeric inputs and the hint element.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement};

use crate::color::Rgb;
use crate::error::{GraphPaperError, Result};
use crate::types::DimensionField;

use super::{ChangeHandler, ColorPicker, FormFields};

/// Find a single element by CSS selector and cast it.
pub(crate) fn query<T: JsCast>(document: &Document, selector: &str) -> Result<T> {
    document
        .query_selector(selector)
        .map_err(|_| GraphPaperError::Dom(format!("invalid selector {selector:?}")))?
        .ok_or_else(|| GraphPaperError::Dom(format!("no element matches {selector:?}")))?
        .dyn_into::<T>()
        .map_err(|_| GraphPaperError::Dom(format!("{selector:?} is not the expected element type")))
}

pub struct DomColorPicker {
    input: HtmlInputElement,
    /// Last color the grid accepted. Returned if the input holds garbage and
    /// restored when a change is rejected.
    last: Rc<Cell<Rgb>>,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl DomColorPicker {
    pub fn new(input: HtmlInputElement) -> Self {
        let last = Rgb::parse(&input.value()).unwrap_or_default();
        Self {
            input,
            last: Rc::new(Cell::new(last)),
            closure: None,
        }
    }

    fn detach(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .input
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }
    }
}

impl ColorPicker for DomColorPicker {
    fn color(&self) -> Rgb {
        Rgb::parse(&self.input.value()).unwrap_or_else(|| self.last.get())
    }

    fn set_color(&mut self, color: Rgb) {
        self.last.set(color);
        self.input.set_value(&color.to_input_value());
    }

    fn on_change(&mut self, mut handler: ChangeHandler) {
        self.detach();
        let input = self.input.clone();
        let last = Rc::clone(&self.last);
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let value = input.value();
            let accepted = match Rgb::parse(&value) {
                Some(color) => handler(color).then_some(color),
                None => {
                    log::warn!("ignoring unparseable picker value {value:?}");
                    None
                }
            };
            match accepted {
                Some(color) => last.set(color),
                None => input.set_value(&last.get().to_input_value()),
            }
        }) as Box<dyn FnMut(Event)>);
        self.input
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .ok();
        self.closure = Some(closure);
    }
}

impl Drop for DomColorPicker {
    fn drop(&mut self) {
        self.detach();
    }
}

pub struct DomForm {
    width: HtmlInputElement,
    height: HtmlInputElement,
    cell_size: HtmlInputElement,
    hint: HtmlElement,
}

impl DomForm {
    pub fn new(
        width: HtmlInputElement,
        height: HtmlInputElement,
        cell_size: HtmlInputElement,
        hint: HtmlElement,
    ) -> Self {
        Self {
            width,
            height,
            cell_size,
            hint,
        }
    }

    fn input(&self, field: DimensionField) -> &HtmlInputElement {
        match field {
            DimensionField::Width => &self.width,
            DimensionField::Height => &self.height,
            DimensionField::CellSize => &self.cell_size,
        }
    }
}

impl FormFields for DomForm {
    fn read(&self, field: DimensionField) -> String {
        self.input(field).value()
    }

    fn write(&mut self, field: DimensionField, value: u32) {
        self.input(field).set_value(&value.to_string());
    }

    /// Hiding sets `display: none` inline. Showing drops that override, and
    /// if a stylesheet still hides the element, falls back to the element's
    /// natural display (`revert`), so inline hints stay inline.
    fn set_hint_visible(&mut self, visible: bool) {
        let style = self.hint.style();
        if !visible {
            let _ = style.set_property("display", "none");
            return;
        }
        let _ = style.remove_property("display");
        if computed_display(&self.hint).as_deref() == Some("none") {
            let _ = style.set_property("display", "revert");
        }
    }
}

fn computed_display(element: &HtmlElement) -> Option<String> {
    web_sys::window()?
        .get_computed_style(element)
        .ok()??
        .get_property_value("display")
        .ok()
}
