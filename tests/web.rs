//! Browser tests for the `GraphPaper` viewer.
//!
//! Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use graphpaper::GraphPaper;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<input id="w" value="100"><input id="h" value="50"><input id="box" value="25">
<input id="color" type="color"><input id="paper" type="color"><input id="gridcolor" type="color">
<button id="colordrop"></button><button id="paperdrop"></button><button id="griddrop"></button>
<button id="update"></button>
<div class="dropperhelp"></div>
<canvas id="surface"></canvas>
"##;

/// Inline hint hidden by the page's own stylesheet until the eyedropper is armed.
const INLINE_HINT_PAGE: &str = r##"
<style>.dropperhelp { display: none; }</style>
<input id="w" value="100"><input id="h" value="50"><input id="box" value="25">
<input id="color" type="color"><input id="paper" type="color"><input id="gridcolor" type="color">
<button id="colordrop"></button><button id="paperdrop"></button><button id="griddrop"></button>
<button id="update"></button>
<span class="dropperhelp">Click a cell to sample its color</span>
<canvas id="surface"></canvas>
"##;

fn setup() -> HtmlCanvasElement {
    setup_page(PAGE)
}

fn setup_page(page: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(page);
    document
        .get_element_by_id("surface")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap()
}

fn input(id: &str) -> HtmlInputElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn builds_with_default_selectors() {
    let canvas = setup();
    let options = js_sys::JSON::parse(r#"{"width": 100, "height": 50, "cellSize": 25}"#).unwrap();
    let paper = GraphPaper::new(canvas.clone(), options, 1.0).unwrap();
    assert_eq!(paper.columns(), 4);
    assert_eq!(paper.rows(), 2);
    assert_eq!(canvas.width(), 100);
    assert_eq!(input("gridcolor").value(), "#bebebe");
}

#[wasm_bindgen_test]
fn redraw_reads_inputs() {
    let mut paper = GraphPaper::new(setup(), JsValue::UNDEFINED, 1.0).unwrap();
    assert_eq!(paper.columns(), 24);
    input("w").set_value("50");
    input("h").set_value("75");
    paper.redraw().unwrap();
    assert_eq!((paper.columns(), paper.rows()), (2, 3));

    input("box").set_value("oops");
    assert!(paper.redraw().is_err());
    assert_eq!((paper.columns(), paper.rows()), (2, 3));
}

#[wasm_bindgen_test]
fn set_color_updates_picker() {
    let mut paper = GraphPaper::new(setup(), JsValue::NULL, 1.0).unwrap();
    paper.set_color("paper", "rgb(255, 0, 0)").unwrap();
    assert_eq!(paper.color("paper").unwrap(), "#FF0000");
    assert_eq!(input("paper").value(), "#ff0000");
    assert!(paper.set_color("ink", "#000").is_err());
}

#[wasm_bindgen_test]
fn eyedropper_arming() {
    let mut paper = GraphPaper::new(setup(), JsValue::UNDEFINED, 2.0).unwrap();
    paper.arm_eyedropper("grid").unwrap();
    assert!(paper.cancel_eyedropper());
    assert!(!paper.cancel_eyedropper());
    assert!(paper.arm_eyedropper("ink").is_err());
}

#[wasm_bindgen_test]
fn change_callback_fires_on_changes() {
    let mut paper = GraphPaper::new(setup(), JsValue::UNDEFINED, 1.0).unwrap();
    let window: JsValue = web_sys::window().unwrap().into();
    js_sys::Reflect::set(&window, &"__changes".into(), &0.into()).unwrap();
    paper.set_change_callback(Some(js_sys::Function::new_no_args(
        "window.__changes = window.__changes + 1;",
    )));

    paper.set_color("grid", "#123456").unwrap();
    paper.redraw().unwrap();
    let changes = js_sys::Reflect::get(&window, &"__changes".into()).unwrap();
    assert_eq!(changes.as_f64(), Some(2.0));

    paper.set_change_callback(None);
    paper.redraw().unwrap();
    let changes = js_sys::Reflect::get(&window, &"__changes".into()).unwrap();
    assert_eq!(changes.as_f64(), Some(2.0));
}

fn hint_display() -> String {
    let window = web_sys::window().unwrap();
    let hint = window
        .document()
        .unwrap()
        .query_selector(".dropperhelp")
        .unwrap()
        .unwrap();
    window
        .get_computed_style(&hint)
        .unwrap()
        .unwrap()
        .get_property_value("display")
        .unwrap()
}

#[wasm_bindgen_test]
fn inline_hint_keeps_its_display() {
    let mut paper = GraphPaper::new(setup_page(INLINE_HINT_PAGE), JsValue::UNDEFINED, 1.0).unwrap();
    assert_eq!(hint_display(), "none");
    paper.arm_eyedropper("draw").unwrap();
    assert_eq!(hint_display(), "inline");
    assert!(paper.cancel_eyedropper());
    assert_eq!(hint_display(), "none");
}

fn pixel(canvas: &HtmlCanvasElement, x: f64, y: f64) -> Vec<u8> {
    let ctx = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap();
    ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data().to_vec()
}

#[wasm_bindgen_test]
fn grid_lines_cover_whole_pixels() {
    let canvas = setup();
    let options = js_sys::JSON::parse(r#"{"width": 100, "height": 50, "cellSize": 25}"#).unwrap();
    let mut paper = GraphPaper::new(canvas.clone(), options, 1.0).unwrap();
    let line = vec![190, 190, 190, 255];
    let paper_px = vec![255, 255, 255, 255];

    // Cell boundaries are one full-strength pixel, owned by the right-hand cell
    assert_eq!(pixel(&canvas, 25.0, 10.0), line);
    assert_eq!(pixel(&canvas, 24.0, 10.0), paper_px);
    assert_eq!(pixel(&canvas, 26.0, 10.0), paper_px);
    assert_eq!(pixel(&canvas, 0.0, 10.0), line);
    assert_eq!(pixel(&canvas, 99.0, 10.0), line);
    assert_eq!(pixel(&canvas, 10.0, 49.0), line);

    // Restroking every cell leaves the lines the same width
    paper.set_color("grid", "#000000").unwrap();
    assert_eq!(pixel(&canvas, 25.0, 10.0), vec![0, 0, 0, 255]);
    assert_eq!(pixel(&canvas, 24.0, 10.0), paper_px);
    assert_eq!(pixel(&canvas, 26.0, 10.0), paper_px);
}
