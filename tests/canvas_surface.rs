#![cfg(target_arch = "wasm32")]

use parallel_plot_wasm::ParallelPlotApi;
use parallel_plot_wasm::application::PlotController;
use parallel_plot_wasm::domain::state::PlotSettings;
use parallel_plot_wasm::infrastructure::rendering::{Canvas2dSurface, DrawingSurface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap();
    canvas.set_id(id);
    canvas.set_width(400);
    canvas.set_height(300);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn resize_scales_backing_store_by_dpr() {
    let element = canvas("dpr-canvas");
    let mut surface = Canvas2dSurface::from_canvas(element.clone()).unwrap();
    surface.resize(400.0, 300.0, 2.0).unwrap();

    assert_eq!((element.width(), element.height()), (800, 600));
    assert_eq!(surface.size(), (400.0, 300.0));
    assert_eq!(surface.device_pixel_ratio(), 2.0);
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_rendering_error() {
    assert!(Canvas2dSurface::from_canvas_id("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn controller_draws_into_a_real_canvas() {
    canvas("plot-canvas");
    let surface = Canvas2dSurface::from_canvas_id("plot-canvas").unwrap();
    let mut controller = PlotController::new(surface, PlotSettings::default()).unwrap();
    let passes = controller.redraw().unwrap();
    assert!(!passes.is_empty());
}

fn styled_canvas(id: &str, width_px: u32, height_px: u32) -> web_sys::HtmlCanvasElement {
    let element = canvas(id);
    element.style().set_property("width", &format!("{}px", width_px)).unwrap();
    element.style().set_property("height", &format!("{}px", height_px)).unwrap();
    element.style().set_property("display", "block").unwrap();
    element
}

#[wasm_bindgen_test]
fn fit_to_layout_follows_the_css_box() {
    let element = styled_canvas("layout-canvas", 320, 180);
    let mut surface = Canvas2dSurface::from_canvas(element.clone()).unwrap();
    assert_eq!(surface.size(), (320.0, 180.0));

    element.style().set_property("width", "640px").unwrap();
    surface.fit_to_layout().unwrap();
    let dpr = surface.device_pixel_ratio();
    assert_eq!(surface.size(), (640.0, 180.0));
    assert_eq!(element.width(), (640.0 * dpr).round() as u32);
}

#[wasm_bindgen_test]
fn api_refits_viewport_after_container_resize() {
    let element = styled_canvas("api-canvas", 400, 250);
    let api = ParallelPlotApi::new("api-canvas").unwrap();
    assert_eq!(api.viewport_size(), vec![400.0, 250.0]);

    element.style().set_property("width", "900px").unwrap();
    element.style().set_property("height", "300px").unwrap();
    api.fit_to_layout().unwrap();
    assert_eq!(api.viewport_size(), vec![900.0, 300.0]);
}
