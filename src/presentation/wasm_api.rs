//! JavaScript-facing facade. Thin: parses arguments, forwards to
//! [`PlotController`], converts errors to `JsValue`.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::application::{PlotController, TooltipData};
use crate::domain::{
    errors::{AppError, ValidationResult},
    function::FunctionCatalog,
    logging::LogComponent,
    plot::{ColorMode, DisplayRange, LayoutKind, ScreenPoint},
    state::{PlotSettings, Viewport},
};
use crate::infrastructure::{
    FrameLoop,
    rendering::{Canvas2dSurface, DrawingSurface},
};
use crate::log_info;

impl From<AppError> for JsValue {
    fn from(error: AppError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

fn parse_choice<T: FromStr>(what: &str, value: &str) -> ValidationResult<T> {
    T::from_str(value).map_err(|_| AppError::ValidationError(format!("unknown {} '{}'", what, value)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parallel-coordinate plot bound to one `<canvas>`.
#[wasm_bindgen]
pub struct ParallelPlotApi {
    controller: Rc<RefCell<PlotController<Canvas2dSurface>>>,
    frames: FrameLoop,
}

#[wasm_bindgen]
impl ParallelPlotApi {
    /// Attach to the canvas with `canvas_id` using default settings and draw
    /// the first frame.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ParallelPlotApi, JsValue> {
        let surface = Canvas2dSurface::from_canvas_id(canvas_id)?;
        let mut controller = PlotController::new(surface, PlotSettings::default())?;
        controller.redraw()?;
        log_info!(LogComponent::Presentation("ParallelPlotApi"), "Attached to #{}", canvas_id);
        Ok(Self { controller: Rc::new(RefCell::new(controller)), frames: FrameLoop::new() })
    }

    /// Replace settings from a (partial) camelCase JSON object.
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&self, json: &str) -> Result<(), JsValue> {
        let settings = PlotSettings::from_json(json)?;
        self.controller.borrow_mut().apply_settings(settings)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> Result<String, JsValue> {
        to_json(self.controller.borrow().settings())
    }

    /// Switch function; parameters fall back to the new schema's defaults.
    #[wasm_bindgen(js_name = setFunction)]
    pub fn set_function(&self, function_id: &str) -> Result<(), JsValue> {
        let id = function_id.to_string();
        self.update(move |s| {
            s.function_id = id;
            s.params = Default::default();
        })
    }

    #[wasm_bindgen(js_name = setParam)]
    pub fn set_param(&self, key: &str, value: f64) -> Result<(), JsValue> {
        let key = key.to_string();
        self.update(move |s| s.params.set(&key, value))
    }

    #[wasm_bindgen(js_name = setDomain)]
    pub fn set_domain(&self, min: f64, max: f64) -> Result<(), JsValue> {
        self.update(move |s| s.domain = DisplayRange::new(min, max))
    }

    #[wasm_bindgen(js_name = setSampleCount)]
    pub fn set_sample_count(&self, count: usize) -> Result<(), JsValue> {
        self.update(move |s| s.sample_count = count)
    }

    /// `"gradient"`, `"slope"` or `"flat"`.
    #[wasm_bindgen(js_name = setColorMode)]
    pub fn set_color_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: ColorMode = parse_choice("color mode", mode)?;
        self.update(move |s| s.color_mode = mode)
    }

    /// `"horizontal"` or `"vertical"`.
    #[wasm_bindgen(js_name = setLayout)]
    pub fn set_layout(&self, layout: &str) -> Result<(), JsValue> {
        let layout: LayoutKind = parse_choice("layout", layout)?;
        self.update(move |s| s.layout = layout)
    }

    #[wasm_bindgen(js_name = setDense)]
    pub fn set_dense(&self, dense: bool) -> Result<(), JsValue> {
        self.update(move |s| s.dense = dense)
    }

    #[wasm_bindgen(js_name = setShowGrid)]
    pub fn set_show_grid(&self, visible: bool) -> Result<(), JsValue> {
        self.update(move |s| s.show_grid = visible)
    }

    #[wasm_bindgen(js_name = setShowPoints)]
    pub fn set_show_points(&self, visible: bool) -> Result<(), JsValue> {
        self.update(move |s| s.show_points = visible)
    }

    #[wasm_bindgen(js_name = setShowCompanion)]
    pub fn set_show_companion(&self, visible: bool) -> Result<(), JsValue> {
        self.update(move |s| s.show_companion = visible)
    }

    #[wasm_bindgen(js_name = setAnimationSpeed)]
    pub fn set_animation_speed(&self, speed: f64) -> Result<(), JsValue> {
        self.update(move |s| s.animation_speed = speed)
    }

    /// Returns the new policy, `"domain"` or `"auto"`.
    #[wasm_bindgen(js_name = toggleFit)]
    pub fn toggle_fit(&self) -> Result<String, JsValue> {
        let policy = self.controller.borrow_mut().toggle_fit_policy()?;
        Ok(policy.as_ref().to_string())
    }

    /// Tooltip JSON for the hovered segment, or `undefined`.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) -> Result<Option<String>, JsValue> {
        self.hover(ScreenPoint::new(x, y))?.map(|t| to_json(&t)).transpose()
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) -> Result<(), JsValue> {
        self.controller.borrow_mut().pointer_leave()?;
        Ok(())
    }

    /// Resize the backing store to the new CSS size and redraw.
    pub fn resize(&self, css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Result<(), JsValue> {
        let mut controller = self.controller.borrow_mut();
        controller.surface_mut().resize(css_width, css_height, device_pixel_ratio)?;
        Self::sync_viewport(&mut controller)
    }

    /// Same as `resize`, reading the size from the canvas' layout box and
    /// the DPR from the window.
    #[wasm_bindgen(js_name = fitToLayout)]
    pub fn fit_to_layout(&self) -> Result<(), JsValue> {
        let mut controller = self.controller.borrow_mut();
        controller.surface_mut().fit_to_layout()?;
        Self::sync_viewport(&mut controller)
    }

    /// `(width, height)` of the drawing area in CSS pixels.
    #[wasm_bindgen(js_name = viewportSize)]
    pub fn viewport_size(&self) -> Vec<f64> {
        let viewport = self.controller.borrow().state().viewport;
        vec![viewport.width, viewport.height]
    }

    pub fn play(&self) -> Result<(), JsValue> {
        let token = self.controller.borrow_mut().play()?;
        let controller = Rc::clone(&self.controller);
        self.frames.start(move |dt_ms| controller.borrow_mut().on_frame(token, dt_ms));
        Ok(())
    }

    pub fn pause(&self) {
        self.controller.borrow_mut().pause();
        self.frames.stop();
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        self.frames.stop();
        self.controller.borrow_mut().reset()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.controller.borrow().animation().is_running()
    }

    #[wasm_bindgen(js_name = functionIds)]
    pub fn function_ids() -> Vec<String> {
        FunctionCatalog::builtin().ids().into_iter().map(String::from).collect()
    }

    /// Parameter schema of `function_id` as JSON, for building sliders.
    #[wasm_bindgen(js_name = paramSchema)]
    pub fn param_schema(function_id: &str) -> Result<String, JsValue> {
        let function = FunctionCatalog::builtin()
            .get(function_id)
            .ok_or_else(|| AppError::ValidationError(format!("unknown function '{}'", function_id)))?;
        to_json(&function.params())
    }

    #[wasm_bindgen(js_name = functionDescription)]
    pub fn function_description(function_id: &str) -> Option<String> {
        FunctionCatalog::builtin().get(function_id).map(|f| f.description().to_string())
    }
}

impl ParallelPlotApi {
    /// Rust-side hover for hosts that render the tooltip themselves.
    pub fn hover(&self, pointer: ScreenPoint) -> Result<Option<TooltipData>, JsValue> {
        Ok(self.controller.borrow_mut().pointer_move(pointer)?)
    }

    fn sync_viewport(controller: &mut PlotController<Canvas2dSurface>) -> Result<(), JsValue> {
        let (width, height) = controller.surface().size();
        let device_pixel_ratio = controller.surface().device_pixel_ratio();
        controller.resize(Viewport { width, height, device_pixel_ratio })?;
        Ok(())
    }

    fn update(&self, edit: impl FnOnce(&mut PlotSettings)) -> Result<(), JsValue> {
        self.controller.borrow_mut().update_settings(edit)?;
        Ok(())
    }
}

impl Drop for ParallelPlotApi {
    fn drop(&mut self) {
        self.frames.stop();
    }
}
