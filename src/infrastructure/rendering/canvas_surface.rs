use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{DrawingSurface, StrokeStyle, TextStyle};
use crate::domain::{
    errors::{AppError, RenderingResult},
    logging::LogComponent,
    plot::{Color, ScreenPoint, ScreenRect},
};
use crate::log_debug;

/// Browser `<canvas>` 2D context behind [`DrawingSurface`].
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    css_width: f64,
    css_height: f64,
    device_pixel_ratio: f64,
}

impl Canvas2dSurface {
    /// Look up a canvas element by id and acquire its 2D context.
    pub fn from_canvas_id(canvas_id: &str) -> RenderingResult<Self> {
        let canvas = gloo::utils::document()
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::RenderingError(format!("canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError("Failed to get canvas element".to_string()))?;
        Self::from_canvas(canvas)
    }

    pub fn from_canvas(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| AppError::RenderingError("Failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::RenderingError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;

        let (css_width, css_height) = (canvas.width() as f64, canvas.height() as f64);
        let mut surface = Self { canvas, context, css_width, css_height, device_pixel_ratio: 1.0 };
        surface.fit_to_layout()?;
        Ok(surface)
    }

    /// Resize to the element's laid-out CSS box and the window's current
    /// DPR. The element must be sized by CSS, otherwise the backing store
    /// feeds back into its own layout. No layout box keeps the current size.
    pub fn fit_to_layout(&mut self) -> RenderingResult<()> {
        let css_width = match self.canvas.client_width() {
            w if w > 0 => w as f64,
            _ => self.css_width,
        };
        let css_height = match self.canvas.client_height() {
            h if h > 0 => h as f64,
            _ => self.css_height,
        };
        let dpr = gloo::utils::window().device_pixel_ratio();
        self.resize(css_width, css_height, dpr)
    }

    /// Size the backing store to `css * dpr` and scale drawing back to CSS pixels.
    pub fn resize(&mut self, css_width: f64, css_height: f64, device_pixel_ratio: f64) -> RenderingResult<()> {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 { device_pixel_ratio } else { 1.0 };
        self.css_width = css_width.max(1.0);
        self.css_height = css_height.max(1.0);
        self.device_pixel_ratio = dpr;

        self.canvas.set_width((self.css_width * dpr).round() as u32);
        self.canvas.set_height((self.css_height * dpr).round() as u32);
        self.context
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| AppError::RenderingError(format!("set_transform failed: {:?}", e)))?;

        log_debug!(
            LogComponent::Infrastructure("Canvas2dSurface"),
            "Resized to {}x{} css px @ {}x",
            self.css_width,
            self.css_height,
            dpr
        );
        Ok(())
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn apply_stroke(&self, style: &StrokeStyle) {
        self.context.set_stroke_style_str(&style.color.to_css());
        self.context.set_line_width(style.width);
    }
}

impl DrawingSurface for Canvas2dSurface {
    fn size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }

    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.css_width, self.css_height);
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: &Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(rect.left, rect.top, rect.width, rect.height);
    }

    fn stroke_rect(&mut self, rect: ScreenRect, style: &StrokeStyle) {
        self.apply_stroke(style);
        self.context.stroke_rect(rect.left, rect.top, rect.width, rect.height);
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: &StrokeStyle) {
        self.apply_stroke(style);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }

    fn stroke_gradient_line(&mut self, from: ScreenPoint, to: ScreenPoint, start: &Color, end: &Color, width: f64) {
        let gradient = self.context.create_linear_gradient(from.x, from.y, to.x, to.y);
        let stops = gradient
            .add_color_stop(0.0, &start.to_css())
            .and_then(|_| gradient.add_color_stop(1.0, &end.to_css()));
        if stops.is_err() {
            self.stroke_line(from, to, &StrokeStyle::new(*start, width));
            return;
        }
        self.context.set_stroke_style_canvas_gradient(&gradient);
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.context.stroke();
    }

    fn stroke_polyline(&mut self, points: &[ScreenPoint], style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.apply_stroke(style);
        self.context.begin_path();
        self.context.move_to(first.x, first.y);
        for p in rest {
            self.context.line_to(p.x, p.y);
        }
        self.context.stroke();
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        if self.context.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.context.fill();
        }
    }

    fn fill_text(&mut self, text: &str, at: ScreenPoint, style: &TextStyle) -> RenderingResult<()> {
        self.context.set_fill_style_str(&style.color.to_css());
        self.context.set_font(style.font);
        self.context.set_text_align(style.align.as_ref());
        self.context
            .fill_text(text, at.x, at.y)
            .map_err(|e| AppError::RenderingError(format!("fill_text failed: {:?}", e)))
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }
}
