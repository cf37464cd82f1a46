use crate::domain::errors::RenderingResult;
use crate::domain::plot::{Color, ScreenPoint, ScreenRect};
use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font: &'static str,
    pub align: TextAlign,
}

/// 2D drawing operations the renderer needs. Coordinates are CSS pixels;
/// implementations handle device pixel ratio themselves.
pub trait DrawingSurface {
    /// CSS size of the surface.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: ScreenRect, color: &Color);
    fn stroke_rect(&mut self, rect: ScreenRect, style: &StrokeStyle);
    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: &StrokeStyle);
    /// Line stroked with a linear gradient running from `from` to `to`.
    fn stroke_gradient_line(&mut self, from: ScreenPoint, to: ScreenPoint, start: &Color, end: &Color, width: f64);
    fn stroke_polyline(&mut self, points: &[ScreenPoint], style: &StrokeStyle);
    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &Color);
    fn fill_text(&mut self, text: &str, at: ScreenPoint, style: &TextStyle) -> RenderingResult<()>;
    fn save(&mut self);
    fn restore(&mut self);
}
