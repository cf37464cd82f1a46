use super::surface::{DrawingSurface, StrokeStyle, TextStyle};
use crate::domain::errors::RenderingResult;
use crate::domain::plot::{Color, ScreenPoint, ScreenRect};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { rect: ScreenRect, color: Color },
    StrokeRect { rect: ScreenRect, style: StrokeStyle },
    Line { from: ScreenPoint, to: ScreenPoint, style: StrokeStyle },
    GradientLine { from: ScreenPoint, to: ScreenPoint, start: Color, end: Color, width: f64 },
    Polyline { points: Vec<ScreenPoint>, style: StrokeStyle },
    Circle { center: ScreenPoint, radius: f64, color: Color },
    Text { text: String, at: ScreenPoint },
    Save,
    Restore,
}

/// Off-screen surface that keeps every call, for headless rendering checks.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn lines(&self) -> Vec<(ScreenPoint, ScreenPoint, StrokeStyle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, style } => Some((*from, *to, *style)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(ScreenPoint, f64, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: &Color) {
        self.commands.push(DrawCommand::FillRect { rect, color: *color });
    }

    fn stroke_rect(&mut self, rect: ScreenRect, style: &StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect { rect, style: *style });
    }

    fn stroke_line(&mut self, from: ScreenPoint, to: ScreenPoint, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Line { from, to, style: *style });
    }

    fn stroke_gradient_line(&mut self, from: ScreenPoint, to: ScreenPoint, start: &Color, end: &Color, width: f64) {
        self.commands.push(DrawCommand::GradientLine { from, to, start: *start, end: *end, width });
    }

    fn stroke_polyline(&mut self, points: &[ScreenPoint], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), style: *style });
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f64, color: &Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color: *color });
    }

    fn fill_text(&mut self, text: &str, at: ScreenPoint, _style: &TextStyle) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Text { text: text.to_string(), at });
        Ok(())
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
}
