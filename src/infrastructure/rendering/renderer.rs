//! Frame rendering for the parallel-coordinate plot.
//!
//! A frame runs fixed passes in order: clear, grid, axes with ticks,
//! connecting segments (dense or discrete), point markers and the companion
//! Cartesian panel. Optional passes are skipped, never reordered.

use serde::Serialize;
use strum::AsRefStr;

use super::surface::{DrawingSurface, StrokeStyle, TextAlign, TextStyle};
use crate::domain::{
    errors::RenderingResult,
    logging::LogComponent,
    plot::{AxisSegment, Color, ColorMode, CoordinateMapper, DisplayRange, Sample, ScreenPoint, ScreenRect},
    state::VisualizerState,
};
use crate::{log_trace, log_warn};

/// Ticks per axis, including both ends.
pub const TICK_COUNT: usize = 5;
const TICK_LENGTH: f64 = 6.0;
const LABEL_OFFSET: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RenderPass {
    Clear,
    Grid,
    Axes,
    DenseSegments,
    Segments,
    Points,
    Companion,
    NoData,
}

/// Colours and sizes for every pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTheme {
    pub background: Color,
    pub axis: Color,
    pub grid: Color,
    pub label: Color,
    pub gradient: (Color, Color),
    pub slope: (Color, Color),
    pub flat: Color,
    pub out_of_range: Color,
    pub segment_alpha: f32,
    pub dense_alpha: f32,
    pub segment_width: f64,
    pub dense_width: f64,
    pub marker_radius: f64,
    pub out_of_range_radius: f64,
    pub hover_width: f64,
    pub hover_marker_radius: f64,
    pub font: &'static str,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x11151c),
            axis: Color::from_hex(0xc9d1d9),
            grid: Color::from_hex(0x30363d).with_alpha(0.6),
            label: Color::from_hex(0x8b949e),
            gradient: (Color::from_hex(0x3b82f6), Color::from_hex(0xef4444)),
            slope: (Color::from_hex(0x10b981), Color::from_hex(0xf59e0b)),
            flat: Color::from_hex(0x60a5fa),
            out_of_range: Color::from_hex(0xff4d6d),
            segment_alpha: 0.65,
            dense_alpha: 0.2,
            segment_width: 1.5,
            dense_width: 1.0,
            marker_radius: 3.0,
            out_of_range_radius: 2.5,
            hover_width: 3.0,
            hover_marker_radius: 5.5,
            font: "12px sans-serif",
        }
    }
}

/// Everything one frame needs: the latest recompute plus view state.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub state: &'a VisualizerState,
    pub hovered: Option<usize>,
    /// Leading samples revealed by the animation.
    pub visible_count: usize,
}

impl<'a> RenderFrame<'a> {
    pub fn new(state: &'a VisualizerState) -> Self {
        Self { state, hovered: None, visible_count: state.samples.len() }
    }

    fn visible(&self) -> &'a [Sample] {
        let n = self.visible_count.min(self.state.samples.len());
        &self.state.samples[..n]
    }

    fn is_hovered(&self, sample: &Sample) -> bool {
        self.hovered == Some(sample.index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlotRenderer {
    theme: PlotTheme,
}

impl PlotRenderer {
    pub fn new(theme: PlotTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &PlotTheme {
        &self.theme
    }

    /// Draws one frame and reports the passes that ran.
    pub fn render<S: DrawingSurface>(
        &self,
        surface: &mut S,
        frame: &RenderFrame<'_>,
    ) -> RenderingResult<Vec<RenderPass>> {
        let settings = &frame.state.settings;
        let mapper = &frame.state.mapper;
        let mut passes = Vec::with_capacity(6);

        let (width, height) = surface.size();
        surface.clear();
        surface.fill_rect(ScreenRect::new(0.0, 0.0, width, height), &self.theme.background);
        passes.push(RenderPass::Clear);

        if settings.show_grid {
            self.draw_grid(surface, mapper);
            passes.push(RenderPass::Grid);
        }

        self.draw_axes(surface, mapper, settings.color_mode)?;
        passes.push(RenderPass::Axes);

        if frame.state.samples.is_empty() {
            self.draw_no_data(surface, mapper)?;
            passes.push(RenderPass::NoData);
            return Ok(passes);
        }

        if settings.dense {
            self.draw_segments(surface, frame, true);
            passes.push(RenderPass::DenseSegments);
        } else {
            self.draw_segments(surface, frame, false);
            passes.push(RenderPass::Segments);
            if settings.show_points {
                self.draw_points(surface, frame);
                passes.push(RenderPass::Points);
            }
        }

        if settings.show_companion {
            self.draw_companion(surface, frame, width)?;
            passes.push(RenderPass::Companion);
        }

        log_trace!(
            LogComponent::Infrastructure("PlotRenderer"),
            "Rendered {} of {} samples",
            frame.visible().len(),
            frame.state.samples.len()
        );
        Ok(passes)
    }

    /// Colour of the sample's segment under `mode`, before alpha.
    pub fn segment_color(&self, mode: ColorMode, sample: &Sample, total: usize, mapper: &CoordinateMapper) -> Color {
        match mode {
            ColorMode::Gradient => {
                let t = if total > 1 { sample.index as f64 / (total - 1) as f64 } else { 0.0 };
                self.theme.gradient.0.lerp(&self.theme.gradient.1, t as f32)
            }
            ColorMode::Slope => {
                let t = ((mapper.segment_slope(sample) + 1.0) / 2.0).clamp(0.0, 1.0);
                self.theme.slope.0.lerp(&self.theme.slope.1, t as f32)
            }
            ColorMode::Flat => self.theme.flat,
        }
    }

    fn draw_grid<S: DrawingSurface>(&self, surface: &mut S, mapper: &CoordinateMapper) {
        let style = StrokeStyle::new(self.theme.grid, 1.0);
        let (domain_axis, value_axis) = (mapper.domain_axis(), mapper.value_axis());
        for t in tick_fractions() {
            surface.stroke_line(domain_axis.at(t), value_axis.at(t), &style);
        }
    }

    fn draw_axes<S: DrawingSurface>(
        &self,
        surface: &mut S,
        mapper: &CoordinateMapper,
        mode: ColorMode,
    ) -> RenderingResult<()> {
        let (domain_axis, value_axis) = (mapper.domain_axis(), mapper.value_axis());

        if mode == ColorMode::Gradient {
            let (start, end) = self.theme.gradient;
            surface.stroke_gradient_line(domain_axis.start, domain_axis.end, &start, &end, 2.0);
        } else {
            surface.stroke_line(domain_axis.start, domain_axis.end, &StrokeStyle::new(self.theme.axis, 2.0));
        }
        surface.stroke_line(value_axis.start, value_axis.end, &StrokeStyle::new(self.theme.axis, 2.0));

        self.draw_ticks(surface, domain_axis, value_axis, mapper.domain(), "x")?;
        self.draw_ticks(surface, value_axis, domain_axis, mapper.value(), "f(x)")
    }

    fn draw_ticks<S: DrawingSurface>(
        &self,
        surface: &mut S,
        axis: AxisSegment,
        opposite: AxisSegment,
        range: DisplayRange,
        title: &str,
    ) -> RenderingResult<()> {
        let (nx, ny) = outward_normal(axis, opposite);
        let tick_style = StrokeStyle::new(self.theme.axis, 1.0);
        let text = TextStyle { color: self.theme.label, font: self.theme.font, align: TextAlign::Center };

        for t in tick_fractions() {
            let at = axis.at(t);
            let tip = ScreenPoint::new(at.x + nx * TICK_LENGTH, at.y + ny * TICK_LENGTH);
            surface.stroke_line(at, tip, &tick_style);
            let label_at = ScreenPoint::new(at.x + nx * LABEL_OFFSET, at.y + ny * LABEL_OFFSET + 4.0);
            surface.fill_text(&format_tick(range.lerp(t)), label_at, &text)?;
        }

        let title_at = axis.end;
        let title_pos = ScreenPoint::new(title_at.x + nx * LABEL_OFFSET * 2.2, title_at.y + ny * LABEL_OFFSET * 2.2);
        surface.fill_text(title, title_pos, &TextStyle { color: self.theme.axis, ..text })
    }

    fn draw_segments<S: DrawingSurface>(&self, surface: &mut S, frame: &RenderFrame<'_>, dense: bool) {
        let mapper = &frame.state.mapper;
        let mode = frame.state.settings.color_mode;
        let total = frame.state.samples.len();
        let (alpha, width) = if dense {
            (self.theme.dense_alpha, self.theme.dense_width)
        } else {
            (self.theme.segment_alpha, self.theme.segment_width)
        };
        let out_of_range = self.theme.out_of_range.with_alpha(0.8);

        let mut hovered = None;
        for sample in frame.visible() {
            if sample.out_of_range {
                surface.fill_circle(mapper.project_domain(sample.x), self.theme.out_of_range_radius, &out_of_range);
                continue;
            }
            if frame.is_hovered(sample) {
                hovered = Some(sample);
                continue;
            }
            let (from, to) = mapper.segment(sample);
            let color = self.segment_color(mode, sample, total, mapper).with_alpha(alpha);
            surface.stroke_line(from, to, &StrokeStyle::new(color, width));
        }

        // drawn last so it sits on top
        if let Some(sample) = hovered {
            let (from, to) = mapper.segment(sample);
            let color = self.segment_color(mode, sample, total, mapper);
            surface.stroke_line(from, to, &StrokeStyle::new(color, self.theme.hover_width));
        }
    }

    fn draw_points<S: DrawingSurface>(&self, surface: &mut S, frame: &RenderFrame<'_>) {
        let mapper = &frame.state.mapper;
        let mode = frame.state.settings.color_mode;
        let total = frame.state.samples.len();

        for sample in frame.visible().iter().filter(|s| !s.out_of_range) {
            let (radius, alpha) = if frame.is_hovered(sample) {
                (self.theme.hover_marker_radius, 1.0)
            } else {
                (self.theme.marker_radius, 0.9)
            };
            let color = self.segment_color(mode, sample, total, mapper).with_alpha(alpha);
            let (from, to) = mapper.segment(sample);
            surface.fill_circle(from, radius, &color);
            surface.fill_circle(to, radius, &color);
        }
    }

    /// Inset Cartesian view of the same samples in the top-right corner.
    fn draw_companion<S: DrawingSurface>(
        &self,
        surface: &mut S,
        frame: &RenderFrame<'_>,
        width: f64,
    ) -> RenderingResult<()> {
        let panel = companion_rect(width);
        let domain = frame.state.mapper.domain();
        let value = frame.state.mapper.value();

        surface.save();
        surface.fill_rect(panel, &self.theme.background.with_alpha(0.92));
        surface.stroke_rect(panel, &StrokeStyle::new(self.theme.grid, 1.0));

        let axis_style = StrokeStyle::new(self.theme.grid, 1.0);
        if domain.contains(0.0) {
            let x0 = cartesian_point(panel, domain, value, 0.0, value.min);
            let x1 = cartesian_point(panel, domain, value, 0.0, value.max);
            surface.stroke_line(x0, x1, &axis_style);
        }
        if value.contains(0.0) {
            let y0 = cartesian_point(panel, domain, value, domain.min, 0.0);
            let y1 = cartesian_point(panel, domain, value, domain.max, 0.0);
            surface.stroke_line(y0, y1, &axis_style);
        }

        // in-range runs become separate polylines
        let curve = StrokeStyle::new(self.theme.flat, 1.5);
        let mut run: Vec<ScreenPoint> = Vec::new();
        for sample in frame.visible() {
            if sample.out_of_range {
                if run.len() > 1 {
                    surface.stroke_polyline(&run, &curve);
                }
                run.clear();
                continue;
            }
            run.push(cartesian_point(panel, domain, value, sample.x, sample.y));
        }
        if run.len() > 1 {
            surface.stroke_polyline(&run, &curve);
        }

        if let Some(sample) = frame.hovered.and_then(|i| frame.state.sample(i)).filter(|s| !s.out_of_range) {
            let at = cartesian_point(panel, domain, value, sample.x, sample.y);
            surface.fill_circle(at, self.theme.marker_radius, &self.theme.out_of_range.with_alpha(1.0));
        }

        let text = TextStyle { color: self.theme.label, font: self.theme.font, align: TextAlign::Left };
        surface.fill_text("y = f(x)", ScreenPoint::new(panel.left + 6.0, panel.top + 14.0), &text)?;
        surface.restore();
        Ok(())
    }

    fn draw_no_data<S: DrawingSurface>(&self, surface: &mut S, mapper: &CoordinateMapper) -> RenderingResult<()> {
        log_warn!(LogComponent::Infrastructure("PlotRenderer"), "No finite samples to render");
        let rect = mapper.rect();
        let center = ScreenPoint::new(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);
        let text = TextStyle { color: self.theme.label, font: "16px sans-serif", align: TextAlign::Center };
        surface.fill_text("No finite values in this domain", center, &text)
    }
}

fn tick_fractions() -> impl Iterator<Item = f64> {
    (0..TICK_COUNT).map(|i| i as f64 / (TICK_COUNT - 1) as f64)
}

/// Unit vector pointing away from the opposite axis.
fn outward_normal(axis: AxisSegment, opposite: AxisSegment) -> (f64, f64) {
    let (a, b) = (axis.midpoint(), opposite.midpoint());
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    let len = dx.hypot(dy);
    if len == 0.0 { (0.0, 1.0) } else { (dx / len, dy / len) }
}

/// Panel rectangle for a surface `width` pixels wide.
pub fn companion_rect(width: f64) -> ScreenRect {
    let w = (width * 0.22).max(80.0);
    ScreenRect::new(width - w - 8.0, 8.0, w, w * 0.65)
}

/// Cartesian placement inside `panel`; y grows upwards. Zero-width ranges
/// fall back to the panel centre line.
pub fn cartesian_point(panel: ScreenRect, domain: DisplayRange, value: DisplayRange, x: f64, y: f64) -> ScreenPoint {
    let tx = domain.normalize(x).unwrap_or(0.5);
    let ty = value.normalize(y).unwrap_or(0.5);
    ScreenPoint::new(panel.left + tx * panel.width, panel.bottom() - ty * panel.height)
}

/// Two decimals with trailing zeros removed: `2.50 -> 2.5`, `-0.00 -> 0`.
pub fn format_tick(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}
