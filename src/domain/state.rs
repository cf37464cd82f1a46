use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{AppError, AxisRole, PlotIssue, ValidationResult};
use crate::domain::function::{FunctionCatalog, ParamValues};
use crate::domain::logging::LogComponent;
use crate::domain::plot::{
    Classifier, ColorMode, CoordinateMapper, DisplayRange, FitPolicy, LayoutKind, RangeFitter, Sample,
    Sampler, ScreenRect,
};
use crate::log_debug;

/// Space reserved around the drawable rectangle for tick labels.
pub const PLOT_PADDING_X: f64 = 60.0;
pub const PLOT_PADDING_Y: f64 = 50.0;

/// Every user-facing knob. Deserialized from host JSON; missing fields
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlotSettings {
    pub function_id: String,
    pub params: ParamValues,
    pub domain: DisplayRange,
    pub sample_count: usize,
    pub fit_policy: FitPolicy,
    pub color_mode: ColorMode,
    pub show_grid: bool,
    pub show_points: bool,
    pub dense: bool,
    pub show_companion: bool,
    pub animation_speed: f64,
    pub layout: LayoutKind,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            function_id: "linear".to_string(),
            params: ParamValues::new(),
            domain: DisplayRange::new(-5.0, 5.0),
            sample_count: 40,
            fit_policy: FitPolicy::DomainMatched,
            color_mode: ColorMode::Gradient,
            show_grid: true,
            show_points: true,
            dense: false,
            show_companion: true,
            animation_speed: 1.0,
            layout: LayoutKind::Horizontal,
        }
    }
}

impl PlotSettings {
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::ValidationError(format!("settings: {}", e)))
    }
}

/// CSS size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800.0, height: 500.0, device_pixel_ratio: 1.0 }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn plot_rect(&self) -> ScreenRect {
        ScreenRect::padded(self.width, self.height, PLOT_PADDING_X, PLOT_PADDING_Y)
    }
}

/// Result of one recompute cycle. Never mutated; a settings or viewport
/// change produces a fresh value.
#[derive(Debug, Clone)]
pub struct VisualizerState {
    pub settings: PlotSettings,
    pub params: ParamValues,
    pub viewport: Viewport,
    pub samples: Arc<Vec<Sample>>,
    pub value_range: DisplayRange,
    pub mapper: CoordinateMapper,
    pub out_of_range_count: usize,
    pub issues: Vec<PlotIssue>,
}

impl VisualizerState {
    pub fn domain(&self) -> DisplayRange {
        self.mapper.domain()
    }

    pub fn sample(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Same viewport and catalog, new settings.
    pub fn with_settings(&self, catalog: &FunctionCatalog, settings: PlotSettings) -> ValidationResult<Self> {
        recompute(catalog, settings, self.viewport)
    }

    pub fn with_viewport(&self, catalog: &FunctionCatalog, viewport: Viewport) -> ValidationResult<Self> {
        recompute(catalog, self.settings.clone(), viewport)
    }
}

/// sample → fit → classify → map, in that order.
pub fn recompute(
    catalog: &FunctionCatalog,
    settings: PlotSettings,
    viewport: Viewport,
) -> ValidationResult<VisualizerState> {
    let function = catalog
        .get(&settings.function_id)
        .ok_or_else(|| AppError::ValidationError(format!("unknown function '{}'", settings.function_id)))?;
    if !settings.domain.min.is_finite() || !settings.domain.max.is_finite() {
        return Err(AppError::ValidationError("domain bounds must be finite".to_string()));
    }

    let domain = DisplayRange::spanning(settings.domain.min, settings.domain.max);
    let params = settings.params.resolve(&function.params());
    let layout = settings.layout.layout();
    let rect = viewport.plot_rect();

    let count = if settings.dense {
        Sampler::dense_sample_count(layout.domain_axis(rect).length())
    } else {
        Sampler::clamp_count(settings.sample_count)
    };

    let sampled = Sampler::sample(function, domain, count, &params);
    let mut samples = sampled.samples;
    let mut issues = sampled.issues;

    if domain.is_degenerate() {
        issues.push(PlotIssue::DegenerateRange { axis: AxisRole::Domain });
    }
    if samples.is_empty() {
        issues.push(PlotIssue::EmptySampleSet);
    }

    let value_range = RangeFitter::fit(&samples, domain, settings.fit_policy);
    if value_range.is_degenerate() {
        issues.push(PlotIssue::DegenerateRange { axis: AxisRole::Value });
    }

    let out_of_range_count = Classifier::classify_all(&mut samples, value_range);
    let mapper = CoordinateMapper::new(layout, rect, domain, value_range);

    log_debug!(
        LogComponent::Domain("Recompute"),
        "{} samples of '{}' ({} out of range), value range [{:.3}, {:.3}], {} issues",
        samples.len(),
        settings.function_id,
        out_of_range_count,
        value_range.min,
        value_range.max,
        issues.len()
    );

    Ok(VisualizerState {
        settings,
        params,
        viewport,
        samples: Arc::new(samples),
        value_range,
        mapper,
        out_of_range_count,
        issues,
    })
}
