use insta::assert_json_snapshot;
use parallel_plot_wasm::domain::{
    function::{FunctionCatalog, ParamValues},
    plot::{ColorMode, DisplayRange, Sample},
    state::{PlotSettings, VisualizerState, Viewport, recompute},
};
use parallel_plot_wasm::infrastructure::rendering::{
    PlotRenderer, PlotTheme, RecordingSurface, RenderFrame, RenderPass, StrokeStyle,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_test::*;

fn state(settings: PlotSettings) -> VisualizerState {
    recompute(FunctionCatalog::builtin(), settings, Viewport::new(800.0, 500.0)).unwrap()
}

fn render(frame: &RenderFrame<'_>) -> (Vec<RenderPass>, RecordingSurface) {
    let mut surface = RecordingSurface::new(800.0, 500.0);
    let passes = PlotRenderer::default().render(&mut surface, frame).unwrap();
    (passes, surface)
}

/// Connecting segments are the only plain lines drawn at segment or hover width.
fn segment_lines(surface: &RecordingSurface, theme: &PlotTheme) -> Vec<(f64, f64, f64, f64, StrokeStyle)> {
    surface
        .lines()
        .into_iter()
        .filter(|(_, _, style)| style.width == theme.segment_width || style.width == theme.hover_width)
        .map(|(from, to, style)| (from.x, from.y, to.x, to.y, style))
        .collect()
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn default_frame_pass_order() {
    let state = state(PlotSettings::default());
    let (passes, _) = render(&RenderFrame::new(&state));
    assert_json_snapshot!("default_frame_passes", passes);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn dense_mode_replaces_segments_and_points() {
    let state = state(PlotSettings { dense: true, show_grid: false, ..Default::default() });
    let (passes, _) = render(&RenderFrame::new(&state));
    assert_eq!(
        passes,
        vec![RenderPass::Clear, RenderPass::Axes, RenderPass::DenseSegments, RenderPass::Companion]
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn empty_sample_set_draws_axes_and_message() {
    let state = state(PlotSettings {
        function_id: "reciprocal".to_string(),
        domain: DisplayRange::new(0.0, 0.0),
        ..Default::default()
    });
    assert!(state.samples.is_empty());

    let (passes, surface) = render(&RenderFrame::new(&state));
    assert_eq!(passes, vec![RenderPass::Clear, RenderPass::Grid, RenderPass::Axes, RenderPass::NoData]);
    assert!(surface.texts().contains(&"No finite values in this domain"));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn identity_segments_are_vertical_and_parallel() {
    let state = state(PlotSettings { sample_count: 3, ..Default::default() });
    let (_, surface) = render(&RenderFrame::new(&state));
    let lines = segment_lines(&surface, &PlotTheme::default());

    let endpoints: Vec<(f64, f64, f64, f64)> = lines.iter().map(|l| (l.0, l.1, l.2, l.3)).collect();
    assert_eq!(
        endpoints,
        vec![(60.0, 450.0, 60.0, 50.0), (400.0, 450.0, 400.0, 50.0), (740.0, 450.0, 740.0, 50.0)]
    );
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn out_of_range_samples_get_a_marker_instead_of_a_segment() {
    let state = state(PlotSettings {
        function_id: "quadratic".to_string(),
        sample_count: 11,
        show_points: false,
        show_companion: false,
        ..Default::default()
    });
    let theme = PlotTheme::default();
    let (_, surface) = render(&RenderFrame::new(&state));

    let in_range = state.samples.iter().filter(|s| !s.out_of_range).count();
    assert_eq!(segment_lines(&surface, &theme).len(), in_range);

    let markers: Vec<_> = surface
        .circles()
        .into_iter()
        .filter(|(_, radius, _)| *radius == theme.out_of_range_radius)
        .collect();
    assert_eq!(markers.len(), state.out_of_range_count);
    // markers sit on the domain axis
    assert!(markers.iter().all(|(center, _, _)| center.y == 450.0));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn hovered_segment_is_drawn_last_and_wider() {
    let state = state(PlotSettings { sample_count: 5, ..Default::default() });
    let theme = PlotTheme::default();
    let frame = RenderFrame { hovered: Some(1), ..RenderFrame::new(&state) };
    let (_, surface) = render(&frame);

    let lines = segment_lines(&surface, &theme);
    assert_eq!(lines.len(), 5);
    let last = lines.last().unwrap();
    assert_eq!(last.4.width, theme.hover_width);
    assert_eq!(last.0, state.mapper.project_domain(state.samples[1].x).x);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn visible_count_limits_revealed_segments() {
    let state = state(PlotSettings { sample_count: 10, ..Default::default() });
    let frame = RenderFrame { visible_count: 4, ..RenderFrame::new(&state) };
    let (_, surface) = render(&frame);
    assert_eq!(segment_lines(&surface, &PlotTheme::default()).len(), 4);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn gradient_runs_from_first_to_last_sample() {
    let state = state(PlotSettings { sample_count: 4, ..Default::default() });
    let renderer = PlotRenderer::default();
    let (start, end) = renderer.theme().gradient;
    let mapper = &state.mapper;

    let first = renderer.segment_color(ColorMode::Gradient, &state.samples[0], 4, mapper);
    let last = renderer.segment_color(ColorMode::Gradient, &state.samples[3], 4, mapper);
    assert_eq!(first.to_css(), start.to_css());
    assert_eq!(last.to_css(), end.to_css());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn parallel_segments_take_the_slope_ramp_midpoint() {
    let state = state(PlotSettings { color_mode: ColorMode::Slope, sample_count: 7, ..Default::default() });
    let renderer = PlotRenderer::default();
    let (low, high) = renderer.theme().slope;
    let midpoint = low.lerp(&high, 0.5).to_css();

    for sample in state.samples.iter() {
        assert!(state.mapper.segment_slope(sample).abs() < 1e-12);
        let color = renderer.segment_color(ColorMode::Slope, sample, 7, &state.mapper);
        assert_eq!(color.to_css(), midpoint, "sample {}", sample.index);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn steep_slopes_clamp_to_the_ramp_ends() {
    let state = state(PlotSettings::default());
    let renderer = PlotRenderer::default();
    let (low, high) = renderer.theme().slope;
    let mapper = &state.mapper;

    let rising = Sample::new(-5.0, 5.0, 0);
    let falling = Sample::new(5.0, -5.0, 1);
    assert!(mapper.segment_slope(&rising) >= 1.0);
    assert!(mapper.segment_slope(&falling) <= -1.0);

    assert_eq!(renderer.segment_color(ColorMode::Slope, &rising, 2, mapper).to_css(), high.to_css());
    assert_eq!(renderer.segment_color(ColorMode::Slope, &falling, 2, mapper).to_css(), low.to_css());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn flat_mode_ignores_index_and_slope() {
    let state = state(PlotSettings { function_id: "quadratic".to_string(), sample_count: 9, ..Default::default() });
    let renderer = PlotRenderer::default();
    let flat = renderer.theme().flat.to_css();

    for sample in state.samples.iter() {
        let color = renderer.segment_color(ColorMode::Flat, sample, 9, &state.mapper);
        assert_eq!(color.to_css(), flat);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
fn tick_labels_cover_both_ranges() {
    let state = state(PlotSettings {
        params: ParamValues::new().with("a", 2.0),
        fit_policy: parallel_plot_wasm::domain::plot::FitPolicy::AutoFitSymmetric,
        ..Default::default()
    });
    let (_, surface) = render(&RenderFrame::new(&state));
    let texts = surface.texts();
    for label in ["-5", "-2.5", "0", "2.5", "5", "-10", "10", "x", "f(x)"] {
        assert!(texts.contains(&label), "missing label {}", label);
    }
}
