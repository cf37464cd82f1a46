use serde::Serialize;

use crate::domain::{
    animation::{Animation, AnimationPhase, FrameToken},
    errors::{RenderingResult, ValidationResult},
    function::FunctionCatalog,
    logging::LogComponent,
    plot::{FitPolicy, Picker, ScreenPoint},
    state::{PlotSettings, VisualizerState, Viewport, recompute},
};
use crate::infrastructure::rendering::{DrawingSurface, PlotRenderer, RenderFrame, RenderPass};
use crate::{log_error, log_info};

/// Hover state; only pointer events change it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered_index: Option<usize>,
}

/// What the host shows next to the pointer for a hovered segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipData {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub position: ScreenPoint,
    pub text: String,
}

impl TooltipData {
    fn new(index: usize, x: f64, y: f64, position: ScreenPoint) -> Self {
        let text = format!("#{}  x = {:.4}\nf(x) = {:.4}", index, x, y);
        Self { index, x, y, position, text }
    }
}

/// Owns the latest [`VisualizerState`] and routes host events to
/// recompute, pick and redraw. Everything runs synchronously.
pub struct PlotController<S: DrawingSurface> {
    catalog: &'static FunctionCatalog,
    surface: S,
    renderer: PlotRenderer,
    state: VisualizerState,
    interaction: InteractionState,
    animation: Animation,
}

impl<S: DrawingSurface> PlotController<S> {
    /// Controller over the built-in catalog, sized to the surface.
    pub fn new(surface: S, settings: PlotSettings) -> ValidationResult<Self> {
        Self::with_catalog(FunctionCatalog::builtin(), surface, settings)
    }

    pub fn with_catalog(
        catalog: &'static FunctionCatalog,
        surface: S,
        settings: PlotSettings,
    ) -> ValidationResult<Self> {
        let (width, height) = surface.size();
        let animation = Animation::new(settings.animation_speed);
        let state = recompute(catalog, settings, Viewport::new(width, height))?;
        log_info!(
            LogComponent::Application("PlotController"),
            "Plot ready: '{}' on {}x{}",
            state.settings.function_id,
            width,
            height
        );
        Ok(Self {
            catalog,
            surface,
            renderer: PlotRenderer::default(),
            state,
            interaction: InteractionState::default(),
            animation,
        })
    }

    pub fn state(&self) -> &VisualizerState {
        &self.state
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.state.settings
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Replace all settings: recompute, drop stale hover, redraw.
    pub fn apply_settings(&mut self, settings: PlotSettings) -> ValidationResult<()> {
        self.state = self.state.with_settings(self.catalog, settings)?;
        self.animation.set_speed(self.state.settings.animation_speed);
        self.interaction = InteractionState::default();
        self.redraw().map(|_| ())
    }

    pub fn update_settings(&mut self, edit: impl FnOnce(&mut PlotSettings)) -> ValidationResult<()> {
        let mut settings = self.state.settings.clone();
        edit(&mut settings);
        self.apply_settings(settings)
    }

    /// Flip between domain-matched and auto-fit value ranges.
    pub fn toggle_fit_policy(&mut self) -> ValidationResult<FitPolicy> {
        self.update_settings(|s| s.fit_policy = s.fit_policy.toggled())?;
        Ok(self.state.settings.fit_policy)
    }

    /// Call after the surface itself has been resized.
    pub fn resize(&mut self, viewport: Viewport) -> ValidationResult<()> {
        self.state = self.state.with_viewport(self.catalog, viewport)?;
        self.interaction = InteractionState::default();
        self.redraw().map(|_| ())
    }

    /// Hover picking among revealed samples; redraws only when the hovered
    /// segment changes.
    pub fn pointer_move(&mut self, pointer: ScreenPoint) -> RenderingResult<Option<TooltipData>> {
        let visible = self.animation.visible_count(self.state.samples.len());
        let picked = Picker::pick(pointer, &self.state.samples[..visible], &self.state.mapper);

        if picked != self.interaction.hovered_index {
            self.interaction.hovered_index = picked;
            self.redraw()?;
        }

        Ok(picked
            .and_then(|i| self.state.sample(i))
            .map(|s| TooltipData::new(s.index, s.x, s.y, pointer)))
    }

    pub fn pointer_leave(&mut self) -> RenderingResult<()> {
        if self.interaction.hovered_index.take().is_some() {
            self.redraw()?;
        }
        Ok(())
    }

    pub fn play(&mut self) -> RenderingResult<FrameToken> {
        let token = self.animation.play();
        self.redraw()?;
        Ok(token)
    }

    pub fn pause(&mut self) {
        self.animation.pause();
    }

    pub fn reset(&mut self) -> RenderingResult<()> {
        self.animation.reset();
        self.redraw().map(|_| ())
    }

    pub fn animation_phase(&self) -> AnimationPhase {
        self.animation.phase()
    }

    /// One scheduled frame. Returns `true` while the scheduler should
    /// request another.
    pub fn on_frame(&mut self, token: FrameToken, dt_ms: f64) -> bool {
        let before = self.animation.progress();
        let more = self.animation.tick(token, dt_ms);
        if self.animation.progress() != before {
            if let Err(e) = self.redraw() {
                log_error!(LogComponent::Application("PlotController"), "Frame redraw failed: {}", e);
            }
        }
        more
    }

    pub fn redraw(&mut self) -> RenderingResult<Vec<RenderPass>> {
        let frame = RenderFrame {
            state: &self.state,
            hovered: self.interaction.hovered_index,
            visible_count: self.animation.visible_count(self.state.samples.len()),
        };
        self.renderer.render(&mut self.surface, &frame)
    }
}
