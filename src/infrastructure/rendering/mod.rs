pub mod canvas_surface;
pub mod recording;
pub mod renderer;
pub mod surface;

// Re-exports for convenient access
pub use canvas_surface::Canvas2dSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{PlotRenderer, PlotTheme, RenderFrame, RenderPass};
pub use surface::{DrawingSurface, StrokeStyle, TextAlign, TextStyle};
