use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - closed numeric interval shown on one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range covering both values regardless of order.
    pub fn spanning(a: f64, b: f64) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Zero-width ranges cannot be used as an interpolation denominator.
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || !self.width().is_finite()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Fraction of the way from `min` to `max`; `None` on a degenerate range.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if self.is_degenerate() {
            None
        } else {
            Some((value - self.min) / self.width())
        }
    }

    pub fn lerp(&self, t: f64) -> f64 {
        self.min + self.width() * t
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self::new(-5.0, 5.0)
    }
}

/// One evaluated point `(x, f(x))`. `index` is the position in the filtered
/// sequence and drives gradient colour and reveal order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub index: usize,
    pub out_of_range: bool,
}

impl Sample {
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index, out_of_range: false }
    }
}

/// Value Object - how the value axis range is derived
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum FitPolicy {
    #[default]
    #[display(fmt = "Domain matched")]
    #[strum(serialize = "domain")]
    #[serde(rename = "domain")]
    DomainMatched,
    #[display(fmt = "Auto-fit")]
    #[strum(serialize = "auto")]
    #[serde(rename = "auto")]
    AutoFitSymmetric,
}

impl FitPolicy {
    /// The other policy; used by the squash toggle.
    pub fn toggled(self) -> Self {
        match self {
            FitPolicy::DomainMatched => FitPolicy::AutoFitSymmetric,
            FitPolicy::AutoFitSymmetric => FitPolicy::DomainMatched,
        }
    }
}

/// Value Object - segment colouring
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum ColorMode {
    #[default]
    #[display(fmt = "Gradient")]
    #[strum(serialize = "gradient")]
    #[serde(rename = "gradient")]
    Gradient,
    #[display(fmt = "Slope")]
    #[strum(serialize = "slope")]
    #[serde(rename = "slope")]
    Slope,
    #[display(fmt = "Flat")]
    #[strum(serialize = "flat")]
    #[serde(rename = "flat")]
    Flat,
}

/// Screen-space point in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: ScreenPoint, t: f64) -> ScreenPoint {
        ScreenPoint::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    pub fn distance(self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle: `left/top` inclusive origin plus size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Canvas area minus uniform horizontal/vertical padding, never negative.
    pub fn padded(width: f64, height: f64, pad_x: f64, pad_y: f64) -> Self {
        Self::new(pad_x, pad_y, (width - 2.0 * pad_x).max(0.0), (height - 2.0 * pad_y).max(0.0))
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Straight (non-premultiplied) RGBA, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    /// Channel-wise interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// CSS `rgba(...)` string for canvas style setters.
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {:.3})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}
