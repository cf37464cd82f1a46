//! Placement of the two parallel axes inside the drawable rectangle.

use super::value_objects::{ScreenPoint, ScreenRect};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Screen segment an axis occupies. `start` is where the range minimum sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSegment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
}

impl AxisSegment {
    pub const fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }

    pub fn at(&self, t: f64) -> ScreenPoint {
        self.start.lerp(self.end, t)
    }

    pub fn midpoint(&self) -> ScreenPoint {
        self.at(0.5)
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Parameter of the orthogonal projection of `point` onto the axis line.
    pub fn parameter_of(&self, point: ScreenPoint) -> f64 {
        let (dx, dy) = (self.end.x - self.start.x, self.end.y - self.start.y);
        let len_sq = dx * dx + dy * dy;
        if len_sq == 0.0 {
            return 0.5;
        }
        ((point.x - self.start.x) * dx + (point.y - self.start.y) * dy) / len_sq
    }
}

/// Strategy deciding where the domain and value axes go.
pub trait AxisLayout: Send + Sync {
    fn kind(&self) -> LayoutKind;
    fn domain_axis(&self, rect: ScreenRect) -> AxisSegment;
    fn value_axis(&self, rect: ScreenRect) -> AxisSegment;
    /// `true` when connecting segments run top-to-bottom.
    fn segments_run_vertically(&self) -> bool;

    /// Perpendicular distance between the two axes.
    fn axis_gap(&self, rect: ScreenRect) -> f64 {
        if self.segments_run_vertically() { rect.height } else { rect.width }
    }
}

/// Domain axis along the bottom edge, value axis along the top edge.
pub struct HorizontalAxes;

impl AxisLayout for HorizontalAxes {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Horizontal
    }

    fn domain_axis(&self, rect: ScreenRect) -> AxisSegment {
        AxisSegment::new(
            ScreenPoint::new(rect.left, rect.bottom()),
            ScreenPoint::new(rect.right(), rect.bottom()),
        )
    }

    fn value_axis(&self, rect: ScreenRect) -> AxisSegment {
        AxisSegment::new(ScreenPoint::new(rect.left, rect.top), ScreenPoint::new(rect.right(), rect.top))
    }

    fn segments_run_vertically(&self) -> bool {
        true
    }
}

/// Domain axis on the left edge growing upwards, value axis on the right
/// edge growing downwards.
pub struct VerticalAxes;

impl AxisLayout for VerticalAxes {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Vertical
    }

    fn domain_axis(&self, rect: ScreenRect) -> AxisSegment {
        AxisSegment::new(ScreenPoint::new(rect.left, rect.bottom()), ScreenPoint::new(rect.left, rect.top))
    }

    fn value_axis(&self, rect: ScreenRect) -> AxisSegment {
        AxisSegment::new(
            ScreenPoint::new(rect.right(), rect.top),
            ScreenPoint::new(rect.right(), rect.bottom()),
        )
    }

    fn segments_run_vertically(&self) -> bool {
        false
    }
}

/// Configuration switch between the two layouts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum LayoutKind {
    #[default]
    #[display(fmt = "Horizontal axes")]
    #[strum(serialize = "horizontal")]
    #[serde(rename = "horizontal")]
    Horizontal,
    #[display(fmt = "Vertical axes")]
    #[strum(serialize = "vertical")]
    #[serde(rename = "vertical")]
    Vertical,
}

impl LayoutKind {
    pub fn layout(self) -> &'static dyn AxisLayout {
        match self {
            LayoutKind::Horizontal => &HorizontalAxes,
            LayoutKind::Vertical => &VerticalAxes,
        }
    }
}
