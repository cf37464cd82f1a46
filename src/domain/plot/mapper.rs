use super::layout::{AxisLayout, AxisSegment, LayoutKind};
use super::value_objects::{DisplayRange, Sample, ScreenPoint, ScreenRect};

/// Affine maps between data values and the two axis segments of a layout.
/// Built per recompute; holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    layout: LayoutKind,
    rect: ScreenRect,
    domain: DisplayRange,
    value: DisplayRange,
    domain_axis: AxisSegment,
    value_axis: AxisSegment,
    gap: f64,
}

impl CoordinateMapper {
    pub fn new(layout: &dyn AxisLayout, rect: ScreenRect, domain: DisplayRange, value: DisplayRange) -> Self {
        Self {
            layout: layout.kind(),
            rect,
            domain,
            value,
            domain_axis: layout.domain_axis(rect),
            value_axis: layout.value_axis(rect),
            gap: layout.axis_gap(rect),
        }
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    pub fn domain(&self) -> DisplayRange {
        self.domain
    }

    pub fn value(&self) -> DisplayRange {
        self.value
    }

    pub fn domain_axis(&self) -> AxisSegment {
        self.domain_axis
    }

    pub fn value_axis(&self) -> AxisSegment {
        self.value_axis
    }

    pub fn project_domain(&self, x: f64) -> ScreenPoint {
        project(self.domain, self.domain_axis, x)
    }

    pub fn project_value(&self, y: f64) -> ScreenPoint {
        project(self.value, self.value_axis, y)
    }

    /// Like [`project_value`](Self::project_value) with `y` pinned to the
    /// range first, so the point never leaves the axis.
    pub fn project_value_clamped(&self, y: f64) -> ScreenPoint {
        self.project_value(self.value.clamp(y))
    }

    pub fn inverse_project_domain(&self, point: ScreenPoint) -> f64 {
        invert(self.domain, self.domain_axis, point)
    }

    pub fn inverse_project_value(&self, point: ScreenPoint) -> f64 {
        invert(self.value, self.value_axis, point)
    }

    /// Endpoints of the connecting segment, domain end first.
    pub fn segment(&self, sample: &Sample) -> (ScreenPoint, ScreenPoint) {
        (self.project_domain(sample.x), self.project_value(sample.y))
    }

    /// Along-axis displacement of the segment divided by the axis gap. Two
    /// segments with equal slope are parallel.
    pub fn segment_slope(&self, sample: &Sample) -> f64 {
        if self.gap == 0.0 {
            return 0.0;
        }
        let (from, to) = self.segment(sample);
        let axis_len = self.domain_axis.length();
        if axis_len == 0.0 {
            return 0.0;
        }
        let ux = (self.domain_axis.end.x - self.domain_axis.start.x) / axis_len;
        let uy = (self.domain_axis.end.y - self.domain_axis.start.y) / axis_len;
        ((to.x - from.x) * ux + (to.y - from.y) * uy) / self.gap
    }
}

fn project(range: DisplayRange, axis: AxisSegment, v: f64) -> ScreenPoint {
    match range.normalize(v) {
        Some(t) => axis.at(t),
        None => axis.midpoint(),
    }
}

fn invert(range: DisplayRange, axis: AxisSegment, point: ScreenPoint) -> f64 {
    range.lerp(axis.parameter_of(point))
}
