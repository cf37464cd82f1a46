use super::mapper::CoordinateMapper;
use super::value_objects::{Sample, ScreenPoint};

/// Pointer must be strictly closer than this to a segment to hover it.
pub const PICK_THRESHOLD_PX: f64 = 15.0;

/// Nearest segment under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub distance: f64,
}

/// Linear-scan hover picking over connecting segments.
pub struct Picker;

impl Picker {
    pub fn pick(pointer: ScreenPoint, samples: &[Sample], mapper: &CoordinateMapper) -> Option<usize> {
        Self::pick_within(pointer, samples, mapper, PICK_THRESHOLD_PX).map(|hit| hit.index)
    }

    /// Out-of-range samples have no segment and are skipped. Ties keep the
    /// earliest sample.
    pub fn pick_within(
        pointer: ScreenPoint,
        samples: &[Sample],
        mapper: &CoordinateMapper,
        threshold: f64,
    ) -> Option<PickHit> {
        let mut best: Option<PickHit> = None;
        for sample in samples.iter().filter(|s| !s.out_of_range) {
            let (from, to) = mapper.segment(sample);
            let distance = distance_to_segment(pointer, from, to);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(PickHit { index: sample.index, distance });
            }
        }
        best.filter(|hit| hit.distance < threshold)
    }
}

/// Euclidean distance from `p` to the closed segment `a..b`.
pub fn distance_to_segment(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plot::{DisplayRange, LayoutKind, ScreenRect};

    fn mapper() -> CoordinateMapper {
        let range = DisplayRange::new(-5.0, 5.0);
        let rect = ScreenRect::new(80.0, 50.0, 400.0, 300.0);
        CoordinateMapper::new(LayoutKind::Horizontal.layout(), rect, range, range)
    }

    fn identity_samples() -> Vec<Sample> {
        [-5.0, 0.0, 5.0].iter().enumerate().map(|(i, &x)| Sample::new(x, x, i)).collect()
    }

    #[test]
    fn distance_clamps_to_endpoints() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(10.0, 0.0);
        assert_eq!(distance_to_segment(ScreenPoint::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(ScreenPoint::new(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_segment(ScreenPoint::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn midpoint_of_segment_picks_it() {
        let mapper = mapper();
        let samples = identity_samples();
        let (from, to) = mapper.segment(&samples[1]);
        let hit = Picker::pick_within(from.lerp(to, 0.5), &samples, &mapper, PICK_THRESHOLD_PX).unwrap();
        assert_eq!(hit.index, 1);
        assert!(hit.distance < 1e-9);
    }

    #[test]
    fn pointer_beyond_threshold_picks_nothing() {
        let mapper = mapper();
        let samples = identity_samples();
        // segments sit at x = 80, 280, 480; 20px right of the middle one
        assert_eq!(Picker::pick(ScreenPoint::new(300.0, 200.0), &samples, &mapper), None);
        assert_eq!(Picker::pick(ScreenPoint::new(290.0, 200.0), &samples, &mapper), Some(1));
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let mapper = mapper();
        let samples = vec![Sample::new(0.0, 0.0, 0), Sample::new(0.0, 0.0, 1)];
        assert_eq!(Picker::pick(ScreenPoint::new(281.0, 200.0), &samples, &mapper), Some(0));
    }

    #[test]
    fn out_of_range_samples_are_not_pickable() {
        let mapper = mapper();
        let mut sample = Sample::new(0.0, 9.0, 0);
        sample.out_of_range = true;
        assert_eq!(Picker::pick(ScreenPoint::new(280.0, 349.0), &[sample], &mapper), None);
    }
}
