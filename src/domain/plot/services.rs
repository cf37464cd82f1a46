use super::value_objects::{DisplayRange, FitPolicy, Sample};
use crate::domain::errors::PlotIssue;
use crate::domain::function::{ParamValues, PlotFunction};
use crate::domain::logging::LogComponent;
use crate::log_debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lowest sample count the dense mode will use, however small the canvas.
pub const DENSE_MIN_SAMPLES: usize = 1000;
/// Upper bound on samples per pass, whatever the host asks for.
pub const MAX_SAMPLE_COUNT: usize = 10_000;
/// Dense-mode samples per pixel of domain axis length.
pub const DENSE_SAMPLES_PER_PIXEL: f64 = 2.0;
/// Below this many samples the parallel evaluator is not worth spawning.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 2048;

/// Output of one sampling pass: the kept samples plus every x that was dropped.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    pub samples: Vec<Sample>,
    pub issues: Vec<PlotIssue>,
}

/// Evaluates a function at evenly spaced x positions.
pub struct Sampler;

impl Sampler {
    /// `count` candidate x values from `domain.min` to `domain.max` inclusive,
    /// with `count` clamped into `[2, MAX_SAMPLE_COUNT]`.
    /// Non-finite results are dropped and the survivors re-indexed `0..n`.
    pub fn sample(
        function: &dyn PlotFunction,
        domain: DisplayRange,
        count: usize,
        params: &ParamValues,
    ) -> SampleSet {
        let count = Self::clamp_count(count);
        let xs = Self::sample_positions(domain, count);
        let ys = Self::evaluate_all(function, &xs, params);

        let mut set = SampleSet { samples: Vec::with_capacity(count), issues: Vec::new() };
        for (x, y) in xs.into_iter().zip(ys) {
            if y.is_finite() {
                let index = set.samples.len();
                set.samples.push(Sample::new(x, y, index));
            } else {
                set.issues.push(PlotIssue::NonFiniteSample { x });
            }
        }

        if !set.issues.is_empty() {
            log_debug!(
                LogComponent::Domain("Sampler"),
                "{}: dropped {} of {} samples",
                function.id(),
                set.issues.len(),
                count
            );
        }
        set
    }

    /// `x_i = min + i * (max - min) / (count - 1)`.
    pub fn sample_positions(domain: DisplayRange, count: usize) -> Vec<f64> {
        let count = Self::clamp_count(count);
        let step = domain.width() / (count - 1) as f64;
        (0..count).map(|i| domain.min + i as f64 * step).collect()
    }

    pub fn clamp_count(count: usize) -> usize {
        count.clamp(2, MAX_SAMPLE_COUNT)
    }

    /// Dense mode count for a domain axis of `axis_length_px` pixels.
    pub fn dense_sample_count(axis_length_px: f64) -> usize {
        let per_pixel = (axis_length_px.max(0.0) * DENSE_SAMPLES_PER_PIXEL).ceil() as usize;
        per_pixel.clamp(DENSE_MIN_SAMPLES, MAX_SAMPLE_COUNT)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(function: &dyn PlotFunction, xs: &[f64], params: &ParamValues) -> Vec<f64> {
        xs.iter().map(|&x| function.evaluate(x, params)).collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(function: &dyn PlotFunction, xs: &[f64], params: &ParamValues) -> Vec<f64> {
        if xs.len() < PARALLEL_THRESHOLD {
            return xs.iter().map(|&x| function.evaluate(x, params)).collect();
        }
        xs.par_iter().map(|&x| function.evaluate(x, params)).collect()
    }
}

/// Derives the value axis range from a filtered sample set.
pub struct RangeFitter;

impl RangeFitter {
    pub fn fit(samples: &[Sample], domain: DisplayRange, policy: FitPolicy) -> DisplayRange {
        match policy {
            FitPolicy::DomainMatched => domain,
            FitPolicy::AutoFitSymmetric => {
                let Some(max_abs) = Self::max_abs(samples) else {
                    return domain;
                };
                DisplayRange::new(-max_abs, max_abs)
            }
        }
    }

    /// `max(|min y|, |max y|)`, or `None` without samples.
    fn max_abs(samples: &[Sample]) -> Option<f64> {
        let (min, max) = samples.iter().fold(None, |acc: Option<(f64, f64)>, s| match acc {
            None => Some((s.y, s.y)),
            Some((lo, hi)) => Some((lo.min(s.y), hi.max(s.y))),
        })?;
        Some(min.abs().max(max.abs()))
    }
}

/// Tags samples that fall outside the fitted value range.
pub struct Classifier;

impl Classifier {
    /// Boundary values count as in range.
    pub fn classify(sample: &Sample, range: DisplayRange) -> bool {
        sample.y < range.min || sample.y > range.max
    }

    /// Rewrites `out_of_range` on every sample against `range`.
    pub fn classify_all(samples: &mut [Sample], range: DisplayRange) -> usize {
        let mut outside = 0;
        for sample in samples.iter_mut() {
            sample.out_of_range = Self::classify(sample, range);
            outside += usize::from(sample.out_of_range);
        }
        outside
    }
}
