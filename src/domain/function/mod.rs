//! Function evaluators and their parameter schemas.
//!
//! The plotting core only sees [`PlotFunction`]; the built-in set lives in
//! [`catalog`].

pub mod catalog;

pub use catalog::FunctionCatalog;

use crate::domain::plot::DisplayRange;
use serde::Serialize;
use std::collections::BTreeMap;

/// Slider description for one function parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParamSpec {
    pub const fn new(label: &'static str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self { label, min, max, step, default }
    }
}

/// Ordered `key -> spec` mapping, serialized as-is for host widgets.
pub type ParamSchema = BTreeMap<&'static str, ParamSpec>;

/// Current parameter values keyed like the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ParamValues(BTreeMap<String, f64>);

impl ParamValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema defaults for every key.
    pub fn defaults(schema: &ParamSchema) -> Self {
        Self(schema.iter().map(|(key, spec)| (key.to_string(), spec.default)).collect())
    }

    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn set(&mut self, key: &str, value: f64) {
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Values for exactly the schema keys: missing or non-finite entries take
    /// the default, the rest are clamped into `[min, max]`. Unknown keys drop.
    pub fn resolve(&self, schema: &ParamSchema) -> Self {
        let resolved = schema
            .iter()
            .map(|(key, spec)| {
                let value = match self.get(key) {
                    Some(v) if v.is_finite() => v.clamp(spec.min, spec.max),
                    _ => spec.default,
                };
                (key.to_string(), value)
            })
            .collect();
        Self(resolved)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// A plottable function `f(x, params) -> y`.
pub trait PlotFunction: Send + Sync {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn params(&self) -> ParamSchema;
    fn evaluate(&self, x: f64, params: &ParamValues) -> f64;

    /// Analytic value range over `[x_min, x_max]`, when the function knows it.
    /// The core fitter does not rely on this.
    fn y_range(&self, _x_min: f64, _x_max: f64, _params: &ParamValues) -> Option<DisplayRange> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ParamSchema {
        let mut schema = ParamSchema::new();
        schema.insert("a", ParamSpec::new("Slope", -5.0, 5.0, 0.1, 1.0));
        schema.insert("b", ParamSpec::new("Offset", -5.0, 5.0, 0.1, 0.0));
        schema
    }

    #[test]
    fn resolve_fills_defaults_and_clamps() {
        let values = ParamValues::new().with("a", 12.0).with("zzz", 3.0);
        let resolved = values.resolve(&schema());
        assert_eq!(resolved.get("a"), Some(5.0));
        assert_eq!(resolved.get("b"), Some(0.0));
        assert_eq!(resolved.get("zzz"), None);
    }

    #[test]
    fn resolve_replaces_nan_with_default() {
        let values = ParamValues::new().with("b", f64::NAN);
        assert_eq!(values.resolve(&schema()).get("b"), Some(0.0));
    }
}
