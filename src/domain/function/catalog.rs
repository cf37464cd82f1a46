use super::{ParamSchema, ParamSpec, ParamValues, PlotFunction};
use crate::domain::plot::DisplayRange;
use once_cell::sync::Lazy;

type Evaluator = fn(f64, &ParamValues) -> f64;
type RangeHint = fn(f64, f64, &ParamValues) -> DisplayRange;

/// Table-driven function used for every built-in entry.
struct BuiltinFunction {
    id: &'static str,
    description: &'static str,
    params: &'static [(&'static str, ParamSpec)],
    evaluate: Evaluator,
    y_range: Option<RangeHint>,
}

impl PlotFunction for BuiltinFunction {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn params(&self) -> ParamSchema {
        self.params.iter().cloned().collect()
    }

    fn evaluate(&self, x: f64, params: &ParamValues) -> f64 {
        (self.evaluate)(x, params)
    }

    fn y_range(&self, x_min: f64, x_max: f64, params: &ParamValues) -> Option<DisplayRange> {
        self.y_range.map(|hint| hint(x_min, x_max, params))
    }
}

fn boxed(function: BuiltinFunction) -> Box<dyn PlotFunction> {
    Box::new(function)
}

fn param(params: &ParamValues, key: &str) -> f64 {
    params.get(key).unwrap_or(0.0)
}

const SLOPE: ParamSpec = ParamSpec::new("Slope a", -5.0, 5.0, 0.1, 1.0);
const OFFSET: ParamSpec = ParamSpec::new("Offset b", -5.0, 5.0, 0.1, 0.0);
const SCALE: ParamSpec = ParamSpec::new("Scale a", -3.0, 3.0, 0.1, 1.0);
const AMPLITUDE: ParamSpec = ParamSpec::new("Amplitude a", 0.0, 5.0, 0.1, 1.0);
const FREQUENCY: ParamSpec = ParamSpec::new("Frequency b", 0.1, 5.0, 0.1, 1.0);
const RATE: ParamSpec = ParamSpec::new("Rate b", -2.0, 2.0, 0.05, 0.5);
const CUBIC_SCALE: ParamSpec = ParamSpec::new("Scale a", -1.0, 1.0, 0.01, 0.1);

static BUILTINS: Lazy<FunctionCatalog> = Lazy::new(|| {
    FunctionCatalog::new(vec![
        boxed(BuiltinFunction {
            id: "linear",
            description: "f(x) = a·x + b",
            params: &[("a", SLOPE), ("b", OFFSET)],
            evaluate: |x, p| param(p, "a") * x + param(p, "b"),
            y_range: Some(|lo, hi, p| {
                let (a, b) = (param(p, "a"), param(p, "b"));
                DisplayRange::spanning(a * lo + b, a * hi + b)
            }),
        }),
        boxed(BuiltinFunction {
            id: "quadratic",
            description: "f(x) = a·x² + b",
            params: &[("a", SCALE), ("b", OFFSET)],
            evaluate: |x, p| param(p, "a") * x * x + param(p, "b"),
            y_range: None,
        }),
        boxed(BuiltinFunction {
            id: "cubic",
            description: "f(x) = a·x³ + b",
            params: &[("a", CUBIC_SCALE), ("b", OFFSET)],
            evaluate: |x, p| param(p, "a") * x.powi(3) + param(p, "b"),
            y_range: None,
        }),
        boxed(BuiltinFunction {
            id: "sine",
            description: "f(x) = a·sin(b·x)",
            params: &[("a", AMPLITUDE), ("b", FREQUENCY)],
            evaluate: |x, p| param(p, "a") * (param(p, "b") * x).sin(),
            y_range: Some(|_, _, p| {
                let a = param(p, "a").abs();
                DisplayRange::new(-a, a)
            }),
        }),
        boxed(BuiltinFunction {
            id: "reciprocal",
            description: "f(x) = a / x",
            params: &[("a", SCALE)],
            evaluate: |x, p| param(p, "a") / x,
            y_range: None,
        }),
        boxed(BuiltinFunction {
            id: "exponential",
            description: "f(x) = a·e^(b·x)",
            params: &[("a", SCALE), ("b", RATE)],
            evaluate: |x, p| param(p, "a") * (param(p, "b") * x).exp(),
            y_range: None,
        }),
        boxed(BuiltinFunction {
            id: "absolute",
            description: "f(x) = a·|x| + b",
            params: &[("a", SLOPE), ("b", OFFSET)],
            evaluate: |x, p| param(p, "a") * x.abs() + param(p, "b"),
            y_range: None,
        }),
        boxed(BuiltinFunction {
            id: "tangent",
            description: "f(x) = a·tan(x)",
            params: &[("a", AMPLITUDE)],
            evaluate: |x, p| param(p, "a") * x.tan(),
            y_range: None,
        }),
    ])
});

/// Lookup table from function id to evaluator.
pub struct FunctionCatalog {
    functions: Vec<Box<dyn PlotFunction>>,
}

impl FunctionCatalog {
    pub fn new(functions: Vec<Box<dyn PlotFunction>>) -> Self {
        Self { functions }
    }

    /// The process-wide built-in set.
    pub fn builtin() -> &'static FunctionCatalog {
        &BUILTINS
    }

    pub fn get(&self, id: &str) -> Option<&dyn PlotFunction> {
        self.functions.iter().find(|f| f.id() == id).map(|f| f.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.functions.iter().map(|f| f.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let ids = FunctionCatalog::builtin().ids();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
        assert!(ids.contains(&"linear"));
    }

    #[test]
    fn linear_defaults_to_identity() {
        let f = FunctionCatalog::builtin().get("linear").unwrap();
        let params = ParamValues::defaults(&f.params());
        assert_eq!(f.evaluate(2.5, &params), 2.5);
    }

    #[test]
    fn reciprocal_has_pole_at_zero() {
        let f = FunctionCatalog::builtin().get("reciprocal").unwrap();
        let params = ParamValues::defaults(&f.params());
        assert!(!f.evaluate(0.0, &params).is_finite());
    }

    #[test]
    fn sine_reports_amplitude_range() {
        let f = FunctionCatalog::builtin().get("sine").unwrap();
        let params = ParamValues::defaults(&f.params()).with("a", 2.0);
        assert_eq!(f.y_range(-1.0, 1.0, &params), Some(DisplayRange::new(-2.0, 2.0)));
    }
}
