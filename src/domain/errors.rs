use derive_more::Display;

/// Failures that reach the API boundary. Everything recoverable is a
/// [`PlotIssue`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    ValidationError(String),
    RenderingError(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

pub type ValidationResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;

/// Which of the two parallel axes a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum AxisRole {
    #[display(fmt = "domain")]
    Domain,
    #[display(fmt = "value")]
    Value,
}

/// Conditions absorbed during a recompute. None of these stop rendering;
/// they are kept on the state for logging and inspection.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum PlotIssue {
    #[display(fmt = "evaluator returned a non-finite value at x={}", x)]
    NonFiniteSample { x: f64 },
    #[display(fmt = "{} range has zero width", axis)]
    DegenerateRange { axis: AxisRole },
    #[display(fmt = "no finite samples in domain")]
    EmptySampleSet,
}
