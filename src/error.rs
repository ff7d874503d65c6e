use std::path::PathBuf;

/// Exit code for bad flags or out-of-range form input.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when the model artifact cannot be loaded.
pub const EXIT_ARTIFACT: u8 = 3;
/// Exit code when a single valuation fails.
pub const EXIT_PREDICTION: u8 = 4;
/// Exit code for I/O and terminal failures.
pub const EXIT_IO: u8 = 5;

/// Binary-level error: a message plus the process exit code it maps to.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ValuationError> for AppError {
    fn from(err: ValuationError) -> Self {
        let exit_code = match &err {
            ValuationError::ArtifactUnavailable { .. } => EXIT_ARTIFACT,
            ValuationError::Prediction(_) => EXIT_PREDICTION,
            ValuationError::Form(_) => EXIT_USAGE,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::new(EXIT_USAGE, err.to_string())
    }
}

/// Top-level failure of a valuation request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ValuationError {
    /// The artifact bundle could not be loaded; no estimate can be produced.
    #[error("Model artifact unavailable at '{}': {reason}", .path.display())]
    ArtifactUnavailable { path: PathBuf, reason: String },

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl ValuationError {
    pub fn is_artifact_unavailable(&self) -> bool {
        matches!(self, ValuationError::ArtifactUnavailable { .. })
    }
}

/// Failure while assembling, scaling, or predicting a single feature row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("Input feature '{feature}' is not known to the model bundle")]
    UnknownFeature { feature: String },

    #[error("Feature '{feature}' is missing from the assembled row")]
    MissingFeature { feature: String },

    #[error("Feature '{feature}' has a non-finite value ({value})")]
    NonFiniteInput { feature: String, value: f64 },

    #[error("{stage} expected {expected} features, got {actual}")]
    Shape {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Scaling failed: {reason}")]
    Scaling { reason: String },

    #[error("Model rejected the row: {reason}")]
    Model { reason: String },

    #[error("Model produced a non-finite prediction ({value})")]
    NonFinite { value: f64 },
}

impl PredictionError {
    /// True for the errors raised when a feature name does not line up between
    /// the request and the bundle.
    pub fn is_missing_feature(&self) -> bool {
        matches!(
            self,
            PredictionError::UnknownFeature { .. } | PredictionError::MissingFeature { .. }
        )
    }
}

/// A form field outside its declared range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{label} must be between {min} and {max} (got {value})")]
    OutOfRange {
        label: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Reasons a deserialized bundle is rejected before use.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BundleError {
    #[error("bundle lists no features")]
    NoFeatures,

    #[error("feature '{0}' is listed more than once")]
    DuplicateFeature(String),

    #[error("no default value for feature '{0}'")]
    MissingDefault(String),

    #[error("default for feature '{0}' is not finite")]
    NonFiniteDefault(String),

    #[error("{component} is sized for {actual} features but the bundle lists {expected}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{component} is invalid: {reason}")]
    Invalid {
        component: &'static str,
        reason: String,
    },
}
