//! Error handling for the estimator

/// Estimator error type
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid pricing rules '{version}': {}", .errors.join("; "))]
    InvalidRules {
        version: String,
        errors: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, EstimateError>;
