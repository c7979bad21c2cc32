//! Bubble detection error types.

use thiserror::Error;

/// Errors that can occur during bubble detection operations.
#[derive(Error, Debug)]
pub enum BubbleError {
    /// Too few valid observations for the requested operation.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The optimizer ran to completion without meeting the acceptance rule.
    #[error("Fit diverged with residual error {final_error}: {message}")]
    FitDivergence { final_error: f64, message: String },

    /// Invalid input value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Invalid analysis or optimizer configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BubbleError>;
