//! Error types for the complaint router.
//!
//! All fallible operations return [`RouterError`]. Training-time errors are
//! meant to reach the caller (startup code logs them); the inference path in
//! [`Engine::classify`](crate::engine::Engine::classify) never surfaces them
//! and falls back to the configured default category instead.
//!
//! # Examples
//!
//! ```
//! use complaint_router::error::{RouterError, Result};
//!
//! fn fit_nothing() -> Result<()> {
//!     Err(RouterError::data("training corpus is empty"))
//! }
//!
//! assert_eq!(
//!     fit_nothing().unwrap_err().to_string(),
//!     "Data error: training corpus is empty"
//! );
//! ```

use std::io;

use thiserror::Error;

/// The main error type for complaint router operations.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Empty or degenerate training data (no usable signal).
    #[error("Data error: {0}")]
    Data(String),

    /// The number of feature vectors and labels passed to a fit differ.
    #[error("Dimension mismatch: {features} feature vectors but {labels} labels")]
    DimensionMismatch { features: usize, labels: usize },

    /// A classifier needs at least two distinct categories.
    #[error("Insufficient data: need at least 2 distinct categories, got {classes}")]
    InsufficientData { classes: usize },

    /// Inference was requested before a successful training run.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Vocabulary and classifier do not belong to the same training run.
    #[error("Model mismatch: {0}")]
    ModelMismatch(String),

    /// Rejected configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors (corpus, config and snapshot files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with RouterError.
pub type Result<T> = std::result::Result<T, RouterError>;

impl RouterError {
    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        RouterError::Data(msg.into())
    }

    /// Create a new dimension mismatch error.
    pub fn dimension_mismatch(features: usize, labels: usize) -> Self {
        RouterError::DimensionMismatch { features, labels }
    }

    /// Create a new insufficient data error.
    pub fn insufficient_data(classes: usize) -> Self {
        RouterError::InsufficientData { classes }
    }

    /// Create a new model unavailable error.
    pub fn model_unavailable<S: Into<String>>(msg: S) -> Self {
        RouterError::ModelUnavailable(msg.into())
    }

    /// Create a new model mismatch error.
    pub fn model_mismatch<S: Into<String>>(msg: S) -> Self {
        RouterError::ModelMismatch(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        RouterError::InvalidConfig(msg.into())
    }

    /// Whether this error belongs to the training-data taxonomy.
    pub fn is_training_error(&self) -> bool {
        matches!(
            self,
            RouterError::Data(_)
                | RouterError::DimensionMismatch { .. }
                | RouterError::InsufficientData { .. }
        )
    }
}
