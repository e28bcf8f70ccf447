//! Error types for the weatherfit library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for weatherfit operations.
#[derive(Debug, Error)]
pub enum WeatherfitError {
    /// An expected column is absent from the input or the cleaned table.
    #[error("Schema error for column '{column}': {message}")]
    Schema { column: String, message: String },

    /// Two sequences that must line up have different lengths.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Too few rows to carry out an operation.
    #[error("Insufficient data for {context}: need at least {required} rows, got {actual}")]
    InsufficientData {
        required: usize,
        actual: usize,
        context: String,
    },

    /// Prediction requested before the model was fit.
    #[error("Model has not been fit")]
    ModelNotFit,

    /// Fit requested on a model that already holds parameters.
    #[error("Model is already fit; create a new model to refit")]
    ModelAlreadyFit,

    /// The least-squares solver failed to produce a solution.
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WeatherfitError {
    pub(crate) fn missing_column(column: impl Into<String>, stage: &str) -> Self {
        WeatherfitError::Schema {
            column: column.into(),
            message: format!("required column is absent ({})", stage),
        }
    }
}

/// Result type alias for weatherfit operations.
pub type Result<T> = std::result::Result<T, WeatherfitError>;
