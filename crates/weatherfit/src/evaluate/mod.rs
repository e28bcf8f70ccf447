//! Fit-quality metrics for held-out predictions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherfitError};

/// Coefficient of determination, or a marker that it is undefined because
/// every actual value is identical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RSquared {
    Value(f64),
    Undefined,
}

impl RSquared {
    pub fn value(&self) -> Option<f64> {
        match self {
            RSquared::Value(v) => Some(*v),
            RSquared::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RSquared::Value(_))
    }
}

impl fmt::Display for RSquared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RSquared::Value(v) => write!(f, "{:.4}", v),
            RSquared::Undefined => f.write_str("undefined"),
        }
    }
}

/// Error and goodness-of-fit on the test subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    pub r_squared: RSquared,
    /// Number of (predicted, actual) pairs.
    pub count: usize,
}

/// Compare predictions with actual targets.
pub fn evaluate(predicted: &[f64], actual: &[f64]) -> Result<EvaluationMetrics> {
    if predicted.len() != actual.len() {
        return Err(WeatherfitError::DimensionMismatch {
            expected: actual.len(),
            actual: predicted.len(),
            context: "predicted vs actual values".to_string(),
        });
    }
    if actual.is_empty() {
        return Err(WeatherfitError::InsufficientData {
            required: 1,
            actual: 0,
            context: "evaluation".to_string(),
        });
    }

    let n = actual.len() as f64;
    let mean_actual = actual.iter().sum::<f64>() / n;

    let residual_ss: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    let total_ss: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let abs_error: f64 = predicted.iter().zip(actual).map(|(p, a)| (a - p).abs()).sum();

    let mse = residual_ss / n;
    // Summing then dividing leaves residue in the mean, so test identity directly.
    let constant = actual.iter().all(|a| *a == actual[0]);
    let r_squared = if constant || total_ss == 0.0 {
        RSquared::Undefined
    } else {
        RSquared::Value(1.0 - residual_ss / total_ss)
    };

    Ok(EvaluationMetrics {
        mse,
        rmse: mse.sqrt(),
        mae: abs_error / n,
        r_squared,
        count: actual.len(),
    })
}
