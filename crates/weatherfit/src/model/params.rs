//! Fitted model parameters.

use serde::{Deserialize, Serialize};

/// Weights (one per feature) and intercept of a fitted linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl ModelParameters {
    /// Number of features the parameters expect.
    pub fn feature_count(&self) -> usize {
        self.weights.len()
    }

    /// `weights · features + intercept`.
    ///
    /// Extra features beyond the weight count are ignored; callers check
    /// lengths first.
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}
