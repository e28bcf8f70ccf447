//! The linear regression model and its fit state.

use nalgebra::{DMatrix, DVector};

use super::ols::least_squares;
use super::params::ModelParameters;
use crate::error::{Result, WeatherfitError};
use crate::features::FeatureVector;

/// Lifecycle of a [`RegressionModel`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelState {
    #[default]
    Unfit,
    Fit(ModelParameters),
}

/// Ordinary-least-squares model predicting the target from feature vectors.
///
/// A model moves from [`ModelState::Unfit`] to [`ModelState::Fit`] exactly
/// once. Refitting requires a new instance.
#[derive(Debug, Clone, Default)]
pub struct RegressionModel {
    state: ModelState,
}

impl RegressionModel {
    /// Create an unfit model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_fit(&self) -> bool {
        matches!(self.state, ModelState::Fit(_))
    }

    /// Parameters of a fit model.
    pub fn parameters(&self) -> Option<&ModelParameters> {
        match &self.state {
            ModelState::Fit(params) => Some(params),
            ModelState::Unfit => None,
        }
    }

    /// Fit on the training vectors, returning the model in the fit state.
    pub fn fit(self, train: &[FeatureVector]) -> Result<Self> {
        if self.is_fit() {
            return Err(WeatherfitError::ModelAlreadyFit);
        }
        let first = train.first().ok_or_else(|| WeatherfitError::InsufficientData {
            required: 1,
            actual: 0,
            context: "model fit".to_string(),
        })?;
        let p = first.features.len();
        check_feature_counts(train, p, "training vectors")?;

        let x = DMatrix::from_fn(train.len(), p, |i, j| train[i].features[j]);
        let y = DVector::from_iterator(train.len(), train.iter().map(|v| v.target));
        let params = least_squares(&x, &y)?;

        tracing::debug!(
            rows = train.len(),
            weights = ?params.weights,
            intercept = params.intercept,
            "fit regression model"
        );

        Ok(Self {
            state: ModelState::Fit(params),
        })
    }

    /// Predict the target for each vector.
    pub fn predict(&self, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        let params = self.parameters().ok_or(WeatherfitError::ModelNotFit)?;
        check_feature_counts(vectors, params.feature_count(), "prediction vectors")?;
        Ok(vectors
            .iter()
            .map(|v| params.predict_one(&v.features))
            .collect())
    }
}

fn check_feature_counts(vectors: &[FeatureVector], expected: usize, context: &str) -> Result<()> {
    match vectors.iter().find(|v| v.features.len() != expected) {
        Some(v) => Err(WeatherfitError::DimensionMismatch {
            expected,
            actual: v.features.len(),
            context: context.to_string(),
        }),
        None => Ok(()),
    }
}
