//! Pipeline configuration and the end-to-end run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clean::{Cleaner, CleaningReport};
use crate::error::{Result, WeatherfitError};
use crate::evaluate::{EvaluationMetrics, evaluate};
use crate::features::{FeatureExtractor, FeatureSet};
use crate::input::RawRow;
use crate::model::{ModelParameters, RegressionModel};
use crate::schema::WeatherSchema;
use crate::split::{DEFAULT_SEED, DEFAULT_TRAIN_RATIO, split};

/// Configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Expected input columns and the columns to discard.
    pub schema: WeatherSchema,
    /// Predictors and target.
    pub features: FeatureSet,
    /// Fraction of rows used for training.
    pub split_ratio: f64,
    /// Seed for the train/test permutation.
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: WeatherSchema::default(),
            features: FeatureSet::default(),
            split_ratio: DEFAULT_TRAIN_RATIO,
            seed: DEFAULT_SEED,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; omitted fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| WeatherfitError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the schema.
    pub fn with_schema(mut self, schema: WeatherSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the feature set.
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    /// Set the training fraction.
    pub fn with_split_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
        self
    }

    /// Set the split seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check values that would otherwise only fail mid-run.
    pub fn validate(&self) -> Result<()> {
        if !self.split_ratio.is_finite() || self.split_ratio <= 0.0 || self.split_ratio >= 1.0 {
            return Err(WeatherfitError::Config(format!(
                "split ratio must be in (0, 1), got {}",
                self.split_ratio
            )));
        }
        self.features.validate()
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub cleaning: CleaningReport,
    /// Rows that became feature vectors.
    pub rows_extracted: usize,
    /// Cleaned rows dropped because a feature did not read as a number.
    pub rows_dropped_in_extraction: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub split_ratio: f64,
    pub seed: u64,
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub parameters: ModelParameters,
    pub metrics: EvaluationMetrics,
}

/// Clean, extract, split, fit and evaluate, in that order.
///
/// A run owns all of its intermediate data; the pipeline itself only holds
/// configuration and can be reused.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole pipeline over raw rows.
    pub fn run(&self, rows: &[RawRow]) -> Result<PipelineReport> {
        self.config.validate()?;

        let cleaner = Cleaner::new(self.config.schema.clone());
        let (table, cleaning) = cleaner.clean_with_report(rows)?;
        tracing::info!(
            rows_in = cleaning.rows_in,
            rows_kept = cleaning.rows_kept,
            "cleaning complete"
        );

        let extraction = FeatureExtractor::new(self.config.features.clone()).extract(&table)?;
        drop(table);
        tracing::info!(
            vectors = extraction.len(),
            dropped = extraction.dropped_rows,
            "feature extraction complete"
        );

        let split = split(&extraction.vectors, self.config.split_ratio, self.config.seed)?;
        let (train, test) = split.partition(&extraction.vectors);
        tracing::info!(
            train = train.len(),
            test = test.len(),
            seed = self.config.seed,
            "split complete"
        );

        let model = RegressionModel::new().fit(&train)?;
        let predicted = model.predict(&test)?;
        let actual: Vec<f64> = test.iter().map(|v| v.target).collect();
        let metrics = evaluate(&predicted, &actual)?;
        tracing::info!(
            mse = metrics.mse,
            r_squared = %metrics.r_squared,
            "evaluation complete"
        );

        let parameters = model
            .parameters()
            .cloned()
            .ok_or(WeatherfitError::ModelNotFit)?;

        Ok(PipelineReport {
            cleaning,
            rows_extracted: extraction.len(),
            rows_dropped_in_extraction: extraction.dropped_rows,
            train_size: train.len(),
            test_size: test.len(),
            split_ratio: self.config.split_ratio,
            seed: self.config.seed,
            feature_names: extraction.feature_set.features.clone(),
            target_name: extraction.feature_set.target.clone(),
            parameters,
            metrics,
        })
    }
}
