//! weatherfit: temperature regression over historical weather observations.
//!
//! Raw rows from a weather history table are cleaned against a declared
//! schema, projected onto numeric features, split into train and test sets
//! with a fixed seed, and used to fit an ordinary-least-squares model whose
//! held-out error is reported.
//!
//! # Core Principles
//!
//! - **Schema at the boundary**: columns are declared and typed once, at cleaning
//! - **Non-destructive**: input rows are never modified
//! - **Reproducible**: the same rows and seed always give the same split and model
//!
//! # Example
//!
//! ```no_run
//! use weatherfit::{Parser, Pipeline};
//!
//! let (table, _source) = Parser::new().parse_file("weatherHistory.csv").unwrap();
//! let report = Pipeline::new().run(&table.rows).unwrap();
//!
//! println!("MSE: {:.3}", report.metrics.mse);
//! println!("R²: {}", report.metrics.r_squared);
//! ```

pub mod clean;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod input;
pub mod model;
pub mod schema;
pub mod split;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineReport};
pub use clean::{CellValue, CleanedTable, Cleaner, CleaningReport};
pub use error::{Result, WeatherfitError};
pub use evaluate::{EvaluationMetrics, RSquared, evaluate};
pub use features::{Extraction, FeatureExtractor, FeatureSet, FeatureVector};
pub use input::{Parser, ParserConfig, RawRow, RawTable, RawValue, SourceMetadata};
pub use model::{ModelParameters, ModelState, RegressionModel};
pub use schema::{ColumnSpec, ColumnType, WeatherSchema};
pub use split::{Split, split};
