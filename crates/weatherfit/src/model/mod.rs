//! Linear regression model.

mod ols;
mod params;
mod regression;

pub use params::ModelParameters;
pub use regression::{ModelState, RegressionModel};
