//! Declared structure of a weather history table.

mod column;
mod table;
mod types;

pub use column::ColumnSpec;
pub use table::{WeatherSchema, columns};
pub use types::ColumnType;
