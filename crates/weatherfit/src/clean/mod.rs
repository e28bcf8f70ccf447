//! Cleaning: drop incomplete rows and irrelevant columns, coerce types.

mod cleaner;
mod coerce;
mod table;

pub use cleaner::{Cleaner, CleaningReport};
pub use table::{Categories, CellValue, CleanedTable};
