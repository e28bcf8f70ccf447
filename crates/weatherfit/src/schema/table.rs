//! Table-level schema definition.

use serde::{Deserialize, Serialize};

use super::column::ColumnSpec;

/// Column names of the weather history export.
pub mod columns {
    pub const TEMPERATURE: &str = "Temperature (C)";
    pub const PRECIP_TYPE: &str = "Precip Type";
    pub const APPARENT_TEMPERATURE: &str = "Apparent Temperature (C)";
    pub const HUMIDITY: &str = "Humidity";
    pub const WIND_SPEED: &str = "Wind Speed (km/h)";
    pub const VISIBILITY: &str = "Visibility (km)";
    pub const PRESSURE: &str = "Pressure (millibars)";
    /// Cover indicator; constant in the export and never used.
    pub const LOUD_COVER: &str = "Loud Cover";
    /// Free-text daily summary.
    pub const DAILY_SUMMARY: &str = "Daily Summary";
}

/// Expected columns of the input table, plus the columns to discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSchema {
    /// Columns retained by cleaning, in output order.
    pub columns: Vec<ColumnSpec>,
    /// Irrelevant columns removed during cleaning.
    #[serde(default)]
    pub dropped: Vec<String>,
}

impl WeatherSchema {
    /// Create a schema from explicit column declarations.
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            dropped: Vec::new(),
        }
    }

    /// The weather history layout: temperature, precipitation type and the
    /// five auxiliary measurements.
    ///
    /// Pressure is declared as text because spreadsheet exports deliver it
    /// with mixed formatting; the feature extractor coerces it.
    pub fn weather_history() -> Self {
        Self {
            columns: vec![
                ColumnSpec::numeric(columns::TEMPERATURE),
                ColumnSpec::categorical(columns::PRECIP_TYPE),
                ColumnSpec::numeric(columns::APPARENT_TEMPERATURE),
                ColumnSpec::numeric(columns::HUMIDITY),
                ColumnSpec::numeric(columns::WIND_SPEED),
                ColumnSpec::numeric(columns::VISIBILITY),
                ColumnSpec::text(columns::PRESSURE),
            ],
            dropped: vec![
                columns::LOUD_COVER.to_string(),
                columns::DAILY_SUMMARY.to_string(),
            ],
        }
    }

    /// Add a column declaration.
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.retain(|c| c.name != column.name);
        self.columns.push(column);
        self
    }

    /// Add an optional timestamp column under the caller's chosen name.
    pub fn with_timestamp(self, name: impl Into<String>) -> Self {
        self.with_column(ColumnSpec::timestamp(name).optional())
    }

    /// Add a column to discard.
    pub fn with_dropped(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.dropped.contains(&name) {
            self.dropped.push(name);
        }
        self
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a column is in the discard set.
    pub fn is_dropped(&self, name: &str) -> bool {
        self.dropped.iter().any(|d| d == name)
    }

    /// Columns that survive cleaning.
    pub fn retained(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| !self.is_dropped(&c.name))
    }

    /// Get all retained column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.retained().map(|c| c.name.as_str()).collect()
    }
}

impl Default for WeatherSchema {
    fn default() -> Self {
        Self::weather_history()
    }
}
