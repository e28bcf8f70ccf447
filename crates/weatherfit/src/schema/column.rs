//! Column declarations.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

fn default_required() -> bool {
    true
}

/// Declaration of a single expected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Exact column name in the source.
    pub name: String,
    /// Declared data type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether the column must be present in the input.
    #[serde(default = "default_required")]
    pub required: bool,
}

impl ColumnSpec {
    /// Declare a required column of the given type.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            required: true,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Numeric)
    }

    pub fn categorical(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Categorical)
    }

    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Timestamp)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Mark the column as optional: absent input is not an error.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}
