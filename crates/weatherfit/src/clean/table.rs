//! The cleaned, typed table.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::input::{RawRow, RawValue};
use crate::schema::ColumnSpec;

/// A typed cell in a cleaned table. Never missing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    /// Code into the column's [`Categories`].
    Category(u32),
    Timestamp(DateTime<FixedOffset>),
    /// A value of ambiguous type, as read.
    Text(String),
}

impl CellValue {
    /// Numeric view of the cell, coercing text when it holds a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Category(_) | CellValue::Timestamp(_) => None,
        }
    }
}

/// Observed levels of a categorical column, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categories {
    levels: IndexSet<String>,
}

impl Categories {
    /// Return the code for a label, registering it if new.
    pub(crate) fn intern(&mut self, label: &str) -> u32 {
        let (index, _) = self.levels.insert_full(label.to_string());
        index as u32
    }

    /// Look up the label for a code.
    pub fn label(&self, code: u32) -> Option<&str> {
        self.levels.get_index(code as usize).map(|s| s.as_str())
    }

    /// Look up the code for a label.
    pub fn code(&self, label: &str) -> Option<u32> {
        self.levels.get_index_of(label).map(|i| i as u32)
    }

    /// All levels in code order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|s| s.as_str())
    }

    /// Number of distinct levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Rows that passed cleaning, conforming to a fixed, typed column set.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedTable {
    columns: Vec<ColumnSpec>,
    categories: IndexMap<String, Categories>,
    rows: Vec<Vec<CellValue>>,
}

impl CleanedTable {
    pub(crate) fn new(
        columns: Vec<ColumnSpec>,
        categories: IndexMap<String, Categories>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            columns,
            categories,
            rows,
        }
    }

    /// Column declarations in table order.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column declaration by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Observed levels of a categorical column.
    pub fn categories(&self, name: &str) -> Option<&Categories> {
        self.categories.get(name)
    }

    /// Rows as cell vectors aligned with [`columns`](Self::columns).
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a specific cell value.
    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Render the table back into raw rows.
    ///
    /// Categories become their labels and timestamps RFC 3339 text, so
    /// cleaning the result reproduces this table.
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(spec, cell)| (spec.name.clone(), self.render(&spec.name, cell)))
                    .collect()
            })
            .collect()
    }

    fn render(&self, column: &str, cell: &CellValue) -> RawValue {
        match cell {
            CellValue::Number(n) => RawValue::Number(*n),
            CellValue::Category(code) => self
                .categories
                .get(column)
                .and_then(|c| c.label(*code))
                .map(RawValue::from)
                .unwrap_or(RawValue::Empty),
            CellValue::Timestamp(ts) => RawValue::Text(ts.to_rfc3339()),
            CellValue::Text(s) => RawValue::Text(s.clone()),
        }
    }
}
