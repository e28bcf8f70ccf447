//! Row-wise cleaning of raw weather rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::coerce::{Rejection, coerce};
use super::table::{Categories, CellValue, CleanedTable};
use crate::error::{Result, WeatherfitError};
use crate::input::{RawRow, RawValue};
use crate::schema::{ColumnSpec, ColumnType, WeatherSchema};

/// What cleaning did to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows received.
    pub rows_in: usize,
    /// Rows that passed every check.
    pub rows_kept: usize,
    /// Rows that failed at least one check.
    pub rows_dropped: usize,
    /// Per column, rows with a missing value there.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub missing_by_column: IndexMap<String, usize>,
    /// Per column, rows whose value failed type coercion.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub invalid_by_column: IndexMap<String, usize>,
    /// Irrelevant columns that were present and removed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_columns: Vec<String>,
}

/// Turns raw rows into a [`CleanedTable`] according to a [`WeatherSchema`].
///
/// Irrelevant columns are removed first, then every row with a missing or
/// uncoercible value in a retained column is dropped. The input is never
/// modified.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    schema: WeatherSchema,
}

impl Cleaner {
    /// Create a cleaner for the given schema.
    pub fn new(schema: WeatherSchema) -> Self {
        Self { schema }
    }

    /// The schema this cleaner enforces.
    pub fn schema(&self) -> &WeatherSchema {
        &self.schema
    }

    /// Clean rows, discarding the report.
    pub fn clean(&self, rows: &[RawRow]) -> Result<CleanedTable> {
        self.clean_with_report(rows).map(|(table, _)| table)
    }

    /// Clean rows and describe what was dropped.
    pub fn clean_with_report(&self, rows: &[RawRow]) -> Result<(CleanedTable, CleaningReport)> {
        let columns = self.resolve_columns(rows)?;

        let mut report = CleaningReport {
            rows_in: rows.len(),
            removed_columns: self
                .schema
                .dropped
                .iter()
                .filter(|name| rows.iter().any(|r| r.contains(name)))
                .cloned()
                .collect(),
            ..CleaningReport::default()
        };

        let mut kept: Vec<Vec<CellValue>> = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(columns.len());
            let mut rejected = false;

            for spec in &columns {
                let value = row.get(&spec.name).unwrap_or(&RawValue::Empty);
                match coerce(value, spec.column_type) {
                    Ok(cell) => cells.push(cell),
                    Err(rejection) => {
                        rejected = true;
                        let counts = match rejection {
                            Rejection::Missing => &mut report.missing_by_column,
                            Rejection::Uncoercible => &mut report.invalid_by_column,
                        };
                        *counts.entry(spec.name.clone()).or_insert(0) += 1;
                    }
                }
            }

            if !rejected {
                kept.push(cells);
            }
        }

        let categories = intern_categories(&columns, &mut kept);

        report.rows_kept = kept.len();
        report.rows_dropped = report.rows_in - report.rows_kept;

        tracing::debug!(
            rows_in = report.rows_in,
            rows_kept = report.rows_kept,
            missing = ?report.missing_by_column,
            invalid = ?report.invalid_by_column,
            "cleaned rows"
        );

        Ok((CleanedTable::new(columns, categories, kept), report))
    }

    /// Retained columns present in the input, failing on absent required ones.
    ///
    /// A column counts as present when any row carries it; with no rows at
    /// all there is nothing to check and only required columns are kept.
    fn resolve_columns(&self, rows: &[RawRow]) -> Result<Vec<ColumnSpec>> {
        let mut columns = Vec::new();
        for spec in self.schema.retained() {
            let present = rows.is_empty() || rows.iter().any(|r| r.contains(&spec.name));
            if present && (spec.required || !rows.is_empty()) {
                columns.push(spec.clone());
            } else if spec.required {
                return Err(WeatherfitError::missing_column(&spec.name, "cleaning"));
            }
        }
        Ok(columns)
    }
}

/// Replace categorical labels with codes, learning levels from kept rows only.
fn intern_categories(
    columns: &[ColumnSpec],
    rows: &mut [Vec<CellValue>],
) -> IndexMap<String, Categories> {
    let mut all = IndexMap::new();
    for (index, spec) in columns.iter().enumerate() {
        if spec.column_type != ColumnType::Categorical {
            continue;
        }
        let mut categories = Categories::default();
        for row in rows.iter_mut() {
            if let CellValue::Text(label) = &row[index] {
                let code = categories.intern(label);
                row[index] = CellValue::Category(code);
            }
        }
        all.insert(spec.name.clone(), categories);
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns;

    fn weather_row(humidity: impl Into<RawValue>, precip: &str) -> RawRow {
        RawRow::new()
            .with(columns::PRECIP_TYPE, precip)
            .with(columns::TEMPERATURE, 9.47)
            .with(columns::APPARENT_TEMPERATURE, 7.39)
            .with(columns::HUMIDITY, humidity)
            .with(columns::WIND_SPEED, 14.12)
            .with(columns::VISIBILITY, 15.83)
            .with(columns::LOUD_COVER, 0.0)
            .with(columns::PRESSURE, 1015.13)
            .with(columns::DAILY_SUMMARY, "Partly cloudy throughout the day.")
    }

    #[test]
    fn test_drops_irrelevant_columns() {
        let rows = vec![weather_row(0.89, "rain")];
        let (table, report) = Cleaner::default().clean_with_report(&rows).unwrap();

        assert_eq!(table.row_count(), 1);
        assert!(table.column(columns::LOUD_COVER).is_none());
        assert!(table.column(columns::DAILY_SUMMARY).is_none());
        assert_eq!(report.removed_columns.len(), 2);
    }

    #[test]
    fn test_missing_humidity_drops_row() {
        let rows = vec![
            weather_row(0.89, "rain"),
            weather_row(RawValue::Empty, "rain"),
            weather_row(0.73, "snow"),
        ];
        let (table, report) = Cleaner::default().clean_with_report(&rows).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.missing_by_column.get(columns::HUMIDITY), Some(&1));
    }

    #[test]
    fn test_uncoercible_numeric_drops_row() {
        let rows = vec![weather_row("very damp", "rain"), weather_row(0.5, "rain")];
        let (table, report) = Cleaner::default().clean_with_report(&rows).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(report.invalid_by_column.get(columns::HUMIDITY), Some(&1));
    }

    #[test]
    fn test_missing_in_dropped_column_keeps_row() {
        let row = weather_row(0.89, "rain").with(columns::DAILY_SUMMARY, RawValue::Empty);
        let table = Cleaner::default().clean(&[row]).unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_categories_learned_from_kept_rows() {
        let rows = vec![
            weather_row(RawValue::Empty, "hail"),
            weather_row(0.7, "snow"),
            weather_row(0.8, "rain"),
            weather_row(0.9, "snow"),
        ];
        let table = Cleaner::default().clean(&rows).unwrap();
        let categories = table.categories(columns::PRECIP_TYPE).unwrap();

        let levels: Vec<&str> = categories.levels().collect();
        assert_eq!(levels, vec!["snow", "rain"]);
        assert_eq!(
            table.value(2, columns::PRECIP_TYPE),
            Some(&CellValue::Category(0))
        );
    }

    #[test]
    fn test_missing_required_column() {
        let rows: Vec<RawRow> = vec![
            weather_row(0.5, "rain")
                .iter()
                .filter(|(name, _)| *name != columns::WIND_SPEED)
                .map(|(name, value)| (name, value.clone()))
                .collect(),
        ];
        let err = Cleaner::default().clean(&rows).unwrap_err();
        match err {
            WeatherfitError::Schema { column, .. } => assert_eq!(column, columns::WIND_SPEED),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_timestamp() {
        let schema = WeatherSchema::default().with_timestamp("Datetime");
        let cleaner = Cleaner::new(schema);

        let without = cleaner.clean(&[weather_row(0.5, "rain")]).unwrap();
        assert!(without.column("Datetime").is_none());

        let rows = vec![
            weather_row(0.5, "rain").with("Datetime", "2006-04-01 00:00:00.000 +0200"),
            weather_row(0.5, "rain").with("Datetime", "not a date"),
        ];
        let (with, report) = cleaner.clean_with_report(&rows).unwrap();
        assert_eq!(with.row_count(), 1);
        assert!(matches!(
            with.value(0, "Datetime"),
            Some(CellValue::Timestamp(_))
        ));
        assert_eq!(report.invalid_by_column.get("Datetime"), Some(&1));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let rows = vec![
            weather_row(0.89, "rain"),
            weather_row("NA", "snow"),
            weather_row(0.61, " snow "),
        ];
        let cleaner = Cleaner::new(WeatherSchema::default().with_timestamp("Datetime"));
        let once = cleaner.clean(&rows).unwrap();
        let twice = cleaner.clean(&once.to_raw_rows()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_not_mutated() {
        let rows = vec![weather_row(RawValue::Empty, "rain")];
        let before = rows.clone();
        let _ = Cleaner::default().clean(&rows).unwrap();
        assert_eq!(rows, before);
    }

    #[test]
    fn test_empty_input() {
        let table = Cleaner::default().clean(&[]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 7);
    }
}
