//! Projection of a cleaned table onto model features and target.

use serde::{Deserialize, Serialize};

use crate::clean::{CellValue, CleanedTable};
use crate::error::{Result, WeatherfitError};
use crate::schema::{ColumnSpec, columns};

/// Ordered predictor columns and the target column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub features: Vec<String>,
    pub target: String,
}

impl FeatureSet {
    pub fn new(features: Vec<String>, target: impl Into<String>) -> Self {
        Self {
            features,
            target: target.into(),
        }
    }

    /// Apparent temperature, humidity, wind speed, visibility and pressure,
    /// predicting temperature.
    pub fn weather() -> Self {
        Self::new(
            [
                columns::APPARENT_TEMPERATURE,
                columns::HUMIDITY,
                columns::WIND_SPEED,
                columns::VISIBILITY,
                columns::PRESSURE,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            columns::TEMPERATURE,
        )
    }

    /// Number of predictors.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Check that the set names at least one feature, no duplicates, and a
    /// target distinct from the features.
    pub fn validate(&self) -> Result<()> {
        if self.features.is_empty() {
            return Err(WeatherfitError::Config(
                "feature set must name at least one feature".to_string(),
            ));
        }
        for (i, name) in self.features.iter().enumerate() {
            if self.features[..i].contains(name) {
                return Err(WeatherfitError::Config(format!(
                    "feature '{}' listed twice",
                    name
                )));
            }
        }
        if self.features.contains(&self.target) {
            return Err(WeatherfitError::Config(format!(
                "target '{}' is also listed as a feature",
                self.target
            )));
        }
        Ok(())
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::weather()
    }
}

/// Numeric predictors and target for one retained row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Index of the source row in the cleaned table.
    pub row: usize,
    /// Predictor values in feature-set order.
    pub features: Vec<f64>,
    pub target: f64,
}

impl FeatureVector {
    pub fn new(row: usize, features: Vec<f64>, target: f64) -> Self {
        Self {
            row,
            features,
            target,
        }
    }
}

/// Feature vectors together with the names they were extracted under.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub feature_set: FeatureSet,
    pub vectors: Vec<FeatureVector>,
    /// Rows whose features could not be read as numbers.
    pub dropped_rows: usize,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Targets in vector order.
    pub fn targets(&self) -> Vec<f64> {
        self.vectors.iter().map(|v| v.target).collect()
    }

    pub fn into_vectors(self) -> Vec<FeatureVector> {
        self.vectors
    }

    /// Render the vectors as an all-numeric cleaned table with the feature
    /// columns followed by the target column.
    pub fn to_table(&self) -> CleanedTable {
        let columns = self
            .feature_set
            .features
            .iter()
            .chain(std::iter::once(&self.feature_set.target))
            .map(|name| ColumnSpec::numeric(name.clone()))
            .collect();
        let rows = self
            .vectors
            .iter()
            .map(|v| {
                v.features
                    .iter()
                    .chain(std::iter::once(&v.target))
                    .map(|&x| CellValue::Number(x))
                    .collect()
            })
            .collect();
        CleanedTable::new(columns, Default::default(), rows)
    }
}

/// Selects the feature and target columns of a cleaned table.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    feature_set: FeatureSet,
}

impl FeatureExtractor {
    pub fn new(feature_set: FeatureSet) -> Self {
        Self { feature_set }
    }

    pub fn feature_set(&self) -> &FeatureSet {
        &self.feature_set
    }

    /// Extract one vector per row.
    ///
    /// Columns outside the feature set are ignored. Feature values held as
    /// text are coerced here; a row with any value that does not read as a
    /// finite number is dropped.
    pub fn extract(&self, table: &CleanedTable) -> Result<Extraction> {
        self.feature_set.validate()?;

        let indices = self
            .feature_set
            .features
            .iter()
            .chain(std::iter::once(&self.feature_set.target))
            .map(|name| {
                let spec = table
                    .column(name)
                    .ok_or_else(|| WeatherfitError::missing_column(name, "feature extraction"))?;
                if !spec.column_type.is_numeric_like() {
                    return Err(WeatherfitError::Schema {
                        column: name.clone(),
                        message: format!("{} column cannot be used as a number", spec.column_type),
                    });
                }
                Ok(table.column_index(name).unwrap_or_default())
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut vectors = Vec::with_capacity(table.row_count());
        let mut dropped_rows = 0;
        for (row_index, row) in table.rows().iter().enumerate() {
            let values: Option<Vec<f64>> = indices.iter().map(|&i| row[i].as_number()).collect();
            match values {
                Some(mut values) => {
                    let target = values.pop().unwrap_or_default();
                    vectors.push(FeatureVector::new(row_index, values, target));
                }
                None => dropped_rows += 1,
            }
        }

        tracing::debug!(
            rows = table.row_count(),
            extracted = vectors.len(),
            dropped = dropped_rows,
            "extracted feature vectors"
        );

        Ok(Extraction {
            feature_set: self.feature_set.clone(),
            vectors,
            dropped_rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::Cleaner;
    use crate::input::RawRow;

    fn row(pressure: &str, temperature: f64) -> RawRow {
        RawRow::new()
            .with(columns::TEMPERATURE, temperature)
            .with(columns::PRECIP_TYPE, "rain")
            .with(columns::APPARENT_TEMPERATURE, temperature - 2.0)
            .with(columns::HUMIDITY, 0.8)
            .with(columns::WIND_SPEED, 11.0)
            .with(columns::VISIBILITY, 10.0)
            .with(columns::PRESSURE, pressure)
    }

    fn cleaned(rows: &[RawRow]) -> CleanedTable {
        Cleaner::default().clean(rows).unwrap()
    }

    #[test]
    fn test_extracts_in_feature_order() {
        let table = cleaned(&[row("1015.5", 12.0)]);
        let extraction = FeatureExtractor::default().extract(&table).unwrap();

        assert_eq!(extraction.len(), 1);
        let v = &extraction.vectors[0];
        assert_eq!(v.features, vec![10.0, 0.8, 11.0, 10.0, 1015.5]);
        assert_eq!(v.target, 12.0);
        assert_eq!(v.row, 0);
    }

    #[test]
    fn test_text_pressure_that_fails_is_dropped() {
        let table = cleaned(&[row("1015.5", 12.0), row("pending", 13.0), row("1009", 14.0)]);
        assert_eq!(table.row_count(), 3);

        let extraction = FeatureExtractor::default().extract(&table).unwrap();
        assert_eq!(extraction.len(), 2);
        assert_eq!(extraction.dropped_rows, 1);
        assert_eq!(extraction.vectors[1].row, 2);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let table = cleaned(&[row("1015.5", 12.0), row("n/a?", 13.0), row(" 1009 ", 14.0)]);
        let extractor = FeatureExtractor::default();

        let first = extractor.extract(&table).unwrap();
        let second = extractor.extract(&first.to_table()).unwrap();

        let pairs = |e: &Extraction| -> Vec<(Vec<f64>, f64)> {
            e.vectors.iter().map(|v| (v.features.clone(), v.target)).collect()
        };
        assert_eq!(pairs(&first), pairs(&second));
        assert_eq!(second.dropped_rows, 0);
    }

    #[test]
    fn test_missing_feature_column() {
        let table = cleaned(&[row("1015.5", 12.0)]);
        let extractor = FeatureExtractor::new(FeatureSet::new(
            vec!["Dew Point (C)".to_string()],
            columns::TEMPERATURE,
        ));
        let err = extractor.extract(&table).unwrap_err();
        assert!(matches!(err, WeatherfitError::Schema { column, .. } if column == "Dew Point (C)"));
    }

    #[test]
    fn test_categorical_feature_rejected() {
        let table = cleaned(&[row("1015.5", 12.0)]);
        let extractor = FeatureExtractor::new(FeatureSet::new(
            vec![columns::PRECIP_TYPE.to_string()],
            columns::TEMPERATURE,
        ));
        assert!(matches!(
            extractor.extract(&table),
            Err(WeatherfitError::Schema { .. })
        ));
    }

    #[test]
    fn test_feature_set_validation() {
        assert!(FeatureSet::weather().validate().is_ok());
        assert!(FeatureSet::new(vec![], "t").validate().is_err());
        assert!(FeatureSet::new(vec!["a".into(), "a".into()], "t").validate().is_err());
        assert!(FeatureSet::new(vec!["t".into()], "t").validate().is_err());
    }
}
