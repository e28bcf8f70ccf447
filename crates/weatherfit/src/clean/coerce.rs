//! Conversion of raw values to declared column types.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

use super::table::CellValue;
use crate::input::RawValue;
use crate::schema::ColumnType;

/// Why a raw value could not become a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Missing,
    Uncoercible,
}

/// Coerce a raw value to the declared type.
///
/// Categorical values come back as `CellValue::Text` holding the trimmed
/// label; the cleaner interns them once the surviving rows are known.
pub(crate) fn coerce(value: &RawValue, column_type: ColumnType) -> Result<CellValue, Rejection> {
    if value.is_missing() {
        return Err(Rejection::Missing);
    }

    match column_type {
        ColumnType::Numeric => value
            .as_number()
            .map(CellValue::Number)
            .ok_or(Rejection::Uncoercible),
        ColumnType::Categorical => Ok(CellValue::Text(value.to_string().trim().to_string())),
        ColumnType::Timestamp => match value {
            RawValue::Text(s) => parse_timestamp(s)
                .map(CellValue::Timestamp)
                .ok_or(Rejection::Uncoercible),
            _ => Err(Rejection::Uncoercible),
        },
        ColumnType::Text => match value {
            RawValue::Number(n) => Ok(CellValue::Number(*n)),
            RawValue::Text(s) => Ok(CellValue::Text(s.clone())),
            RawValue::Empty => Err(Rejection::Missing),
        },
    }
}

/// Parse the timestamp layouts found in weather history exports.
pub(crate) fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }
    // "2006-04-01 00:00:00.000 +0200"
    if let Ok(ts) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(ts);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(
            coerce(&RawValue::from(" 7.5 "), ColumnType::Numeric),
            Ok(CellValue::Number(7.5))
        );
        assert_eq!(
            coerce(&RawValue::from("windy"), ColumnType::Numeric),
            Err(Rejection::Uncoercible)
        );
        assert_eq!(
            coerce(&RawValue::Empty, ColumnType::Numeric),
            Err(Rejection::Missing)
        );
    }

    #[test]
    fn test_categorical_label_is_trimmed() {
        assert_eq!(
            coerce(&RawValue::from(" rain "), ColumnType::Categorical),
            Ok(CellValue::Text("rain".to_string()))
        );
        assert_eq!(
            coerce(&RawValue::from("null"), ColumnType::Categorical),
            Err(Rejection::Missing)
        );
    }

    #[test]
    fn test_text_keeps_numbers_as_numbers() {
        assert_eq!(
            coerce(&RawValue::Number(1012.5), ColumnType::Text),
            Ok(CellValue::Number(1012.5))
        );
        assert_eq!(
            coerce(&RawValue::from("1,012.5"), ColumnType::Text),
            Ok(CellValue::Text("1,012.5".to_string()))
        );
    }

    #[test]
    fn test_parse_export_timestamp() {
        let ts = parse_timestamp("2006-04-01 00:00:00.000 +0200").unwrap();
        assert_eq!(ts.year(), 2006);
        assert_eq!(ts.offset().local_minus_utc(), 7200);

        let ts = parse_timestamp("2016-09-09 23:00:00 +0200").unwrap();
        assert_eq!(ts.hour(), 23);
    }

    #[test]
    fn test_parse_other_timestamps() {
        assert!(parse_timestamp("2006-04-01T10:00:00+01:00").is_some());
        assert!(parse_timestamp("2006-04-01 10:00:00").is_some());
        assert!(parse_timestamp("2006-04-01").is_some());
        assert!(parse_timestamp("April 1st").is_none());
        assert!(parse_timestamp("2006-13-01").is_none());
    }

    #[test]
    fn test_rfc3339_roundtrip() {
        let ts = parse_timestamp("2006-04-01 00:00:00.000 +0200").unwrap();
        assert_eq!(parse_timestamp(&ts.to_rfc3339()), Some(ts));
    }
}
