//! Fuzz target for the cleaner.
//!
//! Builds weather rows from arbitrary cells and checks that cleaning:
//! 1. Never panics
//! 2. Is idempotent
//! 3. Never keeps a missing value

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use weatherfit::schema::columns;
use weatherfit::{Cleaner, RawRow, RawValue};

#[derive(Debug, Arbitrary)]
enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl From<Cell> for RawValue {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Number(n) => RawValue::Number(n),
            Cell::Text(s) => RawValue::Text(s),
            Cell::Empty => RawValue::Empty,
        }
    }
}

const NAMES: [&str; 9] = [
    columns::TEMPERATURE,
    columns::PRECIP_TYPE,
    columns::APPARENT_TEMPERATURE,
    columns::HUMIDITY,
    columns::WIND_SPEED,
    columns::VISIBILITY,
    columns::LOUD_COVER,
    columns::PRESSURE,
    columns::DAILY_SUMMARY,
];

fuzz_target!(|rows: Vec<[Cell; 9]>| {
    if rows.len() > 1_000 {
        return;
    }

    let rows: Vec<RawRow> = rows
        .into_iter()
        .map(|cells| NAMES.iter().copied().zip(cells).collect())
        .collect();

    let cleaner = Cleaner::default();
    let Ok(once) = cleaner.clean(&rows) else {
        return;
    };
    let raw = once.to_raw_rows();
    for row in &raw {
        assert!(row.iter().all(|(_, value)| !value.is_missing()));
    }
    let twice = cleaner.clean(&raw).expect("cleaned rows must clean again");
    assert_eq!(once, twice);
});
