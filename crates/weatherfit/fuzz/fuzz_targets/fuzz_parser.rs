//! Fuzz target for the data parser.
//!
//! This fuzzer tests that the CSV/TSV parser and the cleaner behind it:
//! 1. Never panic on malformed input
//! 2. Handle all delimiter combinations

#![no_main]

use libfuzzer_sys::fuzz_target;
use weatherfit::{Cleaner, Parser};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = Parser::new().parse_bytes(data) {
        let _ = Cleaner::default().clean(&table.rows);
    }
});
