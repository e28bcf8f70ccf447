//! Input parsing and raw row handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{RawRow, RawTable, RawValue, SourceMetadata, is_null_value};
