//! gastos-ingest: statement decoding, parsing and skip reporting.

pub mod decode;
pub mod error;
pub mod parsers;
pub mod types;

pub use decode::{decode_statement, read_statement_file};
pub use error::ImportError;
pub use parsers::c6_csv::{parse_statement, parse_statement_file, parse_statement_with_header_rows};
pub use types::{ParsedStatement, SkipReason, SkippedRow};
