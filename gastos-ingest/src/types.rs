use gastos_core::ExpenseDraft;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a statement row was left out of the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    TooFewColumns { found: usize },
    MissingVendor,
    MissingCategory,
    /// Category is the `-` placeholder used for payments and reversals
    PlaceholderCategory,
    InvalidValue { raw: String },
    NonPositiveValue { raw: String },
    InvalidDate { raw: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewColumns { found } => write!(f, "expected at least 9 columns, found {found}"),
            SkipReason::MissingVendor => write!(f, "empty vendor"),
            SkipReason::MissingCategory => write!(f, "empty category"),
            SkipReason::PlaceholderCategory => write!(f, "placeholder category \"-\""),
            SkipReason::InvalidValue { raw } => write!(f, "value {raw:?} is not a number"),
            SkipReason::NonPositiveValue { raw } => write!(f, "value {raw:?} is not positive"),
            SkipReason::InvalidDate { raw } => write!(f, "date {raw:?} is not DD/MM/YYYY"),
        }
    }
}

/// A row excluded from the import, with its 1-based line number in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Output of the statement parser: drafts in file order plus every skipped row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatement {
    pub drafts: Vec<ExpenseDraft>,
    pub skipped: Vec<SkippedRow>,
}

impl ParsedStatement {
    /// True when no row survived filtering. Not an error.
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }
}
