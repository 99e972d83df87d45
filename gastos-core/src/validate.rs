//! Checks a hand-entered expense must pass before it is sent.
//!
//! Statement drafts are built from already-filtered rows and skip this; the
//! rules exist for `expenses add` and `expenses edit`, where every field is
//! typed by the user.

use std::fmt;

use thiserror::Error;

use crate::expense::ExpenseDraft;

pub const MIN_VENDOR_CHARS: usize = 2;

/// One rule a draft breaks. Item numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftProblem {
    #[error("vendor must be at least 2 characters")]
    VendorTooShort,

    #[error("total {raw:?} is not an amount like 12 or 12.50")]
    InvalidTotal { raw: String },

    #[error("at least one item is required")]
    NoItems,

    #[error("item {item}: name is required")]
    MissingItemName { item: usize },

    #[error("item {item}: price {raw:?} is not an amount like 12 or 12.50")]
    InvalidItemPrice { item: usize, raw: String },

    #[error("item {item}: quantity {raw:?} is not a positive whole number")]
    InvalidItemQuantity { item: usize, raw: String },
}

/// Every problem found in a draft, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftErrors(pub Vec<DraftProblem>);

impl fmt::Display for DraftErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, problem) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DraftErrors {}

/// Canonical amount: digits, optionally `.` and one or two more digits.
/// No sign, no grouping, no exponent.
pub fn is_canonical_amount(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    digits(int_part) && frac_part.is_none_or(|f| f.len() <= 2 && digits(f))
}

fn is_positive_count(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && s.bytes().any(|b| b != b'0')
}

/// Check vendor, total and items. All problems are reported, not just the
/// first.
pub fn validate_draft(draft: &ExpenseDraft) -> Result<(), DraftErrors> {
    let mut problems = Vec::new();

    if draft.vendor.trim().chars().count() < MIN_VENDOR_CHARS {
        problems.push(DraftProblem::VendorTooShort);
    }
    if !is_canonical_amount(&draft.total) {
        problems.push(DraftProblem::InvalidTotal {
            raw: draft.total.clone(),
        });
    }
    if draft.items.is_empty() {
        problems.push(DraftProblem::NoItems);
    }

    for (idx, item) in draft.items.iter().enumerate() {
        let n = idx + 1;
        if item.name.trim().is_empty() {
            problems.push(DraftProblem::MissingItemName { item: n });
        }
        if !is_canonical_amount(&item.price) {
            problems.push(DraftProblem::InvalidItemPrice {
                item: n,
                raw: item.price.clone(),
            });
        }
        if !is_positive_count(&item.quantity) {
            problems.push(DraftProblem::InvalidItemQuantity {
                item: n,
                raw: item.quantity.clone(),
            });
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(DraftErrors(problems))
    }
}
