//! Expense record types shared by the importer and the gateway client

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::format_decimal_2dp;

/// A single line item of an expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseItem {
    pub name: String,
    /// Canonical decimal string, 2 fraction digits
    pub price: String,
    /// Positive integer string
    pub quantity: String,
}

/// An expense that has not been submitted yet.
///
/// Serializes to the create-expense payload: `date` as `YYYY-MM-DD`, money as
/// canonical decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub vendor: String,
    /// Canonical decimal string, 2 fraction digits
    pub total: String,
    /// Never empty
    pub items: Vec<ExpenseItem>,
}

impl ExpenseDraft {
    /// Build a draft from one statement row. The category becomes the name of
    /// the single synthetic item, which mirrors the total.
    pub fn from_statement_row(
        date: NaiveDate,
        vendor: impl Into<String>,
        category: impl Into<String>,
        value: Decimal,
    ) -> Self {
        let amount = format_decimal_2dp(value);
        Self {
            date,
            vendor: vendor.into(),
            total: amount.clone(),
            items: vec![ExpenseItem {
                name: category.into(),
                price: amount,
                quantity: "1".to_string(),
            }],
        }
    }

    /// Name of the first item; for statement drafts this is the category.
    pub fn category(&self) -> &str {
        self.items.first().map(|i| i.name.as_str()).unwrap_or("")
    }
}

/// An expense as stored upstream.
///
/// `date` and `total` are kept as received; the gateway does not guarantee
/// their shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub receipt_id: String,
    pub date: String,
    pub vendor: String,
    pub total: String,
    #[serde(default)]
    pub items: Vec<ExpenseItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_path: Option<String>,
    #[serde(default)]
    pub processed_timestamp: String,
}
