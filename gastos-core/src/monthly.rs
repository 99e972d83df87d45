//! Monthly spending totals over stored expenses

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::dates::parse_canonical_date;
use crate::expense::Expense;
use crate::money::parse_canonical;

/// Sum of expense totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

impl MonthlyTotal {
    /// Short label such as "Mar 2024"
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }
}

/// Group expenses by month, oldest month first.
///
/// Entries whose date or total does not parse are left out.
pub fn monthly_totals(expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

    for e in expenses {
        let Some(date) = parse_canonical_date(&e.date) else {
            warn!(receipt_id = %e.receipt_id, date = %e.date, "skipping expense with unparseable date");
            continue;
        };
        let total = if e.total.trim().is_empty() {
            Decimal::ZERO
        } else {
            match parse_canonical(&e.total) {
                Some(t) => t,
                None => {
                    warn!(receipt_id = %e.receipt_id, total = %e.total, "skipping expense with unparseable total");
                    continue;
                }
            }
        };
        *by_month.entry((date.year(), date.month())).or_default() += total;
    }

    by_month
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal {
            year,
            month,
            total: total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect()
}
