//! Plain-text tables for the terminal

use gastos_core::{Expense, ExpenseDraft, MonthlyTotal, decimal_to_display, format_display_date, to_locale_currency};
use gastos_ingest::SkippedRow;
use gastos_sync::BatchReport;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Date, vendor, category and value of every draft.
pub fn render_drafts(drafts: &[ExpenseDraft]) -> String {
    let mut s = format!("{:<10}  {:<32}  {:<20}  {:>14}\n", "Date", "Vendor", "Category", "Value");
    for d in drafts {
        s.push_str(&format!(
            "{:<10}  {:<32}  {:<20}  {:>14}\n",
            format_display_date(d.date),
            truncate(&d.vendor, 32),
            truncate(d.category(), 20),
            to_locale_currency(&d.total)
        ));
    }
    s
}

pub fn render_skipped(skipped: &[SkippedRow]) -> String {
    let mut s = String::new();
    for row in skipped {
        s.push_str(&format!("line {:>4}: {}\n", row.line, row.reason));
    }
    s
}

pub fn render_report(report: &BatchReport) -> String {
    let r = report.result;
    let mut s = if r.failed > 0 {
        format!(
            "Partially complete: {} of {} expenses sent, {} failed.\n",
            r.succeeded, r.attempted, r.failed
        )
    } else {
        format!("Done: all {} expenses sent.\n", r.succeeded)
    };
    for f in &report.failures {
        s.push_str(&format!("  #{} {}: {}\n", f.index + 1, f.vendor, f.error));
    }
    s
}

pub fn render_expenses(expenses: &[Expense]) -> String {
    let mut s = format!("{:<10}  {:<32}  {:>14}\n", "Date", "Vendor", "Total");
    for e in expenses {
        s.push_str(&format!(
            "{:<10}  {:<32}  {:>14}\n",
            e.date,
            truncate(&e.vendor, 32),
            to_locale_currency(&e.total)
        ));
    }
    s
}

pub fn render_monthly(months: &[MonthlyTotal]) -> String {
    let mut s = String::new();
    for m in months {
        s.push_str(&format!("{:<9}  R$ {:>12}\n", m.label(), decimal_to_display(m.total)));
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gastos_ingest::SkipReason;
    use gastos_sync::{ImportBatchResult, SubmissionFailure};

    #[test]
    fn test_render_drafts() {
        let draft = ExpenseDraft::from_statement_row(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "LojaX",
            "Supermercado",
            rust_decimal::Decimal::new(123456, 2),
        );
        let out = render_drafts(&[draft]);
        let row = out.lines().nth(1).unwrap();
        assert!(row.starts_with("01/03/2024"));
        assert!(row.contains("LojaX"));
        assert!(row.contains("Supermercado"));
        assert!(row.ends_with("R$ 1.234,56"));
    }

    #[test]
    fn test_render_report() {
        let report = BatchReport {
            result: ImportBatchResult { attempted: 3, succeeded: 2, failed: 1 },
            failures: vec![SubmissionFailure {
                index: 1,
                vendor: "LojaY".to_string(),
                error: "gateway error: 500".to_string(),
            }],
        };
        let out = render_report(&report);
        assert!(out.starts_with("Partially complete: 2 of 3"));
        assert!(out.contains("#2 LojaY"));
    }

    #[test]
    fn test_render_skipped() {
        let out = render_skipped(&[SkippedRow { line: 7, reason: SkipReason::PlaceholderCategory }]);
        assert_eq!(out, "line    7: placeholder category \"-\"\n");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
