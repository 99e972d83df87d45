use anyhow::bail;
use chrono::NaiveDate;
use gastos_core::{format_display_date, monthly_totals, to_locale_currency, Expense};
use gastos_ingest::{parse_statement_file, SkipReason, SkippedRow};
use gastos_sync::{submit_batch, ImportBatchResult, ImportSession};
use rust_decimal::Decimal;
use std::path::PathBuf;

fn statement_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("c6_statement.csv")
}

/// Real export: Windows-1252 accents, CRLF, payments, reversals and broken rows.
#[test]
fn test_parse_windows_1252_statement() {
    let parsed = parse_statement_file(statement_path(), 1).expect("fixture should parse");

    let vendors: Vec<_> = parsed.drafts.iter().map(|d| d.vendor.as_str()).collect();
    assert_eq!(
        vendors,
        vec!["PADARIA SÃO JOÃO", "MERCADO BOM PREÇO", "UBER *TRIP", "DROGARIA ARAÚJO"]
    );

    let first = &parsed.drafts[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    assert_eq!(first.category(), "Alimentação");
    assert_eq!(first.total, "23.90");
    assert_eq!(parsed.drafts[1].total, "1245.37");

    assert_eq!(
        parsed.skipped,
        vec![
            SkippedRow { line: 4, reason: SkipReason::PlaceholderCategory },
            SkippedRow { line: 7, reason: SkipReason::NonPositiveValue { raw: "-39,90".to_string() } },
            SkippedRow { line: 9, reason: SkipReason::TooFewColumns { found: 6 } },
            SkippedRow { line: 10, reason: SkipReason::InvalidDate { raw: "2024-05-15".to_string() } },
        ]
    );
}

/// Preview row rendering, the way the CLI table shows a draft.
#[test]
fn test_preview_formatting() {
    let parsed = parse_statement_file(statement_path(), 1).unwrap();
    let d = &parsed.drafts[1];
    assert_eq!(format_display_date(d.date), "03/05/2024");
    assert_eq!(to_locale_currency(&d.total), "R$ 1.245,37");
}

/// parse -> review -> submit (one failure) -> cleared session; then the
/// stored expenses aggregate to a single month.
#[tokio::test]
async fn test_session_submit_with_partial_failure() {
    let parsed = parse_statement_file(statement_path(), 1).unwrap();
    let session = ImportSession::new().load(parsed);
    let submission = session.begin_submit().expect("drafts to submit");

    let mut stored: Vec<Expense> = Vec::new();
    let mut attempts = 0;
    let report = submit_batch(submission.drafts(), |draft| {
        attempts += 1;
        let fail = draft.vendor.starts_with("UBER");
        if !fail {
            stored.push(Expense {
                receipt_id: format!("r{attempts}"),
                date: draft.date.to_string(),
                vendor: draft.vendor.clone(),
                total: draft.total.clone(),
                items: draft.items.clone(),
                s3_path: None,
                processed_timestamp: String::new(),
            });
        }
        async move {
            if fail {
                bail!("429 Too Many Requests");
            }
            Ok(())
        }
    })
    .await;

    assert_eq!(attempts, 4);
    assert_eq!(
        report.result,
        ImportBatchResult { attempted: 4, succeeded: 3, failed: 1 }
    );
    assert_eq!(report.failures[0].vendor, "UBER *TRIP");

    let session = submission.finish(report);
    assert!(session.drafts().is_empty());
    assert_eq!(session.report().unwrap().result.failed, 1);

    let months = monthly_totals(&stored);
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].label(), "May 2024");
    // 23.90 + 1245.37 + 89.00
    assert_eq!(months[0].total, Decimal::new(135827, 2));
}
