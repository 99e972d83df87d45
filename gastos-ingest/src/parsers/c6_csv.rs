//! C6 card statement parser (semicolon CSV)
//!
//! Expected text after Windows-1252 decoding:
//!   Data de Compra;Nome no Cartão;Final do Cartão;Categoria;Descrição;Parcela;Valor (em US$);Cotação (em R$);Valor (em R$)
//!   01/03/2024;MARIA S;1234;Supermercado;LOJA X;Única;0;0;150,00
//!   05/03/2024;MARIA S;1234;-;Inclusao de Pagamento;Única;0;0;-1200,00
//!
//! Only four columns matter: purchase date (0), category (3), vendor (4) and
//! the BRL value (8). Payments and reversals are told apart by a `-` category
//! or a non-positive value and are dropped.

use std::path::Path;
use std::str::FromStr;

use gastos_core::{ExpenseDraft, parse_display_date, to_canonical_decimal, try_format_decimal_2dp};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::decode::read_statement_file;
use crate::error::Result;
use crate::types::{ParsedStatement, SkipReason, SkippedRow};

pub const MIN_COLUMNS: usize = 9;
pub const DEFAULT_HEADER_ROWS: usize = 1;

const DATE_COL: usize = 0;
const CATEGORY_COL: usize = 3;
const VENDOR_COL: usize = 4;
const VALUE_COL: usize = 8;

const PLACEHOLDER_CATEGORY: &str = "-";

/// Parse a statement value. Values with a `,` are pt-BR formatted
/// ("1.234,56"); anything else is read as a plain decimal ("1234.56").
/// Only digits, a sign, `.` and `,` are accepted.
pub fn parse_statement_value(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | ','))
    {
        return None;
    }
    if raw.contains(',') {
        Decimal::from_str(&to_canonical_decimal(raw)).ok()
    } else {
        Decimal::from_str(raw).ok()
    }
}

/// Parse decoded statement text, dropping a single header line.
pub fn parse_statement(text: &str) -> ParsedStatement {
    parse_statement_with_header_rows(text, DEFAULT_HEADER_ROWS)
}

/// Parse decoded statement text, dropping the first `header_rows` lines.
///
/// Never fails: rows that cannot become a draft are collected in
/// [`ParsedStatement::skipped`] and blank lines are ignored.
pub fn parse_statement_with_header_rows(text: &str, header_rows: usize) -> ParsedStatement {
    let mut out = ParsedStatement::default();

    for (idx, line) in text.lines().enumerate().skip(header_rows) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok(draft) => out.drafts.push(draft),
            Err(reason) => {
                match &reason {
                    SkipReason::TooFewColumns { .. } | SkipReason::InvalidDate { .. } => {
                        warn!(line = line_no, %reason, "skipping statement row")
                    }
                    _ => debug!(line = line_no, %reason, "skipping statement row"),
                }
                out.skipped.push(SkippedRow { line: line_no, reason });
            }
        }
    }

    if out.is_empty() {
        info!(skipped = out.skipped.len(), "statement contains no importable expenses");
    }

    out
}

/// Read, decode and parse a statement file.
pub fn parse_statement_file(path: impl AsRef<Path>, header_rows: usize) -> Result<ParsedStatement> {
    let text = read_statement_file(path)?;
    Ok(parse_statement_with_header_rows(&text, header_rows))
}

fn parse_row(line: &str) -> std::result::Result<ExpenseDraft, SkipReason> {
    let cols: Vec<&str> = line.split(';').collect();
    if cols.len() < MIN_COLUMNS {
        return Err(SkipReason::TooFewColumns { found: cols.len() });
    }

    let date_raw = cols[DATE_COL].trim();
    let category = cols[CATEGORY_COL].trim();
    let vendor = cols[VENDOR_COL].trim();
    let value_raw = cols[VALUE_COL].trim();

    if vendor.is_empty() {
        return Err(SkipReason::MissingVendor);
    }
    if category.is_empty() {
        return Err(SkipReason::MissingCategory);
    }
    if category == PLACEHOLDER_CATEGORY {
        return Err(SkipReason::PlaceholderCategory);
    }

    let value = parse_statement_value(value_raw)
        .filter(|v| try_format_decimal_2dp(*v).is_some())
        .ok_or_else(|| SkipReason::InvalidValue {
            raw: value_raw.to_string(),
        })?;
    if value <= Decimal::ZERO {
        return Err(SkipReason::NonPositiveValue {
            raw: value_raw.to_string(),
        });
    }

    let date = parse_display_date(date_raw).ok_or_else(|| SkipReason::InvalidDate {
        raw: date_raw.to_string(),
    })?;

    Ok(ExpenseDraft::from_statement_row(date, vendor, category, value))
}
