//! Hand-entered expenses for `expenses add` / `expenses edit`

use anyhow::{Result, bail};
use clap::Args;
use gastos_core::{
    ExpenseDraft, ExpenseItem, format_decimal_2dp, parse_canonical, parse_display_date,
    to_canonical_decimal, validate_draft,
};

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// Purchase date, DD/MM/YYYY
    #[arg(long)]
    pub date: String,

    #[arg(long)]
    pub vendor: String,

    /// Total, pt-BR ("1.234,56") or plain ("1234.56")
    #[arg(long)]
    pub total: String,

    /// Line item, repeatable; quantity defaults to 1
    #[arg(long = "item", value_name = "NAME;PRICE[;QUANTITY]")]
    pub items: Vec<String>,
}

/// Amounts typed with a `,` are pt-BR; anything else is taken as canonical.
fn canonical_input(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains(',') {
        to_canonical_decimal(raw)
    } else {
        raw.to_string()
    }
}

fn parse_item(raw: &str) -> Result<ExpenseItem> {
    let mut parts = raw.splitn(3, ';');
    let (Some(name), Some(price)) = (parts.next(), parts.next()) else {
        bail!("item {raw:?}: expected NAME;PRICE[;QUANTITY]");
    };
    let quantity = parts.next().map(str::trim).unwrap_or("1");
    Ok(ExpenseItem {
        name: name.trim().to_string(),
        price: canonical_input(price),
        quantity: quantity.to_string(),
    })
}

/// Build and validate a draft. Amounts leave here with two fraction digits.
pub fn build_draft(args: &DraftArgs) -> Result<ExpenseDraft> {
    let Some(date) = parse_display_date(&args.date) else {
        bail!("invalid date {:?}: expected DD/MM/YYYY", args.date);
    };
    let items = args.items.iter().map(|raw| parse_item(raw)).collect::<Result<Vec<_>>>()?;

    let mut draft = ExpenseDraft {
        date,
        vendor: args.vendor.trim().to_string(),
        total: canonical_input(&args.total),
        items,
    };
    if let Err(problems) = validate_draft(&draft) {
        bail!("invalid expense: {problems}");
    }

    for amount in std::iter::once(&mut draft.total).chain(draft.items.iter_mut().map(|i| &mut i.price)) {
        if let Some(value) = parse_canonical(amount) {
            *amount = format_decimal_2dp(value);
        }
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args(date: &str, vendor: &str, total: &str, items: &[&str]) -> DraftArgs {
        DraftArgs {
            date: date.to_string(),
            vendor: vendor.to_string(),
            total: total.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_draft_normalizes_amounts() {
        let d = build_draft(&args("05/03/2024", " Padaria ", "1.234,5", &["Bolo;1.200,50;1", "Café;34"]))
            .unwrap();
        assert_eq!(d.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(d.vendor, "Padaria");
        assert_eq!(d.total, "1234.50");
        assert_eq!(d.items[0].price, "1200.50");
        assert_eq!(d.items[1].name, "Café");
        assert_eq!(d.items[1].price, "34.00");
        assert_eq!(d.items[1].quantity, "1");
    }

    #[test]
    fn test_build_draft_reports_validation_problems() {
        let err = build_draft(&args("05/03/2024", "P", "12,345", &[";1;0"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid expense: "), "{msg}");
        assert!(msg.contains("vendor must be at least 2 characters"), "{msg}");
        assert!(msg.contains("total \"12.345\""), "{msg}");
        assert!(msg.contains("item 1: name is required"), "{msg}");
        assert!(msg.contains("item 1: quantity \"0\""), "{msg}");
    }

    #[test]
    fn test_build_draft_requires_an_item() {
        let err = build_draft(&args("05/03/2024", "Mercado", "10", &[])).unwrap_err();
        assert!(err.to_string().contains("at least one item is required"));
    }

    #[test]
    fn test_build_draft_rejects_bad_date_and_item_syntax() {
        let err = build_draft(&args("2024-03-05", "Mercado", "10", &["x;10"])).unwrap_err();
        assert!(err.to_string().contains("expected DD/MM/YYYY"));
        let err = build_draft(&args("05/03/2024", "Mercado", "10", &["just a name"])).unwrap_err();
        assert!(err.to_string().contains("expected NAME;PRICE[;QUANTITY]"));
    }
}
