//! gastos-core: expense types plus the number and date normalizers used by the importer

pub mod dates;
pub mod expense;
pub mod money;
pub mod monthly;
pub mod validate;

pub use dates::{format_display_date, parse_display_date, to_canonical_date};
pub use expense::{Expense, ExpenseDraft, ExpenseItem};
pub use money::{
    NumberLocale, decimal_to_display, format_decimal_2dp, parse_canonical, to_canonical_decimal,
    to_display_string, to_locale_currency, try_format_decimal_2dp,
};
pub use monthly::{MonthlyTotal, monthly_totals};
pub use validate::{DraftErrors, DraftProblem, validate_draft};
