//! Currency/number normalization between locale display strings ("1.234,56")
//! and canonical decimal strings ("1234.56").
//!
//! All arithmetic uses `rust_decimal`, so values are exact and finite. Rounding to
//! two fraction digits is always half away from zero (`2.345` -> `2.35`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Separators and currency symbol of a display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub decimal_separator: char,
    pub group_separator: char,
    pub currency_symbol: &'static str,
}

impl NumberLocale {
    /// Brazilian Portuguese, the locale the statements are exported in.
    pub const PT_BR: NumberLocale = NumberLocale {
        decimal_separator: ',',
        group_separator: '.',
        currency_symbol: "R$",
    };

    /// Strip grouping separators and turn the decimal separator into `.`.
    /// Empty input yields `"0.00"`.
    pub fn to_canonical_decimal(&self, display: &str) -> String {
        let display = display.trim();
        if display.is_empty() {
            return "0.00".to_string();
        }
        let ungrouped: String = display.chars().filter(|c| *c != self.group_separator).collect();
        ungrouped.replacen(self.decimal_separator, ".", 1)
    }

    /// Two fraction digits, no grouping, locale decimal separator.
    pub fn decimal_to_display(&self, value: Decimal) -> String {
        let canonical = format_decimal_2dp(value);
        canonical.replace('.', &self.decimal_separator.to_string())
    }

    /// Display string for a canonical decimal; `""` if it does not parse.
    pub fn to_display_string(&self, canonical: &str) -> String {
        match parse_canonical(canonical) {
            Some(value) => self.decimal_to_display(value),
            None => String::new(),
        }
    }

    /// Currency display: symbol, grouping and two fraction digits.
    pub fn decimal_to_currency(&self, value: Decimal) -> String {
        let canonical = format_decimal_2dp(value);
        let (negative, unsigned) = match canonical.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, canonical.as_str()),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(ch);
        }

        format!(
            "{}{} {}{}{}",
            if negative { "-" } else { "" },
            self.currency_symbol,
            grouped,
            self.decimal_separator,
            frac_part
        )
    }

    /// Currency display for a canonical decimal string. Invalid or empty input
    /// renders as zero.
    pub fn to_locale_currency(&self, canonical: &str) -> String {
        self.decimal_to_currency(parse_canonical(canonical).unwrap_or(Decimal::ZERO))
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}

/// Parse a canonical decimal (`.` separator, optional sign, optional exponent).
pub fn parse_canonical(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Round half away from zero to two fraction digits and render canonically.
///
/// `None` when the value has too many integer digits to carry two fraction
/// digits in a `Decimal` (28 significant digits and up).
pub fn try_format_decimal_2dp(value: Decimal) -> Option<String> {
    let mut scaled = round_2dp(value);
    scaled.rescale(2);
    (scaled.scale() == 2).then(|| scaled.to_string())
}

/// Infallible [`try_format_decimal_2dp`] for display. Values too large for two
/// fraction digits are rendered rounded, at whatever scale they keep.
pub fn format_decimal_2dp(value: Decimal) -> String {
    try_format_decimal_2dp(value).unwrap_or_else(|| round_2dp(value).to_string())
}

/// See [`NumberLocale::to_canonical_decimal`]; uses pt-BR.
pub fn to_canonical_decimal(display: &str) -> String {
    NumberLocale::PT_BR.to_canonical_decimal(display)
}

/// See [`NumberLocale::to_display_string`]; uses pt-BR.
pub fn to_display_string(canonical: &str) -> String {
    NumberLocale::PT_BR.to_display_string(canonical)
}

/// See [`NumberLocale::decimal_to_display`]; uses pt-BR.
pub fn decimal_to_display(value: Decimal) -> String {
    NumberLocale::PT_BR.decimal_to_display(value)
}

/// See [`NumberLocale::to_locale_currency`]; uses pt-BR.
pub fn to_locale_currency(canonical: &str) -> String {
    NumberLocale::PT_BR.to_locale_currency(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_canonical_decimal() {
        assert_eq!(to_canonical_decimal("1.234,56"), "1234.56");
        assert_eq!(to_canonical_decimal("150,00"), "150.00");
        assert_eq!(to_canonical_decimal("1.000.000"), "1000000");
        assert_eq!(to_canonical_decimal(""), "0.00");
        assert_eq!(to_canonical_decimal("   "), "0.00");
        // Garbage passes through; the caller decides what it parses to.
        assert_eq!(to_canonical_decimal("abc"), "abc");
    }

    #[test]
    fn test_to_display_string() {
        assert_eq!(to_display_string("1234.5"), "1234,50");
        assert_eq!(to_display_string("0"), "0,00");
        assert_eq!(to_display_string("12.345"), "12,35");
        assert_eq!(to_display_string(""), "");
        assert_eq!(to_display_string("not a number"), "");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(format_decimal_2dp(Decimal::new(2345, 3)), "2.35");
        assert_eq!(format_decimal_2dp(Decimal::new(2355, 3)), "2.36");
        assert_eq!(format_decimal_2dp(Decimal::new(-2345, 3)), "-2.35");
        assert_eq!(format_decimal_2dp(Decimal::new(-1, 3)), "0.00");
    }

    #[test]
    fn test_two_fraction_digits_need_headroom() {
        let huge = Decimal::from_str("9999999999999999999999999999").unwrap();
        assert_eq!(try_format_decimal_2dp(huge), None);
        assert_eq!(format_decimal_2dp(huge), "9999999999999999999999999999");

        let widest = Decimal::from_str("99999999999999999999999999.99").unwrap();
        assert_eq!(try_format_decimal_2dp(widest).as_deref(), Some("99999999999999999999999999.99"));
        assert_eq!(try_format_decimal_2dp(Decimal::new(15, 0)).as_deref(), Some("15.00"));
    }

    #[test]
    fn test_to_locale_currency() {
        assert_eq!(to_locale_currency("1234.56"), "R$ 1.234,56");
        assert_eq!(to_locale_currency("1234567.8"), "R$ 1.234.567,80");
        assert_eq!(to_locale_currency("999"), "R$ 999,00");
        assert_eq!(to_locale_currency("-50"), "-R$ 50,00");
        assert_eq!(to_locale_currency(""), "R$ 0,00");
        assert_eq!(to_locale_currency("oops"), "R$ 0,00");
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["0", "0.5", "1.01", "150.00", "1234.56", "99999.99", "7"] {
            let original = parse_canonical(raw).unwrap();
            let back = parse_canonical(&to_canonical_decimal(&to_display_string(raw))).unwrap();
            assert_eq!(back, original, "round trip of {raw}");
        }
    }
}
