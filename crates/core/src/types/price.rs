//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept unrounded in [`Decimal`]; rounding to two places happens
//! only when a price is formatted for display.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::Language;

/// Narrow no-break space, as used by locale-aware number formatting.
const NBSP: char = '\u{a0}';

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from minor units (cents / öre).
    #[must_use]
    pub fn from_minor(minor: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(minor, 2), currency_code)
    }

    /// Amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        round_money(self.amount)
    }

    /// Format for display in the given page language.
    ///
    /// ```
    /// use ramstuga_core::{CurrencyCode, Language, Price};
    ///
    /// let price = Price::from_minor(123_450, CurrencyCode::EUR);
    /// assert_eq!(price.display(Language::En), "€1,234.50");
    /// assert_eq!(price.display(Language::Nl), "€\u{a0}1.234,50");
    /// ```
    #[must_use]
    pub fn display(&self, language: Language) -> String {
        let (group, decimal) = match language {
            Language::En => (',', '.'),
            Language::Nl => ('.', ','),
            Language::Sv => (NBSP, ','),
        };
        let number = group_digits(self.rounded(), group, decimal);
        let symbol = self.currency_code.symbol(language);

        match language {
            Language::Sv => format!("{number}{NBSP}{symbol}"),
            Language::En if self.currency_code == CurrencyCode::EUR => format!("{symbol}{number}"),
            Language::En | Language::Nl => format!("{symbol}{NBSP}{number}"),
        }
    }
}

/// Round a monetary amount to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_digits(amount: Decimal, group: char, decimal: char) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if amount.is_sign_negative() && !amount.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(digit);
    }
    grouped.push(decimal);
    grouped.push_str(frac_part);
    grouped
}

/// ISO 4217 currency codes the shop displays prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Catalog base currency.
    #[default]
    EUR,
    SEK,
}

impl CurrencyCode {
    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::SEK => "SEK",
        }
    }

    /// Parse an ISO code, case-insensitively.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EUR" => Some(Self::EUR),
            "SEK" => Some(Self::SEK),
            _ => None,
        }
    }

    /// Currency symbol as written in the given language.
    #[must_use]
    pub const fn symbol(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::EUR, _) => "€",
            (Self::SEK, Language::Sv) => "kr",
            (Self::SEK, Language::En | Language::Nl) => "SEK",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_swedish_kronor() {
        let price = Price::from_minor(56_350, CurrencyCode::SEK);
        assert_eq!(price.display(Language::Sv), "563,50\u{a0}kr");

        let price = Price::from_minor(123_456_789, CurrencyCode::SEK);
        assert_eq!(price.display(Language::Sv), "1\u{a0}234\u{a0}567,89\u{a0}kr");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        let price = Price::new(Decimal::new(1_005, 3), CurrencyCode::EUR);
        assert_eq!(price.display(Language::En), "€1.01");
    }

    #[test]
    fn test_display_small_amounts_have_no_separator() {
        let price = Price::from_minor(4_900, CurrencyCode::EUR);
        assert_eq!(price.display(Language::En), "€49.00");
        assert_eq!(price.display(Language::Nl), "€\u{a0}49,00");
        assert_eq!(Price::from_minor(0, CurrencyCode::EUR).display(Language::En), "€0.00");
    }

    #[test]
    fn test_display_negative() {
        let price = Price::from_minor(-150_000, CurrencyCode::EUR);
        assert_eq!(price.display(Language::En), "€-1,500.00");
    }

    #[test]
    fn test_currency_code_serde() {
        let json = serde_json::to_string(&CurrencyCode::SEK).unwrap_or_default();
        assert_eq!(json, "\"SEK\"");
        assert_eq!(CurrencyCode::from_code("eur"), Some(CurrencyCode::EUR));
        assert_eq!(CurrencyCode::from_code("USD"), None);
    }
}
