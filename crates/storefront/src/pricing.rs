//! Currency conversion, shipping and order totals.
//!
//! Catalog prices are in EUR. Swedish pages display SEK using a fixed,
//! configured exchange rate; there is no live rate lookup. Amounts are never
//! rounded while accumulating, only when formatted.

use core::fmt;
use core::str::FromStr;

use ramstuga_core::{CurrencyCode, Language, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::catalog::ItemKind;
use crate::i18n;
use crate::storage::{KeyValueStore, keys, soft_get, soft_set};

/// Fixed EUR/SEK exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    sek_per_eur: Decimal,
}

impl ExchangeRate {
    /// Default rate used when none is configured.
    pub const DEFAULT_SEK_PER_EUR: Decimal = Decimal::from_parts(115, 0, 0, false, 1);

    /// Create a rate. Returns `None` for zero or negative rates.
    #[must_use]
    pub fn new(sek_per_eur: Decimal) -> Option<Self> {
        (sek_per_eur > Decimal::ZERO).then_some(Self { sek_per_eur })
    }

    #[must_use]
    pub const fn sek_per_eur(&self) -> Decimal {
        self.sek_per_eur
    }

    /// Convert `amount` from one currency to another.
    ///
    /// An amount too large to convert becomes 0.
    #[must_use]
    pub fn convert(&self, amount: Decimal, from: CurrencyCode, to: CurrencyCode) -> Decimal {
        let converted = match (from, to) {
            (CurrencyCode::EUR, CurrencyCode::SEK) => amount.checked_mul(self.sek_per_eur),
            (CurrencyCode::SEK, CurrencyCode::EUR) => amount.checked_div(self.sek_per_eur),
            (CurrencyCode::EUR, CurrencyCode::EUR) | (CurrencyCode::SEK, CurrencyCode::SEK) => {
                Some(amount)
            }
        };
        converted.unwrap_or_else(|| {
            tracing::warn!(%amount, %from, %to, "Currency conversion overflowed, using 0");
            Decimal::ZERO
        })
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self {
            sek_per_eur: Self::DEFAULT_SEK_PER_EUR,
        }
    }
}

/// Shipping region chosen by the buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingRegion {
    #[default]
    Sweden,
    Europe,
}

impl ShippingRegion {
    pub const ALL: [Self; 2] = [Self::Sweden, Self::Europe];

    /// Code stored in the persisted preference.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Sweden => "se",
            Self::Europe => "eu",
        }
    }

    /// Region name in `language`.
    #[must_use]
    pub fn label(self, language: Language) -> &'static str {
        let strings = i18n::strings(language);
        match self {
            Self::Sweden => strings.shipping_sweden,
            Self::Europe => strings.shipping_europe,
        }
    }

    /// Persisted region, or the default when unset or unreadable.
    pub fn load(store: &impl KeyValueStore) -> Self {
        soft_get(store, keys::SHIPPING_REGION)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }

    /// Persist the region choice.
    pub fn save(self, store: &impl KeyValueStore) {
        soft_set(store, keys::SHIPPING_REGION, self.code());
    }
}

impl FromStr for ShippingRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "se" | "sweden" => Ok(Self::Sweden),
            "eu" | "europe" => Ok(Self::Europe),
            other => Err(format!("unknown shipping region '{other}'")),
        }
    }
}

impl fmt::Display for ShippingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flat shipping fees per region, in EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    pub sweden: Decimal,
    pub europe: Decimal,
}

impl ShippingRates {
    /// Fee in EUR for `region`.
    #[must_use]
    pub const fn fee(&self, region: ShippingRegion) -> Decimal {
        match region {
            ShippingRegion::Sweden => self.sweden,
            ShippingRegion::Europe => self.europe,
        }
    }
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            sweden: Decimal::new(900, 2),
            europe: Decimal::new(1900, 2),
        }
    }
}

/// Subtotal, shipping and total in the display currency, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Prices for one page: display currency plus rate and shipping table.
#[derive(Debug, Clone, Copy)]
pub struct Pricing {
    language: Language,
    rate: ExchangeRate,
    shipping: ShippingRates,
}

impl Pricing {
    #[must_use]
    pub const fn new(language: Language, rate: ExchangeRate, shipping: ShippingRates) -> Self {
        Self {
            language,
            rate,
            shipping,
        }
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Currency prices are shown and stored in on this page.
    #[must_use]
    pub const fn display_currency(&self) -> CurrencyCode {
        self.language.display_currency()
    }

    #[must_use]
    pub const fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Convert a catalog (EUR) price to the display currency.
    #[must_use]
    pub fn catalog_price(&self, eur: Decimal) -> Decimal {
        self.rate
            .convert(eur, CurrencyCode::EUR, self.display_currency())
    }

    /// A line's unit price in the current display currency.
    ///
    /// Lines keep the currency that was active when they were added, so a
    /// line added on a Swedish page is converted back on an English one.
    #[must_use]
    pub fn unit_price(&self, line: &CartLine) -> Decimal {
        self.rate
            .convert(line.price, line.currency, self.display_currency())
    }

    /// Unit price times quantity, or 0 if that overflows.
    #[must_use]
    pub fn line_total(&self, line: &CartLine) -> Decimal {
        self.unit_price(line)
            .checked_mul(Decimal::from(line.qty))
            .unwrap_or_else(|| {
                tracing::warn!(line = %line.id, qty = line.qty, "Line total overflowed, using 0");
                Decimal::ZERO
            })
    }

    /// Sum of line totals. Saturates at the largest representable amount.
    #[must_use]
    pub fn subtotal<'a>(&self, lines: impl IntoIterator<Item = &'a CartLine>) -> Decimal {
        lines.into_iter().fold(Decimal::ZERO, |sum, line| {
            sum.saturating_add(self.line_total(line))
        })
    }

    /// Shipping fee in the display currency for the given lines.
    ///
    /// Charged once per order when any physical product is present; carts
    /// holding only quote lines ship nothing.
    #[must_use]
    pub fn shipping<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a CartLine>,
        region: ShippingRegion,
    ) -> Decimal {
        if lines.into_iter().any(|l| l.kind == ItemKind::Product) {
            self.catalog_price(self.shipping.fee(region))
        } else {
            Decimal::ZERO
        }
    }

    /// Subtotal, shipping and total for `lines`.
    #[must_use]
    pub fn totals(&self, lines: &[CartLine], region: ShippingRegion) -> Totals {
        let subtotal = self.subtotal(lines);
        let shipping = self.shipping(lines, region);
        Totals {
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }

    /// Totals over the physical product lines only, as paid through PayPal.
    #[must_use]
    pub fn product_totals(&self, lines: &[CartLine], region: ShippingRegion) -> Totals {
        let products: Vec<CartLine> = lines
            .iter()
            .filter(|l| l.kind == ItemKind::Product)
            .cloned()
            .collect();
        self.totals(&products, region)
    }

    /// Format an amount in the display currency for this page.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        Price::new(amount, self.display_currency()).display(self.language)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ramstuga_core::LineKey;

    fn line(price: i64, currency: CurrencyCode, qty: u32, kind: ItemKind) -> CartLine {
        CartLine {
            id: LineKey::new("x"),
            kind,
            title: "x".to_string(),
            qty,
            price: Decimal::new(price, 2),
            currency,
        }
    }

    #[test]
    fn test_convert_identity() {
        let rate = ExchangeRate::default();
        let x = Decimal::new(12_345, 2);
        assert_eq!(rate.convert(x, CurrencyCode::EUR, CurrencyCode::EUR), x);
        assert_eq!(rate.convert(x, CurrencyCode::SEK, CurrencyCode::SEK), x);
    }

    #[test]
    fn test_convert_round_trip() {
        let rate = ExchangeRate::default();
        let tolerance = Decimal::new(1, 10);
        for cents in [1, 4_900, 8_900, 123_456_789] {
            let x = Decimal::new(cents, 2);
            let sek = rate.convert(x, CurrencyCode::EUR, CurrencyCode::SEK);
            let back = rate.convert(sek, CurrencyCode::SEK, CurrencyCode::EUR);
            assert!((back - x).abs() < tolerance, "{x} -> {sek} -> {back}");

            let eur = rate.convert(x, CurrencyCode::SEK, CurrencyCode::EUR);
            let back = rate.convert(eur, CurrencyCode::EUR, CurrencyCode::SEK);
            assert!((back - x).abs() < tolerance, "{x} -> {eur} -> {back}");
        }
    }

    #[test]
    fn test_rate_must_be_positive() {
        assert!(ExchangeRate::new(Decimal::ZERO).is_none());
        assert!(ExchangeRate::new(Decimal::new(-1, 0)).is_none());
        assert_eq!(ExchangeRate::default().sek_per_eur(), Decimal::new(115, 1));
    }

    #[test]
    fn test_unit_price_reconverts_stored_currency() {
        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        let sek_line = line(56_350, CurrencyCode::SEK, 1, ItemKind::Product);
        assert_eq!(pricing.unit_price(&sek_line), Decimal::new(49, 0));
    }

    #[test]
    fn test_totals_with_shipping() {
        let pricing = Pricing::new(Language::Nl, ExchangeRate::default(), ShippingRates::default());
        let lines = vec![line(4_900, CurrencyCode::EUR, 2, ItemKind::Product)];

        let totals = pricing.totals(&lines, ShippingRegion::Sweden);
        assert_eq!(totals.subtotal, Decimal::new(98, 0));
        assert_eq!(totals.shipping, Decimal::new(9, 0));
        assert_eq!(totals.total, Decimal::new(107, 0));

        let totals = pricing.totals(&lines, ShippingRegion::Europe);
        assert_eq!(totals.total, Decimal::new(117, 0));
    }

    #[test]
    fn test_quote_only_cart_has_no_shipping() {
        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        let lines = vec![line(0, CurrencyCode::EUR, 1, ItemKind::Maatwerk)];
        let totals = pricing.totals(&lines, ShippingRegion::Sweden);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_zero_priced_product_still_ships() {
        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        let lines = vec![line(0, CurrencyCode::EUR, 1, ItemKind::Product)];
        let totals = pricing.totals(&lines, ShippingRegion::Sweden);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, Decimal::new(9, 0));
    }

    #[test]
    fn test_overflowing_amounts_fall_back_to_zero() {
        let pricing = Pricing::new(Language::Sv, ExchangeRate::default(), ShippingRates::default());
        let huge = CartLine {
            price: Decimal::MAX,
            ..line(0, CurrencyCode::EUR, 1, ItemKind::Product)
        };
        assert_eq!(pricing.unit_price(&huge), Decimal::ZERO);

        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        let many = CartLine {
            price: Decimal::MAX,
            ..line(0, CurrencyCode::EUR, u32::MAX, ItemKind::Product)
        };
        assert_eq!(pricing.line_total(&many), Decimal::ZERO);

        let big = CartLine {
            price: Decimal::MAX,
            ..line(0, CurrencyCode::EUR, 1, ItemKind::Product)
        };
        let totals = pricing.totals(&[big.clone(), big], ShippingRegion::Europe);
        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[test]
    fn test_swedish_shipping_in_kronor() {
        let pricing = Pricing::new(Language::Sv, ExchangeRate::default(), ShippingRates::default());
        let lines = vec![line(4_900, CurrencyCode::EUR, 1, ItemKind::Product)];
        let totals = pricing.totals(&lines, ShippingRegion::Sweden);
        assert_eq!(totals.shipping, Decimal::new(1035, 1));
        assert_eq!(pricing.format(totals.total), "667,00\u{a0}kr");
    }

    #[test]
    fn test_no_rounding_during_accumulation() {
        let pricing = Pricing::new(Language::En, ExchangeRate::default(), ShippingRates::default());
        // 1/3 cent-ish amounts only round once, at format time.
        let lines = vec![
            line(3_333, CurrencyCode::SEK, 1, ItemKind::Product),
            line(3_333, CurrencyCode::SEK, 1, ItemKind::Product),
            line(3_334, CurrencyCode::SEK, 1, ItemKind::Product),
        ];
        let subtotal = pricing.subtotal(&lines);
        let expected = Decimal::new(100, 0) / Decimal::new(115, 1);
        assert!((subtotal - expected).abs() < Decimal::new(1, 20));
        assert_eq!(pricing.format(subtotal), "€8.70");
    }

    #[test]
    fn test_shipping_region_parse_and_persist() {
        let store = crate::storage::MemoryStore::new();
        assert_eq!(ShippingRegion::load(&store), ShippingRegion::Sweden);
        ShippingRegion::Europe.save(&store);
        assert_eq!(ShippingRegion::load(&store), ShippingRegion::Europe);
        assert!("mars".parse::<ShippingRegion>().is_err());
    }
}
