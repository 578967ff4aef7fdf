//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `RAMSTUGA_PAYPAL_URL` - Hosted checkout or PayPal.me link
//! - `RAMSTUGA_ORDER_EMAIL` - Address the order mail is sent to
//! - `RAMSTUGA_SEK_PER_EUR` - Fixed exchange rate (default: 11.5)
//! - `RAMSTUGA_SHIPPING_SWEDEN_EUR` - Flat shipping within Sweden (default: 9.00)
//! - `RAMSTUGA_SHIPPING_EUROPE_EUR` - Flat shipping to the rest of Europe (default: 19.00)
//! - `RAMSTUGA_STORE_PATH` - JSON file backing the CLI's storage (default: ramstuga-store.json)
//! - `GA4_MEASUREMENT_ID` - Google Analytics 4 measurement ID

use std::path::PathBuf;
use std::str::FromStr;

use ramstuga_core::Email;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::pricing::{ExchangeRate, ShippingRates};

pub const DEFAULT_PAYPAL_URL: &str = "https://www.paypal.com/ncp/payment/ZKYKA5JWNBYBJ";
pub const DEFAULT_ORDER_EMAIL: &str = "info@ramstuga.se";
pub const DEFAULT_STORE_PATH: &str = "ramstuga-store.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where checkout sends the buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Hosted payment page.
    pub paypal_url: Url,
    /// Recipient of the order confirmation mail.
    pub order_email: Email,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            paypal_url: Url::parse(DEFAULT_PAYPAL_URL).expect("default PayPal URL is valid"),
            order_email: Email::parse(DEFAULT_ORDER_EMAIL).expect("default order email is valid"),
        }
    }
}

/// Shop configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub checkout: CheckoutSettings,
    pub exchange_rate: ExchangeRate,
    pub shipping: ShippingRates,
    /// File the CLI keeps its storage in.
    pub store_path: PathBuf,
    /// GA4 measurement ID; analytics is off without one.
    pub ga4_measurement_id: Option<String>,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to a value
    /// that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let defaults = CheckoutSettings::default();
        let paypal_url = match get("RAMSTUGA_PAYPAL_URL") {
            Some(raw) => parse_paypal_url(&raw)?,
            None => defaults.paypal_url,
        };
        let order_email = match get("RAMSTUGA_ORDER_EMAIL") {
            Some(raw) => Email::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("RAMSTUGA_ORDER_EMAIL".to_string(), e.to_string())
            })?,
            None => defaults.order_email,
        };

        let exchange_rate = match get("RAMSTUGA_SEK_PER_EUR") {
            Some(raw) => {
                let rate = parse_decimal("RAMSTUGA_SEK_PER_EUR", &raw)?;
                ExchangeRate::new(rate).ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "RAMSTUGA_SEK_PER_EUR".to_string(),
                        "must be greater than zero".to_string(),
                    )
                })?
            }
            None => ExchangeRate::default(),
        };

        let mut shipping = ShippingRates::default();
        if let Some(raw) = get("RAMSTUGA_SHIPPING_SWEDEN_EUR") {
            shipping.sweden = parse_fee("RAMSTUGA_SHIPPING_SWEDEN_EUR", &raw)?;
        }
        if let Some(raw) = get("RAMSTUGA_SHIPPING_EUROPE_EUR") {
            shipping.europe = parse_fee("RAMSTUGA_SHIPPING_EUROPE_EUR", &raw)?;
        }

        Ok(Self {
            checkout: CheckoutSettings {
                paypal_url,
                order_email,
            },
            exchange_rate,
            shipping,
            store_path: get("RAMSTUGA_STORE_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_STORE_PATH), PathBuf::from),
            ga4_measurement_id: get("GA4_MEASUREMENT_ID"),
        })
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            checkout: CheckoutSettings::default(),
            exchange_rate: ExchangeRate::default(),
            shipping: ShippingRates::default(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            ga4_measurement_id: None,
        }
    }
}

fn parse_paypal_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("RAMSTUGA_PAYPAL_URL".to_string(), reason);
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.scheme() != "https" {
        return Err(invalid("must be an https URL".to_string()));
    }
    Ok(url)
}

fn parse_decimal(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_fee(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let fee = parse_decimal(key, raw)?;
    if fee.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(fee)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ShopConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ShopConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.checkout.paypal_url.as_str(), DEFAULT_PAYPAL_URL);
        assert_eq!(config.checkout.order_email.as_str(), DEFAULT_ORDER_EMAIL);
        assert_eq!(config.exchange_rate, ExchangeRate::default());
        assert_eq!(config.shipping, ShippingRates::default());
        assert_eq!(config.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert!(config.ga4_measurement_id.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RAMSTUGA_PAYPAL_URL", "https://paypal.me/ramstuga"),
            ("RAMSTUGA_ORDER_EMAIL", "order@ramstuga.se"),
            ("RAMSTUGA_SEK_PER_EUR", "11.25"),
            ("RAMSTUGA_SHIPPING_EUROPE_EUR", "24.50"),
            ("RAMSTUGA_STORE_PATH", "/tmp/cart.json"),
            ("GA4_MEASUREMENT_ID", "G-TEST123"),
        ])
        .unwrap();
        assert_eq!(config.checkout.paypal_url.host_str(), Some("paypal.me"));
        assert_eq!(config.checkout.order_email.as_str(), "order@ramstuga.se");
        assert_eq!(config.exchange_rate.sek_per_eur(), Decimal::new(1125, 2));
        assert_eq!(config.shipping.sweden, Decimal::new(900, 2));
        assert_eq!(config.shipping.europe, Decimal::new(2450, 2));
        assert_eq!(config.store_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.ga4_measurement_id.as_deref(), Some("G-TEST123"));
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("GA4_MEASUREMENT_ID", "  "), ("RAMSTUGA_SEK_PER_EUR", "")]).unwrap();
        assert!(config.ga4_measurement_id.is_none());
        assert_eq!(config.exchange_rate, ExchangeRate::default());
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("RAMSTUGA_PAYPAL_URL", "not a url"),
            ("RAMSTUGA_PAYPAL_URL", "http://paypal.me/x"),
            ("RAMSTUGA_ORDER_EMAIL", "nobody"),
            ("RAMSTUGA_SEK_PER_EUR", "0"),
            ("RAMSTUGA_SEK_PER_EUR", "eleven"),
            ("RAMSTUGA_SHIPPING_SWEDEN_EUR", "-1"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == key), "{key}={value}");
        }
    }
}
