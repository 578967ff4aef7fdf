//! Persisted storage keys.
//!
//! Keys are versioned by rename. Each renamed key keeps its predecessor as a
//! `LEGACY_*` constant for a single-step migration.

/// Cart line list (JSON array).
pub const CART: &str = "ramstuga_cart";
/// Cart key used before the shop was renamed.
pub const LEGACY_CART: &str = "ramhuset_cart";

/// Payment reference string.
pub const PAYMENT_REF: &str = "ramstuga_payref";
/// Issue date of the payment reference (`YYYYMMDD`).
pub const PAYMENT_REF_DATE: &str = "ramstuga_payref_date";
pub const LEGACY_PAYMENT_REF: &str = "ramhuset_payref";
pub const LEGACY_PAYMENT_REF_DATE: &str = "ramhuset_payref_date";

/// Chosen shipping region.
pub const SHIPPING_REGION: &str = "ramstuga_shipping";

/// Chosen display language.
pub const LANGUAGE: &str = "ramstuga_lang";

/// Analytics consent choice (`granted` / `denied`).
pub const CONSENT: &str = "ramstuga_consent";

/// Whether a storage-change notification for `key` concerns the cart.
///
/// `None` means the whole storage area was cleared.
#[must_use]
pub fn is_cart_key(key: Option<&str>) -> bool {
    key.is_none_or(|k| k == CART || k == LEGACY_CART)
}
