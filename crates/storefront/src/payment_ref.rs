//! Daily payment reference.
//!
//! Buyers paying off-site quote a reference like `RAM-20261018-4821` so the
//! shop can match the payment to the order mail. A reference is issued once
//! per local calendar day and reused across reloads until the cart is
//! cleared.
//!
//! The four-digit suffix is the current epoch milliseconds modulo 10000. It
//! is not collision-free; the reference only correlates manual payments.

use core::fmt;

use chrono::NaiveDate;

use crate::clock::Clock;
use crate::storage::{KeyValueStore, keys, soft_get, soft_remove, soft_set};

const PREFIX: &str = "RAM";

/// A payment reference string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentReference(String);

impl PaymentReference {
    /// Mint a reference for `date` from an epoch-millisecond timestamp.
    #[must_use]
    pub fn mint(date: NaiveDate, epoch_millis: i64) -> Self {
        Self(format!(
            "{PREFIX}-{}-{:04}",
            date_stamp(date),
            epoch_millis.rem_euclid(10_000)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `YYYYMMDD` form of a date, as stored next to the reference.
#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Return today's reference, issuing a new one if none exists for today.
///
/// A reference stored under the legacy keys is honored when it was issued
/// today, and copied to the current keys.
pub fn get_or_create(store: &impl KeyValueStore, clock: &(impl Clock + ?Sized)) -> PaymentReference {
    let today = date_stamp(clock.today());

    if let Some(existing) = issued_today(store, keys::PAYMENT_REF, keys::PAYMENT_REF_DATE, &today)
    {
        return PaymentReference(existing);
    }

    if let Some(legacy) = issued_today(
        store,
        keys::LEGACY_PAYMENT_REF,
        keys::LEGACY_PAYMENT_REF_DATE,
        &today,
    ) {
        tracing::info!(reference = %legacy, "Migrating payment reference from legacy keys");
        soft_set(store, keys::PAYMENT_REF, &legacy);
        soft_set(store, keys::PAYMENT_REF_DATE, &today);
        return PaymentReference(legacy);
    }

    let reference = PaymentReference::mint(clock.today(), clock.epoch_millis());
    soft_set(store, keys::PAYMENT_REF, reference.as_str());
    soft_set(store, keys::PAYMENT_REF_DATE, &today);
    tracing::info!(reference = %reference, "Issued payment reference");
    reference
}

/// Forget the current reference, including any legacy copy.
pub fn clear(store: &impl KeyValueStore) {
    for key in [
        keys::PAYMENT_REF,
        keys::PAYMENT_REF_DATE,
        keys::LEGACY_PAYMENT_REF,
        keys::LEGACY_PAYMENT_REF_DATE,
    ] {
        soft_remove(store, key);
    }
}

fn issued_today(
    store: &impl KeyValueStore,
    ref_key: &str,
    date_key: &str,
    today: &str,
) -> Option<String> {
    let reference = soft_get(store, ref_key).filter(|r| !r.is_empty())?;
    (soft_get(store, date_key).as_deref() == Some(today)).then_some(reference)
}
