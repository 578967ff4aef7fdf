//! Scenario test harness for the Ramstuga cart.
//!
//! A [`Shop`] is one browser profile: a shared store, clock and analytics
//! sink. Each [`Shop::tab`] opens a fresh cart controller on it, the way a
//! new page load or a second tab would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ramstuga-integration-tests
//! ```

use std::rc::Rc;

use chrono::NaiveDate;
use ramstuga_core::Language;
use ramstuga_storefront::analytics::RecordingSink;
use ramstuga_storefront::clock::FixedClock;
use ramstuga_storefront::page::{MemoryPage, ScriptedDialogs};
use ramstuga_storefront::pricing::{ExchangeRate, Pricing, ShippingRates};
use ramstuga_storefront::storage::{KeyValueStore, MemoryStore, keys};
use ramstuga_storefront::{CartController, Catalog, CheckoutSettings};

/// Controller type opened by [`Shop::tab`].
pub type Tab = CartController<MemoryStore, MemoryPage, ScriptedDialogs>;

/// Milliseconds since the epoch at the start of every scenario; the payment
/// reference minted at this instant ends in `4321`.
pub const START_MILLIS: i64 = 1_760_000_004_321;

/// One visitor's browser profile.
#[derive(Debug, Clone)]
pub struct Shop {
    pub store: MemoryStore,
    pub clock: Rc<FixedClock>,
    pub dialogs: ScriptedDialogs,
    pub sink: RecordingSink,
}

impl Shop {
    /// An empty profile on 18 October 2026.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// A profile over existing storage.
    #[must_use]
    pub fn with_store(store: MemoryStore) -> Self {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default();
        Self {
            store,
            clock: Rc::new(FixedClock::new(today, START_MILLIS)),
            dialogs: ScriptedDialogs::new(),
            sink: RecordingSink::new(),
        }
    }

    /// Accept analytics for this profile.
    #[must_use]
    pub fn with_consent(self) -> Self {
        let _ = self.store.set(keys::CONSENT, "granted");
        self
    }

    /// Open the shop page in `language` and run its initial render.
    #[must_use]
    pub fn tab(&self, language: Language) -> Tab {
        let mut tab = self.tab_on(language, MemoryPage::shop());
        tab.init();
        tab
    }

    /// Open a controller on an arbitrary page, without rendering.
    #[must_use]
    pub fn tab_on(&self, language: Language, page: MemoryPage) -> Tab {
        CartController::new(
            self.store.clone(),
            page,
            self.dialogs.clone(),
            Catalog::embedded().unwrap_or_else(|e| panic!("embedded catalog: {e}")),
            Pricing::new(language, ExchangeRate::default(), ShippingRates::default()),
            CheckoutSettings::default(),
        )
        .with_clock(Rc::clone(&self.clock))
        .with_analytics(Box::new(self.sink.clone()))
    }
}

impl Default for Shop {
    fn default() -> Self {
        Self::new()
    }
}
