//! Cookie-consent choice gating analytics.
//!
//! Nothing is reported until the visitor accepts. The choice is persisted so
//! the banner is shown only once per browser.

use ramstuga_core::Language;

use crate::i18n;
use crate::storage::{KeyValueStore, keys, soft_get, soft_set};

/// The visitor's analytics consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consent {
    /// No choice made yet; the banner is shown.
    #[default]
    Unset,
    Granted,
    Denied,
}

impl Consent {
    /// Read the persisted choice. Unknown values count as no choice.
    pub fn load(store: &impl KeyValueStore) -> Self {
        match soft_get(store, keys::CONSENT).as_deref() {
            Some("granted") => Self::Granted,
            Some("denied") => Self::Denied,
            _ => Self::Unset,
        }
    }

    #[must_use]
    pub const fn allows_analytics(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Copy for the consent banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentBanner {
    pub message: &'static str,
    pub accept: &'static str,
    pub decline: &'static str,
}

impl ConsentBanner {
    /// The banner to show, or `None` once a choice is stored.
    pub fn pending(store: &impl KeyValueStore, language: Language) -> Option<Self> {
        if Consent::load(store) != Consent::Unset {
            return None;
        }
        let strings = i18n::strings(language);
        Some(Self {
            message: strings.consent_message,
            accept: strings.consent_accept,
            decline: strings.consent_decline,
        })
    }

    /// Record that the visitor accepted analytics.
    pub fn accept(store: &impl KeyValueStore) {
        soft_set(store, keys::CONSENT, "granted");
    }

    /// Record that the visitor declined analytics.
    pub fn decline(store: &impl KeyValueStore) {
        soft_set(store, keys::CONSENT, "denied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_banner_until_choice() {
        let store = MemoryStore::new();
        let banner = ConsentBanner::pending(&store, Language::Nl);
        assert_eq!(banner.map(|b| b.accept), Some("Akkoord"));

        ConsentBanner::decline(&store);
        assert!(ConsentBanner::pending(&store, Language::Nl).is_none());
        assert_eq!(Consent::load(&store), Consent::Denied);
        assert!(!Consent::load(&store).allows_analytics());

        ConsentBanner::accept(&store);
        assert!(Consent::load(&store).allows_analytics());
    }

    #[test]
    fn test_unknown_value_is_unset() {
        let store = MemoryStore::with_entries([(keys::CONSENT, "maybe")]);
        assert_eq!(Consent::load(&store), Consent::Unset);
    }
}
