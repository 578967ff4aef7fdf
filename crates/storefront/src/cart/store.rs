//! Durable cart persistence.

use serde_json::Value;

use super::{CartLine, MAX_QTY};
use crate::storage::{KeyValueStore, keys, soft_get, soft_set};

/// Reads and writes the cart line list.
///
/// Keeps the last loaded or saved lines in memory, so a page whose storage
/// is unavailable still sees its own changes until it is closed.
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    cache: Vec<CartLine>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            cache: Vec::new(),
        }
    }

    /// The underlying key-value store.
    pub const fn backend(&self) -> &S {
        &self.store
    }

    /// Load the persisted cart.
    ///
    /// Copies the legacy key to the current key when only the legacy key is
    /// present. Malformed or non-array content yields an empty cart.
    pub fn load(&mut self) -> Vec<CartLine> {
        self.migrate_legacy_key();

        let raw = match self.store.get(keys::CART) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Cart storage unreadable, using in-memory cart");
                return self.cache.clone();
            }
        };

        self.cache = raw.as_deref().map(parse_lines).unwrap_or_default();
        self.cache.clone()
    }

    /// Persist the full line list.
    ///
    /// Returns whether the write reached storage; the in-memory copy is
    /// updated either way.
    pub fn save(&mut self, lines: Vec<CartLine>) -> bool {
        let persisted = match serde_json::to_string(&lines) {
            Ok(raw) => soft_set(&self.store, keys::CART, &raw),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cart");
                false
            }
        };
        self.cache = lines;
        persisted
    }

    /// Sum of quantities across all lines.
    pub fn badge_count(&mut self) -> u32 {
        self.load()
            .iter()
            .fold(0, |count, line| count.saturating_add(line.qty))
    }

    fn migrate_legacy_key(&self) {
        if soft_get(&self.store, keys::CART).is_some() {
            return;
        }
        if let Some(old) = soft_get(&self.store, keys::LEGACY_CART).filter(|v| !v.is_empty()) {
            tracing::info!("Migrating cart from legacy storage key");
            soft_set(&self.store, keys::CART, &old);
        }
    }
}

/// Parse persisted cart JSON, dropping anything that is not a valid line.
///
/// Lines sharing a key are merged so the key stays unique.
#[must_use]
pub fn parse_lines(raw: &str) -> Vec<CartLine> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
        tracing::debug!("Persisted cart is not a JSON array, starting empty");
        return Vec::new();
    };

    let mut lines: Vec<CartLine> = Vec::with_capacity(items.len());
    for line in items.iter().filter_map(CartLine::from_json) {
        if let Some(existing) = lines.iter_mut().find(|l| l.id == line.id) {
            existing.qty = existing.qty.saturating_add(line.qty).min(MAX_QTY);
        } else {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const LEGACY_JSON: &str =
        r#"[{"id":"std-30x40-licht","type":"product","title":"A","qty":3,"price":49,"currency":"EUR"}]"#;

    #[test]
    fn test_load_missing_is_empty() {
        let mut cart = CartStore::new(MemoryStore::new());
        assert!(cart.load().is_empty());
        assert_eq!(cart.badge_count(), 0);
    }

    #[test]
    fn test_load_malformed_is_empty() {
        for raw in ["not json", "{\"id\":\"a\"}", "42", "null", "[1, \"x\"]", ""] {
            let store = MemoryStore::with_entries([(keys::CART, raw)]);
            let mut cart = CartStore::new(store);
            assert!(cart.load().is_empty(), "{raw}");
            assert_eq!(cart.badge_count(), 0);
        }
    }

    #[test]
    fn test_migrates_legacy_key() {
        let store = MemoryStore::with_entries([(keys::LEGACY_CART, LEGACY_JSON)]);
        let mut cart = CartStore::new(store.clone());
        let lines = cart.load();
        assert_eq!(lines.len(), 1);
        assert_eq!(cart.badge_count(), 3);
        assert_eq!(store.get(keys::CART).unwrap().as_deref(), Some(LEGACY_JSON));
    }

    #[test]
    fn test_current_key_wins_over_legacy() {
        let store = MemoryStore::with_entries([(keys::LEGACY_CART, LEGACY_JSON), (keys::CART, "[]")]);
        let mut cart = CartStore::new(store);
        assert!(cart.load().is_empty());
    }

    #[test]
    fn test_duplicate_keys_are_merged() {
        let raw = r#"[{"id":"a","qty":1,"price":1},{"id":"b","qty":1,"price":1},{"id":"a","qty":2,"price":1}]"#;
        let lines = parse_lines(raw);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].qty, 3);
        assert_eq!(lines[1].id.as_str(), "b");
    }

    #[test]
    fn test_merged_quantities_stay_capped() {
        let raw = r#"[{"id":"a","qty":9999,"price":1},{"id":"a","qty":9999,"price":1},{"id":"b","qty":9999,"price":1}]"#;
        let store = MemoryStore::with_entries([(keys::CART, raw)]);
        let mut cart = CartStore::new(store);
        let lines = cart.load();
        assert_eq!(lines[0].qty, MAX_QTY);
        assert_eq!(cart.badge_count(), 2 * MAX_QTY);
    }

    #[test]
    fn test_save_survives_unavailable_storage() {
        let store = MemoryStore::new();
        let mut cart = CartStore::new(store.clone());
        let line = parse_lines(LEGACY_JSON).remove(0);

        store.set_unavailable(true);
        assert!(!cart.save(vec![line]));
        assert_eq!(cart.badge_count(), 3);

        store.set_unavailable(false);
        assert_eq!(cart.badge_count(), 0);
    }

    #[test]
    fn test_save_round_trip() {
        let store = MemoryStore::new();
        let mut cart = CartStore::new(store.clone());
        let lines = parse_lines(LEGACY_JSON);
        assert!(cart.save(lines.clone()));

        let mut other_tab = CartStore::new(store);
        assert_eq!(other_tab.load(), lines);
    }
}
