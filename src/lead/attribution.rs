use std::collections::HashMap;

use log::info;
use web_sys::{window, UrlSearchParams};

use crate::lead::store::ParamStore;

/// Marketing attribution keys recognized in the query string. Anything else
/// is ignored.
pub const ATTRIBUTION_KEYS: [&str; 7] = [
    "utm_ad",
    "utm_placement",
    "gclid",
    "fbclid",
    "utm_source",
    "utm_campaign",
    "utm_keyword",
];

/// Attribution parameters captured once at page mount.
///
/// The in-memory map is immutable after capture; non-empty values are also
/// written through to the persisted store so a later visit without UTM
/// parameters still attributes to the original campaign.
#[derive(Clone, PartialEq, Default)]
pub struct AttributionCapture {
    params: HashMap<String, String>,
}

impl AttributionCapture {
    /// Capture from already-parsed query pairs, writing non-empty values
    /// through to the store.
    pub fn capture<I>(pairs: I, store: &dyn ParamStore) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let incoming: HashMap<String, String> = pairs.into_iter().collect();
        let mut params = HashMap::new();
        for key in ATTRIBUTION_KEYS {
            let value = incoming.get(key).cloned().unwrap_or_default();
            if !value.is_empty() {
                store.set(key, &value);
            }
            params.insert(key.to_string(), value);
        }
        Self { params }
    }

    /// Capture from the current window's query string. Any failure to read
    /// the URL degrades to an all-empty capture.
    pub fn from_window(store: &dyn ParamStore) -> Self {
        let pairs = window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
            .map(|params| {
                ATTRIBUTION_KEYS
                    .iter()
                    .filter_map(|key| params.get(key).map(|v| (key.to_string(), v)))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let captured = Self::capture(pairs, store);
        let present = captured.params.values().filter(|v| !v.is_empty()).count();
        if present > 0 {
            info!("captured {} attribution parameters", present);
        }
        captured
    }

    /// Current value for a key: this page load first, then the persisted
    /// store, else empty string.
    pub fn resolve(&self, key: &str, store: &dyn ParamStore) -> String {
        self.params
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .or_else(|| store.get(key).filter(|v| !v.is_empty()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::store::testing::MemoryStore;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn non_empty_values_are_persisted_and_resolved() {
        let store = MemoryStore::new();
        let capture = AttributionCapture::capture(
            pairs(&[("utm_source", "google"), ("gclid", "abc123")]),
            &store,
        );

        assert_eq!(store.get("utm_source").as_deref(), Some("google"));
        assert_eq!(store.get("gclid").as_deref(), Some("abc123"));
        assert_eq!(capture.resolve("utm_source", &store), "google");
        assert_eq!(capture.resolve("gclid", &store), "abc123");
    }

    #[test]
    fn absent_keys_resolve_to_persisted_value_then_empty() {
        let store = MemoryStore::with(&[("utm_campaign", "spring-launch")]);
        let capture = AttributionCapture::capture(pairs(&[]), &store);

        assert_eq!(capture.resolve("utm_campaign", &store), "spring-launch");
        assert_eq!(capture.resolve("utm_keyword", &store), "");
    }

    #[test]
    fn empty_values_are_not_written_to_the_store() {
        let store = MemoryStore::new();
        AttributionCapture::capture(pairs(&[("fbclid", "")]), &store);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn current_load_wins_over_persisted_value() {
        let store = MemoryStore::with(&[("utm_source", "old-visit")]);
        let capture =
            AttributionCapture::capture(pairs(&[("utm_source", "new-visit")]), &store);

        assert_eq!(capture.resolve("utm_source", &store), "new-visit");
        assert_eq!(store.get("utm_source").as_deref(), Some("new-visit"));
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let store = MemoryStore::new();
        let capture =
            AttributionCapture::capture(pairs(&[("utm_medium", "cpc")]), &store);

        assert_eq!(store.len(), 0);
        assert_eq!(capture.resolve("utm_medium", &store), "");
    }
}
