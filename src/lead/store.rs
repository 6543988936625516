use log::warn;
use web_sys::window;

/// Persisted key-value string store shared across page loads.
///
/// Injected into the capture and submission paths so tests can swap in an
/// in-memory fake. Writes are best-effort: a storage failure must never
/// block attribution capture or a submission.
pub trait ParamStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// localStorage-backed store used in the browser.
pub struct BrowserStore;

impl ParamStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match window().and_then(|w| w.local_storage().ok()).flatten() {
            Some(storage) => match storage.get_item(key) {
                Ok(value) => value,
                Err(_) => {
                    warn!("localStorage read failed for {}", key);
                    None
                }
            },
            None => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok()).flatten() {
            if storage.set_item(key, value).is_err() {
                warn!("localStorage write failed for {}", key);
            }
        }
    }
}
