//! `window.localStorage` as a [`KeyValueStore`].

use marketplace_client::storage::KeyValueStore;

/// Browser storage. Every call re-fetches the `Storage` handle, so a page
/// without storage access degrades to "nothing stored".
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// The page's `localStorage`, or `None` when the window is gone or storage
    /// is blocked.
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    /// # Returns
    /// - `Some(String)` if the key holds a value
    /// - `None` if the key is missing or storage is unavailable
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// # Arguments
    /// - `key`: storage key
    /// - `value`: raw string to store
    ///
    /// # Returns
    /// - `true` if the browser accepted the write
    /// - `false` on quota errors or when storage is unavailable
    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// # Returns
    /// - `true` if the key is gone afterwards
    /// - `false` when storage is unavailable
    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
