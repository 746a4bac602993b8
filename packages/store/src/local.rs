//! # Browser `localStorage` store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform.
//! Every call re-acquires `window.localStorage`; when the browser refuses
//! access (private mode, disabled storage, sandboxed iframes) reads yield
//! `None` and writes are dropped, so the app simply starts signed out.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(_) => {
                tracing::warn!("localStorage is not accessible");
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage write rejected");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "localStorage remove rejected");
            }
        }
    }
}
