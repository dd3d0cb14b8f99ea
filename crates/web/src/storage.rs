//! `window.localStorage` backend

use crumb::store::{KeyValueStorage, StorageError};

/// Browser `localStorage`, shared by every page on the origin.
#[derive(Debug, Clone)]
pub(crate) struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the origin's local storage.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when there is no window or storage is
    /// disabled (private browsing, blocked cookies).
    pub(crate) fn open() -> Result<Self, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError("Window is unavailable".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|error| StorageError(format!("localStorage is blocked: {error:?}")))?
            .ok_or_else(|| StorageError("localStorage is unavailable".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|error| StorageError(format!("failed to read {key}: {error:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|error| StorageError(format!("failed to write {key}: {error:?}")))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|error| StorageError(format!("failed to remove {key}: {error:?}")))
    }
}
