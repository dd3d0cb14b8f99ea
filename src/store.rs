//! Cart Store
//!
//! Load/save/clear over a single persisted slot. The storage backend is passed
//! in explicitly, so tests run against [`MemoryStorage`] while the browser build
//! plugs in `localStorage`.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::Cart;

/// Storage key used by the order site.
pub const DEFAULT_STORAGE_KEY: &str = "cozyCrumbCart";

/// Failure reported by a storage backend.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("storage backend failure: {0}")]
pub struct StorageError(pub String);

/// Errors raised while persisting a cart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The cart could not be serialised.
    #[error("failed to serialise cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend refused the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A string key-value store with `localStorage` semantics.
pub trait KeyValueStorage {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the delete.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &mut T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: FxHashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Cart persistence over a [`KeyValueStorage`] slot.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store using the default slot name.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store using a custom slot name.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Load the persisted cart.
    ///
    /// A missing slot, an unreadable backend, or a value that does not parse
    /// into a valid cart all yield an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(error) => {
                warn!(key = %self.key, %error, "cart storage unreadable, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cart) => cart,
            Err(error) => {
                warn!(key = %self.key, %error, "discarding unparseable cart");
                Cart::new()
            }
        }
    }

    /// Persist the cart, overwriting the previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if serialisation or the backend write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StoreError> {
        let json = serde_json::to_string(cart)?;

        self.storage.set_item(&self.key, &json)?;

        debug!(key = %self.key, items = cart.len(), "saved cart");

        Ok(())
    }

    /// Remove the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend delete fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.key)?;

        debug!(key = %self.key, "cleared cart");

        Ok(())
    }

    /// Slot name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Release the backend.
    pub fn into_inner(self) -> S {
        self.storage
    }
}
