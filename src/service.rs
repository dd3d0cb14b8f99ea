//! Cart service
//!
//! Add and remove operations. Each call is a full load, mutate, save cycle
//! against the store, so the persisted slot is always the source of truth.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    cart::{Cart, CartError, LineItem},
    catalog::Catalog,
    store::{CartStore, KeyValueStorage, StoreError},
};

/// Errors raised by [`CartService::add_item`].
#[derive(Debug, Error)]
pub enum AddItemError {
    /// Requested quantity was zero or negative.
    #[error("Quantity must be a positive number, got {0}")]
    InvalidQuantity(i64),

    /// No key was given.
    #[error("Item key must not be empty")]
    EmptyKey,

    /// Neither the catalog nor the caller supplied a positive price.
    #[error("Missing or invalid price for item: {0}")]
    PriceUnavailable(String),

    /// The cart rejected the merge.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The updated cart could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A request to add an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    /// Catalog key, legacy alias, or ad-hoc key
    pub key: String,

    /// Requested quantity, as entered
    pub quantity: i64,

    /// Name to use when the catalog does not know the key
    pub name_override: Option<String>,

    /// Price to use when the catalog does not know the key
    pub price_override: Option<Decimal>,
}

impl AddItem {
    /// Add `quantity` of a catalog item.
    pub fn new(key: impl Into<String>, quantity: i64) -> Self {
        Self {
            key: key.into(),
            quantity,
            name_override: None,
            price_override: None,
        }
    }

    /// Set the fallback display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Set the fallback unit price.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price_override = Some(price);
        self
    }
}

/// Result of a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// Quantity added by this call
    pub quantity: u32,

    /// The line item after merging
    pub line: LineItem,
}

/// Add/remove operations over a catalog and a persisted cart.
#[derive(Debug)]
pub struct CartService<'c, S> {
    catalog: &'c Catalog,
    store: CartStore<S>,
}

impl<'c, S: KeyValueStorage> CartService<'c, S> {
    /// Create a service.
    pub fn new(catalog: &'c Catalog, store: CartStore<S>) -> Self {
        Self { catalog, store }
    }

    /// The current persisted cart.
    pub fn cart(&self) -> Cart {
        self.store.load()
    }

    /// Add an item, merging with an existing line for the same key.
    ///
    /// Canonical catalog details win over overrides; overrides only fill in
    /// for keys the catalog does not know. Legacy aliases fold into their
    /// canonical key. Price is fixed by the first add of a key.
    ///
    /// # Errors
    ///
    /// Returns an [`AddItemError`] and leaves the stored cart untouched if the
    /// quantity is not positive, the key is empty, no positive price can be
    /// resolved, or the cart cannot be saved.
    pub fn add_item(&mut self, request: AddItem) -> Result<Added, AddItemError> {
        let quantity = u32::try_from(request.quantity)
            .ok()
            .filter(|quantity| *quantity > 0)
            .ok_or(AddItemError::InvalidQuantity(request.quantity))?;

        if request.key.is_empty() {
            return Err(AddItemError::EmptyKey);
        }

        let resolved = self.catalog.resolve(&request.key);

        let key = resolved.map_or_else(|| request.key.clone(), |found| found.key().to_string());

        let name = resolved
            .map(|found| found.name().to_string())
            .or(request.name_override)
            .unwrap_or_else(|| request.key.clone());

        let price = resolved
            .map(|found| found.unit_price())
            .or(request.price_override)
            .filter(|price| *price > Decimal::ZERO);

        let Some(price) = price else {
            error!(item = %name, "missing or invalid price for item");

            return Err(AddItemError::PriceUnavailable(name));
        };

        let mut cart = self.store.load();
        let line = cart.merge(LineItem::new(key, name, price, quantity)?)?.clone();

        self.store.save(&cart)?;

        debug!(
            key = line.key(),
            added = quantity,
            quantity = line.quantity(),
            "added item to cart"
        );

        Ok(Added { quantity, line })
    }

    /// Remove an item. Removing a key that is not in the cart is a no-op.
    ///
    /// Returns whether an item was removed.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the updated cart cannot be saved.
    pub fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        let mut cart = self.store.load();

        if cart.remove(key).is_none() {
            return Ok(false);
        }

        self.store.save(&cart)?;

        debug!(key, "removed item from cart");

        Ok(true)
    }

    /// Remove the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend delete fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.clear()
    }

    /// The catalog used for lookups.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Borrow the store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Release the store.
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }
}
