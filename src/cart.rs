//! Cart
//!
//! The cart is the single source of truth for a customer's selections. Every
//! rendered view is recomputed from it.
//!
//! The serialised form matches carts written by the existing order site: an
//! object keyed by item key, each value `{ "id", "name", "price", "qty" }`.

use std::collections::{BTreeMap, btree_map::Entry};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{DISPLAY_PLACES, within_limit};

/// Errors raised when a cart mutation would break a line item invariant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Line items must have a non-empty key.
    #[error("Line item key must not be empty")]
    EmptyKey,

    /// Quantities must be at least one.
    #[error("Quantity for {0} must be at least 1")]
    InvalidQuantity(String),

    /// Unit prices must be strictly positive.
    #[error("Unit price for {0} must be positive")]
    NonPositivePrice(String),

    /// Unit prices carry at most two decimal places.
    #[error("Unit price for {0} has more than two decimal places")]
    PriceTooPrecise(String),

    /// A line total or the cart subtotal exceeds the amount limit.
    #[error("Total for {0} overflowed")]
    TotalOverflow(String),

    /// Accumulated quantity no longer fits.
    #[error("Quantity for {0} overflowed")]
    QuantityOverflow(String),

    /// A stored entry is filed under a different key than its own (map key, item key).
    #[error("Entry stored under {0} belongs to {1}")]
    KeyMismatch(String, String),
}

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRecord", into = "LineItemRecord")]
pub struct LineItem {
    key: String,
    display_name: String,
    unit_price: Decimal,
    quantity: u32,
    line_total: Decimal,
}

/// Storage shape of a [`LineItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LineItemRecord {
    id: String,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    qty: u32,
}

impl TryFrom<LineItemRecord> for LineItem {
    type Error = CartError;

    fn try_from(record: LineItemRecord) -> Result<Self, Self::Error> {
        LineItem::new(record.id, record.name, record.price, record.qty)
    }
}

impl From<LineItem> for LineItemRecord {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.key,
            name: item.display_name,
            price: item.unit_price,
            qty: item.quantity,
        }
    }
}

impl LineItem {
    /// Create a line item.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the key is empty, the quantity is zero, the
    /// unit price is not positive or has more than two decimal places, or the
    /// line total exceeds [`MAX_AMOUNT`](crate::money::MAX_AMOUNT).
    pub fn new(
        key: impl Into<String>,
        display_name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let key = key.into();

        if key.is_empty() {
            return Err(CartError::EmptyKey);
        }

        if quantity == 0 {
            return Err(CartError::InvalidQuantity(key));
        }

        if unit_price <= Decimal::ZERO {
            return Err(CartError::NonPositivePrice(key));
        }

        if unit_price.normalize().scale() > DISPLAY_PLACES {
            return Err(CartError::PriceTooPrecise(key));
        }

        let Some(line_total) = checked_line_total(unit_price, quantity) else {
            return Err(CartError::TotalOverflow(key));
        };

        Ok(Self {
            key,
            display_name: display_name.into(),
            unit_price,
            quantity,
            line_total,
        })
    }

    /// Item key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Unit price, fixed when the key was first added
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Quantity
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }

    /// Increase the quantity in place.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the quantity does not fit, or
    /// [`CartError::TotalOverflow`] if the line total does not. The item is
    /// unchanged on error.
    pub fn add_quantity(&mut self, quantity: u32) -> Result<(), CartError> {
        let quantity = self
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| CartError::QuantityOverflow(self.key.clone()))?;

        let line_total = checked_line_total(self.unit_price, quantity)
            .ok_or_else(|| CartError::TotalOverflow(self.key.clone()))?;

        self.quantity = quantity;
        self.line_total = line_total;

        Ok(())
    }
}

fn checked_line_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .filter(|total| within_limit(*total))
}

fn checked_subtotal<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Option<Decimal> {
    items
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total))
        .filter(|total| within_limit(*total))
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, LineItem>")]
pub struct Cart {
    items: BTreeMap<String, LineItem>,
}

impl TryFrom<BTreeMap<String, LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: BTreeMap<String, LineItem>) -> Result<Self, Self::Error> {
        if let Some((stored_under, item)) = items.iter().find(|(key, item)| *key != item.key()) {
            return Err(CartError::KeyMismatch(
                stored_under.clone(),
                item.key().to_string(),
            ));
        }

        let mut subtotal = Decimal::ZERO;

        for (key, item) in &items {
            subtotal = subtotal
                .checked_add(item.line_total)
                .filter(|total| within_limit(*total))
                .ok_or_else(|| CartError::TotalOverflow(key.clone()))?;
        }

        Ok(Self { items })
    }
}

impl Serialize for Cart {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a line item into the cart.
    ///
    /// If the key is already present only the quantity grows; the stored name
    /// and price are kept. Otherwise the item is inserted as given.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity does not
    /// fit, or [`CartError::TotalOverflow`] if the line total or the cart
    /// subtotal would exceed [`MAX_AMOUNT`](crate::money::MAX_AMOUNT). The cart
    /// is unchanged on error.
    pub fn merge(&mut self, item: LineItem) -> Result<&LineItem, CartError> {
        let merged = match self.items.get(&item.key) {
            Some(existing) => {
                let mut merged = existing.clone();
                merged.add_quantity(item.quantity)?;
                merged
            }
            None => item,
        };

        let others = self.items.values().filter(|other| other.key != merged.key);

        if checked_subtotal(others.chain([&merged])).is_none() {
            return Err(CartError::TotalOverflow(merged.key));
        }

        match self.items.entry(merged.key.clone()) {
            Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                *existing = merged;

                Ok(&*existing)
            }
            Entry::Vacant(entry) => Ok(&*entry.insert(merged)),
        }
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<LineItem> {
        self.items.remove(key)
    }

    /// Look up an item by key.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.items.get(key)
    }

    /// Whether an item with this key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Line items ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.values()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Decimal {
        self.iter().map(LineItem::line_total).sum()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::collections::btree_map::Values<'a, String, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
