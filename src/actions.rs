//! Actions
//!
//! Handler-level flows shared by the bindings: run a cart operation, tell the
//! customer what happened, and navigate when the order is placed. The page
//! collaborators (alerts, confirm prompts, redirects) sit behind [`Notifier`]
//! and [`Navigator`].

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    cart::CartError,
    config::CartConfig,
    gating::{self, FieldState, GateState},
    service::{AddItem, AddItemError, Added, CartService},
    store::{KeyValueStorage, StoreError},
};

/// Shown when a quantity is missing, zero or negative.
pub const INVALID_QUANTITY_MESSAGE: &str = "Quantity must be a positive number.";

/// Shown when no price could be resolved for an item.
pub const PRICE_MISSING_MESSAGE: &str = "Error: Item price missing. Cannot add to cart.";

/// Shown when a supplied price has more than two decimal places.
pub const INVALID_PRICE_MESSAGE: &str = "Error: Item price is invalid. Cannot add to cart.";

/// Shown when an add would take a line or the cart past the amount limit.
pub const CART_LIMIT_MESSAGE: &str = "That is more than a single order can hold.";

/// Shown when the order page selection is blank.
pub const INVALID_SELECTION_MESSAGE: &str = "Please select a valid item type.";

/// Shown when the cart could not be written.
pub const STORAGE_FAILURE_MESSAGE: &str = "Your cart could not be saved. Please try again.";

/// Asked before removing a line.
pub const REMOVE_CONFIRMATION: &str = "Are you sure you want to remove this item?";

/// Shown once an order is placed.
pub const ORDER_PLACED_MESSAGE: &str =
    "Order Placed Successfully! We will send a confirmation email.";

/// Customer-facing notification channel.
#[cfg_attr(test, automock)]
pub trait Notifier {
    /// Report a success.
    fn success(&self, message: &str);

    /// Report a failure.
    fn error(&self, message: &str);

    /// Ask a yes/no question, returning `true` for yes.
    fn confirm(&self, question: &str) -> bool;
}

/// Page navigation.
#[cfg_attr(test, automock)]
pub trait Navigator {
    /// Leave the current page for `target` once `delay` has passed.
    fn redirect(&self, target: &str, delay: Duration);
}

/// A raw order-page selection, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Selected item key (`""` or `"none"` when nothing was chosen)
    pub key: &'a str,

    /// Quantity input text
    pub quantity: &'a str,

    /// Visible option label, used as the name fallback
    pub label: Option<&'a str>,

    /// Price advertised by the option, used as the price fallback
    pub price: Option<Decimal>,
}

impl Selection<'_> {
    /// Turn the selection into an add request.
    ///
    /// # Errors
    ///
    /// Returns the message to show when nothing was selected or the quantity
    /// is not a positive integer.
    pub fn to_request(&self) -> Result<AddItem, &'static str> {
        let key = self.key.trim();

        if key.is_empty() || key == "none" {
            return Err(INVALID_SELECTION_MESSAGE);
        }

        let quantity = parse_quantity(self.quantity).ok_or(INVALID_QUANTITY_MESSAGE)?;
        let mut request = AddItem::new(key, quantity);

        if let Some(label) = self.label.map(display_label).filter(|label| !label.is_empty()) {
            request = request.with_name(label);
        }

        if let Some(price) = self.price {
            request = request.with_price(price);
        }

        Ok(request)
    }
}

/// Parse a quantity input. Only positive integers are accepted.
pub fn parse_quantity(input: &str) -> Option<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity > 0)
}

/// Strip a trailing price hint from an option label: `"Rye (9.50)"` -> `"Rye"`.
pub fn display_label(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim()
}

/// Add an item and notify the customer of the outcome.
///
/// Returns the merged line on success; failures have already been reported.
pub fn add_to_cart<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    request: AddItem,
    notifier: &impl Notifier,
) -> Option<Added> {
    match service.add_item(request) {
        Ok(added) => {
            notifier.success(&format!(
                "{} x {} added to cart!",
                added.quantity,
                added.line.display_name()
            ));

            Some(added)
        }
        Err(error) => {
            notifier.error(add_error_message(&error));

            None
        }
    }
}

/// Message shown for a failed add.
pub fn add_error_message(error: &AddItemError) -> &'static str {
    match error {
        AddItemError::InvalidQuantity(_) => INVALID_QUANTITY_MESSAGE,
        AddItemError::PriceUnavailable(_) => PRICE_MISSING_MESSAGE,
        AddItemError::EmptyKey | AddItemError::Cart(CartError::EmptyKey) => {
            INVALID_SELECTION_MESSAGE
        }
        AddItemError::Cart(CartError::NonPositivePrice(_) | CartError::PriceTooPrecise(_)) => {
            INVALID_PRICE_MESSAGE
        }
        AddItemError::Cart(
            CartError::QuantityOverflow(_)
            | CartError::TotalOverflow(_)
            | CartError::InvalidQuantity(_)
            | CartError::KeyMismatch(..),
        ) => CART_LIMIT_MESSAGE,
        AddItemError::Store(_) => STORAGE_FAILURE_MESSAGE,
    }
}

/// Ask for confirmation, then remove the line.
///
/// Returns whether an item was removed.
///
/// # Errors
///
/// Returns a [`StoreError`] if the updated cart cannot be saved; the customer
/// has already been told.
pub fn confirm_and_remove<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    key: &str,
    notifier: &impl Notifier,
) -> Result<bool, StoreError> {
    if !notifier.confirm(REMOVE_CONFIRMATION) {
        return Ok(false);
    }

    service
        .remove_item(key)
        .inspect_err(|_error| notifier.error(STORAGE_FAILURE_MESSAGE))
}

/// Place the order if the gate allows it.
///
/// When enabled the cart is cleared, then the customer is notified and the
/// page redirects to the landing page after the configured delay. When
/// disabled nothing happens. The gate state that was acted on is returned.
///
/// # Errors
///
/// Returns a [`StoreError`] if the cart cannot be cleared. The customer sees
/// the storage failure instead of the success message and no redirect
/// happens.
pub fn place_order<'f, S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    fields: impl IntoIterator<Item = &'f FieldState>,
    config: &CartConfig,
    notifier: &impl Notifier,
    navigator: &impl Navigator,
) -> Result<GateState, StoreError> {
    let cart = service.cart();
    let gate = gating::evaluate(&cart, fields);

    if let GateState::Disabled(reason) = gate {
        warn!(?reason, "place order attempted while disabled");

        return Ok(gate);
    }

    service
        .clear()
        .inspect_err(|_error| notifier.error(STORAGE_FAILURE_MESSAGE))?;

    notifier.success(ORDER_PLACED_MESSAGE);

    info!(
        items = cart.len(),
        quantity = cart.total_quantity(),
        "order placed"
    );

    navigator.redirect(&config.landing_page, config.redirect_delay);

    Ok(gate)
}
