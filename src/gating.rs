//! Form Gating
//!
//! Decides whether "place order" is enabled. The core never inspects form
//! fields itself; bindings report each tracked field as a [`FieldState`].

use crate::cart::Cart;

/// Validity of one tracked form field, as reported by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Field name, used for diagnostics only
    pub name: String,

    /// Whether the field is currently marked required
    pub required: bool,

    /// Whether the field currently passes its own validation
    pub valid: bool,
}

impl FieldState {
    /// A required field.
    pub fn required(name: impl Into<String>, valid: bool) -> Self {
        Self {
            name: name.into(),
            required: true,
            valid,
        }
    }

    /// An optional field.
    pub fn optional(name: impl Into<String>, valid: bool) -> Self {
        Self {
            name: name.into(),
            required: false,
            valid,
        }
    }
}

/// Reason the place-order action is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateMessage {
    /// Nothing to order.
    EmptyCart,

    /// At least one required field is invalid.
    InvalidFields,
}

impl GateMessage {
    /// Message shown next to the disabled button.
    pub fn text(self) -> &'static str {
        match self {
            GateMessage::EmptyCart => {
                "Your cart is empty. Please add items before placing the order."
            }
            GateMessage::InvalidFields => "Please fill out all required fields correctly.",
        }
    }
}

/// Outcome of a gating check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Place order is enabled.
    Enabled,

    /// Place order is disabled for the given reason.
    Disabled(GateMessage),
}

impl GateState {
    /// Whether the action is enabled.
    pub fn is_enabled(self) -> bool {
        matches!(self, GateState::Enabled)
    }

    /// Message to display, if any.
    pub fn message(self) -> Option<GateMessage> {
        match self {
            GateState::Enabled => None,
            GateState::Disabled(message) => Some(message),
        }
    }

    /// Message text to display; empty when enabled.
    pub fn message_text(self) -> &'static str {
        self.message().map_or("", GateMessage::text)
    }
}

/// Evaluate the gate. An empty cart takes precedence over invalid fields.
pub fn evaluate<'f>(cart: &Cart, fields: impl IntoIterator<Item = &'f FieldState>) -> GateState {
    if cart.is_empty() {
        return GateState::Disabled(GateMessage::EmptyCart);
    }

    let fields_valid = fields
        .into_iter()
        .filter(|field| field.required)
        .all(|field| field.valid);

    if fields_valid {
        GateState::Enabled
    } else {
        GateState::Disabled(GateMessage::InvalidFields)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::cart::LineItem;

    fn filled_cart() -> Result<Cart, crate::cart::CartError> {
        let mut cart = Cart::new();

        cart.merge(LineItem::new("almond", "Almond Croissant", Decimal::new(450, 2), 2)?)?;

        Ok(cart)
    }

    #[test]
    fn empty_cart_with_valid_fields_is_disabled() {
        let fields = [FieldState::required("name", true)];

        let state = evaluate(&Cart::new(), &fields);

        assert_eq!(state, GateState::Disabled(GateMessage::EmptyCart));
        assert_eq!(
            state.message_text(),
            "Your cart is empty. Please add items before placing the order."
        );
    }

    #[test]
    fn empty_cart_wins_over_invalid_fields() {
        let fields = [FieldState::required("email", false)];

        assert_eq!(
            evaluate(&Cart::new(), &fields).message(),
            Some(GateMessage::EmptyCart)
        );
    }

    #[test]
    fn one_invalid_required_field_disables() -> TestResult {
        let fields = [
            FieldState::required("name", true),
            FieldState::required("email", false),
        ];

        let state = evaluate(&filled_cart()?, &fields);

        assert_eq!(state, GateState::Disabled(GateMessage::InvalidFields));
        assert_eq!(
            state.message_text(),
            "Please fill out all required fields correctly."
        );

        Ok(())
    }

    #[test]
    fn optional_fields_never_block() -> TestResult {
        let fields = [
            FieldState::required("name", true),
            FieldState::optional("notes", false),
        ];

        let state = evaluate(&filled_cart()?, &fields);

        assert!(state.is_enabled());
        assert_eq!(state.message_text(), "");

        Ok(())
    }

    #[test]
    fn no_tracked_fields_only_needs_items() -> TestResult {
        assert!(evaluate(&filled_cart()?, &[]).is_enabled());

        Ok(())
    }
}
