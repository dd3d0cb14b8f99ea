//! Order page cart preview

use rusty_money::iso::Currency;

use crate::{cart::Cart, money::format_amount};

/// Shown in place of the line list when the cart is empty.
pub const PREVIEW_EMPTY_MESSAGE: &str = "Your cart is empty.";

/// One preview line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    /// Item key
    pub key: String,

    /// `"NAME (QTY x) - $TOTAL"`
    pub text: String,
}

/// Short cart summary for the order page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    /// One line per item, ordered by key
    pub lines: Vec<PreviewLine>,

    /// Running subtotal, e.g. `$15.00`
    pub subtotal: String,
}

impl PreviewView {
    /// Build the preview for a cart.
    pub fn from_cart(cart: &Cart, currency: &Currency) -> Self {
        let lines = cart
            .iter()
            .map(|item| PreviewLine {
                key: item.key().to_string(),
                text: format!(
                    "{} ({} x) - {}",
                    item.display_name(),
                    item.quantity(),
                    format_amount(item.line_total(), currency)
                ),
            })
            .collect();

        Self {
            lines,
            subtotal: format_amount(cart.subtotal(), currency),
        }
    }

    /// Empty-state message, present only when there are no lines.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.lines.is_empty().then_some(PREVIEW_EMPTY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;
    use crate::cart::LineItem;

    #[test]
    fn empty_cart_preview() {
        let view = PreviewView::from_cart(&Cart::new(), USD);

        assert!(view.lines.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.empty_message(), Some("Your cart is empty."));
    }

    #[test]
    fn preview_lines_and_subtotal() -> TestResult {
        let mut cart = Cart::new();

        cart.merge(LineItem::new("ciabatta", "Ciabatta", Decimal::new(500, 2), 3)?)?;
        cart.merge(LineItem::new(
            "almond",
            "Almond Croissant",
            Decimal::new(450, 2),
            1,
        )?)?;

        let view = PreviewView::from_cart(&cart, USD);
        let texts: Vec<&str> = view.lines.iter().map(|line| line.text.as_str()).collect();

        assert_eq!(
            texts,
            ["Almond Croissant (1 x) - $4.50", "Ciabatta (3 x) - $15.00"]
        );
        assert_eq!(view.subtotal, "$19.50");
        assert_eq!(view.empty_message(), None);

        Ok(())
    }
}
