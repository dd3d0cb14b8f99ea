//! Pricing

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{cart::Cart, money::format_amount};

/// Sales tax applied at checkout: 7%.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Highest accepted tax rate: 100%.
pub const MAX_TAX_RATE: Decimal = Decimal::ONE;

/// Unrounded cart totals.
///
/// Each figure is rounded independently for display, so the displayed grand
/// total may differ by a cent from the sum of the displayed subtotal and tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    subtotal: Decimal,
    tax: Decimal,
    grand_total: Decimal,
}

impl Totals {
    /// Compute totals for a cart.
    ///
    /// The rate is clamped to `0..=`[`MAX_TAX_RATE`]. With the cart's subtotal
    /// bounded by [`MAX_AMOUNT`](crate::money::MAX_AMOUNT) neither the tax nor
    /// the grand total can overflow.
    pub fn for_cart(cart: &Cart, tax_rate: Decimal) -> Self {
        let subtotal = cart.subtotal();
        let tax = subtotal * tax_rate.clamp(Decimal::ZERO, MAX_TAX_RATE);

        Self {
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Subtotal times the tax rate
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Subtotal plus tax
    pub fn grand_total(&self) -> Decimal {
        self.grand_total
    }

    /// Display strings for subtotal, tax and grand total.
    pub fn formatted(&self, currency: &Currency) -> FormattedTotals {
        FormattedTotals {
            subtotal: format_amount(self.subtotal, currency),
            tax: format_amount(self.tax, currency),
            grand_total: format_amount(self.grand_total, currency),
        }
    }
}

/// Display strings for [`Totals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTotals {
    /// Subtotal, e.g. `$15.00`
    pub subtotal: String,

    /// Tax, e.g. `$1.05`
    pub tax: String,

    /// Grand total, e.g. `$16.05`
    pub grand_total: String,
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;
    use crate::{
        cart::{CartError, LineItem},
        money::MAX_AMOUNT,
    };

    fn cart(lines: &[(&str, i64, u32)]) -> Result<Cart, CartError> {
        let mut cart = Cart::new();

        for (key, cents, qty) in lines {
            cart.merge(LineItem::new(*key, *key, Decimal::new(*cents, 2), *qty)?)?;
        }

        Ok(cart)
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = Totals::for_cart(&Cart::new(), DEFAULT_TAX_RATE);

        assert_eq!(totals.subtotal(), Decimal::ZERO);
        assert_eq!(totals.formatted(USD).grand_total, "$0.00");
    }

    #[test]
    fn subtotal_tax_and_grand_total() -> TestResult {
        let cart = cart(&[("ciabatta", 500, 3), ("croissant", 350, 2)])?;

        let totals = Totals::for_cart(&cart, DEFAULT_TAX_RATE);

        assert_eq!(totals.subtotal(), Decimal::new(2200, 2));
        assert_eq!(totals.tax(), Decimal::new(154, 2));
        assert_eq!(totals.grand_total(), Decimal::new(2354, 2));
        assert_eq!(
            totals.formatted(USD),
            FormattedTotals {
                subtotal: "$22.00".to_string(),
                tax: "$1.54".to_string(),
                grand_total: "$23.54".to_string(),
            }
        );

        Ok(())
    }

    #[test]
    fn each_figure_rounds_independently() -> TestResult {
        // 0.35 * 7% = 0.0245 -> $0.02; 0.3745 -> $0.37
        let cart = cart(&[("taste", 35, 1)])?;

        let formatted = Totals::for_cart(&cart, DEFAULT_TAX_RATE).formatted(USD);

        assert_eq!(formatted.subtotal, "$0.35");
        assert_eq!(formatted.tax, "$0.02");
        assert_eq!(formatted.grand_total, "$0.37");

        Ok(())
    }

    #[test]
    fn largest_cart_with_full_tax_is_exact() -> TestResult {
        let mut cart = Cart::new();

        cart.merge(LineItem::new("gold", "Gold Loaf", MAX_AMOUNT, 1)?)?;

        let totals = Totals::for_cart(&cart, Decimal::TEN);

        assert_eq!(totals.tax(), MAX_AMOUNT);
        assert_eq!(totals.grand_total(), MAX_AMOUNT * Decimal::TWO);

        Ok(())
    }
}
