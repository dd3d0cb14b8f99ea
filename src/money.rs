//! Money
//!
//! Fixed-point display helpers. Every currency figure shown to a customer goes
//! through [`format_amount`], which rounds half away from zero to two places.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::iso::Currency;

/// Number of fractional digits shown for every currency value.
pub const DISPLAY_PLACES: u32 = 2;

/// Largest amount a cart may hold: `9999999999999.99`.
///
/// Stored carts carry prices as JSON floats, which keep fifteen significant
/// digits exactly.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, DISPLAY_PLACES);

/// Whether an amount is within [`MAX_AMOUNT`] either side of zero.
pub fn within_limit(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Round an amount to display precision, half away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an amount to whole minor units (cents, pence).
///
/// Returns `None` if the rounded amount does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    round_for_display(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.to_i64())
}

/// Convert a minor-unit count back into a decimal amount.
pub fn from_minor_units(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, DISPLAY_PLACES)
}

/// Currency symbol used as a display prefix, empty when the code has none.
pub fn currency_symbol(currency_code: &str) -> &'static str {
    match currency_code {
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    }
}

/// Format an amount with exactly two fractional digits and a currency symbol.
///
/// No digit grouping is applied: `1234.5` renders as `$1234.50`.
pub fn format_amount(amount: Decimal, currency: &Currency) -> String {
    let rounded = round_for_display(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = rounded.abs();
    let code = currency.iso_alpha_code;
    let symbol = currency_symbol(code);

    if symbol.is_empty() {
        format!("{sign}{magnitude:.2} {code}")
    } else {
        format!("{sign}{symbol}{magnitude:.2}")
    }
}
