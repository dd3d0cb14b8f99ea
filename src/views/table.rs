//! Checkout cart table

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    gating::{self, FieldState, GateState},
    money::format_amount,
    pricing::{FormattedTotals, Totals},
};

/// Shown in place of the rows when the cart is empty.
pub const TABLE_EMPTY_MESSAGE: &str = "Your cart is empty. Please return to the Order Now page.";

/// Errors raised while writing a table.
#[derive(Debug, Error)]
pub enum ViewError {
    /// IO error
    #[error("failed to write cart table: {0}")]
    Io(#[from] io::Error),
}

/// One checkout table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Item key, also the removal target
    pub key: String,

    /// Display name
    pub name: String,

    /// Quantity
    pub quantity: u32,

    /// Formatted line total
    pub line_total: String,
}

/// Full cart table for the checkout page.
///
/// Building the table also evaluates the place-order gate for the same cart,
/// so the button state can never lag behind the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTableView {
    /// One row per item, ordered by key
    pub rows: Vec<TableRow>,

    /// Subtotal, tax and grand total
    pub totals: FormattedTotals,

    /// Place-order gate for this cart
    pub gate: GateState,
}

impl CartTableView {
    /// Build the table for a cart and the page's tracked fields.
    pub fn build<'f>(
        cart: &Cart,
        fields: impl IntoIterator<Item = &'f FieldState>,
        tax_rate: Decimal,
        currency: &Currency,
    ) -> Self {
        let rows = cart
            .iter()
            .map(|item| TableRow {
                key: item.key().to_string(),
                name: item.display_name().to_string(),
                quantity: item.quantity(),
                line_total: format_amount(item.line_total(), currency),
            })
            .collect();

        Self {
            rows,
            totals: Totals::for_cart(cart, tax_rate).formatted(currency),
            gate: gating::evaluate(cart, fields),
        }
    }

    /// Empty-state message, present only when there are no rows.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(TABLE_EMPTY_MESSAGE)
    }

    /// Write the table and totals as text.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the writer fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ViewError> {
        if let Some(message) = self.empty_message() {
            writeln!(out, "{message}")?;
        } else {
            writeln!(out, "{}", self.render_rows())?;
        }

        let width = [
            &self.totals.subtotal,
            &self.totals.tax,
            &self.totals.grand_total,
        ]
        .iter()
        .map(|value| value.len())
        .max()
        .unwrap_or_default();

        writeln!(out, " Subtotal:  {:>width$}", self.totals.subtotal)?;
        writeln!(out, "      Tax:  {:>width$}", self.totals.tax)?;
        writeln!(out, "    Total:  {:>width$}", self.totals.grand_total)?;

        if let Some(message) = self.gate.message() {
            writeln!(out, "\n{}", message.text())?;
        }

        Ok(())
    }

    fn render_rows(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Key", "Item", "Qty", "Total"]);

        for row in &self.rows {
            builder.push_record([
                row.key.clone(),
                row.name.clone(),
                row.quantity.to_string(),
                row.line_total.clone(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(2..4), Alignment::right());
        table.modify(Rows::first(), Alignment::left());

        table.to_string()
    }
}
