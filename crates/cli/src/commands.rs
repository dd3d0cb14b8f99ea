//! Command handlers
//!
//! Each handler writes its report to `out` and returns whether the command
//! did what was asked, which becomes the process exit status.

use std::io::Write;

use anyhow::Result;
use crumb::{
    actions::{Navigator, Notifier, add_to_cart, confirm_and_remove, place_order},
    catalog::{Catalog, Section},
    config::CartConfig,
    gating::{FieldState, GateMessage},
    money::format_amount,
    pickup::PickupDetails,
    service::{AddItem, CartService},
    store::KeyValueStorage,
    views::{CartTableView, PreviewView},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing::info;

use crate::config::{AddArgs, CheckoutArgs};

/// Print the menu, one table per section, then the favourites.
pub(crate) fn menu(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    let currency = catalog.currency();

    for section in Section::ALL {
        let mut builder = Builder::default();

        builder.push_record(["Key", "Item", "Price"]);

        for item in catalog.section(section) {
            builder.push_record([
                item.key.clone(),
                item.name.clone(),
                format_amount(item.unit_price(), currency),
            ]);
        }

        writeln!(out, "{}", section.title())?;
        writeln!(out, "{}", menu_table(builder))?;
    }

    let favorites = catalog.favorites();

    if !favorites.is_empty() {
        let mut builder = Builder::default();

        builder.push_record(["Favorite", "Adds", "Price"]);

        for favorite in favorites {
            builder.push_record([
                favorite.alias.clone(),
                favorite.key.clone(),
                format_amount(favorite.unit_price(), currency),
            ]);
        }

        writeln!(out, "Signature Favorites")?;
        writeln!(out, "{}", menu_table(builder))?;
    }

    Ok(())
}

fn menu_table(builder: Builder) -> String {
    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::last(), Alignment::right());

    table.to_string()
}

/// Add an item, then show the preview.
pub(crate) fn add<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    args: AddArgs,
    notifier: &impl Notifier,
    out: &mut impl Write,
) -> Result<bool> {
    let mut request = AddItem::new(args.key, args.qty);

    if let Some(name) = args.name {
        request = request.with_name(name);
    }

    if let Some(price) = args.price {
        request = request.with_price(price);
    }

    let added = add_to_cart(service, request, notifier).is_some();

    if added {
        preview(service, out)?;
    }

    Ok(added)
}

/// Remove a line after confirmation, then show the table.
pub(crate) fn remove<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    key: &str,
    config: &CartConfig,
    notifier: &impl Notifier,
    out: &mut impl Write,
) -> Result<bool> {
    if !service.cart().contains(key) {
        notifier.error(&format!("{key} is not in your cart."));

        return Ok(false);
    }

    if !confirm_and_remove(service, key, notifier)? {
        writeln!(out, "Nothing removed.")?;

        return Ok(true);
    }

    show(service, config, out)?;

    Ok(true)
}

/// Print the order page preview.
pub(crate) fn preview<S: KeyValueStorage>(
    service: &CartService<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let view = PreviewView::from_cart(&service.cart(), service.catalog().currency());

    if let Some(message) = view.empty_message() {
        writeln!(out, "{message}")?;
    }

    for line in &view.lines {
        writeln!(out, "{}", line.text)?;
    }

    writeln!(out, "Subtotal: {}", view.subtotal)?;

    Ok(())
}

/// Print the checkout table and totals.
pub(crate) fn show<S: KeyValueStorage>(
    service: &CartService<'_, S>,
    config: &CartConfig,
    out: &mut impl Write,
) -> Result<()> {
    table(service, &[], config, out)
}

fn table<S: KeyValueStorage>(
    service: &CartService<'_, S>,
    fields: &[FieldState],
    config: &CartConfig,
    out: &mut impl Write,
) -> Result<()> {
    let view = CartTableView::build(
        &service.cart(),
        fields,
        config.tax_rate,
        service.catalog().currency(),
    );

    view.write_to(&mut *out)?;

    Ok(())
}

/// Validate the pickup form and place the order.
pub(crate) fn checkout<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    args: &CheckoutArgs,
    config: &CartConfig,
    notifier: &impl Notifier,
    navigator: &impl Navigator,
    out: &mut impl Write,
) -> Result<bool> {
    let details = PickupDetails::from(args);
    let fields = details.fields();

    table(service, &fields, config, out)?;

    let gate = place_order(service, &fields, config, notifier, navigator)?;

    if gate.message() == Some(GateMessage::InvalidFields) {
        writeln!(out, "Check: {}", details.invalid_fields().join(", "))?;
    }

    if gate.is_enabled() {
        info!(customer = args.name.as_deref().unwrap_or_default(), "checkout complete");
    }

    Ok(gate.is_enabled())
}

/// Empty the cart.
pub(crate) fn clear<S: KeyValueStorage>(
    service: &mut CartService<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    service.clear()?;

    writeln!(out, "Cart cleared.")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, time::Duration};

    use crumb::{
        fixtures::bakery_catalog,
        store::{CartStore, MemoryStorage},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;
    use crate::terminal::{TerminalNavigator, TerminalNotifier};

    type TestNotifier = TerminalNotifier<Vec<u8>, Vec<u8>, Cursor<String>>;

    fn notifier(input: &str, assume_yes: bool) -> TestNotifier {
        TerminalNotifier::new(Vec::new(), Vec::new(), Cursor::new(input.to_string()), assume_yes)
    }

    fn add_args(key: &str, qty: i64) -> AddArgs {
        AddArgs {
            key: key.to_string(),
            qty,
            name: None,
            price: None,
        }
    }

    fn config() -> CartConfig {
        CartConfig {
            redirect_delay: Duration::ZERO,
            ..CartConfig::default()
        }
    }

    #[test]
    fn menu_lists_sections_and_favorites() -> TestResult {
        let catalog = bakery_catalog()?;
        let mut out = Vec::new();

        menu(&catalog, &mut out)?;

        let text = String::from_utf8(out)?;

        for heading in ["Breads", "Pastries", "Cakes & Specialty", "Signature Favorites"] {
            assert!(text.contains(heading), "missing {heading}");
        }

        assert!(text.contains("sourdough-loaf"));
        assert!(text.contains("$10.00"));
        assert!(text.contains("NY Cheesecake Slice"));

        Ok(())
    }

    #[test]
    fn add_prints_preview() -> TestResult {
        let catalog = bakery_catalog()?;
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let notifier = notifier("", false);
        let mut out = Vec::new();

        assert!(add(&mut service, add_args("ciabatta", 2), &notifier, &mut out)?);
        assert!(add(&mut service, add_args("ciabatta", 1), &notifier, &mut out)?);

        let text = String::from_utf8(out)?;
        let (messages, _) = notifier.into_parts();

        assert_eq!(
            String::from_utf8(messages)?,
            "2 x Ciabatta added to cart!\n1 x Ciabatta added to cart!\n"
        );
        assert!(text.contains("Ciabatta (3 x) - $15.00"));
        assert!(text.contains("Subtotal: $15.00"));

        Ok(())
    }

    #[test]
    fn add_failure_is_reported() -> TestResult {
        let catalog = bakery_catalog()?;
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let notifier = notifier("", false);
        let mut out = Vec::new();

        assert!(!add(&mut service, add_args("ciabatta", -1), &notifier, &mut out)?);
        assert!(!add(&mut service, add_args("baguette", 1), &notifier, &mut out)?);

        let (_, errors) = notifier.into_parts();

        assert_eq!(
            String::from_utf8(errors)?,
            "Quantity must be a positive number.\nError: Item price missing. Cannot add to cart.\n"
        );
        assert!(out.is_empty());

        Ok(())
    }

    #[test]
    fn add_with_overrides() -> TestResult {
        let catalog = bakery_catalog()?;
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let notifier = notifier("", false);
        let mut out = Vec::new();

        let args = AddArgs {
            name: Some("Seasonal Stollen".to_string()),
            price: Some(Decimal::new(1200, 2)),
            ..add_args("seasonal-stollen", 1)
        };

        assert!(add(&mut service, args, &notifier, &mut out)?);
        assert!(String::from_utf8(out)?.contains("Seasonal Stollen (1 x) - $12.00"));

        Ok(())
    }

    #[test]
    fn remove_respects_answer() -> TestResult {
        let catalog = bakery_catalog()?;
        let config = config();
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let mut out = Vec::new();

        service.add_item(AddItem::new("classic-rye", 1))?;

        assert!(remove(&mut service, "classic-rye", &config, &notifier("n\n", false), &mut out)?);
        assert!(service.cart().contains("classic-rye"));

        assert!(remove(&mut service, "classic-rye", &config, &notifier("y\n", false), &mut out)?);
        assert!(service.cart().is_empty());

        assert!(!remove(&mut service, "classic-rye", &config, &notifier("", true), &mut out)?);

        Ok(())
    }

    #[test]
    fn checkout_with_invalid_fields_keeps_cart() -> TestResult {
        let catalog = bakery_catalog()?;
        let config = config();
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let navigator = TerminalNavigator::new(Vec::new());
        let mut out = Vec::new();

        service.add_item(AddItem::new("almond", 2))?;

        let args = CheckoutArgs {
            name: Some("Ada".to_string()),
            ..CheckoutArgs::default()
        };

        assert!(!checkout(&mut service, &args, &config, &notifier("", false), &navigator, &mut out)?);

        let text = String::from_utf8(out)?;

        assert!(text.contains("Please fill out all required fields correctly."));
        assert!(text.contains("Check: customer-email, customer-phone, pickup-time"));
        assert!(service.cart().contains("almond"));
        assert!(navigator.into_inner().is_empty());

        Ok(())
    }

    #[test]
    fn checkout_places_order_and_clears() -> TestResult {
        let catalog = bakery_catalog()?;
        let config = config();
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let notifier = notifier("", false);
        let navigator = TerminalNavigator::new(Vec::new());
        let mut out = Vec::new();

        service.add_item(AddItem::new("ciabatta", 3))?;

        let args = CheckoutArgs {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("555-010-2030".to_string()),
            pickup: Some("Saturday 9am".to_string()),
            notes: None,
        };

        assert!(checkout(&mut service, &args, &config, &notifier, &navigator, &mut out)?);

        let text = String::from_utf8(out)?;
        let (messages, _) = notifier.into_parts();

        assert!(text.contains("Total:  $16.05"));
        assert_eq!(
            String::from_utf8(messages)?,
            "Order Placed Successfully! We will send a confirmation email.\n"
        );
        assert_eq!(String::from_utf8(navigator.into_inner())?, "Returning to index.html\n");
        assert!(service.cart().is_empty());

        Ok(())
    }

    #[test]
    fn empty_cart_checkout_is_refused() -> TestResult {
        let catalog = bakery_catalog()?;
        let config = config();
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let navigator = TerminalNavigator::new(Vec::new());
        let mut out = Vec::new();

        assert!(!checkout(
            &mut service,
            &CheckoutArgs::default(),
            &config,
            &notifier("", false),
            &navigator,
            &mut out
        )?);

        let text = String::from_utf8(out)?;

        assert!(text.contains("Your cart is empty. Please return to the Order Now page."));
        assert!(!text.contains("Check:"));

        Ok(())
    }

    #[test]
    fn clear_reports() -> TestResult {
        let catalog = bakery_catalog()?;
        let mut service = CartService::new(&catalog, CartStore::new(MemoryStorage::new()));
        let mut out = Vec::new();

        service.add_item(AddItem::new("cinnamon", 4))?;
        clear(&mut service, &mut out)?;

        assert!(service.cart().is_empty());
        assert_eq!(String::from_utf8(out)?, "Cart cleared.\n");

        Ok(())
    }
}
