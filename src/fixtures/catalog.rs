//! Catalog Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogAlias, CatalogItem, Section},
    fixtures::FixtureError,
    money::{DISPLAY_PLACES, to_minor_units},
};

/// Wrapper for the catalog YAML document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Menu items, in display order
    pub items: Vec<CatalogItemFixture>,

    /// Legacy display-name aliases
    #[serde(default)]
    pub aliases: Vec<CatalogAliasFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Item key
    pub key: String,

    /// Display name
    pub name: String,

    /// Menu section
    pub section: Section,

    /// Unit price (e.g., "5.00 USD")
    pub price: String,
}

/// Catalog Alias Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogAliasFixture {
    /// Legacy name submitted by old buttons
    pub alias: String,

    /// Canonical key it folds into
    pub key: String,

    /// Display name for the line item
    pub name: String,

    /// Unit price (e.g., "4.50 USD")
    pub price: String,
}

impl TryFrom<CatalogItemFixture> for CatalogItem {
    type Error = FixtureError;

    fn try_from(fixture: CatalogItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(CatalogItem {
            key: fixture.key,
            name: fixture.name,
            section: fixture.section,
            price: Money::from_minor(minor_units, currency),
        })
    }
}

impl TryFrom<CatalogAliasFixture> for CatalogAlias {
    type Error = FixtureError;

    fn try_from(fixture: CatalogAliasFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(CatalogAlias {
            alias: fixture.alias,
            key: fixture.key,
            name: fixture.name,
            price: Money::from_minor(minor_units, currency),
        })
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let first = fixture.items.first().ok_or(FixtureError::NoItems)?;
        let (_minor_units, currency) = parse_price(&first.price)?;

        let mut catalog = Catalog::new(currency);

        for item_fixture in fixture.items {
            catalog.insert(item_fixture.try_into()?)?;
        }

        for alias_fixture in fixture.aliases {
            catalog.insert_alias(alias_fixture.try_into()?)?;
        }

        Ok(catalog)
    }
}

/// Parse a menu price such as `"9.50 USD"` into minor units and currency.
///
/// Amounts may carry at most two decimal places; `"9.505 USD"` is rejected
/// rather than rounded.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] for a malformed or overly precise
/// amount and [`FixtureError::UnknownCurrency`] for a code the menu does not
/// price in.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let (amount, code) = s.trim().split_once(' ').ok_or_else(invalid)?;
    let amount: Decimal = amount.parse().map_err(|_err| invalid())?;

    if amount.normalize().scale() > DISPLAY_PLACES {
        return Err(invalid());
    }

    let currency = match code.trim() {
        "USD" => USD,
        "GBP" => GBP,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let minor_units = to_minor_units(amount).ok_or_else(invalid)?;

    Ok((minor_units, currency))
}
