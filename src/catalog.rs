//! Catalog
//!
//! The fixed menu of purchasable items. Lookups go through [`Catalog::resolve`],
//! which tries the canonical key first and only then the legacy alias table.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::money::from_minor_units;

new_key_type! {
    /// Catalog Key
    pub struct CatalogKey;
}

/// Errors raised while building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An item was registered with an empty key.
    #[error("Catalog item keys must not be empty")]
    EmptyKey,

    /// The same key was registered twice.
    #[error("Duplicate catalog key: {0}")]
    DuplicateKey(String),

    /// Catalog prices must be strictly positive.
    #[error("Catalog price for {0} must be positive")]
    NonPositivePrice(String),

    /// Item currency differs from the catalog currency (key, item currency, catalog currency).
    #[error("Item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),

    /// An alias points at a key the catalog does not contain (alias, target).
    #[error("Alias {0} refers to unknown catalog key {1}")]
    UnknownAliasTarget(String, String),

    /// The same alias was registered twice.
    #[error("Duplicate alias: {0}")]
    DuplicateAlias(String),
}

/// Menu section an item is listed under on the order page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Loaves
    Breads,

    /// Croissants, rolls
    Pastries,

    /// Tarts, slices, donuts
    Cakes,
}

impl Section {
    /// Sections in page order.
    pub const ALL: [Section; 3] = [Section::Breads, Section::Pastries, Section::Cakes];

    /// Heading shown above the section.
    pub fn title(self) -> &'static str {
        match self {
            Section::Breads => "Breads",
            Section::Pastries => "Pastries",
            Section::Cakes => "Cakes & Specialty",
        }
    }
}

/// Catalog Item
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    /// Item key, as submitted by the order page
    pub key: String,

    /// Display name
    pub name: String,

    /// Menu section
    pub section: Section,

    /// Unit price
    pub price: Money<'static, Currency>,
}

impl CatalogItem {
    /// Unit price as a decimal amount.
    pub fn unit_price(&self) -> Decimal {
        from_minor_units(self.price.to_minor_units())
    }
}

/// A legacy display-name alias for a catalog entry.
///
/// Aliases exist for old "Signature Favorites" buttons that submit a display
/// name instead of a key. New integrations should pass catalog keys.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogAlias {
    /// The legacy name that is looked up
    pub alias: String,

    /// Canonical catalog key the alias folds into
    pub key: String,

    /// Display name used for the line item
    pub name: String,

    /// Price used for the line item
    pub price: Money<'static, Currency>,
}

impl CatalogAlias {
    /// Unit price as a decimal amount.
    pub fn unit_price(&self) -> Decimal {
        from_minor_units(self.price.to_minor_units())
    }
}

/// Result of a successful catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'c> {
    /// Exact key match.
    Canonical(&'c CatalogItem),

    /// Matched through the legacy alias table.
    Alias(&'c CatalogAlias),
}

impl Resolution<'_> {
    /// Canonical key the item is stored under.
    pub fn key(&self) -> &str {
        match self {
            Resolution::Canonical(item) => &item.key,
            Resolution::Alias(alias) => &alias.key,
        }
    }

    /// Display name for the resolved item.
    pub fn name(&self) -> &str {
        match self {
            Resolution::Canonical(item) => &item.name,
            Resolution::Alias(alias) => &alias.name,
        }
    }

    /// Unit price for the resolved item.
    pub fn unit_price(&self) -> Decimal {
        match self {
            Resolution::Canonical(item) => item.unit_price(),
            Resolution::Alias(alias) => alias.unit_price(),
        }
    }

    /// Whether the lookup fell through to the alias table.
    pub fn is_alias(&self) -> bool {
        matches!(self, Resolution::Alias(_))
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    items: SlotMap<CatalogKey, CatalogItem>,
    keys: FxHashMap<String, CatalogKey>,
    aliases: FxHashMap<String, CatalogAlias>,
    currency: &'static Currency,
}

impl Catalog {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: SlotMap::with_key(),
            keys: FxHashMap::default(),
            aliases: FxHashMap::default(),
            currency,
        }
    }

    /// Register an item.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the key is empty or already present, the
    /// price is not positive, or the price currency differs from the catalog's.
    pub fn insert(&mut self, item: CatalogItem) -> Result<CatalogKey, CatalogError> {
        if item.key.is_empty() {
            return Err(CatalogError::EmptyKey);
        }

        if self.keys.contains_key(&item.key) {
            return Err(CatalogError::DuplicateKey(item.key));
        }

        self.check_price(&item.key, &item.price)?;

        let key = item.key.clone();
        let catalog_key = self.items.insert(item);

        self.keys.insert(key, catalog_key);

        Ok(catalog_key)
    }

    /// Register a legacy alias.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the alias targets an unknown key, is
    /// already registered, or carries an invalid price.
    pub fn insert_alias(&mut self, alias: CatalogAlias) -> Result<(), CatalogError> {
        if !self.keys.contains_key(&alias.key) {
            return Err(CatalogError::UnknownAliasTarget(alias.alias, alias.key));
        }

        if self.aliases.contains_key(&alias.alias) {
            return Err(CatalogError::DuplicateAlias(alias.alias));
        }

        self.check_price(&alias.alias, &alias.price)?;

        self.aliases.insert(alias.alias.clone(), alias);

        Ok(())
    }

    fn check_price(&self, key: &str, price: &Money<'static, Currency>) -> Result<(), CatalogError> {
        if price.currency() != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                key.to_string(),
                price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if price.to_minor_units() <= 0 {
            return Err(CatalogError::NonPositivePrice(key.to_string()));
        }

        Ok(())
    }

    /// Look up an item by key, falling back to the alias table.
    pub fn resolve(&self, key: &str) -> Option<Resolution<'_>> {
        if let Some(item) = self.get(key) {
            return Some(Resolution::Canonical(item));
        }

        self.aliases.get(key).map(Resolution::Alias)
    }

    /// Exact key lookup, ignoring aliases.
    pub fn get(&self, key: &str) -> Option<&CatalogItem> {
        self.keys
            .get(key)
            .and_then(|catalog_key| self.items.get(*catalog_key))
    }

    /// Items in registration (menu) order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    /// Items listed under a section, in menu order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &CatalogItem> {
        self.iter().filter(move |item| item.section == section)
    }

    /// Legacy aliases, ordered by alias name.
    pub fn favorites(&self) -> Vec<&CatalogAlias> {
        let mut favorites: Vec<_> = self.aliases.values().collect();

        favorites.sort_by(|a, b| a.alias.cmp(&b.alias));

        favorites
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn item(key: &str, name: &str, cents: i64) -> CatalogItem {
        CatalogItem {
            key: key.to_string(),
            name: name.to_string(),
            section: Section::Breads,
            price: Money::from_minor(cents, USD),
        }
    }

    fn catalog() -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new(USD);

        catalog.insert(item("croissant", "Butter Croissant", 350))?;
        catalog.insert(item("ciabatta", "Ciabatta", 500))?;
        catalog.insert_alias(CatalogAlias {
            alias: "Butter Croissant".to_string(),
            key: "croissant".to_string(),
            name: "Butter Croissant".to_string(),
            price: Money::from_minor(450, USD),
        })?;

        Ok(catalog)
    }

    #[test]
    fn resolves_canonical_key_first() -> TestResult {
        let catalog = catalog()?;

        let resolved = catalog.resolve("croissant").ok_or("croissant missing")?;

        assert!(!resolved.is_alias());
        assert_eq!(resolved.key(), "croissant");
        assert_eq!(resolved.unit_price(), Decimal::new(350, 2));

        Ok(())
    }

    #[test]
    fn falls_back_to_alias_table() -> TestResult {
        let catalog = catalog()?;

        let resolved = catalog
            .resolve("Butter Croissant")
            .ok_or("alias missing")?;

        assert!(resolved.is_alias());
        assert_eq!(resolved.key(), "croissant");
        assert_eq!(resolved.name(), "Butter Croissant");
        assert_eq!(resolved.unit_price(), Decimal::new(450, 2));

        Ok(())
    }

    #[test]
    fn favorites_are_sorted_by_alias() -> TestResult {
        let mut catalog = catalog()?;

        catalog.insert_alias(CatalogAlias {
            alias: "Almond Special".to_string(),
            key: "croissant".to_string(),
            name: "Almond Special".to_string(),
            price: Money::from_minor(500, USD),
        })?;

        let names: Vec<&str> = catalog
            .favorites()
            .into_iter()
            .map(|alias| alias.alias.as_str())
            .collect();

        assert_eq!(names, ["Almond Special", "Butter Croissant"]);

        Ok(())
    }

    #[test]
    fn unknown_key_is_not_found() -> TestResult {
        let catalog = catalog()?;

        assert!(catalog.resolve("baguette").is_none());
        assert!(catalog.get("Butter Croissant").is_none());

        Ok(())
    }

    #[test]
    fn rejects_duplicate_keys() -> TestResult {
        let mut catalog = catalog()?;

        let result = catalog.insert(item("ciabatta", "Ciabatta", 500));

        assert_eq!(result, Err(CatalogError::DuplicateKey("ciabatta".to_string())));

        Ok(())
    }

    #[test]
    fn rejects_non_positive_and_foreign_prices() {
        let mut catalog = Catalog::new(USD);

        assert_eq!(
            catalog.insert(item("free", "Free", 0)),
            Err(CatalogError::NonPositivePrice("free".to_string()))
        );

        let mut foreign = item("scone", "Scone", 200);
        foreign.price = Money::from_minor(200, GBP);

        assert_eq!(
            catalog.insert(foreign),
            Err(CatalogError::CurrencyMismatch(
                "scone".to_string(),
                "GBP",
                "USD"
            ))
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn rejects_alias_to_unknown_key() {
        let mut catalog = Catalog::new(USD);

        let result = catalog.insert_alias(CatalogAlias {
            alias: "The Kraken".to_string(),
            key: "sourdough-loaf".to_string(),
            name: "The Kraken".to_string(),
            price: Money::from_minor(1000, USD),
        });

        assert_eq!(
            result,
            Err(CatalogError::UnknownAliasTarget(
                "The Kraken".to_string(),
                "sourdough-loaf".to_string()
            ))
        );
    }

    #[test]
    fn iterates_in_menu_order() -> TestResult {
        let catalog = catalog()?;

        let keys: Vec<&str> = catalog.iter().map(|item| item.key.as_str()).collect();

        assert_eq!(keys, ["croissant", "ciabatta"]);
        assert_eq!(catalog.len(), 2);

        Ok(())
    }
}
