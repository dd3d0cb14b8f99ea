//! Fixtures
//!
//! YAML fixture loading. The bakery menu ships embedded in the binary so the
//! browser build needs no file access.

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};

pub mod catalog;

/// The Cozy Crumb menu.
pub const BAKERY_CATALOG_YAML: &str = include_str!("../../fixtures/catalog/bakery.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// No items in the catalog fixture
    #[error("No items loaded; catalog currency unknown")]
    NoItems,

    /// Catalog construction error
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Parse a catalog from YAML.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed, a price cannot be
/// parsed, or the catalog rejects an entry.
pub fn load_catalog(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: catalog::CatalogFixture = serde_norway::from_str(yaml)?;

    Catalog::try_from(fixture)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_catalog_file(path: impl AsRef<std::path::Path>) -> Result<Catalog, FixtureError> {
    let contents = std::fs::read_to_string(path)?;

    load_catalog(&contents)
}

/// The embedded bakery menu.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the embedded fixture is invalid.
pub fn bakery_catalog() -> Result<Catalog, FixtureError> {
    load_catalog(BAKERY_CATALOG_YAML)
}
