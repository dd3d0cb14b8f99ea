//! Cart configuration

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::{DEFAULT_TAX_RATE, MAX_TAX_RATE},
    store::DEFAULT_STORAGE_KEY,
};

/// Page the customer is sent to after a successful order.
pub const DEFAULT_LANDING_PAGE: &str = "index.html";

/// Delay before leaving the checkout page.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Runtime settings shared by the bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Storage slot the cart is persisted under
    pub storage_key: String,

    /// Tax rate as a fraction (0.07 for 7%)
    pub tax_rate: Decimal,

    /// Page to navigate to after checkout
    pub landing_page: String,

    /// Delay before navigating after checkout
    pub redirect_delay: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tax_rate: DEFAULT_TAX_RATE,
            landing_page: DEFAULT_LANDING_PAGE.to_string(),
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }
}

/// YAML shape of [`CartConfig`]; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CartConfigFixture {
    storage_key: Option<String>,
    tax_rate: Option<String>,
    landing_page: Option<String>,
    redirect_delay_ms: Option<u64>,
}

impl CartConfig {
    /// Parse settings from YAML, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML is malformed or the tax rate
    /// cannot be parsed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CartConfigFixture = serde_norway::from_str(yaml)?;
        let defaults = Self::default();

        let tax_rate = match fixture.tax_rate {
            Some(rate) => parse_percentage(&rate)?,
            None => defaults.tax_rate,
        };

        Ok(Self {
            storage_key: fixture.storage_key.unwrap_or(defaults.storage_key),
            tax_rate,
            landing_page: fixture.landing_page.unwrap_or(defaults.landing_page),
            redirect_delay: fixture
                .redirect_delay_ms
                .map_or(defaults.redirect_delay, Duration::from_millis),
        })
    }
}

/// Parse percentage string (e.g., "7%" or "0.07") into a fraction
///
/// Accepts two formats:
/// - Percentage format: "7%" for 7%
/// - Decimal format: "0.07" for 7%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed, is negative, or is above
/// 100%.
pub fn parse_percentage(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    };

    fraction
        .filter(|value| !value.is_sign_negative() && *value <= MAX_TAX_RATE)
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}
