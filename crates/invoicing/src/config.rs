//! Dashboard configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{DEFAULT_AMOUNT_MAX, FilterSpec};
use crate::invoice::CurrencyCode;

pub const DISPLAY_CURRENCY_ENV: &str = "BILLING_DISPLAY_CURRENCY";
pub const DEFAULT_AMOUNT_MAX_ENV: &str = "BILLING_DEFAULT_AMOUNT_MAX";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Currency used to format aggregate amounts.
    pub display_currency: CurrencyCode,
    /// Upper amount bound of the reset filter.
    pub default_amount_max: Decimal,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            display_currency: CurrencyCode::usd(),
            default_amount_max: DEFAULT_AMOUNT_MAX,
        }
    }
}

impl DashboardConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(code) = lookup(DISPLAY_CURRENCY_ENV).filter(|c| !c.trim().is_empty()) {
            config.display_currency = CurrencyCode::new(code);
        }

        if let Some(raw) = lookup(DEFAULT_AMOUNT_MAX_ENV) {
            match raw.trim().parse::<Decimal>() {
                Ok(max) if max >= Decimal::ZERO => config.default_amount_max = max,
                _ => tracing::warn!(
                    value = %raw,
                    "{DEFAULT_AMOUNT_MAX_ENV} is not a non-negative amount; using default"
                ),
            }
        }

        config
    }

    /// The reset filter under this configuration.
    pub fn reset_filter(&self) -> FilterSpec {
        FilterSpec::reset_with_max(self.default_amount_max)
    }
}
