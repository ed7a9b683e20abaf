//! Settings domain types and validation.
//!
//! These are pure domain types with no infrastructure dependencies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{CheckoutPolicy, Currency};

/// Session storage key the cart is mirrored under.
pub const DEFAULT_SESSION_KEY: &str = "techsphere_cart";

/// Default cap on simultaneous transfers per batch.
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: u32 = 4;

/// Default minimum interval between progress events.
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 100;

/// Storefront settings.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Session key for the persisted cart.
    pub session_key: Option<String>,

    /// Flat shipping fee charged on non-empty orders.
    pub flat_shipping: Option<Decimal>,

    /// Tax rate as a fraction (0.08 = 8%).
    pub tax_rate: Option<Decimal>,

    /// Maximum simultaneous transfers per upload batch (1-16).
    pub max_concurrent_uploads: Option<u32>,

    /// Minimum interval between upload progress events, in milliseconds.
    pub progress_interval_ms: Option<u64>,

    /// Base URL uploaded objects are served from.
    pub public_base_url: Option<String>,

    /// Display currency for prices.
    pub currency: Option<Currency>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        let policy = CheckoutPolicy::default();
        Self {
            session_key: Some(DEFAULT_SESSION_KEY.to_string()),
            flat_shipping: Some(policy.flat_shipping),
            tax_rate: Some(policy.tax_rate),
            max_concurrent_uploads: Some(DEFAULT_MAX_CONCURRENT_UPLOADS),
            progress_interval_ms: Some(DEFAULT_PROGRESS_INTERVAL_MS),
            public_base_url: None,
            currency: Some(Currency::Usd),
        }
    }

    /// Get the effective session key (with default fallback).
    #[must_use]
    pub fn effective_session_key(&self) -> &str {
        self.session_key.as_deref().unwrap_or(DEFAULT_SESSION_KEY)
    }

    /// Checkout pricing rules with defaults for unset fields.
    #[must_use]
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        let defaults = CheckoutPolicy::default();
        CheckoutPolicy {
            flat_shipping: self.flat_shipping.unwrap_or(defaults.flat_shipping),
            tax_rate: self.tax_rate.unwrap_or(defaults.tax_rate),
        }
    }

    /// Get the effective upload concurrency (with default fallback).
    #[must_use]
    pub fn effective_max_concurrent_uploads(&self) -> usize {
        self.max_concurrent_uploads
            .unwrap_or(DEFAULT_MAX_CONCURRENT_UPLOADS) as usize
    }

    /// Get the effective progress interval (with default fallback).
    #[must_use]
    pub fn effective_progress_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(
            self.progress_interval_ms
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL_MS),
        )
    }

    /// Get the effective display currency.
    #[must_use]
    pub fn effective_currency(&self) -> Currency {
        self.currency.unwrap_or_default()
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref key) = other.session_key {
            self.session_key.clone_from(key);
        }
        if let Some(shipping) = other.flat_shipping {
            self.flat_shipping = shipping;
        }
        if let Some(rate) = other.tax_rate {
            self.tax_rate = rate;
        }
        if let Some(limit) = other.max_concurrent_uploads {
            self.max_concurrent_uploads = limit;
        }
        if let Some(interval) = other.progress_interval_ms {
            self.progress_interval_ms = interval;
        }
        if let Some(ref url) = other.public_base_url {
            self.public_base_url.clone_from(url);
        }
        if let Some(currency) = other.currency {
            self.currency = currency;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub session_key: Option<Option<String>>,
    pub flat_shipping: Option<Option<Decimal>>,
    pub tax_rate: Option<Option<Decimal>>,
    pub max_concurrent_uploads: Option<Option<u32>>,
    pub progress_interval_ms: Option<Option<u64>>,
    pub public_base_url: Option<Option<String>>,
    pub currency: Option<Option<Currency>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Tax rate must be in [0, 1), got {0}")]
    InvalidTaxRate(Decimal),

    #[error("Flat shipping cannot be negative, got {0}")]
    NegativeShipping(Decimal),

    #[error("Max concurrent uploads must be between 1 and 16, got {0}")]
    InvalidConcurrency(u32),

    #[error("Progress interval must be at least 10 ms, got {0}")]
    InvalidProgressInterval(u64),

    #[error("Session key cannot be empty")]
    EmptySessionKey,

    #[error("Public base URL cannot be empty")]
    EmptyBaseUrl,
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(rate) = settings.tax_rate
        && (rate < Decimal::ZERO || rate >= Decimal::ONE)
    {
        return Err(SettingsError::InvalidTaxRate(rate));
    }

    if let Some(shipping) = settings.flat_shipping
        && shipping < Decimal::ZERO
    {
        return Err(SettingsError::NegativeShipping(shipping));
    }

    if let Some(limit) = settings.max_concurrent_uploads
        && !(1..=16).contains(&limit)
    {
        return Err(SettingsError::InvalidConcurrency(limit));
    }

    if let Some(interval) = settings.progress_interval_ms
        && interval < 10
    {
        return Err(SettingsError::InvalidProgressInterval(interval));
    }

    if settings
        .session_key
        .as_ref()
        .is_some_and(|k| k.trim().is_empty())
    {
        return Err(SettingsError::EmptySessionKey);
    }

    if settings
        .public_base_url
        .as_ref()
        .is_some_and(|u| u.trim().is_empty())
    {
        return Err(SettingsError::EmptyBaseUrl);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.effective_session_key(), DEFAULT_SESSION_KEY);
        assert_eq!(settings.checkout_policy(), CheckoutPolicy::default());
        assert_eq!(settings.effective_max_concurrent_uploads(), 4);
        assert_eq!(settings.effective_currency(), Currency::Usd);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_empty_settings_fall_back() {
        let settings = Settings::default();
        assert_eq!(settings.effective_session_key(), DEFAULT_SESSION_KEY);
        assert_eq!(
            settings.effective_progress_interval(),
            std::time::Duration::from_millis(DEFAULT_PROGRESS_INTERVAL_MS)
        );
    }

    #[test]
    fn test_validate_tax_rate() {
        let settings = Settings {
            tax_rate: Some(Decimal::ONE),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn test_validate_negative_shipping() {
        let settings = Settings {
            flat_shipping: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::NegativeShipping(_))
        ));
    }

    #[test]
    fn test_validate_concurrency() {
        for bad in [0, 17] {
            let settings = Settings {
                max_concurrent_uploads: Some(bad),
                ..Default::default()
            };
            assert!(matches!(
                validate_settings(&settings),
                Err(SettingsError::InvalidConcurrency(n)) if n == bad
            ));
        }
    }

    #[test]
    fn test_validate_empty_strings() {
        let settings = Settings {
            session_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptySessionKey)
        ));

        let settings = Settings {
            public_base_url: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyBaseUrl)
        ));
    }

    #[test]
    fn test_merge_settings() {
        let mut settings = Settings::with_defaults();
        let update = SettingsUpdate {
            tax_rate: Some(Some(Decimal::new(11, 2))),
            session_key: Some(None),
            ..Default::default()
        };
        settings.merge(&update);

        assert_eq!(settings.tax_rate, Some(Decimal::new(11, 2)));
        assert_eq!(settings.session_key, None);
        assert_eq!(settings.max_concurrent_uploads, Some(4));
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings::with_defaults();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
