//! Configuration validation.
//!
//! Validates the `[account]`, `[prices]` and `[run]` sections before an
//! account is built or a script replayed.

use crate::domain::error::PapertraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    validate_account_identity(config)?;
    validate_opening_deposit(config)?;
    validate_prices(config)?;
    validate_stop_on_error(config)?;
    Ok(())
}

/// Accepted spellings for boolean config values.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a share price, accepting only finite values above zero.
pub fn parse_price(value: &str) -> Result<f64, String> {
    let price: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    if !price.is_finite() || price <= 0.0 {
        return Err("price must be a positive number".to_string());
    }
    Ok(price)
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> PapertraderError {
    PapertraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_account_identity(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    for key in ["id", "owner"] {
        if let Some(value) = config.get_string("account", key) {
            if value.trim().is_empty() {
                return Err(invalid("account", key, format!("{key} must not be empty")));
            }
        }
    }
    Ok(())
}

fn validate_opening_deposit(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    let Some(raw) = config.get_string("account", "opening_deposit") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(invalid(
            "account",
            "opening_deposit",
            "opening_deposit must be a positive number",
        )),
    }
}

fn validate_prices(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    if !config.has_section("prices") {
        return Ok(());
    }
    let keys = config.keys("prices");
    if keys.is_empty() {
        return Err(invalid("prices", "", "price table is empty"));
    }
    for key in keys {
        let raw = config.get_string("prices", &key).unwrap_or_default();
        parse_price(&raw).map_err(|reason| invalid("prices", &key, reason))?;
    }
    Ok(())
}

fn validate_stop_on_error(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    match config.get_string("run", "stop_on_error") {
        Some(raw) if parse_bool(&raw).is_none() => Err(invalid(
            "run",
            "stop_on_error",
            "expected true/false, yes/no or 1/0",
        )),
        _ => Ok(()),
    }
}
