//! Static price table oracle.

use std::collections::HashMap;

use crate::domain::config_validation::parse_price;
use crate::domain::error::{AccountError, PapertraderError};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_oracle::PriceOracle;

/// Demonstration prices used when no `[prices]` section is configured.
pub const DEMO_PRICES: [(&str, f64); 3] = [("AAPL", 150.00), ("TSLA", 250.00), ("GOOGL", 130.00)];

#[derive(Debug, Clone, PartialEq)]
pub struct FixedPriceOracle {
    prices: HashMap<String, f64>,
}

impl FixedPriceOracle {
    pub fn demo() -> Self {
        FixedPriceOracle {
            prices: DEMO_PRICES
                .iter()
                .map(|&(symbol, price)| (symbol.to_string(), price))
                .collect(),
        }
    }

    pub fn from_prices<I, S>(entries: I) -> Result<Self, PapertraderError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut prices = HashMap::new();
        for (symbol, price) in entries {
            let symbol: String = symbol.into();
            let symbol = symbol.trim().to_string();
            if symbol.is_empty() {
                return Err(PapertraderError::ConfigInvalid {
                    section: "prices".into(),
                    key: symbol,
                    reason: "symbol must not be empty".into(),
                });
            }
            if !price.is_finite() || price <= 0.0 {
                return Err(PapertraderError::ConfigInvalid {
                    section: "prices".into(),
                    key: symbol,
                    reason: "price must be a positive number".into(),
                });
            }
            prices.insert(symbol, price);
        }
        Ok(FixedPriceOracle { prices })
    }

    /// Build from the `[prices]` section, falling back to [`DEMO_PRICES`]
    /// when the section is absent. Symbols are upper-cased.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PapertraderError> {
        if !config.has_section("prices") {
            tracing::debug!("no [prices] section, using demo price table");
            return Ok(Self::demo());
        }

        let mut entries = Vec::new();
        for key in config.keys("prices") {
            let raw = config.get_string("prices", &key).unwrap_or_default();
            let price = parse_price(&raw).map_err(|reason| PapertraderError::ConfigInvalid {
                section: "prices".into(),
                key: key.clone(),
                reason,
            })?;
            entries.push((key.to_uppercase(), price));
        }
        let oracle = Self::from_prices(entries)?;
        tracing::debug!(symbols = oracle.len(), "price table loaded");
        Ok(oracle)
    }

    /// Known symbols in sorted order.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.prices.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceOracle for FixedPriceOracle {
    fn price_of(&self, symbol: &str) -> Result<f64, AccountError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| AccountError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }
}
