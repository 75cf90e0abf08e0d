#![allow(dead_code)]

use papertrader::domain::error::AccountError;
use papertrader::ports::price_oracle::PriceOracle;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

/// Deterministic price table whose entries can be changed mid-test.
#[derive(Debug)]
pub struct MockOracle {
    prices: RefCell<HashMap<String, f64>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            prices: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_price(self, symbol: &str, price: f64) -> Self {
        self.prices.borrow_mut().insert(symbol.to_string(), price);
        self
    }

    pub fn set_price(&self, symbol: &str, price: f64) {
        self.prices.borrow_mut().insert(symbol.to_string(), price);
    }

    pub fn delist(&self, symbol: &str) {
        self.prices.borrow_mut().remove(symbol);
    }
}

impl PriceOracle for MockOracle {
    fn price_of(&self, symbol: &str) -> Result<f64, AccountError> {
        self.prices
            .borrow()
            .get(symbol)
            .copied()
            .ok_or_else(|| AccountError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }
}

pub fn sample_oracle() -> MockOracle {
    MockOracle::new()
        .with_price("AAPL", 150.0)
        .with_price("TSLA", 250.0)
        .with_price("GOOGL", 130.0)
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
