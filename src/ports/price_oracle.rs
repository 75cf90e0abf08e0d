//! Price lookup port.

use crate::domain::error::AccountError;

/// Source of current share prices.
///
/// Implementations must be synchronous and side-effect free, returning either
/// a strictly positive price or [`AccountError::UnknownSymbol`].
pub trait PriceOracle {
    fn price_of(&self, symbol: &str) -> Result<f64, AccountError>;
}

impl<T: PriceOracle + ?Sized> PriceOracle for &T {
    fn price_of(&self, symbol: &str) -> Result<f64, AccountError> {
        (**self).price_of(symbol)
    }
}

impl<T: PriceOracle + ?Sized> PriceOracle for Box<T> {
    fn price_of(&self, symbol: &str) -> Result<f64, AccountError> {
        (**self).price_of(symbol)
    }
}
