//! Read-only account snapshot used for reporting.

use super::account::Account;
use super::error::AccountError;
use super::transaction::Transaction;
use crate::ports::price_oracle::PriceOracle;

#[derive(Debug, Clone, PartialEq)]
pub struct HoldingLine {
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub market_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub account_id: String,
    pub owner_name: String,
    pub cash_balance: f64,
    pub total_deposited: f64,
    pub portfolio_value: f64,
    pub profit_loss: f64,
    /// Sorted by symbol.
    pub holdings: Vec<HoldingLine>,
    /// Oldest first.
    pub transactions: Vec<Transaction>,
}

impl Statement {
    pub fn from_account<P: PriceOracle>(account: &Account<P>) -> Result<Self, AccountError> {
        let mut holdings = account
            .holdings()
            .into_iter()
            .map(|(symbol, quantity)| {
                let price = account.oracle().price_of(&symbol)?;
                Ok::<_, AccountError>(HoldingLine {
                    market_value: price * quantity as f64,
                    symbol,
                    quantity,
                    price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let portfolio_value = account.portfolio_value()?;

        Ok(Statement {
            account_id: account.account_id().to_string(),
            owner_name: account.owner_name().to_string(),
            cash_balance: account.cash_balance(),
            total_deposited: account.total_deposited(),
            portfolio_value,
            profit_loss: portfolio_value - account.total_deposited(),
            holdings,
            transactions: account.transaction_history(),
        })
    }

    pub fn holdings_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.market_value).sum()
    }
}
