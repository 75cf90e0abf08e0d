//! Single-user trading account: cash, holdings and an append-only history.
//!
//! Every mutating operation validates against current state and oracle
//! prices before touching anything, so a rejected operation leaves cash,
//! holdings and history exactly as they were.

use chrono::Utc;
use std::collections::HashMap;

use super::error::AccountError;
use super::transaction::{Fill, Transaction, TransactionKind};
use crate::ports::price_oracle::PriceOracle;

#[derive(Debug, Clone)]
pub struct Account<P> {
    account_id: String,
    owner_name: String,
    cash_balance: f64,
    total_deposited: f64,
    holdings: HashMap<String, i64>,
    history: Vec<Transaction>,
    oracle: P,
}

impl<P: PriceOracle> Account<P> {
    pub fn new(account_id: impl Into<String>, owner_name: impl Into<String>, oracle: P) -> Self {
        Account {
            account_id: account_id.into(),
            owner_name: owner_name.into(),
            cash_balance: 0.0,
            total_deposited: 0.0,
            holdings: HashMap::new(),
            history: Vec::new(),
            oracle,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    /// Gross deposits since creation. Withdrawals never reduce it.
    pub fn total_deposited(&self) -> f64 {
        self.total_deposited
    }

    pub fn oracle(&self) -> &P {
        &self.oracle
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), AccountError> {
        check_amount(amount).inspect_err(|e| self.log_rejected("deposit", e))?;

        self.cash_balance += amount;
        self.total_deposited += amount;
        self.record(amount, TransactionKind::Deposit);
        tracing::debug!(
            account_id = %self.account_id,
            amount,
            cash = self.cash_balance,
            "deposit applied"
        );
        Ok(())
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), AccountError> {
        let checked = check_amount(amount).and_then(|()| {
            if amount > self.cash_balance {
                Err(AccountError::InsufficientFunds {
                    required: amount,
                    available: self.cash_balance,
                })
            } else {
                Ok(())
            }
        });
        checked.inspect_err(|e| self.log_rejected("withdraw", e))?;

        self.cash_balance -= amount;
        self.record(-amount, TransactionKind::Withdraw);
        tracing::debug!(
            account_id = %self.account_id,
            amount,
            cash = self.cash_balance,
            "withdrawal applied"
        );
        Ok(())
    }

    pub fn buy(&mut self, symbol: &str, quantity: i64) -> Result<(), AccountError> {
        let (price, held_after) = self
            .quote_buy(symbol, quantity)
            .inspect_err(|e| self.log_rejected("buy", e))?;
        let cost = price * quantity as f64;

        self.cash_balance -= cost;
        self.holdings.insert(symbol.to_string(), held_after);
        self.record(
            -cost,
            TransactionKind::Buy(Fill {
                symbol: symbol.to_string(),
                quantity,
                price_per_share: price,
            }),
        );
        tracing::debug!(
            account_id = %self.account_id,
            symbol,
            quantity,
            price,
            cash = self.cash_balance,
            "buy applied"
        );
        Ok(())
    }

    pub fn sell(&mut self, symbol: &str, quantity: i64) -> Result<(), AccountError> {
        let price = self
            .quote_sell(symbol, quantity)
            .inspect_err(|e| self.log_rejected("sell", e))?;
        let proceeds = price * quantity as f64;

        self.cash_balance += proceeds;
        if let Some(held) = self.holdings.get_mut(symbol) {
            *held -= quantity;
            if *held == 0 {
                self.holdings.remove(symbol);
            }
        }
        self.record(
            proceeds,
            TransactionKind::Sell(Fill {
                symbol: symbol.to_string(),
                quantity,
                price_per_share: price,
            }),
        );
        tracing::debug!(
            account_id = %self.account_id,
            symbol,
            quantity,
            price,
            cash = self.cash_balance,
            "sell applied"
        );
        Ok(())
    }

    /// Cash plus every holding valued at the oracle's current price.
    ///
    /// A holding the oracle can no longer price is an error, not a zero.
    pub fn portfolio_value(&self) -> Result<f64, AccountError> {
        let holdings_value = self
            .holdings
            .iter()
            .map(|(symbol, &quantity)| {
                self.oracle
                    .price_of(symbol)
                    .map(|price| price * quantity as f64)
            })
            .sum::<Result<f64, AccountError>>()?;
        Ok(self.cash_balance + holdings_value)
    }

    pub fn profit_loss(&self) -> Result<f64, AccountError> {
        Ok(self.portfolio_value()? - self.total_deposited)
    }

    pub fn holdings(&self) -> HashMap<String, i64> {
        self.holdings.clone()
    }

    pub fn holding(&self, symbol: &str) -> i64 {
        self.holdings.get(symbol).copied().unwrap_or(0)
    }

    /// Full history, oldest first.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.history.clone()
    }

    pub fn transaction_count(&self) -> usize {
        self.history.len()
    }

    /// Price per share and the resulting holding count.
    fn quote_buy(&self, symbol: &str, quantity: i64) -> Result<(f64, i64), AccountError> {
        check_quantity(quantity)?;
        let price = self.oracle.price_of(symbol)?;
        let cost = price * quantity as f64;
        if cost > self.cash_balance {
            return Err(AccountError::InsufficientFunds {
                required: cost,
                available: self.cash_balance,
            });
        }
        let held_after = self
            .holding(symbol)
            .checked_add(quantity)
            .ok_or(AccountError::InvalidQuantity { quantity })?;
        Ok((price, held_after))
    }

    fn quote_sell(&self, symbol: &str, quantity: i64) -> Result<f64, AccountError> {
        check_quantity(quantity)?;
        let held = self.holding(symbol);
        if held < quantity {
            return Err(AccountError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held,
            });
        }
        self.oracle.price_of(symbol)
    }

    fn record(&mut self, cash_delta: f64, kind: TransactionKind) {
        self.history
            .push(Transaction::new(Utc::now(), cash_delta, kind));
    }

    fn log_rejected(&self, operation: &str, err: &AccountError) {
        tracing::debug!(
            account_id = %self.account_id,
            operation,
            error = %err,
            "operation rejected"
        );
    }
}

fn check_amount(amount: f64) -> Result<(), AccountError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(AccountError::InvalidAmount { amount })
    }
}

fn check_quantity(quantity: i64) -> Result<(), AccountError> {
    if quantity > 0 {
        Ok(())
    } else {
        Err(AccountError::InvalidQuantity { quantity })
    }
}
