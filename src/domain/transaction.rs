//! Transaction records appended to an account's history.

use chrono::{DateTime, Utc};
use std::fmt;

/// Share fill details carried by buy and sell records.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub symbol: String,
    pub quantity: i64,
    pub price_per_share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Buy(Fill),
    Sell(Fill),
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdraw => "WITHDRAW",
            TransactionKind::Buy(_) => "BUY",
            TransactionKind::Sell(_) => "SELL",
        }
    }

    pub fn fill(&self) -> Option<&Fill> {
        match self {
            TransactionKind::Buy(fill) | TransactionKind::Sell(fill) => Some(fill),
            TransactionKind::Deposit | TransactionKind::Withdraw => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable ledger entry. Fields are private so a record cannot be
/// edited once it has been appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    cash_delta: f64,
    kind: TransactionKind,
}

impl Transaction {
    pub(crate) fn new(timestamp: DateTime<Utc>, cash_delta: f64, kind: TransactionKind) -> Self {
        Transaction {
            timestamp,
            cash_delta,
            kind,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Signed cash movement: positive for deposits and sales, negative for
    /// withdrawals and purchases.
    pub fn cash_delta(&self) -> f64 {
        self.cash_delta
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn symbol(&self) -> Option<&str> {
        self.kind.fill().map(|f| f.symbol.as_str())
    }

    pub fn quantity(&self) -> Option<i64> {
        self.kind.fill().map(|f| f.quantity)
    }

    pub fn price_per_share(&self) -> Option<f64> {
        self.kind.fill().map(|f| f.price_per_share)
    }
}
