//! Scripted requests against an account.

use std::fmt;

use super::account::Account;
use super::error::AccountError;
use crate::ports::price_oracle::PriceOracle;

#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Deposit { amount: f64 },
    Withdraw { amount: f64 },
    Buy { symbol: String, quantity: i64 },
    Sell { symbol: String, quantity: i64 },
}

impl Instruction {
    pub fn apply<P: PriceOracle>(&self, account: &mut Account<P>) -> Result<(), AccountError> {
        match self {
            Instruction::Deposit { amount } => account.deposit(*amount),
            Instruction::Withdraw { amount } => account.withdraw(*amount),
            Instruction::Buy { symbol, quantity } => account.buy(symbol, *quantity),
            Instruction::Sell { symbol, quantity } => account.sell(symbol, *quantity),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Deposit { amount } => write!(f, "deposit {amount:.2}"),
            Instruction::Withdraw { amount } => write!(f, "withdraw {amount:.2}"),
            Instruction::Buy { symbol, quantity } => write!(f, "buy {quantity} {symbol}"),
            Instruction::Sell { symbol, quantity } => write!(f, "sell {quantity} {symbol}"),
        }
    }
}
