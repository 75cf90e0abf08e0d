//! papertrader — single-account trading simulation ledger.
//!
//! Hexagonal architecture: the account ledger lives in [`domain`], port
//! traits in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
