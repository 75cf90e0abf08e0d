//! Core domain types and logic.

pub mod account;
pub mod transaction;
pub mod instruction;
pub mod runner;
pub mod statement;
pub mod config_validation;
pub mod error;
