//! Port traits implemented by adapters.

pub mod price_oracle;
pub mod config_port;
pub mod instruction_port;
pub mod report_port;
