//! Concrete adapter implementations for ports.

pub mod csv_script_adapter;
pub mod file_config_adapter;
pub mod fixed_price_oracle;
pub mod text_report;
