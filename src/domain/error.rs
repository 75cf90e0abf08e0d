//! Domain error types.

/// Rejections raised by [`Account`](super::account::Account) operations and
/// by price lookups. Every variant leaves the account untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccountError {
    #[error("invalid amount {amount}: must be a positive number")]
    InvalidAmount { amount: f64 },

    #[error("invalid quantity {quantity}: must be a positive whole number of shares")]
    InvalidQuantity { quantity: i64 },

    #[error("insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("insufficient shares of {symbol}: want to sell {requested}, hold {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },

    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },
}

/// Top-level error type for papertrader.
#[derive(Debug, thiserror::Error)]
pub enum PapertraderError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("script error on line {line}: {reason}")]
    ScriptParse { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PapertraderError> for std::process::ExitCode {
    fn from(err: &PapertraderError) -> Self {
        let code: u8 = match err {
            PapertraderError::Io(_) => 1,
            PapertraderError::ConfigParse { .. } | PapertraderError::ConfigInvalid { .. } => 2,
            PapertraderError::ScriptParse { .. } => 3,
            PapertraderError::Account(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
