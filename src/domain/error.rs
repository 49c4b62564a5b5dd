//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for dcasim.
#[derive(Debug, thiserror::Error)]
pub enum DcaSimError {
    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price file error in {file}: {reason}")]
    PriceFile { file: String, reason: String },

    #[error("failed to write {file}: {reason}")]
    OutputFile { file: String, reason: String },

    #[error("no price data for {ticker}")]
    NoData { ticker: String },

    #[error("invalid price for {ticker} on {date}: {price}")]
    InvalidPrice {
        ticker: String,
        date: NaiveDate,
        price: f64,
    },

    #[error("prices for {ticker} out of order: {current} follows {previous}")]
    Ordering {
        ticker: String,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DcaSimError> for std::process::ExitCode {
    fn from(err: &DcaSimError) -> Self {
        let code: u8 = match err {
            DcaSimError::Io(_) | DcaSimError::OutputFile { .. } => 1,
            DcaSimError::ConfigParse { .. }
            | DcaSimError::ConfigMissing { .. }
            | DcaSimError::ConfigInvalid { .. } => 2,
            DcaSimError::Database { .. }
            | DcaSimError::DatabaseQuery { .. }
            | DcaSimError::PriceFile { .. } => 3,
            DcaSimError::NoData { .. }
            | DcaSimError::InvalidPrice { .. }
            | DcaSimError::Ordering { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
