//! Ticker list parsing and resolution.

use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Splits a comma-separated ticker list. Tickers are uppercased; index
/// symbols keep their `^` prefix.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

/// Command-line override first, then `[simulation] tickers`.
pub fn resolve_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, UniverseError> {
    if let Some(t) = ticker_override {
        return parse_tickers(t);
    }
    match config.get_string("simulation", "tickers") {
        Some(list) if !list.trim().is_empty() => parse_tickers(&list),
        _ => Ok(Vec::new()),
    }
}
