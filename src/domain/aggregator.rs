//! Runs both strategies for every requested ticker and concatenates the curves.
//!
//! A ticker that fails (fetch error, no data, bad ordering, bad price) is
//! reported in [`AggregateResult::failures`] and never stops the others.

use crate::domain::config::SimulationConfig;
use crate::domain::error::DcaSimError;
use crate::domain::price::{validate_series, PricePoint};
use crate::domain::schedule::select_investment_dates;
use crate::domain::simulator::{simulate_dca, simulate_lump_sum};
use crate::domain::strategy::{EquityRecord, StrategyResult};
use crate::ports::price_port::PricePort;
use tracing::{info, warn};

#[derive(Debug)]
pub struct InstrumentFailure {
    pub ticker: String,
    pub error: DcaSimError,
}

#[derive(Debug, Default)]
pub struct AggregateResult {
    /// Lump-sum curve then DCA curve per ticker, tickers in request order.
    pub records: Vec<EquityRecord>,
    pub results: Vec<StrategyResult>,
    pub failures: Vec<InstrumentFailure>,
}

impl AggregateResult {
    pub fn succeeded(&self) -> usize {
        self.results.len() / 2
    }
}

/// Simulates both strategies over one already-fetched series.
pub fn simulate_instrument(
    ticker: &str,
    prices: &[PricePoint],
    config: &SimulationConfig,
) -> Result<[StrategyResult; 2], DcaSimError> {
    if prices.is_empty() {
        return Err(DcaSimError::NoData {
            ticker: ticker.to_string(),
        });
    }
    validate_series(ticker, prices)?;

    let schedule = select_investment_dates(prices, config.investment_day);
    let lump = simulate_lump_sum(ticker, prices, config.initial_capital)?;
    let dca = simulate_dca(ticker, prices, &schedule, config.monthly_contribution)?;
    Ok([lump, dca])
}

pub fn run_all(
    port: &dyn PricePort,
    tickers: &[String],
    config: &SimulationConfig,
) -> AggregateResult {
    let mut out = AggregateResult::default();

    for ticker in tickers {
        info!(ticker = %ticker, "simulating strategies");
        let outcome = port
            .fetch_prices(ticker)
            .and_then(|prices| simulate_instrument(ticker, &prices, config));

        match outcome {
            Ok(pair) => {
                for result in pair {
                    out.records.extend(result.equity_curve.iter().cloned());
                    out.results.push(result);
                }
            }
            Err(error) => {
                warn!(ticker = %ticker, %error, "skipping ticker");
                out.failures.push(InstrumentFailure {
                    ticker: ticker.clone(),
                    error,
                });
            }
        }
    }

    out
}
