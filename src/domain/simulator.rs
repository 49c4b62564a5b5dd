//! Lump-sum and dollar-cost-averaging simulations over a price series.
//!
//! Both simulators emit one [`EquityRecord`] per price point, in input order.
//! The DCA scan is expressed as a pure step function over [`DcaState`] so a
//! single transition can be exercised without a full series.

use crate::domain::error::DcaSimError;
use crate::domain::price::{is_valid_price, PricePoint};
use crate::domain::schedule::InvestmentSchedule;
use crate::domain::strategy::{EquityRecord, StrategyKind, StrategyResult};
use tracing::debug;

/// Running accumulators of the DCA strategy. Both registers only grow.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DcaState {
    pub total_units: f64,
    pub total_invested: f64,
}

/// Holdings emitted for one price point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Holdings {
    pub units_held: f64,
    pub cumulative_invested: f64,
    pub portfolio_value: f64,
}

impl DcaState {
    /// Applies one price point. Buys `contribution` worth of units when the
    /// date is scheduled, then values the post-update holdings at `point.price`.
    pub fn step(
        self,
        ticker: &str,
        point: &PricePoint,
        scheduled: bool,
        contribution: f64,
    ) -> Result<(DcaState, Holdings), DcaSimError> {
        let mut next = self;
        if scheduled {
            let bought = units_for(ticker, point, contribution)?;
            next.total_units += bought;
            next.total_invested += contribution;
        }
        let holdings = Holdings {
            units_held: next.total_units,
            cumulative_invested: next.total_invested,
            portfolio_value: next.total_units * point.price,
        };
        Ok((next, holdings))
    }
}

fn units_for(ticker: &str, point: &PricePoint, amount: f64) -> Result<f64, DcaSimError> {
    if !is_valid_price(point.price) {
        return Err(DcaSimError::InvalidPrice {
            ticker: ticker.to_string(),
            date: point.date,
            price: point.price,
        });
    }
    Ok(amount / point.price)
}

fn record(ticker: &str, strategy: StrategyKind, point: &PricePoint, h: Holdings) -> EquityRecord {
    EquityRecord {
        date: point.date,
        instrument_id: ticker.to_string(),
        strategy,
        units_held: h.units_held,
        cumulative_invested: h.cumulative_invested,
        portfolio_value: h.portfolio_value,
    }
}

/// Invests `initial_capital` at the first price and holds.
pub fn simulate_lump_sum(
    ticker: &str,
    prices: &[PricePoint],
    initial_capital: f64,
) -> Result<StrategyResult, DcaSimError> {
    let first = prices.first().ok_or_else(|| DcaSimError::NoData {
        ticker: ticker.to_string(),
    })?;
    let units = units_for(ticker, first, initial_capital)?;
    debug!(ticker, units, date = %first.date, "lump sum purchase");

    let equity_curve = prices
        .iter()
        .map(|point| {
            let h = Holdings {
                units_held: units,
                cumulative_invested: initial_capital,
                portfolio_value: units * point.price,
            };
            record(ticker, StrategyKind::LumpSum, point, h)
        })
        .collect();

    Ok(StrategyResult {
        instrument_id: ticker.to_string(),
        strategy: StrategyKind::LumpSum,
        equity_curve,
    })
}

/// Buys `monthly_contribution` on every scheduled date.
pub fn simulate_dca(
    ticker: &str,
    prices: &[PricePoint],
    schedule: &InvestmentSchedule,
    monthly_contribution: f64,
) -> Result<StrategyResult, DcaSimError> {
    if prices.is_empty() {
        return Err(DcaSimError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let mut state = DcaState::default();
    let mut equity_curve = Vec::with_capacity(prices.len());

    for point in prices {
        let scheduled = schedule.contains(point.date);
        let (next, holdings) = state.step(ticker, point, scheduled, monthly_contribution)?;
        state = next;
        equity_curve.push(record(
            ticker,
            StrategyKind::DollarCostAveraging,
            point,
            holdings,
        ));
    }

    debug!(
        ticker,
        purchases = schedule.len(),
        units = state.total_units,
        invested = state.total_invested,
        "dca scan complete"
    );

    Ok(StrategyResult {
        instrument_id: ticker.to_string(),
        strategy: StrategyKind::DollarCostAveraging,
        equity_curve,
    })
}
