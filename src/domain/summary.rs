//! End-of-run statistics per (ticker, strategy) curve.

use crate::domain::strategy::{StrategyKind, StrategyResult};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    pub ticker: String,
    pub strategy: StrategyKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trading_days: usize,
    pub final_invested: f64,
    pub final_value: f64,
    pub profit: f64,
    /// `final_value / final_invested - 1`, zero when nothing was invested.
    pub total_return: f64,
    /// Largest peak-to-trough fall of portfolio value, as a fraction of the peak.
    pub max_drawdown: f64,
}

impl CurveSummary {
    pub fn compute(result: &StrategyResult) -> Option<Self> {
        let first = result.equity_curve.first()?;
        let last = result.equity_curve.last()?;

        let total_return = if last.cumulative_invested > 0.0 {
            last.portfolio_value / last.cumulative_invested - 1.0
        } else {
            0.0
        };

        let values: Vec<f64> = result
            .equity_curve
            .iter()
            .map(|r| r.portfolio_value)
            .collect();

        Some(CurveSummary {
            ticker: result.instrument_id.clone(),
            strategy: result.strategy,
            start_date: first.date,
            end_date: last.date,
            trading_days: result.equity_curve.len(),
            final_invested: last.cumulative_invested,
            final_value: last.portfolio_value,
            profit: last.portfolio_value - last.cumulative_invested,
            total_return,
            max_drawdown: compute_max_drawdown(&values),
        })
    }

    pub fn compute_all(results: &[StrategyResult]) -> Vec<Self> {
        results.iter().filter_map(Self::compute).collect()
    }
}

fn compute_max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
