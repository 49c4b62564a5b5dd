//! Strategy identity, equity records and per-run results.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    LumpSum,
    DollarCostAveraging,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::LumpSum => "Lump Sum",
            StrategyKind::DollarCostAveraging => "DCA",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for StrategyKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Holdings of one strategy on one trading date.
///
/// `portfolio_value` is always `units_held * price` for the price of `date`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityRecord {
    pub date: NaiveDate,
    #[serde(rename = "ticker")]
    pub instrument_id: String,
    #[serde(rename = "strategy")]
    pub strategy: StrategyKind,
    #[serde(rename = "units")]
    pub units_held: f64,
    #[serde(rename = "invested_amount")]
    pub cumulative_invested: f64,
    pub portfolio_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub instrument_id: String,
    pub strategy: StrategyKind,
    pub equity_curve: Vec<EquityRecord>,
}

impl StrategyResult {
    pub fn last(&self) -> Option<&EquityRecord> {
        self.equity_curve.last()
    }
}
