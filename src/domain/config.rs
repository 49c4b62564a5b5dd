//! Simulation parameters passed into every strategy run.

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 300.0;
pub const DEFAULT_INVESTMENT_DAY: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Capital deployed on the first date by the lump-sum strategy.
    pub initial_capital: f64,
    /// Amount bought on each scheduled DCA date.
    pub monthly_contribution: f64,
    /// Target day of month (1..=31) for DCA purchases.
    pub investment_day: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            investment_day: DEFAULT_INVESTMENT_DAY,
        }
    }
}
