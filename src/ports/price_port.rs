//! Price series source port.

use crate::domain::error::DcaSimError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait PricePort {
    /// Adjusted closes for `ticker`, ascending by date. May be empty.
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, DcaSimError>;

    fn list_tickers(&self) -> Result<Vec<String>, DcaSimError>;

    /// First date, last date and row count, or `None` when nothing is stored.
    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcaSimError>;
}
