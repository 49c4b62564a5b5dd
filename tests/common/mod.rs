#![allow(dead_code)]

use chrono::NaiveDate;
use dcasim::domain::error::DcaSimError;
pub use dcasim::domain::price::PricePoint;
use dcasim::domain::strategy::EquityRecord;
use dcasim::ports::equity_port::EquityPort;
use dcasim::ports::price_port::PricePort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_prices(mut self, ticker: &str, prices: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), prices);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, DcaSimError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DcaSimError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcaSimError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcaSimError> {
        match self.data.get(ticker) {
            Some(p) if !p.is_empty() => Ok(Some((p[0].date, p[p.len() - 1].date, p.len()))),
            _ => Ok(None),
        }
    }
}

/// Collects written records in memory.
#[derive(Default)]
pub struct MemorySink {
    pub written: RefCell<Vec<EquityRecord>>,
    pub fail_with: Option<String>,
}

impl EquityPort for MemorySink {
    fn write_records(&self, records: &[EquityRecord]) -> Result<(), DcaSimError> {
        if let Some(reason) = &self.fail_with {
            return Err(DcaSimError::OutputFile {
                file: "memory".into(),
                reason: reason.clone(),
            });
        }
        self.written.borrow_mut().extend_from_slice(records);
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn point(date_str: &str, price: f64) -> PricePoint {
    PricePoint::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        price,
    )
}

/// Weekday-only series starting at `start_date`, price rising by `step` per day.
pub fn generate_trading_days(
    start_date: &str,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<PricePoint> {
    use chrono::Datelike;

    let mut day = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        if day.weekday().number_from_monday() <= 5 {
            let price = start_price + step * out.len() as f64;
            out.push(PricePoint::new(day, price));
        }
        day += chrono::Duration::days(1);
    }
    out
}

pub fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
