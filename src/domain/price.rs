//! Daily price points and series preconditions.

use crate::domain::error::DcaSimError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// One trading day of an instrument: calendar date and adjusted close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// Parses a date cell, truncating any time component to the calendar day.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]`
/// and RFC 3339 timestamps (the offset is dropped, not applied).
pub fn parse_trading_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local().date())
}

/// An adjusted close must be a finite number above zero.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// Checks that every price is valid and that dates are strictly increasing.
pub fn validate_series(ticker: &str, prices: &[PricePoint]) -> Result<(), DcaSimError> {
    if let Some(bad) = prices.iter().find(|p| !is_valid_price(p.price)) {
        return Err(DcaSimError::InvalidPrice {
            ticker: ticker.to_string(),
            date: bad.date,
            price: bad.price,
        });
    }
    for pair in prices.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(DcaSimError::Ordering {
                ticker: ticker.to_string(),
                previous: pair[0].date,
                current: pair[1].date,
            });
        }
    }
    Ok(())
}
