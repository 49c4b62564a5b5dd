//! Monthly investment date selection.
//!
//! Each calendar month present in a price series contributes exactly one
//! investment date: the first trading date on or after the target day, or the
//! month's last trading date when no trading date reaches the target day.

use crate::domain::price::PricePoint;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Sorted set of investment dates, one per (year, month) of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentSchedule {
    dates: Vec<NaiveDate>,
}

impl InvestmentSchedule {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

pub fn select_investment_dates(prices: &[PricePoint], target_day: u32) -> InvestmentSchedule {
    let mut months: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
    for point in prices {
        months
            .entry((point.date.year(), point.date.month()))
            .or_default()
            .push(point.date);
    }

    let dates = months
        .values()
        .filter_map(|days| {
            days.iter()
                .copied()
                .filter(|d| d.day() >= target_day)
                .min()
                .or_else(|| days.iter().copied().max())
        })
        .collect();

    InvestmentSchedule { dates }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(days: &[(i32, u32, u32)]) -> Vec<PricePoint> {
        days.iter()
            .map(|&(y, m, day)| PricePoint::new(d(y, m, day), 100.0))
            .collect()
    }

    #[test]
    fn empty_series_gives_empty_schedule() {
        let schedule = select_investment_dates(&[], 5);
        assert!(schedule.is_empty());
    }

    #[test]
    fn picks_target_day_when_traded() {
        let prices: Vec<_> = (1..=20)
            .map(|day| PricePoint::new(d(2024, 2, day), 100.0))
            .collect();
        let schedule = select_investment_dates(&prices, 5);
        assert_eq!(schedule.dates(), &[d(2024, 2, 5)]);
    }

    #[test]
    fn picks_next_trading_day_after_holiday() {
        let prices = series(&[(2024, 3, 4), (2024, 3, 6), (2024, 3, 7)]);
        let schedule = select_investment_dates(&prices, 5);
        assert_eq!(schedule.dates(), &[d(2024, 3, 6)]);
    }

    #[test]
    fn falls_back_to_last_trading_day() {
        let prices = series(&[(2024, 1, 1), (2024, 1, 2), (2024, 1, 3)]);
        let schedule = select_investment_dates(&prices, 5);
        assert_eq!(schedule.dates(), &[d(2024, 1, 3)]);
    }

    #[test]
    fn large_target_day_uses_month_end() {
        let prices = series(&[(2023, 2, 24), (2023, 2, 27), (2023, 2, 28), (2023, 3, 31)]);
        let schedule = select_investment_dates(&prices, 31);
        assert_eq!(schedule.dates(), &[d(2023, 2, 28), d(2023, 3, 31)]);
    }

    #[test]
    fn one_date_per_month_across_years() {
        let prices = series(&[
            (2023, 12, 4),
            (2023, 12, 5),
            (2023, 12, 29),
            (2024, 1, 2),
            (2024, 1, 8),
            (2024, 2, 1),
        ]);
        let schedule = select_investment_dates(&prices, 5);
        assert_eq!(
            schedule.dates(),
            &[d(2023, 12, 5), d(2024, 1, 8), d(2024, 2, 1)]
        );
        assert!(schedule.contains(d(2024, 1, 8)));
        assert!(!schedule.contains(d(2024, 1, 2)));
    }

    #[test]
    fn target_day_one_takes_first_trading_day() {
        let prices = series(&[(2024, 4, 2), (2024, 4, 3), (2024, 5, 1)]);
        let schedule = select_investment_dates(&prices, 1);
        assert_eq!(schedule.dates(), &[d(2024, 4, 2), d(2024, 5, 1)]);
    }
}
