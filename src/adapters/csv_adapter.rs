//! CSV price file adapter.
//!
//! Reads adjusted closes from `<TICKER>.csv` files in one directory. Columns
//! are located by header name (`Date`, `Adj Close`, optional `Ticker`); any
//! other columns are ignored. A leading `^` is stripped from the ticker when
//! building the file name, so `^GSPC` reads `GSPC.csv`.

use crate::domain::error::DcaSimError;
use crate::domain::price::{is_valid_price, parse_trading_date, PricePoint};
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One parsed row of a price file.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub ticker: Option<String>,
    pub point: PricePoint,
}

const DATE_HEADERS: &[&str] = &["date"];
const PRICE_HEADERS: &[&str] = &["adj close", "adj_close", "adjclose"];
const TICKER_HEADERS: &[&str] = &["ticker", "symbol"];

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn file_error(source: &str, reason: impl Into<String>) -> DcaSimError {
    DcaSimError::PriceFile {
        file: source.to_string(),
        reason: reason.into(),
    }
}

/// Parses price rows from any CSV reader. `source` names the input in errors.
pub fn read_price_rows<R: Read>(reader: R, source: &str) -> Result<Vec<PriceRow>, DcaSimError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| file_error(source, format!("CSV header error: {e}")))?
        .clone();
    let date_col = find_column(&headers, DATE_HEADERS)
        .ok_or_else(|| file_error(source, "missing Date column"))?;
    let price_col = find_column(&headers, PRICE_HEADERS)
        .ok_or_else(|| file_error(source, "missing Adj Close column"))?;
    let ticker_col = find_column(&headers, TICKER_HEADERS);

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let record = result.map_err(|e| file_error(source, format!("CSV parse error: {e}")))?;

        let date_str = record
            .get(date_col)
            .ok_or_else(|| file_error(source, format!("line {line}: missing date")))?;
        let date = parse_trading_date(date_str).ok_or_else(|| {
            file_error(source, format!("line {line}: invalid date {date_str:?}"))
        })?;

        let price_str = record
            .get(price_col)
            .ok_or_else(|| file_error(source, format!("line {line}: missing adjusted close")))?;
        let price: f64 = price_str.trim().parse().map_err(|e| {
            file_error(
                source,
                format!("line {line}: invalid adjusted close {price_str:?}: {e}"),
            )
        })?;
        if !is_valid_price(price) {
            return Err(file_error(
                source,
                format!("line {line}: adjusted close must be positive and finite, got {price_str:?}"),
            ));
        }

        let ticker = ticker_col
            .and_then(|c| record.get(c))
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty());

        rows.push(PriceRow {
            ticker,
            point: PricePoint::new(date, price),
        });
    }

    Ok(rows)
}

pub fn read_price_file(path: &Path) -> Result<Vec<PriceRow>, DcaSimError> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| file_error(&source, e.to_string()))?;
    read_price_rows(file, &source)
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.csv", ticker.trim_start_matches('^')))
    }
}

impl PricePort for CsvAdapter {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, DcaSimError> {
        let path = self.csv_path(ticker);
        let rows = read_price_file(&path)?;

        let mut points: Vec<PricePoint> = rows
            .into_iter()
            .filter(|row| row.ticker.as_deref().is_none_or(|t| t == ticker))
            .map(|row| row.point)
            .collect();
        points.sort_by_key(|p| p.date);

        debug!(ticker, rows = points.len(), path = %path.display(), "read price file");
        Ok(points)
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcaSimError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            file_error(
                &self.base_path.display().to_string(),
                format!("failed to read directory: {e}"),
            )
        })?;

        let mut tickers = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    tickers.push(stem.to_string_lossy().to_uppercase());
                }
            }
        }

        tickers.sort();
        Ok(tickers)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcaSimError> {
        if !self.csv_path(ticker).exists() {
            return Ok(None);
        }
        let points = self.fetch_prices(ticker)?;
        Ok(match (points.first(), points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, points.len())),
            _ => None,
        })
    }
}
