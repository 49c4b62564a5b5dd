//! SQLite price store.
//!
//! Table `prices(ticker, date, adj_close)`, keyed on `(ticker, date)`.

use crate::domain::error::DcaSimError;
use crate::domain::price::{parse_trading_date, PricePoint};
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use std::path::Path;
use tracing::info;

fn pool_err(e: r2d2::Error) -> DcaSimError {
    DcaSimError::Database {
        reason: e.to_string(),
    }
}

fn query_err(e: rusqlite::Error) -> DcaSimError {
    DcaSimError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn parse_stored_date(value: &str) -> Result<NaiveDate, DcaSimError> {
    parse_trading_date(value).ok_or_else(|| DcaSimError::Database {
        reason: format!("invalid stored date {value:?}"),
    })
}

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DcaSimError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| DcaSimError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4);
        let pool_size = u32::try_from(pool_size)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| DcaSimError::ConfigInvalid {
                section: "sqlite".into(),
                key: "pool_size".into(),
                reason: format!("pool_size must be between 1 and {}, got {pool_size}", u32::MAX),
            })?;

        if let Some(parent) = Path::new(&db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(pool_err)?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, DcaSimError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_err)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, DcaSimError> {
        self.pool.get().map_err(pool_err)
    }

    pub fn initialize_schema(&self) -> Result<(), DcaSimError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS prices (
                    ticker TEXT NOT NULL,
                    date TEXT NOT NULL,
                    adj_close REAL NOT NULL,
                    PRIMARY KEY (ticker, date)
                );
                CREATE INDEX IF NOT EXISTS idx_prices_ticker_date ON prices(ticker, date);",
            )
            .map_err(query_err)
    }

    /// Upserts `points` for one ticker in a single transaction.
    pub fn insert_prices(&self, ticker: &str, points: &[PricePoint]) -> Result<(), DcaSimError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_err)?;

        for point in points {
            tx.execute(
                "INSERT OR REPLACE INTO prices (ticker, date, adj_close) VALUES (?1, ?2, ?3)",
                params![ticker, point.date.format("%Y-%m-%d").to_string(), point.price],
            )
            .map_err(query_err)?;
        }

        tx.commit().map_err(query_err)?;
        info!(ticker, rows = points.len(), "stored prices");
        Ok(())
    }
}

impl PricePort for SqliteAdapter {
    fn fetch_prices(&self, ticker: &str) -> Result<Vec<PricePoint>, DcaSimError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT date, adj_close FROM prices
                 WHERE ticker = ?1
                 ORDER BY date ASC",
            )
            .map_err(query_err)?;

        let rows = stmt
            .query_map(params![ticker], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(query_err)?;

        let mut points = Vec::new();
        for row in rows {
            let (date_str, price) = row.map_err(query_err)?;
            points.push(PricePoint::new(parse_stored_date(&date_str)?, price));
        }

        Ok(points)
    }

    fn list_tickers(&self) -> Result<Vec<String>, DcaSimError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT ticker FROM prices ORDER BY ticker")
            .map_err(query_err)?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(query_err)?;

        let mut tickers = Vec::new();
        for row in rows {
            tickers.push(row.map_err(query_err)?);
        }

        Ok(tickers)
    }

    fn get_data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcaSimError> {
        let conn = self.conn()?;
        let result: (Option<String>, Option<String>, i64) = conn
            .query_row(
                "SELECT MIN(date), MAX(date), COUNT(*) FROM prices WHERE ticker = ?1",
                params![ticker],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .map_err(query_err)?;

        match result {
            (Some(min_str), Some(max_str), count) if count > 0 => Ok(Some((
                parse_stored_date(&min_str)?,
                parse_stored_date(&max_str)?,
                count as usize,
            ))),
            _ => Ok(None),
        }
    }
}
