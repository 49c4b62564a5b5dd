//! Writes combined equity curves as a single CSV file.

use crate::domain::error::DcaSimError;
use crate::domain::strategy::EquityRecord;
use crate::ports::equity_port::EquityPort;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct CsvEquityWriter {
    path: PathBuf,
}

impl CsvEquityWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl EquityPort for CsvEquityWriter {
    fn write_records(&self, records: &[EquityRecord]) -> Result<(), DcaSimError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let csv_err = |e: csv::Error| DcaSimError::OutputFile {
            file: self.path.display().to_string(),
            reason: e.to_string(),
        };

        let mut writer = csv::Writer::from_path(&self.path).map_err(csv_err)?;
        for record in records {
            writer.serialize(record).map_err(csv_err)?;
        }
        writer.flush()?;

        info!(rows = records.len(), path = %self.path.display(), "equity curves written");
        Ok(())
    }
}
