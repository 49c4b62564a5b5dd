//! Equity curve output port.

use crate::domain::error::DcaSimError;
use crate::domain::strategy::EquityRecord;

/// Destination for the combined equity curves of a run.
pub trait EquityPort {
    fn write_records(&self, records: &[EquityRecord]) -> Result<(), DcaSimError>;
}
