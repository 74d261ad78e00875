//! Institutional flow data port trait.

use crate::domain::error::SignalError;
use crate::domain::flow::InstitutionalFlow;
use chrono::NaiveDate;

/// Source of per-day institutional net flow for one symbol.
///
/// Records are already aggregated to one per date; dates may use any format
/// the flow aligner normalises.
pub trait FlowDataPort {
    fn fetch_flows(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<InstitutionalFlow>, SignalError>;
}
