//! Market data port trait.

use crate::domain::candle::Candle;
use crate::domain::error::SignalError;
use chrono::NaiveDate;

/// Source of daily candles for one symbol.
///
/// Implementations return candles sorted ascending by date with no duplicate dates.
pub trait MarketDataPort {
    fn fetch_candles(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Candle>, SignalError>;
}
