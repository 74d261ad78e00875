//! Simple Moving Average.
//!
//! SMA(n)[i] = mean of values[i-n+1..=i]. Warmup: first (n-1) entries are unavailable.

use crate::domain::indicator::{pad, IndicatorSeries, IndicatorType};

pub fn calculate_sma(values: &[f64], period: usize) -> IndicatorSeries {
    IndicatorSeries::new(IndicatorType::Sma(period), pad(values.len(), sma_raw(values, period)))
}

/// Unpadded SMA: one value per full window, starting at index `period - 1`.
pub(crate) fn sma_raw(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }
    values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}
