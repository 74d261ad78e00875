//! MACD histogram.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: max(fast, slow) - 1 + signal - 1 entries (33 for defaults).

use crate::domain::indicator::ema::ema_raw;
use crate::domain::indicator::{align_tail, pad, IndicatorSeries, IndicatorType};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd_histogram(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries {
    let indicator_type = IndicatorType::MacdHistogram {
        fast,
        slow,
        signal: signal_period,
    };

    let ema_fast = ema_raw(values, fast);
    let ema_slow = ema_raw(values, slow);
    let (fast_tail, slow_tail) = align_tail(&ema_fast, &ema_slow);
    let macd_line: Vec<f64> = fast_tail
        .iter()
        .zip(slow_tail)
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = ema_raw(&macd_line, signal_period);
    let (line_tail, signal_tail) = align_tail(&macd_line, &signal_line);
    let histogram: Vec<f64> = line_tail
        .iter()
        .zip(signal_tail)
        .map(|(line, signal)| line - signal)
        .collect();

    IndicatorSeries::new(indicator_type, pad(values.len(), histogram))
}

pub fn calculate_macd_histogram_default(values: &[f64]) -> IndicatorSeries {
    calculate_macd_histogram(values, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
