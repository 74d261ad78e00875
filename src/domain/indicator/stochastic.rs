//! Stochastic oscillator.
//!
//! %K = 100 * (C - LL(n)) / (HH(n) - LL(n))
//! %D = SMA(signal) of %K
//!
//! When the window's high-low range is zero %K is fixed at 50, the midpoint of
//! the oscillator, so a flat market never produces a directional reading.
//!
//! Default parameters: period=9, signal=3
//! Warmup: %K unavailable for the first (period-1) entries, %D for (period+signal-2).

use crate::domain::indicator::sma::sma_raw;
use crate::domain::indicator::{pad, IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 9;
pub const DEFAULT_SIGNAL: usize = 3;
pub const FLAT_RANGE_K: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Stochastic {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
}

pub fn calculate_stochastic(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    signal_period: usize,
) -> Stochastic {
    let len = close.len();
    let n = len.min(high.len()).min(low.len());

    let mut k_raw = Vec::new();
    if period > 0 && n >= period {
        k_raw.reserve(n - period + 1);
        for i in (period - 1)..n {
            let start = i + 1 - period;
            let highest = high[start..=i].iter().copied().fold(f64::MIN, f64::max);
            let lowest = low[start..=i].iter().copied().fold(f64::MAX, f64::min);
            let range = highest - lowest;
            let k = if range > 0.0 {
                100.0 * (close[i] - lowest) / range
            } else {
                FLAT_RANGE_K
            };
            k_raw.push(k);
        }
    }
    let d_raw = sma_raw(&k_raw, signal_period);

    Stochastic {
        k: IndicatorSeries::new(
            IndicatorType::StochasticK {
                period,
                signal: signal_period,
            },
            pad(len, k_raw),
        ),
        d: IndicatorSeries::new(
            IndicatorType::StochasticD {
                period,
                signal: signal_period,
            },
            pad(len, d_raw),
        ),
    }
}
