//! Average True Range.
//!
//! TR[i] = max(H-L, |H-C[i-1]|, |L-C[i-1]|) for i >= 1; the first candle has no
//! previous close and contributes no true range.
//! Seed: mean of TR[1..=n]; then ATR[i] = (ATR[i-1]*(n-1) + TR[i]) / n.
//! Warmup: first n entries are unavailable.

use crate::domain::candle::Candle;
use crate::domain::indicator::{pad, IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_atr(candles: &[Candle], period: usize) -> IndicatorSeries {
    let len = candles.len();
    if period == 0 || len <= period {
        return IndicatorSeries::new(IndicatorType::Atr(period), vec![None; len]);
    }

    let tr: Vec<f64> = candles
        .windows(2)
        .map(|pair| pair[1].true_range(pair[0].close))
        .collect();

    let mut atr = tr[..period].iter().sum::<f64>() / period as f64;
    let mut raw = Vec::with_capacity(len - period);
    raw.push(atr);
    for value in &tr[period..] {
        atr = (atr * (period - 1) as f64 + value) / period as f64;
        raw.push(atr);
    }

    IndicatorSeries::new(IndicatorType::Atr(period), pad(len, raw))
}
