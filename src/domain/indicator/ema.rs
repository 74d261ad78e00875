//! Exponential Moving Average, used by the MACD lines.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = V[i]*k + EMA[i-1]*(1-k).
//! The raw result starts at index n-1 of the input.

/// Unpadded EMA starting at index `period - 1`.
pub(crate) fn ema_raw(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    out.push(ema);

    for &v in &values[period..] {
        ema = v * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}
