//! Trailing-window technical indicators.
//!
//! Every indicator is computed as a "raw" result that starts at the first index
//! whose lookback is satisfied, then left-padded with `None` so index `i` of the
//! output always refers to candle `i`:
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a padded series of `Option<f64>` values
//! - `IndicatorSet`: the named bundle consumed by the signal engine

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod set;
pub mod sma;
pub mod stddev;
pub mod stochastic;

pub use atr::calculate_atr;
pub use bollinger::{calculate_bollinger, BollingerBands};
pub use macd::calculate_macd_histogram;
pub use rsi::calculate_rsi;
pub use set::IndicatorSet;
pub use sma::calculate_sma;
pub use stochastic::{calculate_stochastic, Stochastic};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    Atr(usize),
    MacdHistogram {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    StochasticK {
        period: usize,
        signal: usize,
    },
    StochasticD {
        period: usize,
        signal: usize,
    },
    BollingerUpper {
        period: usize,
        stddev_mult_x100: u32,
    },
    BollingerMiddle {
        period: usize,
        stddev_mult_x100: u32,
    },
    BollingerLower {
        period: usize,
        stddev_mult_x100: u32,
    },
    BollingerWidth {
        period: usize,
        stddev_mult_x100: u32,
    },
}

/// One value per input index; `None` until the lookback is satisfied.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(indicator_type: IndicatorType, values: Vec<Option<f64>>) -> Self {
        Self {
            indicator_type,
            values,
        }
    }

    /// Value at `index`, `None` when out of range or not yet available.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// Left-pad a raw result so that it lines up with an input of length `input_len`.
///
/// The first `input_len - raw.len()` entries are `None`. A raw result longer
/// than the input keeps only its trailing `input_len` values.
pub fn pad(input_len: usize, raw: Vec<f64>) -> Vec<Option<f64>> {
    let skip = raw.len().saturating_sub(input_len);
    let missing = input_len.saturating_sub(raw.len());
    let mut out = Vec::with_capacity(input_len);
    out.resize(missing, None);
    out.extend(raw.into_iter().skip(skip).map(Some));
    out
}

/// Pair up two raw results that both end at the last input index.
pub(crate) fn align_tail<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = a.len().min(b.len());
    (&a[a.len() - n..], &b[b.len() - n..])
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::MacdHistogram { fast, slow, signal } => {
                write!(f, "MACD_HIST({},{},{})", fast, slow, signal)
            }
            IndicatorType::StochasticK { period, signal } => {
                write!(f, "STOCH_K({},{})", period, signal)
            }
            IndicatorType::StochasticD { period, signal } => {
                write!(f, "STOCH_D({},{})", period, signal)
            }
            IndicatorType::BollingerUpper {
                period,
                stddev_mult_x100,
            } => write!(f, "BB_UPPER({},{})", period, *stddev_mult_x100 as f64 / 100.0),
            IndicatorType::BollingerMiddle {
                period,
                stddev_mult_x100,
            } => write!(f, "BB_MIDDLE({},{})", period, *stddev_mult_x100 as f64 / 100.0),
            IndicatorType::BollingerLower {
                period,
                stddev_mult_x100,
            } => write!(f, "BB_LOWER({},{})", period, *stddev_mult_x100 as f64 / 100.0),
            IndicatorType::BollingerWidth {
                period,
                stddev_mult_x100,
            } => write!(f, "BB_WIDTH({},{})", period, *stddev_mult_x100 as f64 / 100.0),
        }
    }
}
