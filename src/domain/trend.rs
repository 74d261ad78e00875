//! Per-pass trend state carried from one candle to the next.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Long,
    Short,
}

/// Anchor prices and counters for the trend currently held.
///
/// Created in `Direction::None`, replaced wholesale on every entry and reset to
/// the default on every exit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrendState {
    pub direction: Direction,
    pub duration_days: u32,
    pub entry_price: f64,
    /// Highest high since entry while long, lowest low while short.
    pub extreme_price: f64,
    /// RSI when `extreme_price` was last raised (long only).
    pub rsi_at_extreme: Option<f64>,
}

impl TrendState {
    pub fn enter_long(close: f64, high: f64, rsi: Option<f64>) -> Self {
        TrendState {
            direction: Direction::Long,
            duration_days: 0,
            entry_price: close,
            extreme_price: high,
            rsi_at_extreme: rsi,
        }
    }

    pub fn enter_short(close: f64, low: f64) -> Self {
        TrendState {
            direction: Direction::Short,
            duration_days: 0,
            entry_price: close,
            extreme_price: low,
            rsi_at_extreme: None,
        }
    }

    /// Count one more day in the trend and push the extreme outward.
    pub fn advance(mut self, high: f64, low: f64, rsi: Option<f64>) -> Self {
        match self.direction {
            Direction::None => {}
            Direction::Long => {
                self.duration_days += 1;
                if high > self.extreme_price {
                    self.extreme_price = high;
                    self.rsi_at_extreme = rsi;
                }
            }
            Direction::Short => {
                self.duration_days += 1;
                self.extreme_price = self.extreme_price.min(low);
            }
        }
        self
    }

    /// `(close - entry) / entry` in the held direction; `None` when flat or entry is not positive.
    pub fn unrealized_gain(&self, close: f64) -> Option<f64> {
        if self.entry_price <= 0.0 {
            return None;
        }
        let raw = (close - self.entry_price) / self.entry_price;
        match self.direction {
            Direction::None => None,
            Direction::Long => Some(raw),
            Direction::Short => Some(-raw),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::None => write!(f, "none"),
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}
