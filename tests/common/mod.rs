#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use trendsignal::domain::candle::Candle;
use trendsignal::domain::error::SignalError;
use trendsignal::domain::flow::InstitutionalFlow;
use trendsignal::ports::flow_data_port::FlowDataPort;
use trendsignal::ports::market_data_port::MarketDataPort;

/// Index of the breakout candle in [`breakout_series`].
pub const BREAKOUT_INDEX: usize = 60;

pub struct MockDataPort {
    pub candles: HashMap<String, Vec<Candle>>,
    pub flows: HashMap<String, Vec<InstitutionalFlow>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            candles: HashMap::new(),
            flows: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_flows(mut self, symbol: &str, flows: Vec<InstitutionalFlow>) -> Self {
        self.flows.insert(symbol.to_string(), flows);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    fn check(&self, symbol: &str) -> Result<(), SignalError> {
        match self.errors.get(symbol) {
            Some(reason) => Err(SignalError::DataSource {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_candles(
        &self,
        symbol: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<Candle>, SignalError> {
        self.check(symbol)?;
        Ok(self.candles.get(symbol).cloned().unwrap_or_default())
    }
}

impl FlowDataPort for MockDataPort {
    fn fetch_flows(
        &self,
        symbol: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<InstitutionalFlow>, SignalError> {
        self.check(symbol)?;
        Ok(self.flows.get(symbol).cloned().unwrap_or_default())
    }
}

/// Calendar day `index` days after 2024-01-01.
pub fn day(index: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(index as u64))
        .unwrap()
}

pub fn make_candle(index: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Candle {
    Candle {
        date: day(index),
        open,
        high,
        low,
        close,
        volume,
    }
}

pub fn flat_candles(count: usize, price: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| make_candle(i, price, price, price, price, 1000.0))
        .collect()
}

/// 60 flat candles at 100 followed by one strong bullish candle closing at 110
/// on triple volume. MA20 on the breakout day is 100.5.
pub fn breakout_series() -> Vec<Candle> {
    let mut candles = flat_candles(BREAKOUT_INDEX, 100.0);
    candles.push(make_candle(BREAKOUT_INDEX, 100.0, 111.0, 100.0, 110.0, 3000.0));
    candles
}

/// Append candles that each move the close by `step` from the previous close.
pub fn extend_trend(candles: &mut Vec<Candle>, days: usize, step: f64) {
    for _ in 0..days {
        let index = candles.len();
        let open = candles[index - 1].close;
        let close = open + step;
        let (high, low) = if step >= 0.0 {
            (close + 0.5, open - 0.5)
        } else {
            (open + 0.2, close - 0.2)
        };
        candles.push(make_candle(index, open, high, low, close, 1000.0));
    }
}

pub fn make_flow(date: &str, net: f64, net_trust: f64) -> InstitutionalFlow {
    InstitutionalFlow {
        date: date.to_string(),
        net,
        net_trust,
    }
}
