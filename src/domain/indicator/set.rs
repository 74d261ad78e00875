//! The named indicator bundle computed once per signal pass.

use crate::domain::candle::{Candle, CandleColumns};
use crate::domain::indicator::macd::calculate_macd_histogram_default;
use crate::domain::indicator::{
    atr, bollinger, calculate_atr, calculate_bollinger, calculate_rsi, calculate_sma,
    calculate_stochastic, rsi, stochastic, IndicatorSeries,
};

/// Every series the signal engine reads, each aligned to the candle index.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub sma5: IndicatorSeries,
    pub sma10: IndicatorSeries,
    pub sma20: IndicatorSeries,
    pub sma60: IndicatorSeries,
    pub sma5_volume: IndicatorSeries,
    pub macd_histogram: IndicatorSeries,
    pub stoch_k: IndicatorSeries,
    pub stoch_d: IndicatorSeries,
    pub bollinger_upper: IndicatorSeries,
    pub bollinger_width: IndicatorSeries,
    pub rsi14: IndicatorSeries,
    pub atr14: IndicatorSeries,
}

impl IndicatorSet {
    pub const NAMES: [&'static str; 12] = [
        "sma5",
        "sma10",
        "sma20",
        "sma60",
        "sma5Volume",
        "macdHistogram",
        "stochK",
        "stochD",
        "bollingerUpper",
        "bollingerWidth",
        "rsi14",
        "atr14",
    ];

    pub fn compute(candles: &[Candle]) -> Self {
        let cols = CandleColumns::from_candles(candles);
        let stoch = calculate_stochastic(
            &cols.high,
            &cols.low,
            &cols.close,
            stochastic::DEFAULT_PERIOD,
            stochastic::DEFAULT_SIGNAL,
        );
        let bands = calculate_bollinger(
            &cols.close,
            bollinger::DEFAULT_PERIOD,
            bollinger::DEFAULT_MULT_X100,
        );

        Self {
            sma5: calculate_sma(&cols.close, 5),
            sma10: calculate_sma(&cols.close, 10),
            sma20: calculate_sma(&cols.close, 20),
            sma60: calculate_sma(&cols.close, 60),
            sma5_volume: calculate_sma(&cols.volume, 5),
            macd_histogram: calculate_macd_histogram_default(&cols.close),
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            bollinger_upper: bands.upper,
            bollinger_width: bands.width,
            rsi14: calculate_rsi(&cols.close, rsi::DEFAULT_PERIOD),
            atr14: calculate_atr(candles, atr::DEFAULT_PERIOD),
        }
    }

    /// Look up a series by its canonical name (`sma5`, `macdHistogram`, ...).
    pub fn get(&self, name: &str) -> Option<&IndicatorSeries> {
        let series = match name {
            "sma5" => &self.sma5,
            "sma10" => &self.sma10,
            "sma20" => &self.sma20,
            "sma60" => &self.sma60,
            "sma5Volume" => &self.sma5_volume,
            "macdHistogram" => &self.macd_histogram,
            "stochK" => &self.stoch_k,
            "stochD" => &self.stoch_d,
            "bollingerUpper" => &self.bollinger_upper,
            "bollingerWidth" => &self.bollinger_width,
            "rsi14" => &self.rsi14,
            "atr14" => &self.atr14,
            _ => return None,
        };
        Some(series)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &IndicatorSeries)> {
        Self::NAMES
            .into_iter()
            .filter_map(move |name| self.get(name).map(|s| (name, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn make_candles(n: usize) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                Candle {
                    date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1000.0 + i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn every_series_matches_candle_length() {
        let set = IndicatorSet::compute(&make_candles(80));
        assert_eq!(set.iter().count(), IndicatorSet::NAMES.len());
        for (name, series) in set.iter() {
            assert_eq!(series.len(), 80, "{name} has wrong length");
        }
    }

    #[test]
    fn first_valid_indices() {
        let set = IndicatorSet::compute(&make_candles(80));
        let expect = [
            ("sma5", 4),
            ("sma10", 9),
            ("sma20", 19),
            ("sma60", 59),
            ("sma5Volume", 4),
            ("macdHistogram", 33),
            ("stochK", 8),
            ("stochD", 10),
            ("bollingerUpper", 19),
            ("bollingerWidth", 19),
            ("rsi14", 14),
            ("atr14", 14),
        ];
        for (name, index) in expect {
            let series = set.get(name).unwrap();
            assert_eq!(series.first_valid_index(), Some(index), "{name}");
        }
    }

    #[test]
    fn unknown_name_is_none() {
        let set = IndicatorSet::compute(&make_candles(10));
        assert!(set.get("vwap").is_none());
    }

    #[test]
    fn short_history_yields_unavailable_long_lookbacks() {
        let set = IndicatorSet::compute(&make_candles(30));
        assert_eq!(set.sma60.first_valid_index(), None);
        assert_eq!(set.macd_histogram.first_valid_index(), None);
        assert_eq!(set.sma20.first_valid_index(), Some(19));
    }
}
