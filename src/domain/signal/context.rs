//! Per-candle view assembled for the step function.

use chrono::NaiveDate;

use crate::domain::candle::Candle;
use crate::domain::flow::{FlowAligner, FlowValue};
use crate::domain::indicator::IndicatorSet;
use crate::domain::strategy::SignalParams;

/// Everything the rules read at one candle index.
///
/// Indicator fields are `None` until their lookback is satisfied; a rule that
/// reads a `None` field does not fire.
#[derive(Debug, Clone, PartialEq)]
pub struct BarContext {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub prev_close: f64,

    pub sma5: Option<f64>,
    pub sma10: Option<f64>,
    pub sma20: Option<f64>,
    pub sma60: Option<f64>,
    /// MA60 `ma60_rising_lookback` candles ago.
    pub sma60_before: Option<f64>,
    /// `volume / SMA5(volume)`.
    pub volume_ratio: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_width: Option<f64>,
    pub prev_bollinger_width: Option<f64>,
    pub rsi14: Option<f64>,
    pub atr14: Option<f64>,

    /// Highest high over the `breakout_lookback` candles before today.
    pub trailing_high: Option<f64>,
    /// Lowest low over the `structure_lookback` candles before today.
    pub trailing_low: Option<f64>,

    pub flow: FlowValue,
    /// Consecutive days ending today with positive trust net buy, capped at `trust_streak_days`.
    pub trust_streak: usize,
}

impl BarContext {
    /// Assemble the view for candle `index`. Requires `index >= 1`.
    pub fn build(
        index: usize,
        candles: &[Candle],
        indicators: &IndicatorSet,
        flows: &FlowAligner,
        params: &SignalParams,
    ) -> Self {
        let candle = &candles[index];
        let prev = &candles[index - 1];

        let volume_ratio = indicators
            .sma5_volume
            .get(index)
            .filter(|avg| *avg > 0.0)
            .map(|avg| candle.volume / avg);

        let sma60_before = index
            .checked_sub(params.ma60_rising_lookback)
            .and_then(|i| indicators.sma60.get(i));

        let trust_streak = (0..params.trust_streak_days)
            .take_while(|&offset| offset <= index && flows.lookup(index, offset).net_trust > 0.0)
            .count();

        BarContext {
            date: candle.date,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            prev_close: prev.close,
            sma5: indicators.sma5.get(index),
            sma10: indicators.sma10.get(index),
            sma20: indicators.sma20.get(index),
            sma60: indicators.sma60.get(index),
            sma60_before,
            volume_ratio,
            macd_histogram: indicators.macd_histogram.get(index),
            stoch_k: indicators.stoch_k.get(index),
            stoch_d: indicators.stoch_d.get(index),
            bollinger_upper: indicators.bollinger_upper.get(index),
            bollinger_width: indicators.bollinger_width.get(index),
            prev_bollinger_width: indicators.bollinger_width.get(index - 1),
            rsi14: indicators.rsi14.get(index),
            atr14: indicators.atr14.get(index),
            trailing_high: trailing_window(candles, index, params.breakout_lookback)
                .map(|w| w.iter().map(|c| c.high).fold(f64::MIN, f64::max)),
            trailing_low: trailing_window(candles, index, params.structure_lookback)
                .map(|w| w.iter().map(|c| c.low).fold(f64::MAX, f64::min)),
            flow: flows.lookup(index, 0),
            trust_streak,
        }
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// `(close - open) / (high - low)`, `None` on a zero-range candle.
    pub fn body_ratio(&self) -> Option<f64> {
        let range = self.range();
        (range > 0.0).then(|| (self.close - self.open) / range)
    }

    /// `(close - prev_close) / prev_close`.
    pub fn daily_change(&self) -> Option<f64> {
        (self.prev_close > 0.0).then(|| (self.close - self.prev_close) / self.prev_close)
    }

    /// `(close - MA20) / MA20`, `None` when MA20 is unavailable or not positive.
    pub fn bias20(&self) -> Option<f64> {
        self.sma20
            .filter(|m| *m > 0.0)
            .map(|m| (self.close - m) / m)
    }
}

/// The `lookback` candles strictly before `index`, `None` if history is too short.
fn trailing_window(candles: &[Candle], index: usize, lookback: usize) -> Option<&[Candle]> {
    if lookback == 0 || index < lookback {
        return None;
    }
    Some(&candles[index - lookback..index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::InstitutionalFlow;
    use chrono::Days;

    fn candles(n: usize) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle {
                    date: start.checked_add_days(Days::new(i as u64)).unwrap(),
                    open: close - 1.0,
                    high: close + 2.0,
                    low: close - 2.0,
                    close,
                    volume: 1000.0,
                }
            })
            .collect()
    }

    fn build_at(index: usize, candles: &[Candle], flows: &[InstitutionalFlow]) -> BarContext {
        let indicators = IndicatorSet::compute(candles);
        let aligner = FlowAligner::new(candles.iter().map(|c| c.date).collect(), flows);
        BarContext::build(index, candles, &indicators, &aligner, &SignalParams::default())
    }

    #[test]
    fn trailing_extremes_exclude_today() {
        let cs = candles(30);
        let bar = build_at(25, &cs, &[]);
        // window = candles 5..25, highest high = 124 + 2, lowest low = 105 - 2
        assert_eq!(bar.trailing_high, Some(126.0));
        assert_eq!(bar.trailing_low, Some(103.0));
    }

    #[test]
    fn trailing_window_needs_full_history() {
        let cs = candles(30);
        let bar = build_at(10, &cs, &[]);
        assert_eq!(bar.trailing_high, None);
        assert_eq!(bar.trailing_low, None);
        assert_eq!(bar.sma20, None);
    }

    #[test]
    fn volume_ratio_against_five_day_average() {
        let mut cs = candles(10);
        cs[9].volume = 3000.0;
        let bar = build_at(9, &cs, &[]);
        // SMA5 volume = (4 * 1000 + 3000) / 5 = 1400
        assert!((bar.volume_ratio.unwrap() - 3000.0 / 1400.0).abs() < 1e-12);
    }

    #[test]
    fn trust_streak_counts_back_from_today() {
        let cs = candles(10);
        let flow = |i: usize, trust: f64| InstitutionalFlow {
            date: cs[i].date.format("%Y/%m/%d").to_string(),
            net: 0.0,
            net_trust: trust,
        };
        let flows = vec![flow(6, -1.0), flow(7, 5.0), flow(8, 5.0), flow(9, 5.0)];
        assert_eq!(build_at(9, &cs, &flows).trust_streak, 3);
        assert_eq!(build_at(8, &cs, &flows).trust_streak, 2);
        assert_eq!(build_at(6, &cs, &flows).trust_streak, 0);
    }

    #[test]
    fn derived_ratios_guard_zero_denominators() {
        let cs = candles(30);
        let mut bar = build_at(25, &cs, &[]);
        bar.high = bar.low;
        assert_eq!(bar.body_ratio(), None);
        bar.prev_close = 0.0;
        assert_eq!(bar.daily_change(), None);
        bar.sma20 = Some(0.0);
        assert_eq!(bar.bias20(), None);
    }
}
