//! Strategy parameters for the trend signal engine.
//!
//! Every threshold the rules compare against lives here so a strategy variant can
//! be expressed as a different `SignalParams` value. Defaults are the tuned
//! values of the reference strategy.

use crate::ports::config_port::ConfigPort;

pub const SECTION: &str = "signal";

#[derive(Debug, Clone, PartialEq)]
pub struct SignalParams {
    /// Candles skipped before the first rule evaluation.
    pub warmup_bars: usize,

    /// Days after entry during which only the hard stop can exit.
    pub grace_days: u32,
    /// Hard stop distance from entry, in ATR multiples.
    pub hard_stop_atr: f64,
    /// Chandelier distance from the post-entry extreme, in ATR multiples.
    pub trailing_atr: f64,
    /// Same-day drop `(open - close) / open` that marks a catastrophic candle.
    pub sudden_drop_pct: f64,
    /// Body-to-range ratio of a catastrophic candle.
    pub sudden_body_ratio: f64,
    /// Trailing window (excluding today) whose lowest low defines the structure.
    pub structure_lookback: usize,
    /// Unrealised gain above which the protective exits arm.
    pub high_profit_gain: f64,
    /// RSI must have cooled below this for a divergence exit.
    pub divergence_rsi_ceiling: f64,
    /// RSI recorded at the extreme must have exceeded this for a divergence exit.
    pub divergence_rsi_peak: f64,
    /// Close must be below `extreme * divergence_pullback` for a divergence exit.
    pub divergence_pullback: f64,

    /// Maximum `(close - MA20) / MA20` at a long entry.
    pub max_entry_bias: f64,
    /// Volume ratio needed by the MA20 reversal cross.
    pub reversal_volume_ratio: f64,
    /// Volume ratio needed by breakout and Bollinger expansion entries.
    pub breakout_volume_ratio: f64,
    /// Trailing window (excluding today) whose highest high must be exceeded.
    pub breakout_lookback: usize,
    /// Day-over-day Bollinger width growth for an expansion entry.
    pub bollinger_expansion: f64,
    /// Body-to-range ratio of a solid bullish candle.
    pub solid_body_ratio: f64,
    /// Daily gain that qualifies a candle regardless of body.
    pub strong_gain_pct: f64,
    /// Consecutive days of positive trust net buy, today included.
    pub trust_streak_days: usize,

    /// MA60 counts as rising when above its value `ma60_rising_lookback` days ago times this.
    pub ma60_rising_factor: f64,
    pub ma60_rising_lookback: usize,
    /// Distance above MA60 that allows a short even while MA60 rises.
    pub ma60_overextension: f64,

    /// Band around MA20 that counts as a touch for add-ons.
    pub add_touch_band: f64,
    /// Maximum `(close - MA20) / MA20` for an add-on.
    pub max_add_bias: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        SignalParams {
            warmup_bars: 60,
            grace_days: 6,
            hard_stop_atr: 2.0,
            trailing_atr: 3.0,
            sudden_drop_pct: 0.06,
            sudden_body_ratio: 0.60,
            structure_lookback: 20,
            high_profit_gain: 0.40,
            divergence_rsi_ceiling: 70.0,
            divergence_rsi_peak: 75.0,
            divergence_pullback: 0.97,
            max_entry_bias: 0.18,
            reversal_volume_ratio: 1.25,
            breakout_volume_ratio: 1.0,
            breakout_lookback: 20,
            bollinger_expansion: 0.10,
            solid_body_ratio: 0.45,
            strong_gain_pct: 0.03,
            trust_streak_days: 3,
            ma60_rising_factor: 1.005,
            ma60_rising_lookback: 5,
            ma60_overextension: 0.25,
            add_touch_band: 0.02,
            max_add_bias: 0.05,
        }
    }
}

impl SignalParams {
    /// Read the `[signal]` section, falling back to the default for every missing key.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let d = SignalParams::default();
        let count = |key: &str, default: usize| -> usize {
            usize::try_from(config.get_int(SECTION, key, default as i64)).unwrap_or(default)
        };
        let days = |key: &str, default: u32| -> u32 {
            u32::try_from(config.get_int(SECTION, key, i64::from(default))).unwrap_or(default)
        };
        let real = |key: &str, default: f64| config.get_double(SECTION, key, default);

        SignalParams {
            warmup_bars: count("warmup_bars", d.warmup_bars),
            grace_days: days("grace_days", d.grace_days),
            hard_stop_atr: real("hard_stop_atr", d.hard_stop_atr),
            trailing_atr: real("trailing_atr", d.trailing_atr),
            sudden_drop_pct: real("sudden_drop_pct", d.sudden_drop_pct),
            sudden_body_ratio: real("sudden_body_ratio", d.sudden_body_ratio),
            structure_lookback: count("structure_lookback", d.structure_lookback),
            high_profit_gain: real("high_profit_gain", d.high_profit_gain),
            divergence_rsi_ceiling: real("divergence_rsi_ceiling", d.divergence_rsi_ceiling),
            divergence_rsi_peak: real("divergence_rsi_peak", d.divergence_rsi_peak),
            divergence_pullback: real("divergence_pullback", d.divergence_pullback),
            max_entry_bias: real("max_entry_bias", d.max_entry_bias),
            reversal_volume_ratio: real("reversal_volume_ratio", d.reversal_volume_ratio),
            breakout_volume_ratio: real("breakout_volume_ratio", d.breakout_volume_ratio),
            breakout_lookback: count("breakout_lookback", d.breakout_lookback),
            bollinger_expansion: real("bollinger_expansion", d.bollinger_expansion),
            solid_body_ratio: real("solid_body_ratio", d.solid_body_ratio),
            strong_gain_pct: real("strong_gain_pct", d.strong_gain_pct),
            trust_streak_days: count("trust_streak_days", d.trust_streak_days),
            ma60_rising_factor: real("ma60_rising_factor", d.ma60_rising_factor),
            ma60_rising_lookback: count("ma60_rising_lookback", d.ma60_rising_lookback),
            ma60_overextension: real("ma60_overextension", d.ma60_overextension),
            add_touch_band: real("add_touch_band", d.add_touch_band),
            max_add_bias: real("max_add_bias", d.max_add_bias),
        }
    }
}
