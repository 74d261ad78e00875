//! Entry, exit and add-on predicates.
//!
//! Each predicate returns the first matching reason in priority order, or `None`.
//! An unavailable input never satisfies a comparison.

use crate::domain::signal::context::BarContext;
use crate::domain::strategy::SignalParams;
use crate::domain::trend::TrendState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Close moved more than `hard_stop_atr` ATRs against the entry during the grace period.
    HardStop,
    /// Long-only: large bearish candle with a dominant body.
    SuddenDeath,
    /// Long-only: close below the trailing structure low.
    StructureBreak,
    /// Close retraced more than `trailing_atr` ATRs from the post-entry extreme (long).
    TrailingStop,
    /// Long-only: protective exit once the gain is large.
    ProfitProtect,
    /// Close back through MA20 with institutions on the other side (long).
    Standard,
    /// Chandelier stop for a short.
    ShortTrailingStop,
    /// Close back above MA20 with institutions buying (short).
    ShortStandard,
}

impl ExitReason {
    pub fn text(self) -> &'static str {
        match self {
            ExitReason::HardStop => "災難停損",
            ExitReason::SuddenDeath => "長黑急殺",
            ExitReason::StructureBreak => "跌破結構停損",
            ExitReason::TrailingStop => "ATR移動停利",
            ExitReason::ProfitProtect => "利多平倉",
            ExitReason::Standard => "平多",
            ExitReason::ShortTrailingStop => "ATR空單停損",
            ExitReason::ShortStandard => "平空",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryReason {
    ReversalCross,
    Breakout,
    BollingerExpansion,
    TrustAccumulation,
    Breakdown,
}

impl EntryReason {
    pub fn text(self) -> &'static str {
        match self {
            EntryReason::ReversalCross => "起漲(MA20)",
            EntryReason::Breakout => "突破20日高",
            EntryReason::BollingerExpansion => "布林擴張",
            EntryReason::TrustAccumulation => "投信連買",
            EntryReason::Breakdown => "跌破MA20",
        }
    }
}

pub const ADD_LONG_TEXT: &str = "多方加碼";

fn in_grace(state: &TrendState, params: &SignalParams) -> bool {
    state.duration_days <= params.grace_days
}

pub fn long_exit(state: &TrendState, bar: &BarContext, params: &SignalParams) -> Option<ExitReason> {
    if in_grace(state, params) {
        let hard_stop = bar
            .atr14
            .is_some_and(|atr| bar.close < state.entry_price - params.hard_stop_atr * atr);
        return hard_stop.then_some(ExitReason::HardStop);
    }

    let drop = bar.open - bar.close;
    let sudden_death = bar.open > 0.0
        && bar.range() > 0.0
        && drop / bar.open > params.sudden_drop_pct
        && drop / bar.range() > params.sudden_body_ratio;
    if sudden_death {
        return Some(ExitReason::SuddenDeath);
    }

    if bar.trailing_low.is_some_and(|low| bar.close < low) {
        return Some(ExitReason::StructureBreak);
    }

    if bar
        .atr14
        .is_some_and(|atr| bar.close < state.extreme_price - params.trailing_atr * atr)
    {
        return Some(ExitReason::TrailingStop);
    }

    let high_profit = state
        .unrealized_gain(bar.close)
        .is_some_and(|gain| gain > params.high_profit_gain);
    if high_profit {
        let below_ma10 = bar.sma10.is_some_and(|m| bar.close < m);
        let divergence = bar.rsi14.is_some_and(|rsi| rsi < params.divergence_rsi_ceiling)
            && state
                .rsi_at_extreme
                .is_some_and(|rsi| rsi > params.divergence_rsi_peak)
            && bar.close < state.extreme_price * params.divergence_pullback;
        if below_ma10 || divergence {
            return Some(ExitReason::ProfitProtect);
        }
    }

    if bar.sma20.is_some_and(|m| bar.close < m) && bar.flow.net < 0.0 {
        return Some(ExitReason::Standard);
    }

    None
}

pub fn short_exit(state: &TrendState, bar: &BarContext, params: &SignalParams) -> Option<ExitReason> {
    if in_grace(state, params) {
        let hard_stop = bar
            .atr14
            .is_some_and(|atr| bar.close > state.entry_price + params.hard_stop_atr * atr);
        return hard_stop.then_some(ExitReason::HardStop);
    }

    if bar
        .atr14
        .is_some_and(|atr| bar.close > state.extreme_price + params.trailing_atr * atr)
    {
        return Some(ExitReason::ShortTrailingStop);
    }

    if bar.sma20.is_some_and(|m| bar.close > m) && bar.flow.net > 0.0 {
        return Some(ExitReason::ShortStandard);
    }

    None
}

/// Solid bullish body or a strong daily gain.
fn qualifying_candle(bar: &BarContext, params: &SignalParams) -> bool {
    let solid_body = bar.close > bar.open
        && bar
            .body_ratio()
            .is_some_and(|ratio| ratio > params.solid_body_ratio);
    let strong_gain = bar
        .daily_change()
        .is_some_and(|change| change > params.strong_gain_pct);
    solid_body || strong_gain
}

pub fn long_entry(bar: &BarContext, params: &SignalParams) -> Option<EntryReason> {
    let ma20 = bar.sma20?;
    let bullish = bar.close > ma20 && bar.macd_histogram.is_some_and(|h| h > 0.0);
    let bias_safe = bar.bias20().is_some_and(|bias| bias < params.max_entry_bias);
    if !bullish || !bias_safe {
        return None;
    }

    let qualifying = qualifying_candle(bar, params);
    let volume_above = |threshold: f64| bar.volume_ratio.is_some_and(|vr| vr > threshold);

    let reversal = bar.prev_close <= ma20 && ma20 < bar.close;
    if reversal && volume_above(params.reversal_volume_ratio) && qualifying {
        return Some(EntryReason::ReversalCross);
    }

    let breakout = bar.trailing_high.is_some_and(|high| bar.close > high);
    if breakout && volume_above(params.breakout_volume_ratio) && qualifying {
        return Some(EntryReason::Breakout);
    }

    let expanding = match (bar.bollinger_width, bar.prev_bollinger_width) {
        (Some(width), Some(prev)) if prev > 0.0 => width > prev * (1.0 + params.bollinger_expansion),
        _ => false,
    };
    let above_band = bar.bollinger_upper.is_some_and(|upper| bar.close > upper);
    if expanding && above_band && volume_above(params.breakout_volume_ratio) && qualifying {
        return Some(EntryReason::BollingerExpansion);
    }

    if params.trust_streak_days > 0 && bar.trust_streak >= params.trust_streak_days {
        return Some(EntryReason::TrustAccumulation);
    }

    None
}

pub fn short_entry(bar: &BarContext, params: &SignalParams) -> Option<EntryReason> {
    let ma20 = bar.sma20?;
    let breakdown = bar.prev_close >= ma20 && ma20 > bar.close;
    let weakening = bar.macd_histogram.is_some_and(|h| h < 0.0)
        || matches!((bar.stoch_k, bar.stoch_d), (Some(k), Some(d)) if k < d);
    let selling = bar.flow.net < 0.0;

    (breakdown && weakening && selling && safe_to_short(bar, params))
        .then_some(EntryReason::Breakdown)
}

/// MA60 not rising, or price stretched far above it.
fn safe_to_short(bar: &BarContext, params: &SignalParams) -> bool {
    let Some(ma60) = bar.sma60 else {
        return false;
    };
    let rising = bar
        .sma60_before
        .map(|before| ma60 > before * params.ma60_rising_factor);
    let overextended = ma60 > 0.0 && (bar.close - ma60) / ma60 > params.ma60_overextension;
    rising == Some(false) || overextended
}

pub fn long_add_on(bar: &BarContext, params: &SignalParams) -> bool {
    let (Some(ma5), Some(ma10), Some(ma20)) = (bar.sma5, bar.sma10, bar.sma20) else {
        return false;
    };
    let stacked = ma5 > ma10 && ma10 > ma20;
    let touched = bar.low <= ma20 * (1.0 + params.add_touch_band)
        && bar.close >= ma20 * (1.0 - params.add_touch_band);
    let bias_ok = bar.bias20().is_some_and(|bias| bias < params.max_add_bias);
    stacked && touched && bar.flow.net >= 0.0 && bias_ok
}
