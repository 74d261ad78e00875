//! Trend signal engine.
//!
//! A single left-to-right pass over the candles. At each index the pure
//! [`step`] function takes the carried [`TrendState`] and a [`BarContext`] and
//! returns the next state plus at most one marker:
//!
//! 1. Extremum update while a trend is held
//! 2. Exit evaluation; an exit ends processing of the index
//! 3. Entry evaluation, only from `Direction::None`; an entry ends processing of the index
//! 4. Long add-on evaluation
//!
//! There is no direct Long → Short transition: a reversal needs an exit on one
//! candle and an entry on a later one.

pub mod context;
pub mod rules;

pub use context::BarContext;
pub use rules::{EntryReason, ExitReason};

use crate::domain::candle::Candle;
use crate::domain::flow::{FlowAligner, InstitutionalFlow};
use crate::domain::indicator::IndicatorSet;
use crate::domain::marker::{Marker, SignalCategory};
use crate::domain::strategy::SignalParams;
use crate::domain::trend::{Direction, TrendState};

/// Markers from one pass together with the state left open at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRun {
    pub markers: Vec<Marker>,
    pub final_state: TrendState,
}

/// Advance the trend state by one candle.
pub fn step(
    state: TrendState,
    bar: &BarContext,
    params: &SignalParams,
) -> (TrendState, Option<Marker>) {
    let state = state.advance(bar.high, bar.low, bar.rsi14);

    match state.direction {
        Direction::Long => {
            if let Some(reason) = rules::long_exit(&state, bar, params) {
                let marker = Marker::new(bar.date, SignalCategory::ExitLong, reason.text());
                return (TrendState::default(), Some(marker));
            }
            if rules::long_add_on(bar, params) {
                let marker = Marker::new(bar.date, SignalCategory::AddLong, rules::ADD_LONG_TEXT);
                return (state, Some(marker));
            }
            (state, None)
        }
        Direction::Short => {
            if let Some(reason) = rules::short_exit(&state, bar, params) {
                let marker = Marker::new(bar.date, SignalCategory::ExitShort, reason.text());
                return (TrendState::default(), Some(marker));
            }
            (state, None)
        }
        Direction::None => {
            if let Some(reason) = rules::long_entry(bar, params) {
                let marker = Marker::new(bar.date, SignalCategory::EntryLong, reason.text());
                return (TrendState::enter_long(bar.close, bar.high, bar.rsi14), Some(marker));
            }
            if let Some(reason) = rules::short_entry(bar, params) {
                let marker = Marker::new(bar.date, SignalCategory::EntryShort, reason.text());
                return (TrendState::enter_short(bar.close, bar.low), Some(marker));
            }
            (state, None)
        }
    }
}

/// Compute markers with the default strategy parameters.
pub fn compute_signals(candles: &[Candle], flows: &[InstitutionalFlow]) -> Vec<Marker> {
    compute_signals_with(candles, flows, &SignalParams::default())
}

pub fn compute_signals_with(
    candles: &[Candle],
    flows: &[InstitutionalFlow],
    params: &SignalParams,
) -> Vec<Marker> {
    run_signals(candles, flows, params).markers
}

/// Full pass returning markers and the trend still open at the last candle.
///
/// Fewer than `warmup_bars` candles yields no markers.
pub fn run_signals(
    candles: &[Candle],
    flows: &[InstitutionalFlow],
    params: &SignalParams,
) -> SignalRun {
    let mut state = TrendState::default();
    let mut markers = Vec::new();

    if candles.len() < params.warmup_bars {
        tracing::debug!(
            candles = candles.len(),
            required = params.warmup_bars,
            "insufficient history, no signals"
        );
        return SignalRun {
            markers,
            final_state: state,
        };
    }

    let indicators = IndicatorSet::compute(candles);
    let aligner = FlowAligner::new(candles.iter().map(|c| c.date).collect(), flows);
    tracing::debug!(
        candles = candles.len(),
        flow_days = aligner.matched_days(),
        "starting signal pass"
    );

    for index in params.warmup_bars.max(1)..candles.len() {
        let bar = BarContext::build(index, candles, &indicators, &aligner, params);
        let (next, marker) = step(state, &bar, params);

        if let Some(marker) = marker {
            if marker.category.is_exit() {
                tracing::debug!(
                    date = %marker.time,
                    reason = %marker.text,
                    direction = %state.direction,
                    duration = state.duration_days + 1,
                    gain = state.unrealized_gain(bar.close).unwrap_or(0.0),
                    "exit"
                );
            } else {
                tracing::debug!(
                    date = %marker.time,
                    category = %marker.category,
                    reason = %marker.text,
                    close = bar.close,
                    "signal"
                );
            }
            markers.push(marker);
        }
        state = next;
    }

    SignalRun {
        markers,
        final_state: state,
    }
}
