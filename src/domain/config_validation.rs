//! Configuration validation for the `[signal]` section.
//!
//! Checks that every present key parses and that the resulting thresholds are
//! usable before a signal pass runs.

use crate::domain::error::SignalError;
use crate::domain::strategy::{SignalParams, SECTION};
use crate::ports::config_port::ConfigPort;

const COUNT_KEYS: [&str; 6] = [
    "warmup_bars",
    "grace_days",
    "structure_lookback",
    "breakout_lookback",
    "trust_streak_days",
    "ma60_rising_lookback",
];

const REAL_KEYS: [&str; 18] = [
    "hard_stop_atr",
    "trailing_atr",
    "sudden_drop_pct",
    "sudden_body_ratio",
    "high_profit_gain",
    "divergence_rsi_ceiling",
    "divergence_rsi_peak",
    "divergence_pullback",
    "max_entry_bias",
    "reversal_volume_ratio",
    "breakout_volume_ratio",
    "bollinger_expansion",
    "solid_body_ratio",
    "strong_gain_pct",
    "ma60_rising_factor",
    "ma60_overextension",
    "add_touch_band",
    "max_add_bias",
];

pub fn validate_signal_config(config: &dyn ConfigPort) -> Result<(), SignalError> {
    validate_parseable(config)?;
    validate_params(&SignalParams::from_config(config))
}

fn validate_parseable(config: &dyn ConfigPort) -> Result<(), SignalError> {
    for key in COUNT_KEYS {
        if let Some(raw) = config.get_string(SECTION, key) {
            if raw.trim().parse::<usize>().is_err() {
                return Err(invalid(key, "must be a non-negative integer"));
            }
        }
    }
    for key in REAL_KEYS {
        if let Some(raw) = config.get_string(SECTION, key) {
            match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => {}
                _ => return Err(invalid(key, "must be a finite number")),
            }
        }
    }
    Ok(())
}

pub fn validate_params(p: &SignalParams) -> Result<(), SignalError> {
    positive_count("warmup_bars", p.warmup_bars)?;
    positive_count("structure_lookback", p.structure_lookback)?;
    positive_count("breakout_lookback", p.breakout_lookback)?;
    positive_count("trust_streak_days", p.trust_streak_days)?;
    positive_count("ma60_rising_lookback", p.ma60_rising_lookback)?;

    positive("hard_stop_atr", p.hard_stop_atr)?;
    positive("trailing_atr", p.trailing_atr)?;
    positive("high_profit_gain", p.high_profit_gain)?;
    positive("reversal_volume_ratio", p.reversal_volume_ratio)?;
    positive("breakout_volume_ratio", p.breakout_volume_ratio)?;
    positive("bollinger_expansion", p.bollinger_expansion)?;
    positive("ma60_rising_factor", p.ma60_rising_factor)?;
    positive("ma60_overextension", p.ma60_overextension)?;

    unit_ratio("sudden_drop_pct", p.sudden_drop_pct)?;
    unit_ratio("sudden_body_ratio", p.sudden_body_ratio)?;
    unit_ratio("divergence_pullback", p.divergence_pullback)?;
    unit_ratio("max_entry_bias", p.max_entry_bias)?;
    unit_ratio("solid_body_ratio", p.solid_body_ratio)?;
    unit_ratio("strong_gain_pct", p.strong_gain_pct)?;
    unit_ratio("add_touch_band", p.add_touch_band)?;
    unit_ratio("max_add_bias", p.max_add_bias)?;

    rsi_level("divergence_rsi_ceiling", p.divergence_rsi_ceiling)?;
    rsi_level("divergence_rsi_peak", p.divergence_rsi_peak)?;
    Ok(())
}

fn invalid(key: &str, reason: &str) -> SignalError {
    SignalError::ConfigInvalid {
        section: SECTION.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn positive_count(key: &str, value: usize) -> Result<(), SignalError> {
    if value == 0 {
        return Err(invalid(key, "must be at least 1"));
    }
    Ok(())
}

fn positive(key: &str, value: f64) -> Result<(), SignalError> {
    if value.is_nan() || value <= 0.0 {
        return Err(invalid(key, "must be positive"));
    }
    Ok(())
}

fn unit_ratio(key: &str, value: f64) -> Result<(), SignalError> {
    if value.is_nan() || value <= 0.0 || value > 1.0 {
        return Err(invalid(key, "must be in (0, 1]"));
    }
    Ok(())
}

fn rsi_level(key: &str, value: f64) -> Result<(), SignalError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(key, "must be between 0 and 100"));
    }
    Ok(())
}
