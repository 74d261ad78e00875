//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//! - Width: (Upper - Lower) / Middle, unavailable when Middle is zero
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) entries are unavailable.

use crate::domain::indicator::stddev::population_stddev;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULT_X100: u32 = 200;

#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
    pub width: IndicatorSeries,
}

pub fn calculate_bollinger(
    values: &[f64],
    period: usize,
    stddev_mult_x100: u32,
) -> BollingerBands {
    let len = values.len();
    let mult = stddev_mult_x100 as f64 / 100.0;

    let mut upper = vec![None; len];
    let mut middle = vec![None; len];
    let mut lower = vec![None; len];
    let mut width = vec![None; len];

    if period > 0 && len >= period {
        for i in (period - 1)..len {
            let window = &values[i + 1 - period..=i];
            let mid = window.iter().sum::<f64>() / period as f64;
            let stddev = population_stddev(window, mid);
            let up = mid + mult * stddev;
            let lo = mid - mult * stddev;

            upper[i] = Some(up);
            middle[i] = Some(mid);
            lower[i] = Some(lo);
            width[i] = (mid != 0.0).then(|| (up - lo) / mid);
        }
    }

    BollingerBands {
        upper: IndicatorSeries::new(
            IndicatorType::BollingerUpper {
                period,
                stddev_mult_x100,
            },
            upper,
        ),
        middle: IndicatorSeries::new(
            IndicatorType::BollingerMiddle {
                period,
                stddev_mult_x100,
            },
            middle,
        ),
        lower: IndicatorSeries::new(
            IndicatorType::BollingerLower {
                period,
                stddev_mult_x100,
            },
            lower,
        ),
        width: IndicatorSeries::new(
            IndicatorType::BollingerWidth {
                period,
                stddev_mult_x100,
            },
            width,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_warmup() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0, 40.0, 50.0], 3, 200);

        assert_eq!(bands.upper.get(0), None);
        assert_eq!(bands.upper.get(1), None);
        assert_eq!(bands.upper.first_valid_index(), Some(2));
        assert_eq!(bands.width.first_valid_index(), Some(2));
        assert_eq!(bands.middle.len(), 5);
    }

    #[test]
    fn bollinger_constant_values() {
        let bands = calculate_bollinger(&[100.0; 5], 3, 200);

        assert!((bands.middle.get(2).unwrap() - 100.0).abs() < f64::EPSILON);
        assert!((bands.upper.get(2).unwrap() - 100.0).abs() < f64::EPSILON);
        assert!((bands.lower.get(2).unwrap() - 100.0).abs() < f64::EPSILON);
        assert!((bands.width.get(2).unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0], 3, 200);

        let expected_middle: f64 = (10.0 + 20.0 + 30.0) / 3.0;
        let variance: f64 = ((10.0 - expected_middle).powi(2)
            + (20.0 - expected_middle).powi(2)
            + (30.0 - expected_middle).powi(2))
            / 3.0;
        let stddev = variance.sqrt();
        let expected_upper = expected_middle + 2.0 * stddev;
        let expected_lower = expected_middle - 2.0 * stddev;
        let expected_width = (expected_upper - expected_lower) / expected_middle;

        assert!((bands.middle.get(2).unwrap() - expected_middle).abs() < 1e-10);
        assert!((bands.upper.get(2).unwrap() - expected_upper).abs() < 1e-10);
        assert!((bands.lower.get(2).unwrap() - expected_lower).abs() < 1e-10);
        assert!((bands.width.get(2).unwrap() - expected_width).abs() < 1e-10);
    }

    #[test]
    fn bollinger_zero_middle_has_no_width() {
        let bands = calculate_bollinger(&[-1.0, 0.0, 1.0], 3, 200);
        assert_eq!(bands.middle.get(2), Some(0.0));
        assert_eq!(bands.width.get(2), None);
    }

    #[test]
    fn bollinger_symmetry() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0], 3, 200);
        let upper_dist = bands.upper.get(2).unwrap() - bands.middle.get(2).unwrap();
        let lower_dist = bands.middle.get(2).unwrap() - bands.lower.get(2).unwrap();
        assert!((upper_dist - lower_dist).abs() < 1e-10);
    }
}
