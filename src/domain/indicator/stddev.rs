//! Population standard deviation, used by the Bollinger bands.
//!
//! sqrt(sum((V[j] - mean)^2) / n) over one window.

/// Population standard deviation of `window` around a precomputed `mean`.
pub(crate) fn population_stddev(window: &[f64], mean: f64) -> f64 {
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / window.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(w: &[f64]) -> f64 {
        w.iter().sum::<f64>() / w.len() as f64
    }

    #[test]
    fn stddev_constant_values() {
        let w = [100.0; 5];
        assert!(population_stddev(&w, mean(&w)).abs() < f64::EPSILON);
    }

    #[test]
    fn stddev_known_values() {
        let w = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_stddev(&w, mean(&w)) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn stddev_divides_by_n() {
        // sample stddev would be 10, population is sqrt(200/3)
        let w = [10.0, 20.0, 30.0];
        assert!((population_stddev(&w, 20.0) - (200.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
