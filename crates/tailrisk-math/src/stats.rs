//! Return-series statistics.
//!
//! Population (biased) moment estimators over a series of fractional
//! periodic returns, plus the linear-interpolation percentile rule used by
//! the empirical VaR estimators.

use crate::error::{MathError, MathResult};

/// Volatility below this threshold is treated as a flat series, making
/// the standardized third and fourth moments 0/0.
const FLAT_SERIES_TOLERANCE: f64 = 1e-12;

/// First four population moments of a return series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnMoments {
    /// Arithmetic mean return.
    pub mean: f64,
    /// Population standard deviation.
    pub volatility: f64,
    /// Third standardized moment.
    pub skewness: f64,
    /// Fourth standardized moment minus 3.
    pub excess_kurtosis: f64,
}

/// Computes the first four population moments of a return series.
///
/// Volatility is the square root of the average squared deviation (no
/// sample correction). For a flat series the standardized moments are
/// undefined; skewness and excess kurtosis are clamped to zero.
///
/// # Arguments
///
/// * `returns` - Fractional periodic returns (e.g., -0.05 for -5%)
pub fn return_moments(returns: &[f64]) -> MathResult<ReturnMoments> {
    if returns.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let volatility = variance.sqrt();

    if volatility < FLAT_SERIES_TOLERANCE {
        return Ok(ReturnMoments {
            mean,
            volatility,
            skewness: 0.0,
            excess_kurtosis: 0.0,
        });
    }

    let skewness = returns
        .iter()
        .map(|r| ((r - mean) / volatility).powi(3))
        .sum::<f64>()
        / n;
    let excess_kurtosis = returns
        .iter()
        .map(|r| ((r - mean) / volatility).powi(4))
        .sum::<f64>()
        / n
        - 3.0;

    Ok(ReturnMoments {
        mean,
        volatility,
        skewness,
        excess_kurtosis,
    })
}

/// Arithmetic mean of a non-empty slice.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation of a non-empty slice.
pub fn std_dev(values: &[f64]) -> MathResult<f64> {
    Ok(return_moments(values)?.volatility)
}

/// Returns a copy of `values` sorted ascending.
///
/// NaN entries compare equal to their neighbors, matching the sort used
/// throughout the estimators.
#[must_use]
pub fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Interpolated percentile of an ascending-sorted slice.
///
/// Uses the linear rule: the target position is `pct / 100 × (n − 1)`,
/// with the fractional part interpolated between the bracketing order
/// statistics.
///
/// # Arguments
///
/// * `sorted` - Samples sorted ascending
/// * `pct` - Percentile in `[0, 100]`
pub fn percentile_of_sorted(sorted: &[f64], pct: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(MathError::invalid_input(format!(
            "percentile must be in [0, 100], got {pct}"
        )));
    }

    let position = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return Ok(sorted[lower]);
    }

    let fraction = position - lower as f64;
    Ok(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

/// Median of an ascending-sorted slice.
pub fn median_of_sorted(sorted: &[f64]) -> MathResult<f64> {
    percentile_of_sorted(sorted, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments_known_series() {
        let returns = vec![0.01, -0.02, 0.03, -0.01, 0.02];
        let moments = return_moments(&returns).unwrap();

        assert_relative_eq!(moments.mean, 0.006, epsilon = 1e-12);
        // Population variance of the series above.
        let expected_var = returns
            .iter()
            .map(|r| (r - 0.006_f64).powi(2))
            .sum::<f64>()
            / 5.0;
        assert_relative_eq!(moments.volatility, expected_var.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_moments_flat_series_clamps() {
        let moments = return_moments(&[0.01; 50]).unwrap();
        assert_relative_eq!(moments.mean, 0.01, epsilon = 1e-12);
        assert!(moments.volatility < 1e-12);
        assert_eq!(moments.skewness, 0.0);
        assert_eq!(moments.excess_kurtosis, 0.0);
    }

    #[test]
    fn test_moments_symmetric_series_zero_skew() {
        let moments = return_moments(&[-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap();
        assert_relative_eq!(moments.skewness, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moments_empty() {
        assert!(return_moments(&[]).is_err());
    }

    #[test]
    fn test_percentile_interpolation() {
        // The worked scenario from the historical estimator: position
        // 0.05 × 9 = 0.45 between -0.05 and -0.03.
        let sorted = vec![
            -0.05, -0.03, -0.02, -0.01, -0.01, 0.01, 0.01, 0.02, 0.02, 0.03,
        ];
        let q = percentile_of_sorted(&sorted, 5.0).unwrap();
        assert_relative_eq!(q, -0.041, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_endpoints() {
        let sorted = vec![1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile_of_sorted(&sorted, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile_of_sorted(&sorted, 100.0).unwrap(), 4.0);
        assert_relative_eq!(percentile_of_sorted(&sorted, 50.0).unwrap(), 2.5);
    }

    #[test]
    fn test_percentile_single_element() {
        assert_relative_eq!(percentile_of_sorted(&[0.07], 5.0).unwrap(), 0.07);
    }

    #[test]
    fn test_percentile_out_of_range() {
        assert!(percentile_of_sorted(&[1.0], 101.0).is_err());
        assert!(percentile_of_sorted(&[1.0], -0.5).is_err());
    }

    #[test]
    fn test_median() {
        assert_relative_eq!(median_of_sorted(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
        assert_relative_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_sorted_ascending() {
        let sorted = sorted_ascending(&[0.03, -0.05, 0.01]);
        assert_eq!(sorted, vec![-0.05, 0.01, 0.03]);
    }
}
