//! Pearson correlation over return series.
//!
//! Correlations are computed with population moments. A zero-variance
//! series has no defined correlation against anything; those entries are
//! reported as 0.0 rather than NaN so downstream matrices stay usable.

use crate::error::{MathError, MathResult};

/// Variance below this threshold makes the correlation denominator
/// effectively zero.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Pearson correlation coefficient of two equal-length series.
///
/// Returns 0.0 when either series has (near-)zero variance; the result is
/// clamped to `[-1, 1]` to absorb floating-point drift.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.is_empty() || y.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if x.len() != y.len() {
        return Err(MathError::invalid_input(format!(
            "series lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x / n < ZERO_VARIANCE_TOLERANCE || var_y / n < ZERO_VARIANCE_TOLERANCE {
        return Ok(0.0);
    }

    Ok((covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Pairwise Pearson correlation matrix over a set of series.
///
/// All series are truncated to the shortest common length before
/// correlating. The result is symmetric with a unit diagonal.
pub fn correlation_matrix(series: &[Vec<f64>]) -> MathResult<Vec<Vec<f64>>> {
    if series.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    let window = series.iter().map(Vec::len).min().unwrap_or(0);
    if window == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }

    let n = series.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let rho = pearson_correlation(&series[i][..window], &series[j][..window])?;
            matrix[i][j] = rho;
            matrix[j][i] = rho;
        }
    }

    Ok(matrix)
}
