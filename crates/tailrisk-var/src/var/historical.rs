//! Historical VaR calculation.

use super::{empirical_tail, to_money, validate_inputs, MethodStats, VaRMethod, VaRResult};
use crate::RiskError;
use chrono::Utc;
use tailrisk_math::stats::{median_of_sorted, return_moments, sorted_ascending};

/// Calculate historical VaR from a series of returns.
///
/// The returns are sorted ascending and the `(1 - confidence) × 100`
/// percentile is interpolated between the bracketing order statistics.
/// CVaR is the mean of the returns at or below that quantile.
///
/// # Arguments
///
/// * `returns` - Historical returns (as decimals, e.g., -0.01 for -1%)
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `portfolio_value` - Current portfolio value
///
/// # Example
///
/// ```ignore
/// let returns = vec![-0.05, -0.03, 0.01, 0.02, -0.01];
/// let result = historical_var(&returns, 0.95, 1_000_000.0)?;
/// assert!(result.cvar_value >= result.var_value);
/// ```
pub fn historical_var(
    returns: &[f64],
    confidence_level: f64,
    portfolio_value: f64,
) -> Result<VaRResult, RiskError> {
    validate_inputs(returns, confidence_level, portfolio_value)?;

    let moments = return_moments(returns)?;
    let sorted = sorted_ascending(returns);
    let tail = empirical_tail(&sorted, confidence_level)?;

    let var_value = (tail.var_return * portfolio_value).abs();
    let var_percentage = tail.var_return.abs() * 100.0;
    let cvar_value = (tail.cvar_return * portfolio_value).abs();
    let cvar_percentage = tail.cvar_return.abs() * 100.0;

    let stats = MethodStats::Historical {
        min_return: sorted[0],
        max_return: sorted[sorted.len() - 1],
        mean_return: moments.mean,
        median_return: median_of_sorted(&sorted)?,
        percentile_used: tail.percentile_used,
        tail_observations: tail.tail_observations,
    };

    Ok(VaRResult {
        method: VaRMethod::Historical,
        confidence_level,
        var_value: to_money(var_value),
        var_percentage,
        cvar_value: to_money(cvar_value),
        cvar_percentage,
        expected_shortfall: to_money(cvar_value),
        portfolio_value: to_money(portfolio_value),
        calculation_date: Utc::now(),
        data_points: returns.len(),
        volatility: moments.volatility,
        skewness: moments.skewness,
        excess_kurtosis: moments.excess_kurtosis,
        stats,
    })
}
