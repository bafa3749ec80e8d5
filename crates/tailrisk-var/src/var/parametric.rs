//! Parametric VaR calculation.
//!
//! The quantile is taken in closed form from a distribution fitted to the
//! sample mean and volatility. Normal CVaR uses the exact tail
//! expectation `μ - σ·φ(z)/(1-c)`; Student-t CVaR uses the legacy
//! `1.2 × |quantile|` approximation (the exact t tail expectation exists,
//! but downstream consumers expect these figures).

use super::{to_money, validate_inputs, Distribution, MethodStats, VaRMethod, VaRResult};
use crate::RiskError;
use chrono::Utc;
use statrs::distribution::{Continuous, ContinuousCDF, Normal, StudentsT};
use tailrisk_math::stats::return_moments;

/// Scaling factor applied to the Student-t quantile in place of the exact
/// tail expectation.
const STUDENT_T_CVAR_FACTOR: f64 = 1.2;

/// Calculate parametric VaR from a series of returns.
///
/// # Arguments
///
/// * `returns` - Historical returns used to fit the distribution
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `distribution` - Distribution the quantile is taken from
/// * `portfolio_value` - Current portfolio value
///
/// # Returns
///
/// VaR result with the fitted z/t score and degrees of freedom in the
/// method stats.
pub fn parametric_var(
    returns: &[f64],
    confidence_level: f64,
    distribution: Distribution,
    portfolio_value: f64,
) -> Result<VaRResult, RiskError> {
    validate_inputs(returns, confidence_level, portfolio_value)?;

    let moments = return_moments(returns)?;
    let alpha = 1.0 - confidence_level;

    let (var_return, cvar_return, stats) = match distribution {
        Distribution::Normal => {
            let standard_normal = Normal::new(0.0, 1.0).unwrap();
            let z = standard_normal.inverse_cdf(alpha);
            let var_return = moments.mean + z * moments.volatility;
            let cvar_return = moments.mean - moments.volatility * standard_normal.pdf(z) / alpha;

            let stats = MethodStats::Parametric {
                distribution,
                mean_return: moments.mean,
                z_score: Some(z),
                t_score: None,
                degrees_of_freedom: None,
            };
            (var_return, cvar_return, stats)
        }
        Distribution::StudentT => {
            if returns.len() < 2 {
                return Err(RiskError::InvalidInput(
                    "student-t fit requires at least 2 observations".to_string(),
                ));
            }
            let df = (returns.len() - 1) as f64;
            let student_t = StudentsT::new(0.0, 1.0, df)
                .map_err(|e| RiskError::CalculationFailed(e.to_string()))?;
            let t = student_t.inverse_cdf(alpha);
            let var_return = moments.mean + t * moments.volatility;
            let cvar_return = var_return * STUDENT_T_CVAR_FACTOR;

            let stats = MethodStats::Parametric {
                distribution,
                mean_return: moments.mean,
                z_score: None,
                t_score: Some(t),
                degrees_of_freedom: Some(df as u64),
            };
            (var_return, cvar_return, stats)
        }
    };

    let var_value = (var_return * portfolio_value).abs();
    let cvar_value = (cvar_return * portfolio_value).abs();

    Ok(VaRResult {
        method: VaRMethod::Parametric,
        confidence_level,
        var_value: to_money(var_value),
        var_percentage: var_return.abs() * 100.0,
        cvar_value: to_money(cvar_value),
        cvar_percentage: cvar_return.abs() * 100.0,
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
