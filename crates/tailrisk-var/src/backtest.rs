//! VaR model backtesting.
//!
//! Counts how often realized losses exceeded the VaR predicted for that
//! period and runs the Kupiec proportion-of-failures test: a
//! likelihood-ratio statistic comparing the observed violation frequency
//! to the frequency the confidence level implies, referred to a χ²(1)
//! distribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::fmt;

use crate::var::VaRMethod;
use crate::RiskError;

/// Significance threshold for rejecting the VaR model.
const KUPIEC_SIGNIFICANCE: f64 = 0.05;

/// VaR model validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Method the validated estimates came from
    pub method: VaRMethod,
    /// Confidence level the estimates were produced at
    pub confidence_level: f64,
    /// Periods where the realized loss exceeded the predicted VaR
    pub violations: usize,
    /// Number of observation periods
    pub total_observations: usize,
    /// `violations / total_observations`
    pub violation_rate: f64,
    /// `floor(total_observations × (1 - confidence))`
    pub expected_violations: usize,
    /// Kupiec likelihood-ratio statistic (infinite when the observed rate
    /// is degenerate)
    pub kupiec_statistic: f64,
    /// `1 - χ²CDF(statistic, 1)`
    pub kupiec_p_value: f64,
    /// True when the p-value exceeds 0.05
    pub is_model_valid: bool,
    /// When the validation ran
    pub validation_date: DateTime<Utc>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} backtest: {}/{} violations ({:.2}% vs {:.2}% expected), p = {:.4}",
            self.method,
            self.violations,
            self.total_observations,
            self.violation_rate * 100.0,
            (1.0 - self.confidence_level) * 100.0,
            self.kupiec_p_value
        )
    }
}

/// Validate a VaR model against realized returns.
///
/// A violation at period `i` means `returns[i] < -var_estimates[i]`: the
/// realized loss exceeded the loss the model predicted. Estimates are in
/// the same fractional units as the returns.
///
/// # Arguments
///
/// * `returns` - Realized returns, one per period
/// * `var_estimates` - Prior VaR estimate per period (positive loss size)
/// * `confidence_level` - Confidence level the estimates were produced at
/// * `method` - Method label carried into the result
pub fn validate_var_model(
    returns: &[f64],
    var_estimates: &[f64],
    confidence_level: f64,
    method: VaRMethod,
) -> Result<ValidationResult, RiskError> {
    if returns.len() != var_estimates.len() {
        return Err(RiskError::LengthMismatch {
            returns: returns.len(),
            estimates: var_estimates.len(),
        });
    }
    if returns.is_empty() {
        return Err(RiskError::EmptyInput);
    }
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(RiskError::InvalidInput(
            "confidence level must be between 0 and 1".to_string(),
        ));
    }

    let total_observations = returns.len();
    let violations = returns
        .iter()
        .zip(var_estimates.iter())
        .filter(|(r, estimate)| **r < -**estimate)
        .count();
    let violation_rate = violations as f64 / total_observations as f64;
    let expected_violations =
        (total_observations as f64 * (1.0 - confidence_level)).floor() as usize;

    let (kupiec_statistic, kupiec_p_value) =
        kupiec_test(violations, total_observations, confidence_level);
    let is_model_valid = kupiec_p_value > KUPIEC_SIGNIFICANCE;

    Ok(ValidationResult {
        method,
        confidence_level,
        violations,
        total_observations,
        violation_rate,
        expected_violations,
        kupiec_statistic,
        kupiec_p_value,
        is_model_valid,
        validation_date: Utc::now(),
    })
}

/// Kupiec proportion-of-failures likelihood-ratio test.
///
/// Zero violations cannot reject the model (statistic 0, p-value 1). An
/// observed rate of 1 makes the log-likelihood degenerate; the statistic
/// is reported as +∞ with p-value 0.
fn kupiec_test(violations: usize, total_observations: usize, confidence_level: f64) -> (f64, f64) {
    if violations == 0 {
        return (0.0, 1.0);
    }

    let p_observed = violations as f64 / total_observations as f64;
    let p_expected = 1.0 - confidence_level;
    if p_observed >= 1.0 {
        return (f64::INFINITY, 0.0);
    }

    let survivors = (total_observations - violations) as f64;
    let statistic = 2.0
        * (violations as f64 * (p_observed / p_expected).ln()
            + survivors * ((1.0 - p_observed) / (1.0 - p_expected)).ln());
    let statistic = statistic.max(0.0);

    let chi_squared = ChiSquared::new(1.0).unwrap();
    let p_value = 1.0 - chi_squared.cdf(statistic);
    (statistic, p_value)
}
