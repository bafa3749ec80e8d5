//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the loss threshold not expected to be exceeded at a given
//! confidence level; CVaR (expected shortfall) is the average loss beyond
//! that threshold. Four estimators are provided: historical, parametric,
//! Monte Carlo, and a weighted hybrid of the three.

mod historical;
mod hybrid;
mod monte_carlo;
mod parametric;

pub use historical::*;
pub use hybrid::*;
pub use monte_carlo::*;
pub use parametric::*;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RiskError;
use tailrisk_math::stats::percentile_of_sorted;

/// Conventional portfolio value used when the caller has no better figure.
pub const DEFAULT_PORTFOLIO_VALUE: f64 = 1_000_000.0;

/// VaR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaRMethod {
    /// Empirical percentile of observed returns
    Historical,
    /// Closed-form quantile under a fitted distribution
    Parametric,
    /// Simulation from a fitted normal distribution
    MonteCarlo,
    /// Weighted blend of the three base methods
    Hybrid,
}

impl fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Historical => write!(f, "Historical VaR"),
            Self::Parametric => write!(f, "Parametric VaR"),
            Self::MonteCarlo => write!(f, "Monte Carlo VaR"),
            Self::Hybrid => write!(f, "Hybrid VaR"),
        }
    }
}

/// Return distribution assumed by the parametric estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    /// Normal (Gaussian) returns
    Normal,
    /// Student-t with degrees of freedom fitted as n - 1
    StudentT,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::StudentT => write!(f, "student-t"),
        }
    }
}

impl FromStr for Distribution {
    type Err = RiskError;

    /// Parses a wire tag. `"t"` is accepted as a legacy alias for
    /// `"student-t"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "student-t" | "t" => Ok(Self::StudentT),
            other => Err(RiskError::UnsupportedDistribution(other.to_string())),
        }
    }
}

/// Blend weights for the hybrid estimator.
///
/// The weights are applied as-is: they are NOT validated or normalized to
/// sum to 1. Callers that want a convex combination are responsible for
/// supplying one; unnormalized blends are allowed deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodWeights {
    /// Weight on the historical estimate.
    pub historical: f64,
    /// Weight on the parametric (normal) estimate.
    pub parametric: f64,
    /// Weight on the Monte Carlo estimate.
    pub monte_carlo: f64,
}

impl Default for MethodWeights {
    fn default() -> Self {
        Self {
            historical: 0.4,
            parametric: 0.3,
            monte_carlo: 0.3,
        }
    }
}

/// Pairwise absolute differences between the base estimators' VaR values,
/// reported by the hybrid method as an agreement diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAgreement {
    /// |historical - parametric|
    pub historical_parametric: Decimal,
    /// |historical - monte carlo|
    pub historical_monte_carlo: Decimal,
    /// |parametric - monte carlo|
    pub parametric_monte_carlo: Decimal,
}

/// Method-specific detail statistics attached to a [`VaRResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodStats {
    /// Detail for the historical estimator.
    Historical {
        /// Smallest observed return.
        min_return: f64,
        /// Largest observed return.
        max_return: f64,
        /// Mean observed return.
        mean_return: f64,
        /// Median observed return.
        median_return: f64,
        /// Percentile evaluated, `(1 - confidence) × 100`.
        percentile_used: f64,
        /// Number of returns at or below the VaR quantile.
        tail_observations: usize,
    },
    /// Detail for the parametric estimator.
    Parametric {
        /// Distribution the quantile was taken from.
        distribution: Distribution,
        /// Fitted mean return.
        mean_return: f64,
        /// Standard-normal quantile (normal only).
        z_score: Option<f64>,
        /// Student-t quantile (student-t only).
        t_score: Option<f64>,
        /// Fitted degrees of freedom (student-t only).
        degrees_of_freedom: Option<u64>,
    },
    /// Detail for the Monte Carlo estimator.
    MonteCarlo {
        /// Number of simulated draws.
        simulations: usize,
        /// Mean of the simulated sample.
        simulated_mean: f64,
        /// Standard deviation of the simulated sample.
        simulated_std: f64,
        /// Percentile evaluated on the simulated sample.
        percentile_used: f64,
        /// Simulated returns at or below the VaR quantile.
        tail_observations: usize,
    },
    /// Detail for the hybrid estimator.
    Hybrid {
        /// Blend weights applied.
        weights: MethodWeights,
        /// Raw historical VaR.
        historical_var: Decimal,
        /// Raw parametric (normal) VaR.
        parametric_var: Decimal,
        /// Raw Monte Carlo VaR.
        monte_carlo_var: Decimal,
        /// Pairwise agreement between the base methods.
        agreement: MethodAgreement,
    },
}

/// Value at Risk result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// Method used for calculation
    pub method: VaRMethod,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// VaR in currency units (absolute loss)
    pub var_value: Decimal,
    /// VaR as a percentage of portfolio value
    pub var_percentage: f64,
    /// CVaR / expected shortfall in currency units
    pub cvar_value: Decimal,
    /// CVaR as a percentage of portfolio value
    pub cvar_percentage: f64,
    /// Alias of `cvar_value` under its other common name
    pub expected_shortfall: Decimal,
    /// Portfolio value the loss figures are scaled by
    pub portfolio_value: Decimal,
    /// When the calculation ran
    pub calculation_date: DateTime<Utc>,
    /// Number of input observations
    pub data_points: usize,
    /// Population volatility of the input series
    pub volatility: f64,
    /// Skewness of the input series
    pub skewness: f64,
    /// Excess kurtosis of the input series
    pub excess_kurtosis: f64,
    /// Method-specific detail statistics
    pub stats: MethodStats,
}

impl fmt::Display for VaRResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}%): {:.2} ({:.2}% of portfolio), CVaR {:.2}",
            self.method,
            self.confidence_level * 100.0,
            self.var_value,
            self.var_percentage,
            self.cvar_value
        )
    }
}

/// Empirical quantile/tail metrics shared by the historical and Monte
/// Carlo estimators.
pub(crate) struct EmpiricalTail {
    /// Interpolated return at the `(1 - confidence)` percentile.
    pub var_return: f64,
    /// Mean of the returns at or below `var_return`.
    pub cvar_return: f64,
    /// Percentile evaluated.
    pub percentile_used: f64,
    /// Size of the tail set.
    pub tail_observations: usize,
}

/// Percentile + tail-average over an ascending-sorted sample.
///
/// The tail set is every return `<= var_return`. An empty tail falls back
/// to the quantile itself so CVaR never undercuts VaR.
pub(crate) fn empirical_tail(
    sorted: &[f64],
    confidence_level: f64,
) -> Result<EmpiricalTail, RiskError> {
    let percentile_used = (1.0 - confidence_level) * 100.0;
    let var_return = percentile_of_sorted(sorted, percentile_used)?;

    let tail: Vec<f64> = sorted
        .iter()
        .copied()
        .take_while(|r| *r <= var_return)
        .collect();

    let (cvar_return, tail_observations) = if tail.is_empty() {
        (var_return, 0)
    } else {
        (tail.iter().sum::<f64>() / tail.len() as f64, tail.len())
    };

    Ok(EmpiricalTail {
        var_return,
        cvar_return,
        percentile_used,
        tail_observations,
    })
}

/// Converts an internally computed f64 amount to the Decimal money type.
pub(crate) fn to_money(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Shared input validation for the estimators.
pub(crate) fn validate_inputs(
    returns: &[f64],
    confidence_level: f64,
    portfolio_value: f64,
) -> Result<(), RiskError> {
    if returns.is_empty() {
        return Err(RiskError::EmptyInput);
    }
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(RiskError::InvalidInput(
            "confidence level must be between 0 and 1".to_string(),
        ));
    }
    if portfolio_value <= 0.0 {
        return Err(RiskError::InvalidInput(
            "portfolio value must be positive".to_string(),
        ));
    }
    Ok(())
}
