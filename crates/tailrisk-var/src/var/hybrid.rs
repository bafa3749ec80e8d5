//! Hybrid VaR calculation.
//!
//! Runs the historical, parametric (normal), and Monte Carlo estimators
//! on the same series and blends their VaR and CVaR values with
//! caller-supplied [`MethodWeights`]. The weights are applied as given —
//! see the note on [`MethodWeights`] about normalization.

use super::{
    historical_var, monte_carlo_var_with_rng, parametric_var, to_money, validate_inputs,
    Distribution, MethodAgreement, MethodStats, MethodWeights, VaRMethod, VaRResult,
};
use crate::RiskError;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tailrisk_math::stats::return_moments;

/// Simulation count used for the Monte Carlo leg of the blend.
pub const HYBRID_SIMULATIONS: usize = 5_000;

/// Calculate hybrid VaR with a fresh entropy-seeded generator for the
/// Monte Carlo leg.
///
/// # Arguments
///
/// * `returns` - Historical returns
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `weights` - Blend weights; `None` uses the 0.4 / 0.3 / 0.3 default
/// * `portfolio_value` - Current portfolio value
pub fn hybrid_var(
    returns: &[f64],
    confidence_level: f64,
    weights: Option<MethodWeights>,
    portfolio_value: f64,
) -> Result<VaRResult, RiskError> {
    let mut rng = StdRng::from_entropy();
    hybrid_var_with_rng(returns, confidence_level, weights, portfolio_value, &mut rng)
}

/// Calculate hybrid VaR drawing the Monte Carlo leg from a caller-owned
/// generator.
pub fn hybrid_var_with_rng<R: Rng + ?Sized>(
    returns: &[f64],
    confidence_level: f64,
    weights: Option<MethodWeights>,
    portfolio_value: f64,
    rng: &mut R,
) -> Result<VaRResult, RiskError> {
    validate_inputs(returns, confidence_level, portfolio_value)?;
    let weights = weights.unwrap_or_default();

    let historical = historical_var(returns, confidence_level, portfolio_value)?;
    let parametric = parametric_var(
        returns,
        confidence_level,
        Distribution::Normal,
        portfolio_value,
    )?;
    let monte_carlo = monte_carlo_var_with_rng(
        returns,
        confidence_level,
        HYBRID_SIMULATIONS,
        portfolio_value,
        rng,
    )?;

    let blend = |h: Decimal, p: Decimal, m: Decimal| {
        to_money(weights.historical) * h
            + to_money(weights.parametric) * p
            + to_money(weights.monte_carlo) * m
    };
    let var_value = blend(
        historical.var_value,
        parametric.var_value,
        monte_carlo.var_value,
    );
    let cvar_value = blend(
        historical.cvar_value,
        parametric.cvar_value,
        monte_carlo.cvar_value,
    );

    let portfolio_val = to_money(portfolio_value);
    let var_percentage = (var_value / portfolio_val * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0);
    let cvar_percentage = (cvar_value / portfolio_val * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0);

    let agreement = MethodAgreement {
        historical_parametric: (historical.var_value - parametric.var_value).abs(),
        historical_monte_carlo: (historical.var_value - monte_carlo.var_value).abs(),
        parametric_monte_carlo: (parametric.var_value - monte_carlo.var_value).abs(),
    };
    let stats = MethodStats::Hybrid {
        weights,
        historical_var: historical.var_value,
        parametric_var: parametric.var_value,
        monte_carlo_var: monte_carlo.var_value,
        agreement,
    };

    let moments = return_moments(returns)?;

    Ok(VaRResult {
        method: VaRMethod::Hybrid,
        confidence_level,
        var_value,
        var_percentage,
        cvar_value,
        cvar_percentage,
        expected_shortfall: cvar_value,
        portfolio_value: portfolio_val,
        calculation_date: Utc::now(),
        data_points: returns.len(),
        volatility: moments.volatility,
        skewness: moments.skewness,
        excess_kurtosis: moments.excess_kurtosis,
        stats,
    })
}
