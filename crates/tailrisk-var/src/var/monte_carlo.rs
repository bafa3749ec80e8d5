//! Monte Carlo VaR calculation.
//!
//! A normal distribution is fitted to the sample mean and volatility,
//! `simulations` synthetic returns are drawn from it, and the historical
//! percentile/tail logic is applied to the simulated sample.
//!
//! The generator is threaded through each call; there is no process-wide
//! RNG state. Use [`monte_carlo_var_seeded`] for reproducible runs and
//! [`monte_carlo_var`] for entropy-seeded production use.

use super::{empirical_tail, to_money, validate_inputs, MethodStats, VaRMethod, VaRResult};
use crate::RiskError;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tailrisk_math::stats::{return_moments, sorted_ascending};

/// Default number of simulated draws.
pub const DEFAULT_SIMULATIONS: usize = 10_000;

/// Calculate Monte Carlo VaR with a fresh entropy-seeded generator.
///
/// # Arguments
///
/// * `returns` - Historical returns the normal distribution is fitted to
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `simulations` - Number of synthetic draws (see [`DEFAULT_SIMULATIONS`])
/// * `portfolio_value` - Current portfolio value
pub fn monte_carlo_var(
    returns: &[f64],
    confidence_level: f64,
    simulations: usize,
    portfolio_value: f64,
) -> Result<VaRResult, RiskError> {
    let mut rng = StdRng::from_entropy();
    monte_carlo_var_with_rng(
        returns,
        confidence_level,
        simulations,
        portfolio_value,
        &mut rng,
    )
}

/// Calculate Monte Carlo VaR with a deterministic seed.
///
/// Two calls with the same seed and inputs produce identical results.
pub fn monte_carlo_var_seeded(
    returns: &[f64],
    confidence_level: f64,
    simulations: usize,
    portfolio_value: f64,
    seed: u64,
) -> Result<VaRResult, RiskError> {
    let mut rng = StdRng::seed_from_u64(seed);
    monte_carlo_var_with_rng(
        returns,
        confidence_level,
        simulations,
        portfolio_value,
        &mut rng,
    )
}

/// Calculate Monte Carlo VaR drawing from a caller-owned generator.
pub fn monte_carlo_var_with_rng<R: Rng + ?Sized>(
    returns: &[f64],
    confidence_level: f64,
    simulations: usize,
    portfolio_value: f64,
    rng: &mut R,
) -> Result<VaRResult, RiskError> {
    validate_inputs(returns, confidence_level, portfolio_value)?;
    if simulations == 0 {
        return Err(RiskError::InvalidInput(
            "simulation count must be positive".to_string(),
        ));
    }

    let moments = return_moments(returns)?;

    // A flat input series fits a point mass; sampling would reject σ = 0.
    let simulated: Vec<f64> = if moments.volatility > 0.0 {
        let normal = Normal::new(moments.mean, moments.volatility)
            .map_err(|e| RiskError::CalculationFailed(e.to_string()))?;
        (0..simulations).map(|_| normal.sample(rng)).collect()
    } else {
        vec![moments.mean; simulations]
    };

    let simulated_moments = return_moments(&simulated)?;
    let sorted = sorted_ascending(&simulated);
    let tail = empirical_tail(&sorted, confidence_level)?;

    let var_value = (tail.var_return * portfolio_value).abs();
    let cvar_value = (tail.cvar_return * portfolio_value).abs();

    let stats = MethodStats::MonteCarlo {
        simulations,
        simulated_mean: simulated_moments.mean,
        simulated_std: simulated_moments.volatility,
        percentile_used: tail.percentile_used,
        tail_observations: tail.tail_observations,
    };

    Ok(VaRResult {
        method: VaRMethod::MonteCarlo,
        confidence_level,
        var_value: to_money(var_value),
        var_percentage: tail.var_return.abs() * 100.0,
        cvar_value: to_money(cvar_value),
        cvar_percentage: tail.cvar_return.abs() * 100.0,
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
