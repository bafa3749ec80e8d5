//! Property-based tests for estimator invariants.
//!
//! These tests verify key properties that should hold on any reasonable
//! return series:
//! - VaR and CVaR are non-negative
//! - CVaR is at least VaR when the tail is non-empty
//! - Historical VaR is monotone in the confidence level
//! - Kupiec outputs stay inside their domains

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tailrisk_var::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x
}

/// Generates `n` pseudo-random returns, uniform in [-5%, +5%).
fn generate_returns(n: usize, seed: u64) -> Vec<f64> {
    (0..n)
        .map(|i| (simple_hash(seed, i as u64) % 10_000) as f64 / 10_000.0 * 0.10 - 0.05)
        .collect()
}

const CONFIDENCE_GRID: [f64; 4] = [0.90, 0.95, 0.99, 0.999];

// =============================================================================
// NON-NEGATIVITY
// =============================================================================

#[test]
fn test_var_and_cvar_never_negative() {
    for seed in 0..20 {
        let returns = generate_returns(120, seed);
        for confidence in CONFIDENCE_GRID {
            let historical = historical_var(&returns, confidence, 1_000_000.0).unwrap();
            let parametric =
                parametric_var(&returns, confidence, Distribution::Normal, 1_000_000.0).unwrap();
            let student =
                parametric_var(&returns, confidence, Distribution::StudentT, 1_000_000.0)
                    .unwrap();
            let monte_carlo =
                monte_carlo_var_seeded(&returns, confidence, 2_000, 1_000_000.0, seed).unwrap();

            for result in [&historical, &parametric, &student, &monte_carlo] {
                assert!(result.var_value >= Decimal::ZERO, "{}", result.method);
                assert!(result.cvar_value >= Decimal::ZERO, "{}", result.method);
                assert!(result.var_percentage >= 0.0);
                assert!(result.cvar_percentage >= 0.0);
                assert!(result.volatility >= 0.0);
            }
        }
    }
}

// =============================================================================
// TAIL ORDERING
// =============================================================================

#[test]
fn test_cvar_dominates_var() {
    // These series lose money in the tail (the 10% percentile of the
    // generator is about -4%), so the tail average must be at least as
    // extreme as the quantile for every method.
    for seed in 100..120 {
        let returns = generate_returns(200, seed);
        for confidence in [0.90, 0.95, 0.99] {
            let historical = historical_var(&returns, confidence, 1_000_000.0).unwrap();
            assert!(
                historical.cvar_value >= historical.var_value,
                "seed {seed}, confidence {confidence}"
            );

            let parametric =
                parametric_var(&returns, confidence, Distribution::Normal, 1_000_000.0).unwrap();
            assert!(parametric.cvar_value >= parametric.var_value);

            let monte_carlo =
                monte_carlo_var_seeded(&returns, confidence, 2_000, 1_000_000.0, seed).unwrap();
            assert!(monte_carlo.cvar_value >= monte_carlo.var_value);
        }
    }
}

// =============================================================================
// MONOTONICITY IN CONFIDENCE
// =============================================================================

#[test]
fn test_historical_var_monotone_in_confidence() {
    for seed in 200..230 {
        let returns = generate_returns(150, seed);
        let mut previous = Decimal::ZERO;
        for confidence in CONFIDENCE_GRID {
            let result = historical_var(&returns, confidence, 1_000_000.0).unwrap();
            assert!(
                result.var_value >= previous,
                "seed {seed}: VaR({confidence}) = {} < {previous}",
                result.var_value
            );
            previous = result.var_value;
        }
    }
}

#[test]
fn test_parametric_var_monotone_in_confidence() {
    for seed in 300..320 {
        let returns = generate_returns(150, seed);
        let mut previous = Decimal::ZERO;
        for confidence in CONFIDENCE_GRID {
            let result =
                parametric_var(&returns, confidence, Distribution::Normal, 1_000_000.0).unwrap();
            assert!(result.var_value >= previous, "seed {seed}");
            previous = result.var_value;
        }
    }
}

// =============================================================================
// PORTFOLIO INVARIANTS
// =============================================================================

#[test]
fn test_anti_correlated_pairs_always_diversify() {
    for seed in 400..410 {
        let long = generate_returns(100, seed);
        let short: Vec<f64> = long.iter().map(|r| -r).collect();

        let mut asset_returns = BTreeMap::new();
        asset_returns.insert("long".to_string(), long);
        asset_returns.insert("short".to_string(), short);
        let mut weights = BTreeMap::new();
        weights.insert("long".to_string(), 0.5);
        weights.insert("short".to_string(), 0.5);

        let result = portfolio_var(
            &asset_returns,
            &weights,
            0.95,
            PortfolioMethod::Historical,
            1_000_000.0,
        )
        .unwrap();

        let sum_individual: Decimal = result.individual_vars.values().copied().sum();
        assert!(result.portfolio_var < sum_individual, "seed {seed}");
        assert!(result.diversification_benefit > Decimal::ZERO, "seed {seed}");
    }
}

#[test]
fn test_correlation_matrix_entries_bounded() {
    for seed in 500..505 {
        let mut asset_returns = BTreeMap::new();
        for (name, offset) in [("a", 0), ("b", 1), ("c", 2), ("d", 3)] {
            asset_returns.insert(name.to_string(), generate_returns(80, seed + offset));
        }
        let weights: BTreeMap<String, f64> = asset_returns
            .keys()
            .map(|k| (k.clone(), 0.25))
            .collect();

        let result = portfolio_var(
            &asset_returns,
            &weights,
            0.95,
            PortfolioMethod::ParametricNormal,
            1_000_000.0,
        )
        .unwrap();

        for (i, row) in result.correlation_matrix.iter().enumerate() {
            assert!((row[i] - 1.0).abs() < 1e-12);
            for &entry in row {
                assert!((-1.0..=1.0).contains(&entry));
            }
        }
    }
}

// =============================================================================
// BACKTEST DOMAINS
// =============================================================================

#[test]
fn test_kupiec_outputs_stay_in_domain() {
    for seed in 600..620 {
        let returns = generate_returns(252, seed);
        // Sweep estimates from far too tight to never breached.
        for estimate in [0.001, 0.01, 0.03, 0.05, 0.2] {
            let estimates = vec![estimate; returns.len()];
            let result =
                validate_var_model(&returns, &estimates, 0.95, VaRMethod::Historical).unwrap();

            assert!(result.violations <= result.total_observations);
            assert!((0.0..=1.0).contains(&result.violation_rate));
            assert!((0.0..=1.0).contains(&result.kupiec_p_value));
            assert!(result.kupiec_statistic >= 0.0);
            assert_eq!(result.expected_violations, 12);
        }
    }
}
