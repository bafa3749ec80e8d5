//! Correlation-aware portfolio VaR aggregation.
//!
//! Each asset's VaR is computed against its share of the portfolio value,
//! the assets' return series are truncated to their shortest common window
//! for the correlation matrix and the weighted portfolio return series,
//! and the portfolio-level VaR is computed on that combined series. The
//! gap between the sum of individual VaRs and the portfolio VaR is the
//! diversification benefit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::var::{historical_var, parametric_var, Distribution, VaRResult};
use crate::RiskError;
use tailrisk_math::correlation::correlation_matrix;
use tailrisk_math::stats::std_dev;

/// Base estimator applied per asset and to the combined series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioMethod {
    /// Empirical percentile per series
    Historical,
    /// Normal closed-form quantile per series
    ParametricNormal,
}

/// Portfolio VaR result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioVaRResult {
    /// Asset identifiers in correlation-matrix row/column order.
    pub assets: Vec<String>,
    /// Individual VaR per asset, scaled by that asset's weight.
    pub individual_vars: BTreeMap<String, Decimal>,
    /// VaR of the weighted portfolio return series at full value.
    pub portfolio_var: Decimal,
    /// `sum(individual VaRs) - portfolio_var`.
    pub diversification_benefit: Decimal,
    /// Pairwise Pearson correlations over the common window.
    pub correlation_matrix: Vec<Vec<f64>>,
    /// Population volatility of the portfolio return series.
    pub portfolio_volatility: f64,
    /// When the calculation ran
    pub calculation_date: DateTime<Utc>,
}

/// Calculate portfolio VaR with correlation effects.
///
/// # Arguments
///
/// * `asset_returns` - Return series per asset identifier
/// * `weights` - Portfolio weight per asset; expected (not enforced) to
///   sum to 1, and every asset must have a weight
/// * `confidence_level` - Confidence level (e.g., 0.95 for 95%)
/// * `method` - Base estimator for individual and portfolio VaR
/// * `portfolio_value` - Total portfolio value
pub fn portfolio_var(
    asset_returns: &BTreeMap<String, Vec<f64>>,
    weights: &BTreeMap<String, f64>,
    confidence_level: f64,
    method: PortfolioMethod,
    portfolio_value: f64,
) -> Result<PortfolioVaRResult, RiskError> {
    if asset_returns.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }

    let assets: Vec<String> = asset_returns.keys().cloned().collect();

    let asset_var = |asset: &String| -> Result<(String, Decimal), RiskError> {
        let weight = *weights
            .get(asset)
            .ok_or_else(|| RiskError::InvalidInput(format!("missing weight for asset {asset}")))?;
        let result = base_var(
            &asset_returns[asset],
            confidence_level,
            method,
            portfolio_value * weight,
        )?;
        Ok((asset.clone(), result.var_value))
    };

    #[cfg(feature = "parallel")]
    let individual_vars: BTreeMap<String, Decimal> = {
        use rayon::prelude::*;
        assets
            .par_iter()
            .map(asset_var)
            .collect::<Result<_, RiskError>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let individual_vars: BTreeMap<String, Decimal> = assets
        .iter()
        .map(asset_var)
        .collect::<Result<_, RiskError>>()?;

    let series: Vec<Vec<f64>> = assets.iter().map(|a| asset_returns[a].clone()).collect();
    let correlations = correlation_matrix(&series)?;

    // Weighted portfolio return per period over the common window.
    let window = series.iter().map(Vec::len).min().unwrap_or(0);
    let mut portfolio_returns = Vec::with_capacity(window);
    for period in 0..window {
        let combined = assets
            .iter()
            .map(|asset| weights[asset] * asset_returns[asset][period])
            .sum::<f64>();
        portfolio_returns.push(combined);
    }

    let portfolio_result = base_var(
        &portfolio_returns,
        confidence_level,
        method,
        portfolio_value,
    )?;

    let sum_individual: Decimal = individual_vars.values().copied().sum();
    let diversification_benefit = sum_individual - portfolio_result.var_value;
    let portfolio_volatility = std_dev(&portfolio_returns)?;

    Ok(PortfolioVaRResult {
        assets,
        individual_vars,
        portfolio_var: portfolio_result.var_value,
        diversification_benefit,
        correlation_matrix: correlations,
        portfolio_volatility,
        calculation_date: Utc::now(),
    })
}

fn base_var(
    returns: &[f64],
    confidence_level: f64,
    method: PortfolioMethod,
    value: f64,
) -> Result<VaRResult, RiskError> {
    match method {
        PortfolioMethod::Historical => historical_var(returns, confidence_level, value),
        PortfolioMethod::ParametricNormal => {
            parametric_var(returns, confidence_level, Distribution::Normal, value)
        }
    }
}
