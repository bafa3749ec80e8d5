//! # tailrisk-var
//!
//! Value at Risk estimation and validation for return series.
//!
//! This crate provides the core risk engine:
//!
//! - **Historical VaR**: empirical percentile + tail-average CVaR
//! - **Parametric VaR**: closed-form quantile under normal or Student-t
//! - **Monte Carlo VaR**: simulation from a fitted normal distribution
//! - **Hybrid VaR**: weighted blend of the three base estimators
//! - **Portfolio VaR**: correlation-aware multi-asset aggregation
//! - **Backtesting**: violation counting and the Kupiec likelihood-ratio test
//!
//! All calculations are pure and stateless: every call is computed fresh
//! from caller-supplied data, and the Monte Carlo generator is threaded
//! through each call rather than shared.
//!
//! ## Example
//!
//! ```ignore
//! use tailrisk_var::prelude::*;
//!
//! let returns = vec![-0.02, 0.01, -0.015, 0.005, 0.02, -0.03];
//! let result = historical_var(&returns, 0.95, 1_000_000.0)?;
//! println!("{result}");
//!
//! let validation = validate_var_model(
//!     &realized,
//!     &estimates,
//!     0.95,
//!     VaRMethod::Historical,
//! )?;
//! assert!(validation.is_model_valid);
//! ```

pub mod backtest;
pub mod export;
pub mod portfolio;
pub mod var;
mod error;

pub use error::{ExportError, RiskError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backtest::{validate_var_model, ValidationResult};
    pub use crate::export::{to_pretty_json, write_json_file};
    pub use crate::portfolio::{portfolio_var, PortfolioMethod, PortfolioVaRResult};
    pub use crate::var::*;
    pub use crate::{ExportError, RiskError};
}
