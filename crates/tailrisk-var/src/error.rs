//! Error types for risk calculations.

use thiserror::Error;

/// Errors that can occur during risk calculations.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Estimator called with a zero-length return series
    #[error("empty return series")]
    EmptyInput,

    /// Distribution tag outside the supported set
    #[error("unsupported distribution: {0}")]
    UnsupportedDistribution(String),

    /// Realized returns and VaR estimates differ in length
    #[error("length mismatch: {returns} returns vs {estimates} VaR estimates")]
    LengthMismatch {
        /// Number of realized returns supplied.
        returns: usize,
        /// Number of VaR estimates supplied.
        estimates: usize,
    },

    /// Portfolio aggregation called with no assets
    #[error("portfolio has no assets")]
    EmptyPortfolio,

    /// Invalid input parameters
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Underlying statistical calculation failed
    #[error("calculation failed: {0}")]
    CalculationFailed(String),
}

impl From<tailrisk_math::error::MathError> for RiskError {
    fn from(err: tailrisk_math::error::MathError) -> Self {
        Self::CalculationFailed(err.to_string())
    }
}

/// Errors from the JSON export boundary.
///
/// Kept separate from [`RiskError`]: a storage failure never invalidates a
/// computed result.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Result could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Result could not be written to storage
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RiskError::EmptyInput.to_string(), "empty return series");

        let err = RiskError::LengthMismatch {
            returns: 10,
            estimates: 8,
        };
        assert!(err.to_string().contains("10 returns"));
        assert!(err.to_string().contains("8 VaR estimates"));

        let err = RiskError::UnsupportedDistribution("cauchy".to_string());
        assert!(err.to_string().contains("cauchy"));
    }
}
