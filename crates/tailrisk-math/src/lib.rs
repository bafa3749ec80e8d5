//! # Tailrisk Math
//!
//! Statistical primitives for the Tailrisk risk analytics library.
//!
//! This crate provides:
//!
//! - **Moments**: Population mean, volatility, skewness, excess kurtosis
//! - **Percentiles**: Linear-interpolation percentile over sorted samples
//! - **Correlation**: Pearson correlation and pairwise correlation matrices
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: No state, no I/O, inputs never mutated
//! - **Numerical stability**: Degenerate inputs (flat series, zero
//!   variance) produce defined values instead of NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]

pub mod correlation;
pub mod error;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::correlation::{correlation_matrix, pearson_correlation};
    pub use crate::error::{MathError, MathResult};
    pub use crate::stats::{
        mean, median_of_sorted, percentile_of_sorted, return_moments, sorted_ascending, std_dev,
        ReturnMoments,
    };
}
