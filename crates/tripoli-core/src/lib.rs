//! Core types for Tripoli mass-spectrometer data reduction
//!
//! This crate holds the pieces every other tripoli crate builds on:
//!
//! - [`error`]: the shared [`Error`] type. Numeric edge cases are never
//!   errors; an undefined statistic is NaN and the caller decides how to
//!   present it.
//! - [`decimal`]: exact decimal expansion of `f64` values with half-up
//!   rounding, the basis of all significant-figure work.
//! - [`descriptive`]: mean, sample standard deviation and standard error
//!   over (optionally masked) samples, summed in a fixed order.
//! - [`math`]: special functions (`erfc`, normal tail probabilities) and
//!   binomial coefficients.
//!
//! # Example
//!
//! ```rust
//! use tripoli_core::{decimal, Descriptive};
//!
//! let stats = Descriptive::of(&[10.0, 10.5, 9.5, 10.25]);
//! assert_eq!(stats.count, 4);
//! assert_eq!(decimal::round_half_up(stats.mean, 2), 10.06);
//! ```

pub mod decimal;
pub mod descriptive;
pub mod error;
pub mod math;

pub use decimal::DecimalDigits;
pub use descriptive::Descriptive;
pub use error::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::decimal::{round_half_up, DecimalDigits};
    pub use crate::descriptive::Descriptive;
    pub use crate::error::Error;
    pub use crate::math::distributions::normal::two_tailed_probability;
    pub use crate::Result;
}
