//! Significant-figure rounding and display formatting
//!
//! Reduced values are shown to a user as a mean with its standard error
//! and standard deviation. The number of decimals shown is driven by the
//! uncertainty, not the mean, so the helpers here work in two steps:
//!
//! 1. [`rounding`]: find the decimal place of the `n`-th significant digit
//!    of a value and round half-up at it.
//! 2. [`formatter`]: pick a shared place for a triple, render it in fixed
//!    or scientific notation and align the decimal points.
//!
//! All rounding is done on the exact decimal value of the `f64`, never on
//! a scaled float, so ties behave the way they read.
//!
//! # Example
//!
//! ```rust
//! use tripoli_sigfig::{count_of_trailing_digits_for_sig_fig, format_stats};
//!
//! assert_eq!(count_of_trailing_digits_for_sig_fig(0.025483, 4), 5);
//!
//! let stats = format_stats(10.123456, 0.0234, 0.1102, 2);
//! assert_eq!(stats.mean, "10.123");
//! assert_eq!(stats.unct, " 0.023");
//! ```

pub mod formatter;
pub mod rounding;

pub use formatter::{
    format_fixed, format_stats, format_to_scientific, format_to_sig_fig, shared_scale,
    FormattedStats, Notation,
};
pub use rounding::{count_of_trailing_digits_for_sig_fig, rounded_to_size, scale_for_sig_figs};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::formatter::{format_fixed, format_stats, FormattedStats, Notation};
    pub use crate::rounding::{count_of_trailing_digits_for_sig_fig, rounded_to_size};
}
