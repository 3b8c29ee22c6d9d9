//! Error types for Tripoli data reduction
//!
//! Provides a unified error type for all tripoli crates. Ordinary numeric
//! edge cases (empty samples, zero variance) are reported as NaN values and
//! never as errors; this type is reserved for precondition violations.

use thiserror::Error;

/// Core error type for reduction operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Block id not present in an analysis
    #[error("Unknown block id: {0}")]
    UnknownBlock(u32),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for sequences whose lengths must agree
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a probability outside (0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in (0, 1]"))
    }

    /// Check that two related sequences have the same length
    pub fn check_same_len(expected: usize, actual: usize, context: &str) -> Result<()> {
        if expected != actual {
            return Err(Self::size_mismatch(expected, actual, context));
        }
        Ok(())
    }
}
