//! Mathematical utilities for data reduction
//!
//! Special functions used by outlier rejection and a few combinatorial
//! helpers. The error function comes from `statrs`.

use crate::{Error, Result};

/// Distribution-related mathematical functions
pub mod distributions {
    /// Normal distribution utilities
    pub mod normal {
        use std::f64::consts::SQRT_2;

        /// Complementary error function
        #[inline]
        pub fn erfc(x: f64) -> f64 {
            statrs::function::erf::erfc(x)
        }

        /// Probability that a standard normal deviate lies at least `z`
        /// away from zero in either direction
        ///
        /// `P(|Z| >= z) = erfc(z / sqrt(2))`. NaN propagates.
        #[inline]
        pub fn two_tailed_probability(z: f64) -> f64 {
            erfc(z.abs() / SQRT_2)
        }

    }
}

/// Binomial coefficient `n` choose `r`
///
/// Zero when `r > n`. Fails only when the result does not fit in a `u64`.
///
/// # Examples
///
/// ```rust
/// use tripoli_core::math::n_choose_r;
///
/// assert_eq!(n_choose_r(5, 2).unwrap(), 10);
/// assert_eq!(n_choose_r(10, 5).unwrap(), 252);
/// ```
pub fn n_choose_r(n: u64, r: u64) -> Result<u64> {
    if r > n {
        return Ok(0);
    }
    let r = r.min(n - r);
    let overflow = || Error::Computation(format!("{n} choose {r} overflows u64"));
    // after step i the running value is C(n, i + 1), which never exceeds
    // C(n, r) for r <= n / 2, so only the product needs the wider type
    let mut result: u64 = 1;
    for i in 0..r {
        let product = u128::from(result) * u128::from(n - i);
        result = u64::try_from(product / u128::from(i + 1)).map_err(|_| overflow())?;
    }
    Ok(result)
}
