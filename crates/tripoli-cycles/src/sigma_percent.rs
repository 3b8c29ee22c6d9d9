//! Ratio uncertainties as percentages of the geometric mean
//!
//! The upper and lower percentages differ because the bounds are
//! exponentiated. Both are rounded half-up to the decimal place of the
//! second significant figure of the smaller one, so a `+10.5 / -9.5`
//! pair keeps one decimal on each side.

use tripoli_core::decimal::round_half_up;
use tripoli_sigfig::count_of_trailing_digits_for_sig_fig;

use crate::geometric::GeometricMeanStatsRecord;

/// Significant figures kept on the smaller percentage
pub const PERCENT_SIG_FIGS: usize = 2;

/// Block-mode weighted mean sigma as percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaPercentResult {
    /// Smaller of the two rounded percentages
    pub lesser_pct: f64,
    pub plus_pct: f64,
    pub minus_pct: f64,
    /// Decimals both percentages were rounded to
    pub trailing_digits: usize,
}

/// Cycle-mode standard error and standard deviation as percentages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleModeSigmaPercents {
    pub plus_err_pct: f64,
    pub minus_err_pct: f64,
    pub plus_sigma_pct: f64,
    pub minus_sigma_pct: f64,
    /// Upper one-sigma bound in ratio space
    pub geo_mean_plus_one_std_dev: f64,
    pub err_trailing_digits: usize,
    pub sigma_trailing_digits: usize,
}

/// Upper and lower distance from `geo_mean`, in percent, rounded together
fn rounded_pair(geo_mean: f64, upper: f64, lower: f64) -> (f64, f64, usize) {
    let plus = (upper - geo_mean) / geo_mean * 100.0;
    let minus = (geo_mean - lower) / geo_mean * 100.0;
    let digits = count_of_trailing_digits_for_sig_fig(plus.min(minus), PERCENT_SIG_FIGS);
    (
        round_half_up(plus, digits as i32),
        round_half_up(minus, digits as i32),
        digits,
    )
}

/// Percent sigma of a block-mode weighted mean computed in log space
///
/// # Examples
///
/// ```rust
/// use tripoli_cycles::block_mode_sigma_percents;
///
/// let pct = block_mode_sigma_percents(2.0, 0.1);
/// assert_eq!(pct.plus_pct, 10.5);
/// assert_eq!(pct.minus_pct, 9.5);
/// assert_eq!(pct.lesser_pct, 9.5);
/// assert_eq!(pct.trailing_digits, 1);
/// ```
pub fn block_mode_sigma_percents(weighted_mean: f64, one_sigma: f64) -> SigmaPercentResult {
    let geo_mean = weighted_mean.exp();
    let (plus_pct, minus_pct, trailing_digits) = rounded_pair(
        geo_mean,
        (weighted_mean + one_sigma).exp(),
        (weighted_mean - one_sigma).exp(),
    );
    SigmaPercentResult {
        lesser_pct: plus_pct.min(minus_pct),
        plus_pct,
        minus_pct,
        trailing_digits,
    }
}

/// Percent standard error and standard deviation of a cycle-mode
/// geometric mean
pub fn cycle_mode_sigma_percents(geo: &GeometricMeanStatsRecord) -> CycleModeSigmaPercents {
    let (plus_err_pct, minus_err_pct, err_trailing_digits) = rounded_pair(
        geo.geo_mean,
        geo.geo_mean_plus_one_std_err,
        geo.geo_mean_minus_one_std_err,
    );
    let (plus_sigma_pct, minus_sigma_pct, sigma_trailing_digits) = rounded_pair(
        geo.geo_mean,
        geo.geo_mean_plus_one_std_dev,
        geo.geo_mean_minus_one_std_dev,
    );
    CycleModeSigmaPercents {
        plus_err_pct,
        minus_err_pct,
        plus_sigma_pct,
        minus_sigma_pct,
        geo_mean_plus_one_std_dev: geo.geo_mean_plus_one_std_dev,
        err_trailing_digits,
        sigma_trailing_digits,
    }
}
