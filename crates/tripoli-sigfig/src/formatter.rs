//! Formatting of (mean, standard error, standard deviation) triples
//!
//! The reported precision of a mean is bounded by the precision of its own
//! uncertainty: the decimal place of the `sig_figs`-th significant digit
//! of the smaller uncertainty is found, and all three values are rounded
//! half-up to that place.
//!
//! Zero or non-finite uncertainties carry no precision information and are
//! ignored when choosing the place. When neither uncertainty is usable the
//! mean's own `sig_figs`-th significant digit sets the place (one unit in
//! that place is the minimum precision reported), and a zero mean falls
//! back to `sig_figs - 1` decimals.

use serde::{Deserialize, Serialize};
use std::fmt;
use tripoli_core::{decimal, DecimalDigits};

use crate::rounding::scale_for_sig_figs;

/// Means at or above this magnitude are shown in scientific notation
pub const SCIENTIFIC_UPPER_BOUND: f64 = 1e7;

/// Means at or below this magnitude are shown in scientific notation
pub const SCIENTIFIC_LOWER_BOUND: f64 = 1e-5;

/// Notation used to render a triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notation {
    /// Plain decimal digits
    Fixed,
    /// Mantissa and a shared power-of-ten exponent
    Scientific,
}

impl Notation {
    /// Notation the legend uses for a given mean
    ///
    /// Scientific when `|mean| >= 1e7` or `|mean| <= 1e-5`, fixed otherwise
    /// (including for NaN).
    pub fn for_mean(mean: f64) -> Self {
        let magnitude = mean.abs();
        if magnitude >= SCIENTIFIC_UPPER_BOUND || magnitude <= SCIENTIFIC_LOWER_BOUND {
            Notation::Scientific
        } else {
            Notation::Fixed
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Fixed => write!(f, "fixed"),
            Notation::Scientific => write!(f, "scientific"),
        }
    }
}

/// Rendered mean, standard error and standard deviation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedStats {
    /// Rendered mean
    pub mean: String,
    /// Rendered standard error (the reported uncertainty)
    pub unct: String,
    /// Rendered standard deviation
    pub stdv: String,
    /// Decimal scale all three values were rounded to
    pub scale: i32,
    /// Notation used
    pub notation: Notation,
}

impl FormattedStats {
    /// Left-pad the three strings so their decimal points line up
    ///
    /// In scientific notation the exponent marker is used when a mantissa
    /// has no decimal point.
    pub fn pad_left(mut self) -> Self {
        fn lead(s: &str) -> usize {
            s.find(['.', 'E']).unwrap_or(s.len())
        }
        let width = lead(&self.mean).max(lead(&self.unct)).max(lead(&self.stdv));
        for s in [&mut self.mean, &mut self.unct, &mut self.stdv] {
            let pad = width - lead(s.as_str());
            if pad > 0 {
                s.insert_str(0, &" ".repeat(pad));
            }
        }
        self
    }

    /// Rendered mean
    pub fn mean_as_str(&self) -> &str {
        &self.mean
    }

    /// Rendered standard error
    pub fn unct_as_str(&self) -> &str {
        &self.unct
    }

    /// Rendered standard deviation
    pub fn stdv_as_str(&self) -> &str {
        &self.stdv
    }
}

impl fmt::Display for FormattedStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {} (σ {})", self.mean.trim(), self.unct.trim(), self.stdv.trim())
    }
}

/// Decimal scale shared by a mean and its two uncertainties
pub fn shared_scale(mean: f64, std_err: f64, std_dev: f64, sig_figs: usize) -> i32 {
    let leading = [std_err, std_dev]
        .into_iter()
        .filter(|u| u.is_finite() && *u != 0.0)
        .map(f64::abs)
        .reduce(f64::min);

    leading
        .and_then(|u| scale_for_sig_figs(u, sig_figs))
        .or_else(|| scale_for_sig_figs(mean, sig_figs))
        .unwrap_or(sig_figs.saturating_sub(1) as i32)
}

/// Round and render a triple with fixed-point digits
///
/// # Examples
///
/// ```rust
/// use tripoli_sigfig::format_to_sig_fig;
///
/// let stats = format_to_sig_fig(0.1234567, 0.0085123, 0.0466, 2);
/// assert_eq!(stats.mean, "0.1235");
/// assert_eq!(stats.unct, "0.0085");
/// assert_eq!(stats.stdv, "0.0466");
/// ```
pub fn format_to_sig_fig(mean: f64, std_err: f64, std_dev: f64, sig_figs: usize) -> FormattedStats {
    let scale = shared_scale(mean, std_err, std_dev, sig_figs);
    FormattedStats {
        mean: decimal::to_plain_string(mean, scale),
        unct: decimal::to_plain_string(std_err, scale),
        stdv: decimal::to_plain_string(std_dev, scale),
        scale,
        notation: Notation::Fixed,
    }
}

/// Round and render a triple as mantissas sharing the mean's exponent
///
/// Values are rounded at the same decimal place as
/// [`format_to_sig_fig`] and then expressed as `mantissaE±XX`, where the
/// exponent is that of the rounded mean (or of the leading uncertainty
/// when the mean is zero or undefined).
pub fn format_to_scientific(
    mean: f64,
    std_err: f64,
    std_dev: f64,
    sig_figs: usize,
) -> FormattedStats {
    let scale = shared_scale(mean, std_err, std_dev, sig_figs);
    let rounded = |v: f64| DecimalDigits::from_f64(v).map(|d| d.round_to_scale(scale));

    let exponent = [mean, std_err, std_dev]
        .into_iter()
        .filter_map(rounded)
        .find(|d| !d.is_zero())
        .map(|d| d.magnitude() - 1)
        .unwrap_or(0);
    let mantissa_scale = (scale + exponent).max(0);

    let render = |v: f64| match DecimalDigits::from_f64(v) {
        Some(d) => {
            let mantissa = d.round_to_scale(scale).shifted(-exponent);
            format!(
                "{}E{:+03}",
                mantissa.round_to_scale(mantissa_scale).to_plain_string(mantissa_scale),
                exponent
            )
        }
        None => decimal::to_plain_string(v, 0),
    };

    FormattedStats {
        mean: render(mean),
        unct: render(std_err),
        stdv: render(std_dev),
        scale,
        notation: Notation::Scientific,
    }
}

/// Render `value` with exactly `decimals` digits after the point
///
/// Rounds half-up on the exact value and keeps trailing zeros, so
/// `format_fixed(0.5, 2)` is `"0.50"`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    decimal::to_plain_string(value, decimals as i32)
}

/// Format with the notation the mean calls for, decimal points aligned
pub fn format_stats(mean: f64, std_err: f64, std_dev: f64, sig_figs: usize) -> FormattedStats {
    match Notation::for_mean(mean) {
        Notation::Scientific => format_to_scientific(mean, std_err, std_dev, sig_figs),
        Notation::Fixed => format_to_sig_fig(mean, std_err, std_dev, sig_figs),
    }
    .pad_left()
}
