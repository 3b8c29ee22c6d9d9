//! Significant-figure rounding of single values

use tripoli_core::DecimalDigits;

/// Decimal scale of the `sig_figs`-th significant digit of `value`
///
/// The scale is taken after rounding, so a carry that adds a digit
/// (`0.0996 -> 0.10` at two figures) moves the scale with it. `None` for
/// zero and non-finite values, which have no significant digits.
pub fn scale_for_sig_figs(value: f64, sig_figs: usize) -> Option<i32> {
    let digits = DecimalDigits::from_f64(value)?;
    if digits.is_zero() {
        return None;
    }
    if sig_figs == 0 {
        return Some(digits.scale());
    }
    let rounded = digits.round_to_sig_figs(sig_figs);
    Some(sig_figs as i32 - rounded.magnitude())
}

/// Round `value` half-up to `sig_figs` significant digits
///
/// `sig_figs == 0` means unlimited precision and returns `value`.
/// Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use tripoli_sigfig::rounded_to_size;
///
/// assert_eq!(rounded_to_size(123.45, 3), 123.0);
/// assert_eq!(rounded_to_size(999.99, 1), 1000.0);
/// ```
pub fn rounded_to_size(value: f64, sig_figs: usize) -> f64 {
    if sig_figs == 0 {
        return value;
    }
    match DecimalDigits::from_f64(value) {
        Some(digits) => digits.round_to_sig_figs(sig_figs).to_f64(),
        None => value,
    }
}

/// Digits after the decimal point of `value` rounded to `sig_figs`
/// significant figures
///
/// Used to keep paired mean/uncertainty displays digit aligned. Never
/// negative: values whose last significant digit sits left of the decimal
/// point need no decimals. Zero and non-finite values need none either.
pub fn count_of_trailing_digits_for_sig_fig(value: f64, sig_figs: usize) -> usize {
    scale_for_sig_figs(value, sig_figs)
        .map(|scale| scale.max(0) as usize)
        .unwrap_or(0)
}
