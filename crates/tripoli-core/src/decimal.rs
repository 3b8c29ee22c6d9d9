//! Exact decimal digits of binary floating point values
//!
//! Rounding for display has to happen on the exact value a `f64` holds,
//! with half-up ties, or results drift from what a user reads off the
//! legend. [`DecimalDigits`] holds the full decimal expansion of a finite
//! `f64` (at most 767 significant digits) and rounds it at a decimal scale
//! the way an arbitrary precision decimal would.
//!
//! Terminology follows the usual decimal conventions:
//! - *scale*: number of digits after the decimal point (may be negative,
//!   meaning rounding to tens, hundreds, ...)
//! - *magnitude*: number of digits before the decimal point of the first
//!   significant digit, i.e. `floor(log10(|x|)) + 1`

use std::cmp::Ordering;
use std::fmt::Write;

/// Enough digits to print any finite `f64` exactly in scientific form.
const EXACT_DIGITS: usize = 800;

/// Exact decimal expansion of a finite `f64`
///
/// The represented value is `0.d1 d2 d3 ... * 10^magnitude`, negated when
/// `negative` is set. Zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalDigits {
    negative: bool,
    digits: Vec<u8>,
    magnitude: i32,
}

impl DecimalDigits {
    /// Exact expansion of `value`, or `None` for NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero());
        }

        let text = format!("{:.*e}", EXACT_DIGITS, value.abs());
        let (mantissa, exponent) = text.split_once('e')?;
        let exponent: i32 = exponent.parse().ok()?;
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }

        Some(Self {
            negative: value < 0.0,
            digits,
            magnitude: exponent + 1,
        })
    }

    /// The value zero
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: Vec::new(),
            magnitude: 0,
        }
    }

    /// True when the value is zero
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// True for values below zero
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Digits before the decimal point of the leading significant digit
    ///
    /// `123.4 -> 3`, `0.5 -> 0`, `0.00123 -> -2`. Zero reports 1 so that
    /// it behaves like a single integer digit.
    pub fn magnitude(&self) -> i32 {
        if self.is_zero() {
            1
        } else {
            self.magnitude
        }
    }

    /// Number of significant digits held
    pub fn precision(&self) -> usize {
        self.digits.len().max(1)
    }

    /// Digits after the decimal point needed to hold the value exactly
    pub fn scale(&self) -> i32 {
        if self.is_zero() {
            0
        } else {
            self.digits.len() as i32 - self.magnitude
        }
    }

    /// Round half-up (away from zero on ties) keeping `scale` decimals
    pub fn round_to_scale(&self, scale: i32) -> Self {
        if self.is_zero() {
            return Self::zero();
        }

        let keep = self.magnitude + scale;
        match keep.cmp(&0) {
            Ordering::Less => Self::zero(),
            Ordering::Equal => {
                if self.digits[0] >= 5 {
                    Self {
                        negative: self.negative,
                        digits: vec![1],
                        magnitude: self.magnitude + 1,
                    }
                } else {
                    Self::zero()
                }
            }
            Ordering::Greater => {
                let keep = keep as usize;
                if keep >= self.digits.len() {
                    return self.clone();
                }
                let mut kept = self.digits[..keep].to_vec();
                let mut magnitude = self.magnitude;
                if self.digits[keep] >= 5 && increment(&mut kept) {
                    // every kept digit was 9, carry into a new leading digit
                    kept.insert(0, 1);
                    kept.truncate(keep);
                    magnitude += 1;
                }
                while kept.last() == Some(&0) {
                    kept.pop();
                }
                if kept.is_empty() {
                    return Self::zero();
                }
                Self {
                    negative: self.negative,
                    digits: kept,
                    magnitude,
                }
            }
        }
    }

    /// Round half-up to `sig_figs` significant digits
    ///
    /// The scale used is derived from the unrounded magnitude; a carry
    /// (`999.99 -> 1000`) is absorbed by the rounding itself.
    pub fn round_to_sig_figs(&self, sig_figs: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        self.round_to_scale(self.scale_for_sig_figs(sig_figs))
    }

    /// Scale at which the `sig_figs`-th significant digit sits
    pub fn scale_for_sig_figs(&self, sig_figs: usize) -> i32 {
        sig_figs as i32 - self.magnitude()
    }

    /// Multiply by `10^places` exactly
    pub fn shifted(&self, places: i32) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        Self {
            negative: self.negative,
            digits: self.digits.clone(),
            magnitude: self.magnitude + places,
        }
    }

    /// Convert back to the nearest `f64`
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let mut text = String::with_capacity(self.digits.len() + 16);
        if self.negative {
            text.push('-');
        }
        text.push_str("0.");
        for d in &self.digits {
            text.push(char::from(b'0' + d));
        }
        let _ = write!(text, "e{}", self.magnitude);
        text.parse().unwrap_or(f64::NAN)
    }

    /// Render with exactly `scale` decimals, without exponent
    ///
    /// Digits beyond `scale` are not rounded here; call
    /// [`round_to_scale`](Self::round_to_scale) first. A negative scale
    /// renders an integer. Zero is never signed.
    pub fn to_plain_string(&self, scale: i32) -> String {
        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }

        let digit_at = |position: i32| -> char {
            // position 0 is the first digit left of the decimal point
            let index = self.magnitude - 1 - position;
            if index < 0 || index as usize >= self.digits.len() {
                '0'
            } else {
                char::from(b'0' + self.digits[index as usize])
            }
        };

        let integer_digits = if self.is_zero() { 1 } else { self.magnitude.max(1) };
        for position in (0..integer_digits).rev() {
            out.push(digit_at(position));
        }
        if scale > 0 {
            out.push('.');
            for position in 1..=scale {
                out.push(digit_at(-position));
            }
        }
        out
    }
}

/// Add one unit in the last place; returns true on overflow (all nines).
fn increment(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    true
}

/// Round `value` half-up to `scale` decimals
///
/// Non-finite values are returned unchanged.
pub fn round_half_up(value: f64, scale: i32) -> f64 {
    match DecimalDigits::from_f64(value) {
        Some(digits) => digits.round_to_scale(scale).to_f64(),
        None => value,
    }
}

/// Render `value` rounded half-up to `scale` decimals
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`.
pub fn to_plain_string(value: f64, scale: i32) -> String {
    match DecimalDigits::from_f64(value) {
        Some(digits) => digits.round_to_scale(scale).to_plain_string(scale),
        None if value.is_nan() => "NaN".to_string(),
        None if value > 0.0 => "Infinity".to_string(),
        None => "-Infinity".to_string(),
    }
}
