//! Descriptive statistics over masked samples
//!
//! Every function here sums in slice order, so identical inputs always
//! produce bit-identical outputs. Undefined statistics are NaN.

use crate::{Error, Result};

/// Mean, sample standard deviation and standard error of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptive {
    /// Number of values that contributed
    pub count: usize,
    /// Arithmetic mean (NaN when `count == 0`)
    pub mean: f64,
    /// Sample standard deviation, n - 1 denominator (0 when `count == 1`)
    pub std_dev: f64,
    /// `std_dev / sqrt(count)`
    pub std_err: f64,
}

impl Descriptive {
    /// Statistics of an empty sample
    pub const EMPTY: Self = Self {
        count: 0,
        mean: f64::NAN,
        std_dev: f64::NAN,
        std_err: f64::NAN,
    };

    /// Statistics over every value
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::EMPTY;
        }
        let count = values.len();
        let mean = mean(values);
        let std_dev = sample_std_dev_about(values.iter().copied(), mean, count);
        Self {
            count,
            mean,
            std_dev,
            std_err: std_dev / (count as f64).sqrt(),
        }
    }

    /// Statistics over values whose mask entry is `true`
    pub fn of_included(values: &[f64], included: &[bool]) -> Result<Self> {
        Error::check_same_len(values.len(), included.len(), "inclusion mask")?;
        let count = included.iter().filter(|&&keep| keep).count();
        if count == 0 {
            return Ok(Self::EMPTY);
        }
        let selected = || {
            values
                .iter()
                .zip(included)
                .filter(|(_, &keep)| keep)
                .map(|(&x, _)| x)
        };
        let mean = selected().sum::<f64>() / count as f64;
        let std_dev = sample_std_dev_about(selected(), mean, count);
        Ok(Self {
            count,
            mean,
            std_dev,
            std_err: std_dev / (count as f64).sqrt(),
        })
    }

    /// True when mean, standard deviation and standard error are all finite
    pub fn is_defined(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite() && self.std_err.is_finite()
    }
}

/// Arithmetic mean, NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev_about(values: impl Iterator<Item = f64>, mean: f64, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let sum_sq: f64 = values
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum();
    (sum_sq / (count - 1) as f64).sqrt()
}
