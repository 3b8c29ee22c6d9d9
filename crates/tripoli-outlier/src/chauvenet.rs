//! Chauvenet's criterion
//!
//! Over the currently included points, with mean `m` and sample standard
//! deviation `s`, a point `x` is rejected when the number of points
//! expected to be at least as extreme,
//!
//! ```text
//! n * erfc(|x - m| / (s * sqrt(2)))
//! ```
//!
//! falls below the rejection probability (classically 0.5). One call is
//! one pass; repeating until nothing changes is left to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use tripoli_core::math::distributions::normal::two_tailed_probability;
use tripoli_core::{Descriptive, Error, Result};

use crate::traits::OutlierFilter;

/// Tunable parameters of the criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChauvenetParameters {
    /// Expected-count threshold below which a point is rejected
    pub rejection_probability: f64,
    /// Fewest included points required before anything is rejected
    pub required_min_datum_count: usize,
}

impl Default for ChauvenetParameters {
    fn default() -> Self {
        Self {
            rejection_probability: 0.5,
            required_min_datum_count: 2,
        }
    }
}

impl ChauvenetParameters {
    /// Check that the parameters describe a usable criterion
    pub fn validate(&self) -> Result<()> {
        let p = self.rejection_probability;
        if !(p > 0.0 && p <= 1.0) {
            return Err(Error::invalid_probability(p));
        }
        if self.required_min_datum_count < 2 {
            return Err(Error::InvalidParameter(format!(
                "required_min_datum_count must be at least 2, got {}",
                self.required_min_datum_count
            )));
        }
        Ok(())
    }
}

/// One pass of Chauvenet's criterion with the classical parameters
///
/// # Examples
///
/// ```rust
/// use tripoli_outlier::apply_chauvenets_criterion;
///
/// let data = [10.0, 10.1, 9.9, 10.05, 9.95, 10.02, 9.98, 14.0];
/// let mask = apply_chauvenets_criterion(&data, &[true; 8]).unwrap();
/// assert!(!mask[7]);
/// assert_eq!(mask.iter().filter(|&&keep| keep).count(), 7);
/// ```
pub fn apply_chauvenets_criterion(data: &[f64], included: &[bool]) -> Result<Vec<bool>> {
    apply_chauvenets_criterion_with(data, included, &ChauvenetParameters::default())
}

/// One pass of Chauvenet's criterion
///
/// Returns a new mask; `included` is left untouched. When fewer than
/// `required_min_datum_count` points (or at most one) are included, or
/// their standard deviation is zero or undefined, the mask comes back
/// unchanged.
pub fn apply_chauvenets_criterion_with(
    data: &[f64],
    included: &[bool],
    params: &ChauvenetParameters,
) -> Result<Vec<bool>> {
    Error::check_same_len(data.len(), included.len(), "Chauvenet inclusion mask")?;
    params.validate()?;

    let stats = Descriptive::of_included(data, included)?;
    let mut mask = included.to_vec();
    let n = stats.count;

    if n <= 1 || n < params.required_min_datum_count {
        trace!("Chauvenet skipped: only {} points included", n);
        return Ok(mask);
    }
    if !(stats.std_dev.is_finite() && stats.std_dev > 0.0) {
        trace!("Chauvenet skipped: standard deviation is {}", stats.std_dev);
        return Ok(mask);
    }

    let mut rejected = 0usize;
    for (&x, keep) in data.iter().zip(mask.iter_mut()) {
        if !*keep {
            continue;
        }
        let z = (x - stats.mean).abs() / stats.std_dev;
        let expected = n as f64 * two_tailed_probability(z);
        if expected < params.rejection_probability {
            *keep = false;
            rejected += 1;
        }
    }

    debug!(
        "Chauvenet pass over {} included points rejected {} (mean {}, sd {})",
        n, rejected, stats.mean, stats.std_dev
    );
    Ok(mask)
}

/// [`OutlierFilter`] applying Chauvenet's criterion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChauvenetFilter {
    params: ChauvenetParameters,
}

impl ChauvenetFilter {
    /// Create a filter, validating the parameters
    pub fn new(params: ChauvenetParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters in use
    pub fn params(&self) -> &ChauvenetParameters {
        &self.params
    }
}

impl OutlierFilter for ChauvenetFilter {
    fn name(&self) -> &'static str {
        "Chauvenet"
    }

    fn minimum_sample_size(&self) -> usize {
        self.params.required_min_datum_count
    }

    fn filter(&self, data: &[f64], included: &[bool]) -> Result<Vec<bool>> {
        apply_chauvenets_criterion_with(data, included, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = ChauvenetParameters::default();
        assert_eq!(params.rejection_probability, 0.5);
        assert_eq!(params.required_min_datum_count, 2);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_invalid_parameters() {
        let bad_p = ChauvenetParameters {
            rejection_probability: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad_p.validate(), Err(Error::InvalidParameter(_))));

        let nan_p = ChauvenetParameters {
            rejection_probability: f64::NAN,
            ..Default::default()
        };
        assert!(nan_p.validate().is_err());

        let bad_count = ChauvenetParameters {
            required_min_datum_count: 1,
            ..Default::default()
        };
        assert!(ChauvenetFilter::new(bad_count).is_err());
    }

    #[test]
    fn test_zero_std_dev_returns_mask_unchanged() {
        let data = [3.0; 6];
        let included = [true, false, true, true, false, true];
        let mask = apply_chauvenets_criterion(&data, &included).unwrap();
        assert_eq!(mask, included.to_vec());
    }

    #[test]
    fn test_single_point_is_never_rejected() {
        let data = [1.0, 1000.0, 2.0];
        let included = [false, true, false];
        let mask = apply_chauvenets_criterion(&data, &included).unwrap();
        assert_eq!(mask, included.to_vec());
    }

    #[test]
    fn test_excluded_points_stay_excluded() {
        // index 2 would sit right on the mean, but it was excluded
        let data = [10.0, 10.2, 10.1, 9.9, 10.05, 9.95, 10.0, 25.0];
        let included = [true, true, false, true, true, true, true, true];
        let mask = apply_chauvenets_criterion(&data, &included).unwrap();
        assert!(!mask[2]);
        assert!(!mask[7]);
    }

    #[test]
    fn test_length_mismatch() {
        let result = apply_chauvenets_criterion(&[1.0, 2.0, 3.0], &[true, true]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_minimum_datum_count() {
        let data = [10.0, 10.1, 9.9, 10.05, 9.95, 10.02, 9.98, 14.0];
        let params = ChauvenetParameters {
            required_min_datum_count: 9,
            ..Default::default()
        };
        let mask = apply_chauvenets_criterion_with(&data, &[true; 8], &params).unwrap();
        assert!(mask.iter().all(|&keep| keep));
    }

    #[test]
    fn test_filter_trait() {
        let filter = ChauvenetFilter::default();
        assert_eq!(filter.name(), "Chauvenet");
        assert_eq!(filter.minimum_sample_size(), 2);

        let data = [10.0, 10.1, 9.9, 10.05, 9.95, 10.02, 9.98, 14.0];
        let before = [true; 8];
        let after = filter.filter(&data, &before).unwrap();
        assert_eq!(ChauvenetFilter::count_rejected(&before, &after), 1);
    }
}
