//! Log-space statistics mapped back to ratio space
//!
//! Isotope ratios are reduced as natural logs, where they add, and shown
//! as ratios. Exponentiating the log-space mean and its sigma bounds
//! gives the geometric mean and asymmetric ratio-space bounds.

/// Ratio-space view of a log-space (mean, std dev, std err) triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricMeanStatsRecord {
    pub geo_mean: f64,
    pub geo_mean_plus_one_std_dev: f64,
    pub geo_mean_plus_two_std_dev: f64,
    pub geo_mean_minus_one_std_dev: f64,
    pub geo_mean_minus_two_std_dev: f64,
    pub geo_mean_plus_one_std_err: f64,
    pub geo_mean_plus_two_std_err: f64,
    pub geo_mean_minus_one_std_err: f64,
    pub geo_mean_minus_two_std_err: f64,
}

/// Exponentiate a log-space triple
///
/// NaN inputs give NaN outputs.
///
/// # Examples
///
/// ```rust
/// use tripoli_cycles::generate_geometric_mean_stats;
///
/// let geo = generate_geometric_mean_stats(0.0, 0.1, 0.02);
/// assert_eq!(geo.geo_mean, 1.0);
/// assert!(geo.geo_mean_plus_one_std_dev > 1.1);
/// assert!(geo.geo_mean_minus_one_std_dev > 0.9);
/// ```
pub fn generate_geometric_mean_stats(
    mean: f64,
    std_dev: f64,
    std_err: f64,
) -> GeometricMeanStatsRecord {
    GeometricMeanStatsRecord {
        geo_mean: mean.exp(),
        geo_mean_plus_one_std_dev: (mean + std_dev).exp(),
        geo_mean_plus_two_std_dev: (mean + 2.0 * std_dev).exp(),
        geo_mean_minus_one_std_dev: (mean - std_dev).exp(),
        geo_mean_minus_two_std_dev: (mean - 2.0 * std_dev).exp(),
        geo_mean_plus_one_std_err: (mean + std_err).exp(),
        geo_mean_plus_two_std_err: (mean + 2.0 * std_err).exp(),
        geo_mean_minus_one_std_err: (mean - std_err).exp(),
        geo_mean_minus_two_std_err: (mean - 2.0 * std_err).exp(),
    }
}

/// Levels of the mean line and the sigma bands drawn around it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsBands {
    pub mean: f64,
    pub plus_one_std_dev: f64,
    pub minus_one_std_dev: f64,
    pub plus_two_std_dev: f64,
    pub minus_two_std_dev: f64,
    pub plus_two_std_err: f64,
    pub minus_two_std_err: f64,
}

impl StatsBands {
    /// Symmetric bands for additive quantities
    pub fn from_additive(mean: f64, std_dev: f64, std_err: f64) -> Self {
        Self {
            mean,
            plus_one_std_dev: mean + std_dev,
            minus_one_std_dev: mean - std_dev,
            plus_two_std_dev: mean + 2.0 * std_dev,
            minus_two_std_dev: mean - 2.0 * std_dev,
            plus_two_std_err: mean + 2.0 * std_err,
            minus_two_std_err: mean - 2.0 * std_err,
        }
    }

    /// Asymmetric bands for ratios
    pub fn from_geometric(geo: &GeometricMeanStatsRecord) -> Self {
        Self {
            mean: geo.geo_mean,
            plus_one_std_dev: geo.geo_mean_plus_one_std_dev,
            minus_one_std_dev: geo.geo_mean_minus_one_std_dev,
            plus_two_std_dev: geo.geo_mean_plus_two_std_dev,
            minus_two_std_dev: geo.geo_mean_minus_two_std_dev,
            plus_two_std_err: geo.geo_mean_plus_two_std_err,
            minus_two_std_err: geo.geo_mean_minus_two_std_err,
        }
    }

    /// Bands for a (log-space when `is_ratio`) triple
    pub fn for_stats(mean: f64, std_dev: f64, std_err: f64, is_ratio: bool) -> Self {
        if is_ratio {
            Self::from_geometric(&generate_geometric_mean_stats(mean, std_dev, std_err))
        } else {
            Self::from_additive(mean, std_dev, std_err)
        }
    }

    /// True when every level is finite
    pub fn is_plottable(&self) -> bool {
        [
            self.mean,
            self.plus_one_std_dev,
            self.minus_one_std_dev,
            self.plus_two_std_dev,
            self.minus_two_std_dev,
            self.plus_two_std_err,
            self.minus_two_std_err,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_spread_is_exp_of_mean() {
        for &mean in &[-3.2, 0.0, 0.693, 4.5] {
            let geo = generate_geometric_mean_stats(mean, 0.0, 0.0);
            assert_eq!(geo.geo_mean, mean.exp());
            assert_eq!(geo.geo_mean_plus_two_std_dev, mean.exp());
            assert_eq!(geo.geo_mean_minus_one_std_err, mean.exp());
        }
    }

    #[test]
    fn test_bounds_are_asymmetric() {
        let geo = generate_geometric_mean_stats(1.0, 0.5, 0.1);
        let up = geo.geo_mean_plus_one_std_dev - geo.geo_mean;
        let down = geo.geo_mean - geo.geo_mean_minus_one_std_dev;
        assert!(up > down);
        assert_relative_eq!(
            geo.geo_mean_plus_one_std_dev * geo.geo_mean_minus_one_std_dev,
            geo.geo_mean * geo.geo_mean,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_nan_propagates() {
        let geo = generate_geometric_mean_stats(f64::NAN, 0.1, 0.1);
        assert!(geo.geo_mean.is_nan());
        let geo = generate_geometric_mean_stats(1.0, f64::NAN, 0.1);
        assert_eq!(geo.geo_mean, 1f64.exp());
        assert!(geo.geo_mean_plus_one_std_dev.is_nan());
    }

    #[test]
    fn test_bands() {
        let bands = StatsBands::from_additive(10.0, 1.0, 0.25);
        assert_eq!(bands.plus_two_std_dev, 12.0);
        assert_eq!(bands.minus_two_std_err, 9.5);
        assert!(bands.is_plottable());

        let ratio = StatsBands::for_stats(0.0, 0.1, 0.01, true);
        assert_eq!(ratio.mean, 1.0);
        assert_relative_eq!(ratio.plus_one_std_dev, 0.1f64.exp(), epsilon = 1e-15);

        assert!(!StatsBands::from_additive(f64::NAN, 1.0, 1.0).is_plottable());
    }
}
