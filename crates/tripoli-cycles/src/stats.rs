//! Block and analysis statistics
//!
//! Both record types are computed views. They are rebuilt from the block
//! records after any mask change and never edited in place.
//!
//! Sums run in ascending block id, then ascending cycle index, so the
//! same blocks always give bit-identical statistics.

use tripoli_core::Descriptive;

use crate::block::BlockCyclesRecord;

/// Statistics of one block's qualifying cycles
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatsRecord {
    pub block_id: u32,
    pub block_included: bool,
    /// Arithmetic mean (NaN when no cycle qualifies)
    pub mean: f64,
    /// Sample standard deviation (0 for a single cycle)
    pub standard_deviation: f64,
    /// `standard_deviation / sqrt(n)`
    pub standard_error: f64,
    /// Values the statistics were taken over, one per cycle
    pub cycle_values: Vec<f64>,
    /// Copy of the block's cycle mask
    pub cycles_included: Vec<bool>,
}

impl BlockStatsRecord {
    /// Number of cycles that count toward statistics
    pub fn count_qualifying(&self) -> usize {
        if self.block_included {
            self.cycles_included.iter().filter(|&&keep| keep).count()
        } else {
            0
        }
    }

    /// Mask of cycles that count toward statistics
    pub fn qualifying_mask(&self) -> impl Iterator<Item = bool> + '_ {
        self.cycles_included
            .iter()
            .map(move |&keep| keep && self.block_included)
    }

    /// True when the mean, deviation and error are all finite
    pub fn is_defined(&self) -> bool {
        self.mean.is_finite()
            && self.standard_deviation.is_finite()
            && self.standard_error.is_finite()
    }
}

/// Whole-analysis statistics in both aggregation modes
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisStatsRecord {
    /// Per-block statistics, ascending block id
    pub block_stats_records: Vec<BlockStatsRecord>,
    /// Mean of every qualifying cycle of every included block
    pub cycle_mode_mean: f64,
    pub cycle_mode_standard_deviation: f64,
    pub cycle_mode_standard_error: f64,
    /// Every cycle value in block id then cycle order
    pub cycle_mode_data: Vec<f64>,
    /// Qualifying mask aligned with `cycle_mode_data`
    pub cycle_mode_included: Vec<bool>,
    /// Inverse-variance weighted mean of block means
    pub block_mode_weighted_mean: f64,
    /// `sqrt(1 / sum(w))`
    pub block_mode_weighted_mean_one_sigma: f64,
    /// Reduced chi-squared of block means about the weighted mean
    pub block_mode_chi_squared: f64,
    pub count_of_included_blocks: usize,
    pub count_of_included_cycles: usize,
    pub count_of_total_cycles: usize,
}

impl AnalysisStatsRecord {
    /// Total number of blocks, included or not
    pub fn count_of_blocks(&self) -> usize {
        self.block_stats_records.len()
    }
}

/// Statistics of one block
///
/// Only cycles flagged as included in an included block qualify. With no
/// qualifying cycle the mean, deviation and error are all NaN.
///
/// # Examples
///
/// ```rust
/// use tripoli_cycles::{compute_block_stats, BlockCyclesRecord};
///
/// let block = BlockCyclesRecord::from_values(1, vec![1.0, 2.0, 3.0], vec![0.1; 3]).unwrap();
/// let stats = compute_block_stats(&block, false);
/// assert_eq!(stats.mean, 2.0);
/// assert_eq!(stats.standard_deviation, 1.0);
///
/// let excluded = compute_block_stats(&block.with_block_included(false), false);
/// assert!(excluded.mean.is_nan());
/// ```
pub fn compute_block_stats(block: &BlockCyclesRecord, use_inverted: bool) -> BlockStatsRecord {
    let values = block.values(use_inverted);
    let selected: Vec<f64> = if block.block_included() {
        values
            .iter()
            .zip(block.cycles_included())
            .filter(|(_, &keep)| keep)
            .map(|(&x, _)| x)
            .collect()
    } else {
        Vec::new()
    };
    let stats = Descriptive::of(&selected);

    BlockStatsRecord {
        block_id: block.block_id(),
        block_included: block.block_included(),
        mean: stats.mean,
        standard_deviation: stats.std_dev,
        standard_error: stats.std_err,
        cycle_values: values.to_vec(),
        cycles_included: block.cycles_included().to_vec(),
    }
}

/// Aggregate block statistics into cycle-mode and block-mode statistics
///
/// Input order does not matter; records are taken in ascending block id.
///
/// Block mode weights each included block by `1 / standard_error^2`.
/// Blocks whose standard error is zero or undefined are left out of the
/// weighted mean and the chi-squared sum, but still count toward the
/// included-block tally. The chi-squared is reduced by
/// `count_of_included_blocks - 1` and is NaN when that is not positive or
/// when no block carries a usable weight.
pub fn compute_analysis_stats(block_stats: &[BlockStatsRecord]) -> AnalysisStatsRecord {
    let mut records = block_stats.to_vec();
    records.sort_by_key(|r| r.block_id);

    let count_of_total_cycles = records.iter().map(|r| r.cycle_values.len()).sum();
    let mut cycle_mode_data = Vec::with_capacity(count_of_total_cycles);
    let mut cycle_mode_included = Vec::with_capacity(count_of_total_cycles);
    for record in &records {
        cycle_mode_data.extend_from_slice(&record.cycle_values);
        cycle_mode_included.extend(record.qualifying_mask());
    }

    let pooled: Vec<f64> = cycle_mode_data
        .iter()
        .zip(&cycle_mode_included)
        .filter(|(_, &keep)| keep)
        .map(|(&x, _)| x)
        .collect();
    let cycle_mode = Descriptive::of(&pooled);

    let included_blocks: Vec<&BlockStatsRecord> = records
        .iter()
        .filter(|r| r.block_included && r.count_qualifying() > 0)
        .collect();
    let count_of_included_blocks = included_blocks.len();

    let weighted: Vec<(f64, f64)> = included_blocks
        .iter()
        .filter(|r| r.mean.is_finite() && r.standard_error.is_finite() && r.standard_error > 0.0)
        .map(|r| (r.mean, r.standard_error))
        .collect();

    let sum_of_weights: f64 = weighted.iter().map(|&(_, se)| 1.0 / (se * se)).sum();
    let (weighted_mean, one_sigma) = if sum_of_weights > 0.0 {
        let weighted_sum: f64 = weighted.iter().map(|&(m, se)| m / (se * se)).sum();
        (weighted_sum / sum_of_weights, (1.0 / sum_of_weights).sqrt())
    } else {
        (f64::NAN, f64::NAN)
    };

    let chi_squared = if count_of_included_blocks > 1 && !weighted.is_empty() {
        let sum: f64 = weighted
            .iter()
            .map(|&(m, se)| {
                let residual = (m - weighted_mean) / se;
                residual * residual
            })
            .sum();
        sum / (count_of_included_blocks - 1) as f64
    } else {
        f64::NAN
    };

    AnalysisStatsRecord {
        block_stats_records: records,
        cycle_mode_mean: cycle_mode.mean,
        cycle_mode_standard_deviation: cycle_mode.std_dev,
        cycle_mode_standard_error: cycle_mode.std_err,
        cycle_mode_data,
        cycle_mode_included,
        block_mode_weighted_mean: weighted_mean,
        block_mode_weighted_mean_one_sigma: one_sigma,
        block_mode_chi_squared: chi_squared,
        count_of_included_blocks,
        count_of_included_cycles: pooled.len(),
        count_of_total_cycles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn block(id: u32, values: &[f64]) -> BlockCyclesRecord {
        BlockCyclesRecord::from_values(id, values.to_vec(), vec![0.01; values.len()]).unwrap()
    }

    #[test]
    fn test_block_stats() {
        let b = block(1, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let stats = compute_block_stats(&b, false);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.standard_deviation, (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            stats.standard_error,
            (32.0f64 / 7.0).sqrt() / 8f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_block_stats_masked_and_inverted() {
        let b = block(1, &[1.0, 2.0, 4.0, 100.0])
            .update_cycles_included(vec![true, true, true, false])
            .unwrap();
        let stats = compute_block_stats(&b, true);
        assert_relative_eq!(stats.mean, (1.0 + 0.5 + 0.25) / 3.0, epsilon = 1e-15);
        assert_eq!(stats.cycle_values, vec![1.0, 0.5, 0.25, 0.01]);
    }

    #[test]
    fn test_block_stats_all_excluded() {
        let b = block(1, &[1.0, 2.0]).update_cycles_included(vec![false, false]).unwrap();
        let stats = compute_block_stats(&b, false);
        assert!(stats.mean.is_nan());
        assert!(stats.standard_deviation.is_nan());
        assert!(stats.standard_error.is_nan());
        assert!(!stats.is_defined());
    }

    #[test]
    fn test_single_cycle_block() {
        let stats = compute_block_stats(&block(1, &[3.5]), false);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.standard_deviation, 0.0);
        assert_eq!(stats.standard_error, 0.0);
    }

    #[test]
    fn test_weighted_mean_and_chi_squared() {
        // block means 1, 2, 3 with standard errors 0.5, 0.5, 1.0
        let blocks = [
            block(1, &[0.5, 1.5]),
            block(2, &[1.5, 2.5]),
            block(3, &[2.0, 4.0]),
        ];
        let stats: Vec<_> = blocks.iter().map(|b| compute_block_stats(b, false)).collect();
        let analysis = compute_analysis_stats(&stats);

        // weights 4, 4, 1
        assert_relative_eq!(analysis.block_mode_weighted_mean, 15.0 / 9.0, epsilon = 1e-12);
        assert_relative_eq!(
            analysis.block_mode_weighted_mean_one_sigma,
            (1.0f64 / 9.0).sqrt(),
            epsilon = 1e-12
        );
        let wm = 15.0 / 9.0;
        let chi = ((1.0 - wm) / 0.5f64).powi(2)
            + ((2.0 - wm) / 0.5f64).powi(2)
            + ((3.0 - wm) / 1.0f64).powi(2);
        assert_relative_eq!(analysis.block_mode_chi_squared, chi / 2.0, epsilon = 1e-12);
        assert_eq!(analysis.count_of_included_blocks, 3);
        assert_eq!(analysis.count_of_included_cycles, 6);
        assert_eq!(analysis.count_of_total_cycles, 6);
        assert_relative_eq!(analysis.cycle_mode_mean, 2.0, epsilon = 1e-15);
    }

    #[test]
    fn test_excluded_block_leaves_pool() {
        let blocks = [
            block(1, &[1.0, 1.2, 0.8]),
            block(2, &[50.0, 51.0, 49.0]).with_block_included(false),
        ];
        let stats: Vec<_> = blocks.iter().map(|b| compute_block_stats(b, false)).collect();
        let analysis = compute_analysis_stats(&stats);
        assert_eq!(analysis.count_of_included_blocks, 1);
        assert_eq!(analysis.count_of_included_cycles, 3);
        assert_eq!(analysis.count_of_total_cycles, 6);
        assert_eq!(analysis.cycle_mode_included, vec![true, true, true, false, false, false]);
        assert_relative_eq!(analysis.cycle_mode_mean, 1.0, epsilon = 1e-12);
        assert!(analysis.block_mode_chi_squared.is_nan());
    }

    #[test]
    fn test_zero_standard_error_is_skipped() {
        let blocks = [block(1, &[2.0, 2.0]), block(2, &[1.0, 3.0])];
        let stats: Vec<_> = blocks.iter().map(|b| compute_block_stats(b, false)).collect();
        let analysis = compute_analysis_stats(&stats);
        assert_relative_eq!(analysis.block_mode_weighted_mean, 2.0);
        assert_relative_eq!(analysis.block_mode_weighted_mean_one_sigma, 1.0);
        assert_eq!(analysis.count_of_included_blocks, 2);
        assert_relative_eq!(analysis.block_mode_chi_squared, 0.0);
    }

    #[test]
    fn test_chi_squared_undefined_without_weights() {
        // single-cycle blocks have zero standard error, so nothing is weighted
        let blocks = [block(1, &[1.0]), block(2, &[5.0])];
        let stats: Vec<_> = blocks.iter().map(|b| compute_block_stats(b, false)).collect();
        let analysis = compute_analysis_stats(&stats);
        assert_eq!(analysis.count_of_included_blocks, 2);
        assert!(analysis.block_mode_weighted_mean.is_nan());
        assert!(analysis.block_mode_weighted_mean_one_sigma.is_nan());
        assert!(analysis.block_mode_chi_squared.is_nan());
    }

    #[test]
    fn test_no_data() {
        let analysis = compute_analysis_stats(&[]);
        assert!(analysis.cycle_mode_mean.is_nan());
        assert!(analysis.block_mode_weighted_mean.is_nan());
        assert!(analysis.block_mode_chi_squared.is_nan());
        assert_eq!(analysis.count_of_total_cycles, 0);
    }

    #[test]
    fn test_block_order_is_normalised() {
        let blocks = [block(1, &[1.0, 2.0]), block(2, &[3.0, 5.0]), block(3, &[0.5, 0.7])];
        let forward: Vec<_> = blocks.iter().map(|b| compute_block_stats(b, false)).collect();
        let mut reversed = forward.clone();
        reversed.reverse();
        let a = compute_analysis_stats(&forward);
        let b = compute_analysis_stats(&reversed);
        assert_eq!(a.cycle_mode_mean.to_bits(), b.cycle_mode_mean.to_bits());
        assert_eq!(a.block_mode_weighted_mean.to_bits(), b.block_mode_weighted_mean.to_bits());
        assert_eq!(a.cycle_mode_data, b.cycle_mode_data);
    }
}
