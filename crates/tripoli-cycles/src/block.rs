//! Per-block cycle records
//!
//! A [`BlockCyclesRecord`] is an immutable value. Every update returns a
//! new record; holders replace theirs under the same block id.

use tripoli_core::{Error, Result};
use tripoli_outlier::OutlierFilter;

/// Measured cycles of one block for one measured quantity
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCyclesRecord {
    block_id: u32,
    cycle_values: Vec<f64>,
    inverted_cycle_values: Vec<f64>,
    cycle_one_sigma: Vec<f64>,
    cycles_included: Vec<bool>,
    block_included: bool,
}

impl BlockCyclesRecord {
    /// Create a record with every cycle and the block included
    ///
    /// Fails when `block_id` is zero or the three sequences differ in
    /// length.
    pub fn new(
        block_id: u32,
        cycle_values: Vec<f64>,
        inverted_cycle_values: Vec<f64>,
        cycle_one_sigma: Vec<f64>,
    ) -> Result<Self> {
        if block_id == 0 {
            return Err(Error::InvalidParameter("block ids start at 1".to_string()));
        }
        let n = cycle_values.len();
        Error::check_same_len(n, inverted_cycle_values.len(), "inverted cycle values")?;
        Error::check_same_len(n, cycle_one_sigma.len(), "cycle one sigma")?;
        Ok(Self {
            block_id,
            cycle_values,
            inverted_cycle_values,
            cycle_one_sigma,
            cycles_included: vec![true; n],
            block_included: true,
        })
    }

    /// Create a record whose inverted values are the reciprocals of
    /// `cycle_values`
    pub fn from_values(
        block_id: u32,
        cycle_values: Vec<f64>,
        cycle_one_sigma: Vec<f64>,
    ) -> Result<Self> {
        let inverted = cycle_values.iter().map(|&x| 1.0 / x).collect();
        Self::new(block_id, cycle_values, inverted, cycle_one_sigma)
    }

    /// Same record with the given cycle mask and block flag
    pub fn with_inclusion(&self, cycles_included: Vec<bool>, block_included: bool) -> Result<Self> {
        Error::check_same_len(self.cycle_values.len(), cycles_included.len(), "cycles included")?;
        Ok(Self {
            cycles_included,
            block_included,
            ..self.clone()
        })
    }

    /// Same record with a new cycle mask
    pub fn update_cycles_included(&self, cycles_included: Vec<bool>) -> Result<Self> {
        self.with_inclusion(cycles_included, self.block_included)
    }

    /// Same record with the block flag set
    pub fn with_block_included(&self, block_included: bool) -> Self {
        Self {
            block_included,
            ..self.clone()
        }
    }

    /// Same record with the block flag flipped
    pub fn toggle_block_included(&self) -> Self {
        self.with_block_included(!self.block_included)
    }

    /// Same record with every cycle and the block included
    pub fn reset_all_data_included(&self) -> Self {
        Self {
            cycles_included: vec![true; self.cycle_values.len()],
            block_included: true,
            ..self.clone()
        }
    }

    /// True when the block and all of its cycles are included
    pub fn detect_all_included_status(&self) -> bool {
        self.block_included && self.cycles_included.iter().all(|&keep| keep)
    }

    /// One pass of `filter` over this block's included cycles
    ///
    /// An excluded block comes back unchanged.
    pub fn perform_outlier_filter<F: OutlierFilter>(
        &self,
        filter: &F,
        use_inverted: bool,
    ) -> Result<Self> {
        if !self.block_included {
            return Ok(self.clone());
        }
        let mask = filter.filter(self.values(use_inverted), &self.cycles_included)?;
        self.update_cycles_included(mask)
    }

    pub fn block_id(&self) -> u32 {
        self.block_id
    }

    pub fn cycle_values(&self) -> &[f64] {
        &self.cycle_values
    }

    pub fn inverted_cycle_values(&self) -> &[f64] {
        &self.inverted_cycle_values
    }

    pub fn cycle_one_sigma(&self) -> &[f64] {
        &self.cycle_one_sigma
    }

    pub fn cycles_included(&self) -> &[bool] {
        &self.cycles_included
    }

    pub fn block_included(&self) -> bool {
        self.block_included
    }

    /// Values statistics are taken over
    pub fn values(&self, use_inverted: bool) -> &[f64] {
        if use_inverted {
            &self.inverted_cycle_values
        } else {
            &self.cycle_values
        }
    }

    /// Number of cycles in the block
    pub fn len(&self) -> usize {
        self.cycle_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycle_values.is_empty()
    }

    /// Cycles that count toward statistics: included cycles of an
    /// included block
    pub fn count_qualifying(&self) -> usize {
        if self.block_included {
            self.cycles_included.iter().filter(|&&keep| keep).count()
        } else {
            0
        }
    }

    /// Cycles whose own flag is cleared
    pub fn count_excluded(&self) -> usize {
        self.cycles_included.iter().filter(|&&keep| !keep).count()
    }
}
