//! Analysis-level container of block records
//!
//! [`AnalysisBlockCycles`] owns the block records of one measured quantity,
//! keyed by block id. Every mask change builds a new record and inserts it
//! under the same key. Statistics are recomputed on request and never
//! cached, so they always reflect the current masks.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use tracing::{debug, instrument};
use tripoli_core::{Error, Result};
use tripoli_outlier::{ChauvenetFilter, OutlierFilter};

use crate::block::BlockCyclesRecord;
use crate::settings::{ReductionMode, ReductionSettings};
use crate::stats::{
    compute_analysis_stats, compute_block_stats, AnalysisStatsRecord, BlockStatsRecord,
};
use crate::summary::{summarize, Summary};

/// Cycles rejected by one outlier pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChauvenetReport {
    pub mode: ReductionMode,
    /// Newly rejected cycles per block id; blocks with none are omitted
    pub rejected_per_block: BTreeMap<u32, usize>,
}

impl ChauvenetReport {
    pub fn total_rejected(&self) -> usize {
        self.rejected_per_block.values().sum()
    }

    /// True when the pass changed nothing, i.e. the masks have converged
    pub fn is_unchanged(&self) -> bool {
        self.rejected_per_block.is_empty()
    }
}

/// A selection box over the cycle plot
///
/// Cycles are addressed by slot: block `b` occupies slots
/// `(b - 1) * cycles_per_block ..` onward, so a short final block leaves
/// trailing slots empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SculptSelection {
    pub slots: RangeInclusive<usize>,
    pub values: RangeInclusive<f64>,
}

/// Result of a sculpt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SculptOutcome {
    /// Cycles inside the selection
    pub selected: usize,
    /// State every selected cycle was set to
    pub now_included: bool,
}

/// Block records and settings of one measured quantity
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisBlockCycles {
    cycles_per_block: usize,
    settings: ReductionSettings,
    blocks: BTreeMap<u32, BlockCyclesRecord>,
}

impl AnalysisBlockCycles {
    /// Create an empty analysis with the nominal cycle count per block
    pub fn new(cycles_per_block: usize, settings: ReductionSettings) -> Result<Self> {
        if cycles_per_block == 0 {
            return Err(Error::InvalidParameter(
                "cycles_per_block must be positive".to_string(),
            ));
        }
        settings.validate()?;
        Ok(Self {
            cycles_per_block,
            settings,
            blocks: BTreeMap::new(),
        })
    }

    /// Build from records, rejecting duplicate block ids
    pub fn from_blocks(
        cycles_per_block: usize,
        settings: ReductionSettings,
        blocks: impl IntoIterator<Item = BlockCyclesRecord>,
    ) -> Result<Self> {
        let mut analysis = Self::new(cycles_per_block, settings)?;
        for block in blocks {
            let id = block.block_id();
            if analysis.insert_block(block)?.is_some() {
                return Err(Error::InvalidInput(format!("duplicate block id {id}")));
            }
        }
        Ok(analysis)
    }

    /// Insert or replace a block, returning the previous record
    pub fn insert_block(&mut self, block: BlockCyclesRecord) -> Result<Option<BlockCyclesRecord>> {
        if block.len() > self.cycles_per_block {
            return Err(Error::InvalidInput(format!(
                "block {} has {} cycles, more than the {} per block",
                block.block_id(),
                block.len(),
                self.cycles_per_block
            )));
        }
        Ok(self.blocks.insert(block.block_id(), block))
    }

    pub fn block(&self, block_id: u32) -> Result<&BlockCyclesRecord> {
        self.blocks.get(&block_id).ok_or(Error::UnknownBlock(block_id))
    }

    /// Records in ascending block id
    pub fn blocks(&self) -> impl Iterator<Item = &BlockCyclesRecord> {
        self.blocks.values()
    }

    pub fn cycles_per_block(&self) -> usize {
        self.cycles_per_block
    }

    pub fn settings(&self) -> &ReductionSettings {
        &self.settings
    }

    /// Replace the settings, e.g. to switch between block and cycle mode
    pub fn set_settings(&mut self, settings: ReductionSettings) -> Result<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn replace_with<F>(&mut self, block_id: u32, update: F) -> Result<()>
    where
        F: FnOnce(&BlockCyclesRecord) -> Result<BlockCyclesRecord>,
    {
        let updated = update(self.block(block_id)?)?;
        self.blocks.insert(block_id, updated);
        Ok(())
    }

    /// Replace one block's cycle mask
    pub fn replace_cycles_included(
        &mut self,
        block_id: u32,
        cycles_included: Vec<bool>,
    ) -> Result<()> {
        self.replace_with(block_id, |b| b.update_cycles_included(cycles_included))
    }

    pub fn set_block_included(&mut self, block_id: u32, included: bool) -> Result<()> {
        self.replace_with(block_id, |b| Ok(b.with_block_included(included)))
    }

    pub fn toggle_block_included(&mut self, block_id: u32) -> Result<()> {
        self.replace_with(block_id, |b| Ok(b.toggle_block_included()))
    }

    /// Include every block and every cycle again
    pub fn reset_all_data_included(&mut self) {
        for block in self.blocks.values_mut() {
            *block = block.reset_all_data_included();
        }
    }

    /// True when no block and no cycle is excluded
    pub fn detect_all_included_status(&self) -> bool {
        self.blocks.values().all(BlockCyclesRecord::detect_all_included_status)
    }

    /// Statistics of every block, ascending block id
    pub fn block_stats(&self) -> Vec<BlockStatsRecord> {
        let records: Vec<&BlockCyclesRecord> = self.blocks.values().collect();
        stats_of_blocks(&records, self.settings.use_inverted)
    }

    /// Block statistics aggregated over the whole analysis
    #[instrument(skip(self), fields(blocks = self.blocks.len()))]
    pub fn calculate_analysis_stats(&self) -> AnalysisStatsRecord {
        let stats = compute_analysis_stats(&self.block_stats());
        debug!(
            "Analysis stats: {}/{} cycles, {}/{} blocks included",
            stats.count_of_included_cycles,
            stats.count_of_total_cycles,
            stats.count_of_included_blocks,
            stats.count_of_blocks()
        );
        stats
    }

    /// Legend summary for the current masks and settings
    pub fn summary(&self) -> Summary {
        summarize(&self.calculate_analysis_stats(), &self.settings)
    }

    /// One Chauvenet pass with the configured parameters
    pub fn perform_chauvenets(&mut self) -> Result<ChauvenetReport> {
        let filter = ChauvenetFilter::new(self.settings.chauvenet)?;
        self.perform_outlier_filter(&filter)
    }

    /// One pass of `filter` in the configured mode
    ///
    /// Block mode filters each included block against its own cycles.
    /// Cycle mode filters the pooled cycles of all included blocks at once
    /// and hands each block its slice of the resulting mask. Excluded blocks
    /// are left untouched in both modes.
    #[instrument(skip(self, filter), fields(filter = filter.name(), mode = ?self.settings.mode))]
    pub fn perform_outlier_filter<F: OutlierFilter>(
        &mut self,
        filter: &F,
    ) -> Result<ChauvenetReport> {
        let use_inverted = self.settings.use_inverted;
        let mut updated = Vec::with_capacity(self.blocks.len());

        match self.settings.mode {
            ReductionMode::Block => {
                for block in self.blocks.values() {
                    updated.push(block.perform_outlier_filter(filter, use_inverted)?);
                }
            }
            ReductionMode::Cycle => {
                let stats = self.calculate_analysis_stats();
                let mask = filter.filter(&stats.cycle_mode_data, &stats.cycle_mode_included)?;
                Error::check_same_len(
                    stats.cycle_mode_data.len(),
                    mask.len(),
                    "outlier filter mask",
                )?;
                let mut offset = 0;
                for block in self.blocks.values() {
                    let slice = &mask[offset..offset + block.len()];
                    offset += block.len();
                    if block.block_included() {
                        updated.push(block.update_cycles_included(slice.to_vec())?);
                    } else {
                        updated.push(block.clone());
                    }
                }
            }
        }

        let mut rejected_per_block = BTreeMap::new();
        for block in updated {
            let before = self.block(block.block_id())?.cycles_included();
            let rejected = F::count_rejected(before, block.cycles_included());
            if rejected > 0 {
                rejected_per_block.insert(block.block_id(), rejected);
            }
            self.blocks.insert(block.block_id(), block);
        }

        let report = ChauvenetReport {
            mode: self.settings.mode,
            rejected_per_block,
        };
        debug!("{} pass rejected {} cycles", filter.name(), report.total_rejected());
        Ok(report)
    }

    /// Toggle the cycles inside a selection box
    ///
    /// Among the cycles whose slot and value fall inside `selection`, the
    /// majority inclusion state is found (ties count as excluded) and every
    /// selected cycle is set to the opposite state. Values are the ones the
    /// settings reduce (inverted or not).
    #[instrument(skip(self))]
    pub fn sculpt_cycles(&mut self, selection: &SculptSelection) -> Result<SculptOutcome> {
        let use_inverted = self.settings.use_inverted;
        let per_block = self.cycles_per_block;

        let mut hits: Vec<(u32, usize)> = Vec::new();
        for block in self.blocks.values() {
            let first_slot = (block.block_id() as usize - 1) * per_block;
            let values = block.values(use_inverted);
            for (cycle, value) in values.iter().enumerate() {
                if selection.slots.contains(&(first_slot + cycle))
                    && selection.values.contains(value)
                {
                    hits.push((block.block_id(), cycle));
                }
            }
        }

        let selected = hits.len();
        if selected == 0 {
            return Ok(SculptOutcome {
                selected,
                now_included: false,
            });
        }

        let count_included = hits
            .iter()
            .filter(|&&(id, cycle)| self.blocks[&id].cycles_included()[cycle])
            .count();
        let now_included = count_included <= selected / 2;

        let mut masks: BTreeMap<u32, Vec<bool>> = BTreeMap::new();
        for (id, cycle) in hits {
            let mask = masks
                .entry(id)
                .or_insert_with(|| self.blocks[&id].cycles_included().to_vec());
            mask[cycle] = now_included;
        }
        for (id, mask) in masks {
            self.replace_cycles_included(id, mask)?;
        }

        debug!("Sculpted {} cycles to included = {}", selected, now_included);
        Ok(SculptOutcome {
            selected,
            now_included,
        })
    }
}

#[cfg(feature = "parallel")]
fn stats_of_blocks(records: &[&BlockCyclesRecord], use_inverted: bool) -> Vec<BlockStatsRecord> {
    use rayon::prelude::*;
    // collect keeps input order
    records
        .par_iter()
        .map(|&b| compute_block_stats(b, use_inverted))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn stats_of_blocks(records: &[&BlockCyclesRecord], use_inverted: bool) -> Vec<BlockStatsRecord> {
    records
        .iter()
        .map(|&b| compute_block_stats(b, use_inverted))
        .collect()
}
