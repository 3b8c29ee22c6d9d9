//! Block and cycle reduction for Tripoli analyses
//!
//! A mass-spectrometer analysis is a sequence of blocks, each a run of
//! measurement cycles. This crate turns per-block cycle values and
//! inclusion masks into the statistics a legend reports:
//!
//! - [`block`]: the immutable per-block record ([`BlockCyclesRecord`])
//! - [`stats`]: block statistics and the analysis-level aggregation in
//!   block mode (weighted mean of block means) and cycle mode (pooled)
//! - [`geometric`]: log-space statistics mapped to ratio space
//! - [`sigma_percent`]: ratio uncertainties as rounded percentages
//! - [`analysis`]: the container that applies outlier rejection and
//!   manual edits across blocks
//! - [`summary`]: rendered legend values
//!
//! # Example
//!
//! ```rust
//! use tripoli_cycles::{AnalysisBlockCycles, BlockCyclesRecord, ReductionSettings};
//!
//! let blocks = vec![
//!     BlockCyclesRecord::from_values(1, vec![10.0, 10.2, 9.9, 10.1], vec![0.1; 4]).unwrap(),
//!     BlockCyclesRecord::from_values(2, vec![10.3, 10.1, 10.2, 10.0], vec![0.1; 4]).unwrap(),
//! ];
//! let settings = ReductionSettings::default();
//! let mut analysis = AnalysisBlockCycles::from_blocks(4, settings, blocks).unwrap();
//!
//! let report = analysis.perform_chauvenets().unwrap();
//! let stats = analysis.calculate_analysis_stats();
//! assert_eq!(stats.count_of_included_blocks, 2);
//! assert_eq!(stats.count_of_included_cycles, 8 - report.total_rejected());
//! println!("{}", analysis.summary());
//! ```

pub mod analysis;
pub mod block;
pub mod geometric;
pub mod settings;
pub mod sigma_percent;
pub mod stats;
pub mod summary;

pub use analysis::{AnalysisBlockCycles, ChauvenetReport, SculptOutcome, SculptSelection};
pub use block::BlockCyclesRecord;
pub use geometric::{generate_geometric_mean_stats, GeometricMeanStatsRecord, StatsBands};
pub use settings::{ReductionMode, ReductionSettings};
pub use sigma_percent::{
    block_mode_sigma_percents, cycle_mode_sigma_percents, CycleModeSigmaPercents,
    SigmaPercentResult,
};
pub use stats::{compute_analysis_stats, compute_block_stats, AnalysisStatsRecord, BlockStatsRecord};
pub use summary::{summarize, BlockModeSummary, CycleModeSummary, Summary, Uncertainty};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{AnalysisBlockCycles, ChauvenetReport, SculptSelection};
    pub use crate::block::BlockCyclesRecord;
    pub use crate::geometric::{generate_geometric_mean_stats, StatsBands};
    pub use crate::settings::{ReductionMode, ReductionSettings};
    pub use crate::stats::{compute_analysis_stats, compute_block_stats, AnalysisStatsRecord};
    pub use crate::summary::Summary;
}
