//! Statistical reduction of mass-spectrometer block and cycle data
//!
//! Facade over the tripoli crates:
//!
//! - [`base`]: errors, exact decimal rounding, descriptive statistics and
//!   special functions
//! - [`sigfig`]: significant-figure rounding and legend formatting
//! - [`outlier`]: Chauvenet's criterion over masked samples
//! - [`cycles`]: block records, block/cycle mode aggregation, geometric
//!   transforms and the analysis container
//!
//! # Example
//!
//! ```rust
//! use tripoli_reduction::prelude::*;
//!
//! let settings = ReductionSettings {
//!     mode: ReductionMode::Cycle,
//!     ..Default::default()
//! };
//! let blocks = vec![
//!     BlockCyclesRecord::from_values(1, vec![5.01, 4.99, 5.02, 4.98], vec![0.01; 4]).unwrap(),
//!     BlockCyclesRecord::from_values(2, vec![5.00, 5.03, 4.97, 5.40], vec![0.01; 4]).unwrap(),
//! ];
//! let mut analysis = AnalysisBlockCycles::from_blocks(4, settings, blocks).unwrap();
//!
//! let report = analysis.perform_chauvenets().unwrap();
//! assert_eq!(report.total_rejected(), 1);
//! assert!(!analysis.block(2).unwrap().cycles_included()[3]);
//! ```

pub use tripoli_core as base;
pub use tripoli_cycles as cycles;
pub use tripoli_outlier as outlier;
pub use tripoli_sigfig as sigfig;

pub use tripoli_core::{Error, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use tripoli_core::prelude::*;
    pub use tripoli_cycles::prelude::*;
    pub use tripoli_outlier::prelude::*;
    pub use tripoli_sigfig::prelude::*;
}
