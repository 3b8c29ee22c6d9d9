//! Outlier rejection for mass-spectrometer cycle data
//!
//! Filters here take a sample and a boolean inclusion mask and return a
//! narrower mask. They never re-include points, never touch their inputs,
//! and run exactly one pass per call:
//!
//! ```rust
//! use tripoli_outlier::{apply_chauvenets_criterion, ChauvenetFilter, OutlierFilter};
//!
//! let data = [5.01, 4.99, 5.02, 4.98, 5.00, 5.03, 4.97, 5.40];
//! let included = vec![true; data.len()];
//!
//! let first = apply_chauvenets_criterion(&data, &included).unwrap();
//! assert!(!first[7]);
//!
//! // another pass over what is left is the caller's decision
//! let filter = ChauvenetFilter::default();
//! let second = filter.filter(&data, &first).unwrap();
//! assert!(second.iter().zip(&first).all(|(&now, &was)| was || !now));
//! ```

pub mod chauvenet;
pub mod traits;

pub use chauvenet::{
    apply_chauvenets_criterion, apply_chauvenets_criterion_with, ChauvenetFilter,
    ChauvenetParameters,
};
pub use traits::OutlierFilter;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chauvenet::{apply_chauvenets_criterion, ChauvenetFilter, ChauvenetParameters};
    pub use crate::traits::OutlierFilter;
}
