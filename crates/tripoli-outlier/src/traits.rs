//! Seam between mask-based outlier filters and the data they prune

use tripoli_core::Result;

/// A filter that narrows an inclusion mask over a sample
///
/// Implementations only ever clear mask entries: a point excluded on input
/// stays excluded on output. The input mask is never mutated; a new mask
/// of the same length is returned.
pub trait OutlierFilter {
    /// Name of the rejection rule
    fn name(&self) -> &'static str;

    /// Fewest included points the filter will act on
    fn minimum_sample_size(&self) -> usize;

    /// Apply one pass of the filter
    fn filter(&self, data: &[f64], included: &[bool]) -> Result<Vec<bool>>;

    /// Number of entries cleared between two masks
    fn count_rejected(before: &[bool], after: &[bool]) -> usize
    where
        Self: Sized,
    {
        before
            .iter()
            .zip(after)
            .filter(|(&was, &now)| was && !now)
            .count()
    }
}
