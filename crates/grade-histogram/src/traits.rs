//! Core traits for histogram building

use crate::types::HistogramData;
use grade_core::{GradeSample, Result};

/// Trait for partitioning a grade sample into bins
pub trait HistogramBuilder {
    /// Build a histogram from the given sample
    ///
    /// Fails only with `EmptySample`.
    fn build(&self, sample: &GradeSample) -> Result<HistogramData>;

    /// Get the target number of bins (if known)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}
