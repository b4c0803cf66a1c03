//! Grade distribution binning and box plots
//!
//! This crate buckets a [`GradeSample`](grade_core::GradeSample) into
//! histogram bins that remember which students they hold, and derives
//! five-number summaries with IQR outlier detection.
//!
//! # Examples
//!
//! ## Equal-width bins
//!
//! ```rust
//! use grade_core::GradeSample;
//! use grade_histogram::{EqualWidthBuilder, HistogramBuilder};
//!
//! let sample = GradeSample::from_scores(vec![("ana", 58.0), ("ben", 74.0), ("cy", 91.0)]);
//! let histogram = EqualWidthBuilder::new(4).build(&sample).unwrap();
//!
//! for bin in &histogram.bins {
//!     println!("{bin}");
//! }
//! assert_eq!(histogram.total_count, 3);
//! ```
//!
//! ## Box plot
//!
//! ```rust
//! use grade_core::GradeSample;
//! use grade_histogram::box_plot;
//!
//! let sample = GradeSample::from_values(&[10.0, 50.0, 52.0, 54.0, 55.0, 56.0, 58.0, 60.0, 95.0]);
//! let plot = box_plot(&sample).unwrap();
//! assert_eq!(plot.outliers.len(), 2);
//! ```

pub mod boxplot;
pub mod builders;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use boxplot::{BoxPlotBuilder, BoxPlotData, Outlier};
pub use builders::{bin_sample, CustomRangeBuilder, EqualWidthBuilder};
pub use traits::HistogramBuilder;
pub use types::{DistributionBin, HistogramData};

pub use grade_core::Result;

// Convenience functions
/// Create a histogram with a fixed number of equal-width bins
pub fn equal_width_histogram(
    sample: &grade_core::GradeSample,
    num_bins: usize,
) -> Result<HistogramData> {
    EqualWidthBuilder::new(num_bins).build(sample)
}

/// Create a box plot with Tukey's 1.5 IQR fences
pub fn box_plot(sample: &grade_core::GradeSample) -> Result<BoxPlotData> {
    BoxPlotBuilder::new().build(sample)
}
