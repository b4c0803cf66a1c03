//! Core types for grade distributions

use grade_core::StudentId;
use grade_statistics::GradeStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bin of a grade distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBin {
    /// Display label, e.g. `"60.0-70.0"` or a custom range name
    pub range: String,
    /// Left edge of the bin (inclusive)
    pub min: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub max: f64,
    pub count: usize,
    /// Share of the whole sample, 0-100
    pub percentage: f64,
    /// Students whose score fell in this bin, ascending by score
    pub student_ids: Vec<StudentId>,
}

impl DistributionBin {
    /// Create an empty bin
    pub fn new(range: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            range: range.into(),
            min,
            max,
            count: 0,
            percentage: 0.0,
            student_ids: Vec::new(),
        }
    }

    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl fmt::Display for DistributionBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: count={} ({:.1}%)",
            self.range, self.count, self.percentage
        )
    }
}

/// A binned grade distribution with the statistics of the underlying sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramData {
    pub bins: Vec<DistributionBin>,
    /// Common bin width; `None` for custom ranges, 0 for a degenerate sample
    pub bin_width: Option<f64>,
    /// Number of values in the sample, including any that fell outside custom ranges
    pub total_count: usize,
    pub statistics: GradeStatistics,
}

impl HistogramData {
    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the histogram has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Get counts as a vector
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Number of values assigned to some bin
    pub fn binned_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Get the maximum count in any bin
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Index of the bin holding `student`, if any
    pub fn find_student(&self, student: &StudentId) -> Option<usize> {
        self.bins
            .iter()
            .position(|bin| bin.student_ids.contains(student))
    }
}

impl fmt::Display for HistogramData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.2}, {:.2}])",
            self.len(),
            self.total_count,
            self.statistics.min,
            self.statistics.max
        )
    }
}
