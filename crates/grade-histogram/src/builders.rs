//! Histogram building strategies

use crate::traits::HistogramBuilder;
use crate::types::{DistributionBin, HistogramData};
use grade_core::math::percentage;
use grade_core::{BinningStrategy, GradeEntry, GradeRange, GradeSample, Result, MAX_EQUAL_WIDTH_BINS};
use grade_statistics::GradeStatistics;
use tracing::{debug, instrument, warn};

/// Fixed-width histogram builder
///
/// Creates a histogram with a specified number of equal-width bins spanning
/// `[min, max]` of the sample. The last bin is closed so `max` is never
/// dropped by floating-point rounding.
#[derive(Debug, Clone, Copy)]
pub struct EqualWidthBuilder {
    num_bins: usize,
}

impl EqualWidthBuilder {
    /// Create a new fixed-width histogram builder
    ///
    /// `num_bins` is clamped to `1..=MAX_EQUAL_WIDTH_BINS`.
    pub fn new(num_bins: usize) -> Self {
        if num_bins > MAX_EQUAL_WIDTH_BINS {
            warn!(requested = num_bins, max = MAX_EQUAL_WIDTH_BINS, "clamping histogram bin count");
        }
        Self {
            num_bins: num_bins.clamp(1, MAX_EQUAL_WIDTH_BINS),
        }
    }
}

impl HistogramBuilder for EqualWidthBuilder {
    #[instrument(skip_all, fields(n = sample.len(), bins = self.num_bins))]
    fn build(&self, sample: &GradeSample) -> Result<HistogramData> {
        sample.require_non_empty("histogram")?;

        let sorted = sample.sorted_entries();
        let values: Vec<f64> = sorted.iter().map(|entry| entry.value).collect();
        let statistics = GradeStatistics::from_sorted(&values)?;
        let total = sorted.len();

        // O(1) min/max from sorted data
        let min = values[0];
        let max = values[total - 1];

        if max == min {
            debug!(value = min, "all scores identical, collapsing to a single bin");
            let mut bin = DistributionBin::new(label(min, max), min, max);
            fill(&mut bin, sorted.iter().copied(), total);
            return Ok(HistogramData {
                bins: vec![bin],
                bin_width: Some(0.0),
                total_count: total,
                statistics,
            });
        }

        let width = (max - min) / self.num_bins as f64;
        let last = self.num_bins - 1;
        let mut bins: Vec<DistributionBin> = (0..self.num_bins)
            .map(|i| {
                let left = min + i as f64 * width;
                let right = if i == last {
                    max // Ensure last bin includes max
                } else {
                    min + (i + 1) as f64 * width
                };
                DistributionBin::new(label(left, right), left, right)
            })
            .collect();

        // Single pass through sorted data
        let mut current = 0;
        for entry in &sorted {
            while current < last && entry.value >= bins[current].max {
                current += 1;
            }
            push(&mut bins[current], entry);
        }
        for bin in &mut bins {
            bin.percentage = percentage(bin.count, total);
        }

        Ok(HistogramData {
            bins,
            bin_width: Some(width),
            total_count: total,
            statistics,
        })
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.num_bins)
    }
}

/// Histogram over caller supplied ranges
///
/// A value lands in the first range with `min <= v < max`; the range with the
/// greatest upper bound is also closed on the right. Values outside every
/// range still count toward `total_count`.
#[derive(Debug, Clone)]
pub struct CustomRangeBuilder {
    ranges: Vec<GradeRange>,
}

impl CustomRangeBuilder {
    pub fn new(ranges: Vec<GradeRange>) -> Self {
        Self { ranges }
    }

    /// Index of the range whose upper bound is inclusive
    fn closed_range(&self) -> Option<usize> {
        self.ranges
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, range)| match best {
                Some((_, max)) if range.max <= max => best,
                _ => Some((i, range.max)),
            })
            .map(|(i, _)| i)
    }
}

impl HistogramBuilder for CustomRangeBuilder {
    #[instrument(skip_all, fields(n = sample.len(), ranges = self.ranges.len()))]
    fn build(&self, sample: &GradeSample) -> Result<HistogramData> {
        sample.require_non_empty("histogram")?;

        let sorted = sample.sorted_entries();
        let values: Vec<f64> = sorted.iter().map(|entry| entry.value).collect();
        let statistics = GradeStatistics::from_sorted(&values)?;
        let total = sorted.len();
        let closed = self.closed_range();

        let mut bins: Vec<DistributionBin> = self
            .ranges
            .iter()
            .map(|range| DistributionBin::new(range.label.clone(), range.min, range.max))
            .collect();

        let mut unbinned = 0usize;
        for entry in &sorted {
            let slot = self
                .ranges
                .iter()
                .enumerate()
                .position(|(i, range)| range.contains(entry.value, Some(i) == closed));
            match slot {
                Some(i) => push(&mut bins[i], entry),
                None => unbinned += 1,
            }
        }
        for bin in &mut bins {
            bin.percentage = percentage(bin.count, total);
        }

        if unbinned > 0 {
            warn!(unbinned, total, "scores fell outside every custom range");
        }

        Ok(HistogramData {
            bins,
            bin_width: None,
            total_count: total,
            statistics,
        })
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.ranges.len())
    }
}

/// Build a histogram with the configured strategy
pub fn bin_sample(sample: &GradeSample, strategy: &BinningStrategy) -> Result<HistogramData> {
    match strategy {
        BinningStrategy::EqualWidth { bins } => EqualWidthBuilder::new(*bins).build(sample),
        BinningStrategy::Custom(ranges) => CustomRangeBuilder::new(ranges.clone()).build(sample),
    }
}

fn label(left: f64, right: f64) -> String {
    format!("{left:.1}-{right:.1}")
}

fn push(bin: &mut DistributionBin, entry: &GradeEntry) {
    bin.count += 1;
    if let Some(id) = &entry.student_id {
        bin.student_ids.push(id.clone());
    }
}

fn fill<'a, I>(bin: &mut DistributionBin, entries: I, total: usize)
where
    I: IntoIterator<Item = &'a GradeEntry>,
{
    for entry in entries {
        push(bin, entry);
    }
    bin.percentage = percentage(bin.count, total);
}
