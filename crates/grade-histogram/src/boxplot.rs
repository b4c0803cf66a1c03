//! Five-number summaries with IQR outlier detection
//!
//! Quartiles come from [`Quartiles`], the same computation that fills
//! `GradeStatistics::quartiles`, so a box plot always agrees with the
//! statistics of the same sample. Outliers are reported, never removed.

use grade_core::{GradeSample, Result, StudentId};
use grade_statistics::{Quartiles, TUKEY_FENCE};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// A value beyond the Tukey fences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlier {
    pub value: f64,
    pub student_id: Option<StudentId>,
}

/// Box-plot summary of one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlotData {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest value inside the fences
    pub lower_whisker: f64,
    /// Largest value inside the fences
    pub upper_whisker: f64,
    /// Ascending by value
    pub outliers: Vec<Outlier>,
}

impl BoxPlotData {
    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }

    /// Check if a value falls outside the fences
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

impl fmt::Display for BoxPlotData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoxPlot(min={:.2}, q1={:.2}, median={:.2}, q3={:.2}, max={:.2}, outliers={})",
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
            self.outliers.len()
        )
    }
}

/// Builds [`BoxPlotData`] with a configurable fence multiplier
#[derive(Debug, Clone, Copy)]
pub struct BoxPlotBuilder {
    fence_multiplier: f64,
}

impl BoxPlotBuilder {
    /// Tukey's 1.5 IQR fences
    pub fn new() -> Self {
        Self {
            fence_multiplier: TUKEY_FENCE,
        }
    }

    /// Use `multiplier * IQR` fences; negative values are treated as 0
    pub fn with_fence_multiplier(mut self, multiplier: f64) -> Self {
        self.fence_multiplier = multiplier.max(0.0);
        self
    }

    /// Build the summary; fails only with `EmptySample`
    #[instrument(skip_all, fields(n = sample.len()))]
    pub fn build(&self, sample: &GradeSample) -> Result<BoxPlotData> {
        sample.require_non_empty("box plot")?;

        let sorted = sample.sorted_entries();
        let values: Vec<f64> = sorted.iter().map(|entry| entry.value).collect();
        let quartiles = Quartiles::from_sorted(&values)?;
        let (lower_fence, upper_fence) = quartiles.fences(self.fence_multiplier);

        let mut outliers = Vec::new();
        let mut inside: Option<(f64, f64)> = None;
        for entry in &sorted {
            if entry.value < lower_fence || entry.value > upper_fence {
                outliers.push(Outlier {
                    value: entry.value,
                    student_id: entry.student_id.clone(),
                });
            } else {
                inside = Some(match inside {
                    Some((low, _)) => (low, entry.value),
                    None => (entry.value, entry.value),
                });
            }
        }
        let (lower_whisker, upper_whisker) = inside.unwrap_or((quartiles.q1, quartiles.q3));

        debug!(
            outliers = outliers.len(),
            lower_fence, upper_fence, "built box plot"
        );

        Ok(BoxPlotData {
            min: values[0],
            q1: quartiles.q1,
            median: quartiles.q2,
            q3: quartiles.q3,
            max: values[values.len() - 1],
            iqr: quartiles.iqr,
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

impl Default for BoxPlotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grade_core::Error;

    #[test]
    fn test_outlier_detection() {
        let scores = [10.0, 50.0, 52.0, 54.0, 55.0, 56.0, 58.0, 60.0, 95.0];
        let sample = GradeSample::from_scores(
            scores
                .iter()
                .enumerate()
                .map(|(i, &v)| (format!("s{i}"), v)),
        );
        let plot = BoxPlotBuilder::new().build(&sample).unwrap();

        let flagged: Vec<f64> = plot.outliers.iter().map(|o| o.value).collect();
        assert_eq!(flagged, vec![10.0, 95.0]);
        assert_eq!(plot.outliers[0].student_id, Some(StudentId::new("s0")));
        assert_eq!(plot.outliers[1].student_id, Some(StudentId::new("s8")));
        assert_eq!(plot.min, 10.0);
        assert_eq!(plot.max, 95.0);
        assert_eq!(plot.lower_whisker, 50.0);
        assert_eq!(plot.upper_whisker, 60.0);
        assert_relative_eq!(plot.upper_fence, 67.0);
    }

    #[test]
    fn test_identical_values_have_no_outliers() {
        let plot = BoxPlotBuilder::new()
            .build(&GradeSample::from_values(&[80.0, 80.0, 80.0, 80.0]))
            .unwrap();
        assert_eq!(plot.iqr, 0.0);
        assert!(!plot.has_outliers());
    }

    #[test]
    fn test_wider_fences_flag_less() {
        let sample = GradeSample::from_values(&[10.0, 50.0, 52.0, 54.0, 55.0, 56.0, 58.0, 60.0, 95.0]);
        let plot = BoxPlotBuilder::new()
            .with_fence_multiplier(10.0)
            .build(&sample)
            .unwrap();
        assert!(!plot.has_outliers());
    }

    #[test]
    fn test_empty_sample() {
        let result = BoxPlotBuilder::new().build(&GradeSample::default());
        assert!(matches!(result, Err(Error::EmptySample { .. })));
    }
}
