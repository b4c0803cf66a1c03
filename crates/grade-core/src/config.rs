//! Configuration types for analytics runs
//!
//! Every threshold has a default matching the standard reporting rules, and
//! every struct deserializes with `#[serde(default)]` so callers can override
//! a single field from a JSON/TOML document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A labelled score interval used for custom histogram bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRange {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl GradeRange {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// Half-open `[min, max)` membership, closed when `inclusive_upper` is set
    pub fn contains(&self, value: f64, inclusive_upper: bool) -> bool {
        value >= self.min && (value < self.max || (inclusive_upper && value == self.max))
    }
}

/// Upper bound on equal-width bins; larger requests are clamped
pub const MAX_EQUAL_WIDTH_BINS: usize = 1_000;

/// How a sample is partitioned into histogram bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinningStrategy {
    /// `bins` equal-width bins spanning `[min, max]` of the sample, clamped
    /// to `1..=MAX_EQUAL_WIDTH_BINS` when built
    EqualWidth { bins: usize },
    /// Caller supplied ranges, evaluated in order
    Custom(Vec<GradeRange>),
}

impl Default for BinningStrategy {
    fn default() -> Self {
        Self::EqualWidth { bins: 10 }
    }
}

/// Margins and absolute cut-offs for strength/improvement tagging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassificationThresholds {
    /// Percentage points above/below the cohort average grade
    pub grade_margin: f64,
    /// Margin for metrics on a 0-1 scale
    pub normalized_margin: f64,
    pub submission_strength: f64,
    pub submission_weakness: f64,
    pub late_share_strength: f64,
    pub late_share_weakness: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            grade_margin: 10.0,
            normalized_margin: 0.1,
            submission_strength: 0.9,
            submission_weakness: 0.7,
            late_share_strength: 0.10,
            late_share_weakness: 0.30,
        }
    }
}

/// Cohort-level trigger points for insight rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsightThresholds {
    pub failing_share: f64,
    pub excellence_share: f64,
    pub low_attendance: f64,
    pub high_attendance: f64,
    pub low_engagement: f64,
    pub high_engagement: f64,
    pub low_completion: f64,
    pub declining_share: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            failing_share: 0.20,
            excellence_share: 0.30,
            low_attendance: 0.80,
            high_attendance: 0.90,
            low_engagement: 0.50,
            high_engagement: 0.75,
            low_completion: 0.60,
            declining_share: 0.25,
        }
    }
}

/// Cut-offs for the early-intervention risk factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskThresholds {
    pub failing_grade: f64,
    pub low_attendance: f64,
    pub low_engagement: f64,
    pub high_late_share: f64,
    pub inactivity_days: i64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            failing_grade: 60.0,
            low_attendance: 0.70,
            low_engagement: 0.40,
            high_late_share: 0.30,
            inactivity_days: 14,
        }
    }
}

/// Top-level configuration for a report run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsConfig {
    pub binning: BinningStrategy,
    pub classification: ClassificationThresholds,
    pub insights: InsightThresholds,
    pub risk: RiskThresholds,
    /// Reference date for inactivity checks
    pub as_of: Option<NaiveDate>,
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `bins` equal-width histogram bins, clamped to `1..=MAX_EQUAL_WIDTH_BINS`
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.binning = BinningStrategy::EqualWidth {
            bins: bins.clamp(1, MAX_EQUAL_WIDTH_BINS),
        };
        self
    }

    /// Use explicit histogram ranges
    pub fn custom_ranges(mut self, ranges: Vec<GradeRange>) -> Self {
        self.binning = BinningStrategy::Custom(ranges);
        self
    }

    pub fn classification(mut self, thresholds: ClassificationThresholds) -> Self {
        self.classification = thresholds;
        self
    }

    pub fn insights(mut self, thresholds: InsightThresholds) -> Self {
        self.insights = thresholds;
        self
    }

    pub fn risk(mut self, thresholds: RiskThresholds) -> Self {
        self.risk = thresholds;
        self
    }

    /// Evaluate inactivity relative to `date`
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}
