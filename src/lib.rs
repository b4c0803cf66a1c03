//! Grade and performance analytics engine
//!
//! Descriptive statistics, grade distributions, box plots, cohort roll-ups,
//! per-student comparisons and insight generation for course reports. Every
//! computation is a pure function of its inputs.
//!
//! # Crates
//!
//! - [`grade_core`]: errors, [`GradeSample`], configuration
//! - [`grade_quantile`]: the shared linear-interpolation quantile
//! - [`grade_statistics`]: [`GradeStatistics`]
//! - [`grade_histogram`]: equal-width / custom-range bins and box plots
//! - [`grade_cohort`]: cohort metrics, engagement, percentiles, classification, insights
//!
//! # Quick Start
//!
//! ```rust
//! use grade_analytics::prelude::*;
//!
//! let sample = GradeSample::from_values(&[60.0, 70.0, 70.0, 80.0, 90.0]);
//! let stats = compute_statistics(&sample).unwrap();
//! assert_eq!(stats.median, 70.0);
//! assert_eq!(stats.mode, vec![70.0]);
//!
//! let plot = box_plot(&sample).unwrap();
//! assert_eq!(plot.q1, stats.quartiles.q1);
//! ```
//!
//! ## Course report
//!
//! ```rust
//! use grade_analytics::prelude::*;
//!
//! let records: Vec<StudentPerformanceRecord> = (0..12)
//!     .map(|i| StudentPerformanceRecord {
//!         student_id: StudentId::new(format!("s{i}")),
//!         student_name: None,
//!         course_id: "MATH-101".to_string(),
//!         current_grade: 50.0 + 4.0 * i as f64,
//!         assignment_scores: Vec::new(),
//!         attendance_rate: 0.9,
//!         engagement: EngagementMetrics::default(),
//!         learning_velocity: LearningVelocity::default(),
//!     })
//!     .collect();
//!
//! let config = AnalyticsConfig::new().histogram_bins(5);
//! let report = analyze_course("MATH-101", &records, &config).unwrap();
//! assert_eq!(report.histogram.len(), 5);
//! assert_eq!(report.comparisons.len(), 12);
//! ```

pub mod report;

pub use grade_cohort;
pub use grade_core;
pub use grade_histogram;
pub use grade_quantile;
pub use grade_statistics;

pub use report::{analyze_assignment, analyze_course, assignment_scores, AssignmentReport, CourseReport};

pub use grade_core::{AnalyticsConfig, Error, GradeSample, Result, StudentId};
pub use grade_statistics::GradeStatistics;

/// Common imports for report generation
pub mod prelude {
    pub use crate::report::{analyze_assignment, analyze_course, assignment_scores, AssignmentReport, CourseReport};

    pub use grade_core::{
        AnalyticsConfig, BinningStrategy, Error, GradeEntry, GradeRange, GradeSample, Result,
        StudentId,
    };
    pub use grade_quantile::{quantile_sorted, QuantileEstimator};
    pub use grade_statistics::{compute_statistics, describe, GradeStatistics, Quartiles};
    pub use grade_histogram::{
        bin_sample, box_plot, equal_width_histogram, BoxPlotData, DistributionBin, HistogramData,
    };
    pub use grade_cohort::{
        aggregate_cohort, compare_students, engagement_score, generate_insights, percentile_rank,
        AssignmentScore, CohortInsights, CohortMetrics, CompletionTrend, EngagementMetrics,
        LearningVelocity, PerformanceTag, RiskLevel, StudentComparison, StudentPerformanceRecord,
    };
}
