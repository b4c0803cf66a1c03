//! Cohort analytics over student performance records
//!
//! Turns a course's [`StudentPerformanceRecord`]s into cohort roll-ups,
//! per-student comparisons and textual insights.
//!
//! # Overview
//!
//! - [`CohortMetricsAggregator`]: averages and letter-grade distribution
//! - [`EngagementScorer`]: weighted engagement score in `[0, 1]`
//! - [`percentile_rank`]: mean-rank percentile within the cohort
//! - [`StrengthWeaknessClassifier`]: rule-table strength/improvement tags
//! - [`assess_risk`]: weighted early-intervention risk factors
//! - [`generate_insights`]: rule-table insight and recommendation strings
//!
//! Every function is pure; the same records always produce the same output.
//!
//! # Examples
//!
//! ```rust
//! use grade_cohort::{aggregate_cohort, compare_students, generate_insights, StudentPerformanceRecord};
//! use grade_core::AnalyticsConfig;
//!
//! let records: Vec<StudentPerformanceRecord> = serde_json::from_str(r#"[
//!     {"studentId": "s1", "courseId": "ENG-102", "currentGrade": 91.0, "attendanceRate": 0.95},
//!     {"studentId": "s2", "courseId": "ENG-102", "currentGrade": 64.0, "attendanceRate": 0.70}
//! ]"#).unwrap();
//!
//! let config = AnalyticsConfig::default();
//! let cohort = aggregate_cohort("ENG-102", &records).unwrap();
//! let comparisons = compare_students(&records, &cohort, &config).unwrap();
//! let insights = generate_insights(&cohort, &comparisons, &config.insights);
//!
//! assert_eq!(cohort.average_grade, 77.5);
//! assert_eq!(comparisons[0].percentile_rank, 75);
//! assert!(!insights.insights.is_empty());
//! ```

pub mod aggregate;
pub mod classifier;
pub mod comparison;
pub mod engagement;
pub mod insights;
pub mod percentile;
pub mod records;
pub mod risk;

pub use aggregate::{aggregate_cohort, CohortMetrics, CohortMetricsAggregator, GradeBand, LetterGrade};
pub use classifier::{
    classify, Classification, ClassificationRule, PerformanceTag, StrengthWeaknessClassifier,
    Verdict, RULES,
};
pub use comparison::{compare_students, CohortComparator, StudentComparison};
pub use engagement::{engagement_score, EngagementScorer, EngagementWeights};
pub use insights::{generate_insights, most_common_tag, CohortInsights, InsightKind, INSIGHT_RULES};
pub use percentile::percentile_rank;
pub use records::{
    AssignmentScore, CompletionTrend, EngagementMetrics, LearningVelocity,
    StudentPerformanceRecord,
};
pub use risk::{assess_risk, RiskAssessment, RiskFactor, RiskLevel};
