//! Cohort-level roll-ups of student records

use crate::engagement::EngagementScorer;
use crate::records::StudentPerformanceRecord;
use grade_core::math::{mean_of, percentage, unit_clamp};
use grade_core::{Error, Result};
use grade_statistics::median_sorted;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, warn};

/// Letter-grade band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Bands in reporting order
    pub const ALL: [LetterGrade; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Band for a percentage grade; `None` for negative or non-finite input
    ///
    /// Bands are threshold based, so 89.5 is a B and 104 (extra credit) an A.
    pub fn from_grade(grade: f64) -> Option<Self> {
        if !grade.is_finite() || grade < 0.0 {
            return None;
        }
        Some(match grade {
            g if g >= 90.0 => Self::A,
            g if g >= 80.0 => Self::B,
            g if g >= 70.0 => Self::C,
            g if g >= 60.0 => Self::D,
            _ => Self::F,
        })
    }

    /// Nominal `(min, max)` of the band
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::A => (90.0, 100.0),
            Self::B => (80.0, 89.0),
            Self::C => (70.0, 79.0),
            Self::D => (60.0, 69.0),
            Self::F => (0.0, 59.0),
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self, Self::F)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        };
        f.write_str(letter)
    }
}

/// One non-empty row of the grade distribution table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBand {
    pub grade: LetterGrade,
    /// e.g. `"80-89"`
    pub range: String,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Share of students with a valid grade, 0-100
    pub percentage: f64,
}

/// Aggregate view of one course's students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMetrics {
    pub course_id: String,
    pub student_count: usize,
    /// Students with a finite, non-negative grade
    pub graded_count: usize,
    pub average_grade: f64,
    pub median_grade: f64,
    /// Bands with at least one student, A first
    pub grade_distribution: Vec<GradeBand>,
    pub average_attendance: f64,
    pub average_completion: f64,
    pub average_engagement: f64,
    pub average_submission_rate: f64,
}

impl CohortMetrics {
    /// Count in `grade`'s band, 0 when the band is absent
    pub fn band_count(&self, grade: LetterGrade) -> usize {
        self.grade_distribution
            .iter()
            .find(|band| band.grade == grade)
            .map_or(0, |band| band.count)
    }

    /// Share (0-1) of graded students in `grade`'s band
    pub fn band_share(&self, grade: LetterGrade) -> f64 {
        grade_core::math::ratio(self.band_count(grade), self.graded_count)
    }
}

/// Reduces student records to [`CohortMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CohortMetricsAggregator {
    scorer: EngagementScorer,
}

impl CohortMetricsAggregator {
    pub fn new(scorer: EngagementScorer) -> Self {
        Self { scorer }
    }

    /// Aggregate one course; fails with `EmptyCohort` when `records` is empty
    ///
    /// Every student carries equal weight in each average.
    #[instrument(skip_all, fields(course = course_id, n = records.len()))]
    pub fn aggregate(
        &self,
        course_id: &str,
        records: &[StudentPerformanceRecord],
    ) -> Result<CohortMetrics> {
        if records.is_empty() {
            return Err(Error::empty_cohort(course_id));
        }

        let mut grades: Vec<f64> = records
            .iter()
            .filter(|r| r.has_valid_grade())
            .map(|r| r.current_grade)
            .collect();
        grades.sort_by(f64::total_cmp);

        let (average_grade, median_grade) = if grades.is_empty() {
            warn!("no student in the cohort has a valid grade");
            (0.0, 0.0)
        } else {
            (
                mean_of(grades.iter().copied()).unwrap_or(0.0),
                median_sorted(&grades)?,
            )
        };

        let metrics = CohortMetrics {
            course_id: course_id.to_string(),
            student_count: records.len(),
            graded_count: grades.len(),
            average_grade,
            median_grade,
            grade_distribution: grade_distribution(&grades),
            average_attendance: average(records, |r| unit_clamp(r.attendance_rate)),
            average_completion: average(records, |r| unit_clamp(r.engagement.completion_rate)),
            average_engagement: average(records, |r| self.scorer.score(&r.engagement)),
            average_submission_rate: average(records, |r| {
                unit_clamp(r.engagement.submission_rate)
            }),
        };

        debug!(
            average_grade = metrics.average_grade,
            bands = metrics.grade_distribution.len(),
            "aggregated cohort"
        );
        Ok(metrics)
    }
}

/// Aggregate with the standard engagement weights
pub fn aggregate_cohort(
    course_id: &str,
    records: &[StudentPerformanceRecord],
) -> Result<CohortMetrics> {
    CohortMetricsAggregator::default().aggregate(course_id, records)
}

fn average<F>(records: &[StudentPerformanceRecord], metric: F) -> f64
where
    F: Fn(&StudentPerformanceRecord) -> f64,
{
    mean_of(records.iter().map(metric)).unwrap_or(0.0)
}

/// Non-empty letter bands over valid grades
fn grade_distribution(valid_grades: &[f64]) -> Vec<GradeBand> {
    let total = valid_grades.len();
    LetterGrade::ALL
        .iter()
        .filter_map(|&grade| {
            let count = valid_grades
                .iter()
                .filter(|&&g| LetterGrade::from_grade(g) == Some(grade))
                .count();
            if count == 0 {
                return None;
            }
            let (min, max) = grade.bounds();
            Some(GradeBand {
                grade,
                range: format!("{min:.0}-{max:.0}"),
                min,
                max,
                count,
                percentage: percentage(count, total),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::EngagementMetrics;
    use approx::assert_relative_eq;
    use grade_core::StudentId;

    fn record(id: &str, grade: f64, attendance: f64, completion: f64) -> StudentPerformanceRecord {
        StudentPerformanceRecord {
            student_id: StudentId::new(id),
            student_name: None,
            course_id: "BIO-110".to_string(),
            current_grade: grade,
            assignment_scores: Vec::new(),
            attendance_rate: attendance,
            engagement: EngagementMetrics {
                completion_rate: completion,
                submission_rate: completion,
                ..Default::default()
            },
            learning_velocity: Default::default(),
        }
    }

    #[test]
    fn test_letter_bands() {
        assert_eq!(LetterGrade::from_grade(100.0), Some(LetterGrade::A));
        assert_eq!(LetterGrade::from_grade(104.0), Some(LetterGrade::A));
        assert_eq!(LetterGrade::from_grade(89.5), Some(LetterGrade::B));
        assert_eq!(LetterGrade::from_grade(70.0), Some(LetterGrade::C));
        assert_eq!(LetterGrade::from_grade(59.99), Some(LetterGrade::F));
        assert_eq!(LetterGrade::from_grade(0.0), Some(LetterGrade::F));
        assert_eq!(LetterGrade::from_grade(-5.0), None);
        assert_eq!(LetterGrade::from_grade(f64::NAN), None);
        let failing: Vec<_> = LetterGrade::ALL.iter().filter(|g| g.is_failing()).collect();
        assert_eq!(failing, vec![&LetterGrade::F]);
    }

    #[test]
    fn test_aggregate_averages() {
        let records = vec![
            record("a", 95.0, 1.0, 0.9),
            record("b", 85.0, 0.8, 0.7),
            record("c", 55.0, 0.6, 0.5),
        ];
        let metrics = aggregate_cohort("BIO-110", &records).unwrap();

        assert_eq!(metrics.student_count, 3);
        assert_eq!(metrics.graded_count, 3);
        assert_relative_eq!(metrics.average_grade, 78.333333, epsilon = 1e-5);
        assert_eq!(metrics.median_grade, 85.0);
        assert_relative_eq!(metrics.average_attendance, 0.8);
        assert_relative_eq!(metrics.average_completion, 0.7);
        assert_relative_eq!(metrics.average_submission_rate, 0.7);
    }

    #[test]
    fn test_empty_bands_are_omitted() {
        let records = vec![record("a", 95.0, 1.0, 1.0), record("b", 42.0, 1.0, 1.0)];
        let metrics = aggregate_cohort("BIO-110", &records).unwrap();

        let letters: Vec<LetterGrade> = metrics.grade_distribution.iter().map(|b| b.grade).collect();
        assert_eq!(letters, vec![LetterGrade::A, LetterGrade::F]);
        assert!(metrics.grade_distribution.iter().all(|b| b.count > 0));
        assert_eq!(metrics.grade_distribution[1].range, "0-59");
        assert_relative_eq!(metrics.grade_distribution[0].percentage, 50.0);
        assert_eq!(metrics.band_count(LetterGrade::C), 0);
        assert_relative_eq!(metrics.band_share(LetterGrade::F), 0.5);
    }

    #[test]
    fn test_invalid_grades_excluded_from_distribution() {
        let records = vec![record("a", 75.0, 1.0, 1.0), record("b", -1.0, 1.0, 1.0)];
        let metrics = aggregate_cohort("BIO-110", &records).unwrap();
        assert_eq!(metrics.student_count, 2);
        assert_eq!(metrics.graded_count, 1);
        assert_eq!(metrics.average_grade, 75.0);
        let total: usize = metrics.grade_distribution.iter().map(|b| b.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_all_failing_cohort() {
        let records = vec![record("a", 10.0, 0.2, 0.1), record("b", 30.0, 0.1, 0.0)];
        let metrics = aggregate_cohort("BIO-110", &records).unwrap();
        assert_eq!(metrics.grade_distribution.len(), 1);
        assert_eq!(metrics.band_count(LetterGrade::F), 2);
    }

    #[test]
    fn test_empty_cohort() {
        assert_eq!(
            aggregate_cohort("BIO-110", &[]),
            Err(Error::empty_cohort("BIO-110"))
        );
    }
}
