//! Per-student input records
//!
//! Records are produced by the calling layer (document store, CSV import,
//! synthetic data) and are only ever read here.

use chrono::{DateTime, NaiveDate, Utc};
use grade_core::StudentId;
use serde::{Deserialize, Serialize};

/// One graded assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentScore {
    pub assignment_id: String,
    pub score: f64,
    pub max_score: f64,
    pub submitted_at: Option<DateTime<Utc>>,
    pub is_late: bool,
}

impl AssignmentScore {
    /// `score / max_score` as a percentage, `None` when unscorable
    pub fn percentage(&self) -> Option<f64> {
        if self.max_score > 0.0 && self.score.is_finite() && self.max_score.is_finite() {
            Some(self.score * 100.0 / self.max_score)
        } else {
            None
        }
    }
}

/// Raw engagement signals over the reporting window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    /// Average logins per week
    pub login_frequency: f64,
    /// Minutes on the platform per week
    pub time_on_platform: f64,
    /// Share of lessons completed, 0-1
    pub completion_rate: f64,
    /// Share of assignments submitted, 0-1
    pub submission_rate: f64,
    /// Forum posts in the window
    pub forum_participation: u32,
    pub last_activity: Option<DateTime<Utc>>,
}

impl EngagementMetrics {
    /// Whole days between the last activity and `as_of`
    pub fn days_inactive(&self, as_of: NaiveDate) -> Option<i64> {
        self.last_activity
            .map(|at| (as_of - at.date_naive()).num_days())
    }
}

/// Direction of a student's completion pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionTrend {
    Improving,
    #[default]
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningVelocity {
    /// Minutes
    pub average_time_per_lesson: f64,
    /// Minutes
    pub average_time_per_assignment: f64,
    pub completion_trend: CompletionTrend,
}

/// Everything known about one student in one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPerformanceRecord {
    pub student_id: StudentId,
    #[serde(default)]
    pub student_name: Option<String>,
    pub course_id: String,
    /// Percentage, 0-100 (may exceed 100 with extra credit)
    pub current_grade: f64,
    #[serde(default)]
    pub assignment_scores: Vec<AssignmentScore>,
    /// Share of sessions attended, 0-1
    pub attendance_rate: f64,
    #[serde(default)]
    pub engagement: EngagementMetrics,
    #[serde(default)]
    pub learning_velocity: LearningVelocity,
}

impl StudentPerformanceRecord {
    /// Finite and non-negative
    pub fn has_valid_grade(&self) -> bool {
        self.current_grade.is_finite() && self.current_grade >= 0.0
    }

    /// Share of assignments submitted late, `None` without assignments
    pub fn late_share(&self) -> Option<f64> {
        if self.assignment_scores.is_empty() {
            return None;
        }
        let late = self.assignment_scores.iter().filter(|a| a.is_late).count();
        Some(late as f64 / self.assignment_scores.len() as f64)
    }

    pub fn display_name(&self) -> &str {
        self.student_name
            .as_deref()
            .unwrap_or_else(|| self.student_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(is_late: bool) -> AssignmentScore {
        AssignmentScore {
            assignment_id: "hw".to_string(),
            score: 8.0,
            max_score: 10.0,
            submitted_at: None,
            is_late,
        }
    }

    #[test]
    fn test_assignment_percentage() {
        assert_eq!(assignment(false).percentage(), Some(80.0));
        let unscorable = AssignmentScore {
            max_score: 0.0,
            ..assignment(false)
        };
        assert_eq!(unscorable.percentage(), None);
    }

    #[test]
    fn test_late_share() {
        let mut record: StudentPerformanceRecord = serde_json::from_str(
            r#"{"studentId": "s1", "courseId": "c1", "currentGrade": 71.0, "attendanceRate": 0.9}"#,
        )
        .unwrap();
        assert_eq!(record.late_share(), None);
        record.assignment_scores = vec![assignment(true), assignment(false), assignment(false), assignment(false)];
        assert_eq!(record.late_share(), Some(0.25));
        assert_eq!(record.display_name(), "s1");
        assert_eq!(record.learning_velocity.completion_trend, CompletionTrend::Stable);
    }

    #[test]
    fn test_days_inactive() {
        let metrics = EngagementMetrics {
            last_activity: Some(Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap()),
            ..Default::default()
        };
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        assert_eq!(metrics.days_inactive(as_of), Some(19));
        assert_eq!(EngagementMetrics::default().days_inactive(as_of), None);
    }

    #[test]
    fn test_valid_grade() {
        let mut record: StudentPerformanceRecord = serde_json::from_str(
            r#"{"studentId": "s1", "courseId": "c1", "currentGrade": 0.0, "attendanceRate": 1.0}"#,
        )
        .unwrap();
        assert!(record.has_valid_grade());
        record.current_grade = -1.0;
        assert!(!record.has_valid_grade());
        record.current_grade = f64::NAN;
        assert!(!record.has_valid_grade());
    }
}
