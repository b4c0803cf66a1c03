//! Strength / improvement-area tagging
//!
//! Each dimension is a [`ClassificationRule`] in a fixed table. A rule looks
//! at one student against the cohort and returns a [`Verdict`] or nothing;
//! rules never see each other's output.
//!
//! Relative rules fire only when the student is strictly more than the margin
//! away from the cohort average, so a student exactly at the average (or
//! exactly at the margin) receives no tag.

use crate::aggregate::CohortMetrics;
use crate::records::{CompletionTrend, StudentPerformanceRecord};
use grade_core::math::unit_clamp;
use grade_core::ClassificationThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dimension a student can be tagged on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceTag {
    AcademicPerformance,
    Attendance,
    Engagement,
    LessonCompletion,
    AssignmentSubmission,
    TimeManagement,
    LearningVelocity,
}

impl PerformanceTag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AcademicPerformance => "Academic Performance",
            Self::Attendance => "Attendance",
            Self::Engagement => "Engagement",
            Self::LessonCompletion => "Lesson Completion",
            Self::AssignmentSubmission => "Assignment Submission",
            Self::TimeManagement => "Time Management",
            Self::LearningVelocity => "Learning Velocity",
        }
    }
}

impl fmt::Display for PerformanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Strength,
    Weakness,
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub record: &'a StudentPerformanceRecord,
    pub cohort: &'a CohortMetrics,
    pub engagement_score: f64,
    pub thresholds: &'a ClassificationThresholds,
}

/// One row of the classification table
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub tag: PerformanceTag,
    evaluate: fn(&RuleInput<'_>) -> Option<Verdict>,
}

impl ClassificationRule {
    pub fn evaluate(&self, input: &RuleInput<'_>) -> Option<Verdict> {
        (self.evaluate)(input)
    }
}

impl fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("tag", &self.tag)
            .finish()
    }
}

/// Rules in evaluation order
pub const RULES: [ClassificationRule; 7] = [
    ClassificationRule {
        tag: PerformanceTag::AcademicPerformance,
        evaluate: academic_performance,
    },
    ClassificationRule {
        tag: PerformanceTag::Attendance,
        evaluate: attendance,
    },
    ClassificationRule {
        tag: PerformanceTag::Engagement,
        evaluate: engagement,
    },
    ClassificationRule {
        tag: PerformanceTag::LessonCompletion,
        evaluate: lesson_completion,
    },
    ClassificationRule {
        tag: PerformanceTag::AssignmentSubmission,
        evaluate: assignment_submission,
    },
    ClassificationRule {
        tag: PerformanceTag::TimeManagement,
        evaluate: time_management,
    },
    ClassificationRule {
        tag: PerformanceTag::LearningVelocity,
        evaluate: learning_velocity,
    },
];

fn relative(diff: f64, margin: f64) -> Option<Verdict> {
    if diff > margin {
        Some(Verdict::Strength)
    } else if diff < -margin {
        Some(Verdict::Weakness)
    } else {
        None
    }
}

fn academic_performance(input: &RuleInput<'_>) -> Option<Verdict> {
    if !input.record.has_valid_grade() || input.cohort.graded_count == 0 {
        return None;
    }
    relative(
        input.record.current_grade - input.cohort.average_grade,
        input.thresholds.grade_margin,
    )
}

fn attendance(input: &RuleInput<'_>) -> Option<Verdict> {
    relative(
        unit_clamp(input.record.attendance_rate) - input.cohort.average_attendance,
        input.thresholds.normalized_margin,
    )
}

fn engagement(input: &RuleInput<'_>) -> Option<Verdict> {
    relative(
        input.engagement_score - input.cohort.average_engagement,
        input.thresholds.normalized_margin,
    )
}

fn lesson_completion(input: &RuleInput<'_>) -> Option<Verdict> {
    relative(
        unit_clamp(input.record.engagement.completion_rate) - input.cohort.average_completion,
        input.thresholds.normalized_margin,
    )
}

// Absolute cut-offs, independent of the cohort
fn assignment_submission(input: &RuleInput<'_>) -> Option<Verdict> {
    let rate = unit_clamp(input.record.engagement.submission_rate);
    if rate > input.thresholds.submission_strength {
        Some(Verdict::Strength)
    } else if rate < input.thresholds.submission_weakness {
        Some(Verdict::Weakness)
    } else {
        None
    }
}

fn time_management(input: &RuleInput<'_>) -> Option<Verdict> {
    let late = input.record.late_share()?;
    if late < input.thresholds.late_share_strength {
        Some(Verdict::Strength)
    } else if late > input.thresholds.late_share_weakness {
        Some(Verdict::Weakness)
    } else {
        None
    }
}

fn learning_velocity(input: &RuleInput<'_>) -> Option<Verdict> {
    match input.record.learning_velocity.completion_trend {
        CompletionTrend::Improving => Some(Verdict::Strength),
        CompletionTrend::Declining => Some(Verdict::Weakness),
        CompletionTrend::Stable => None,
    }
}

/// Tags assigned to one student, in rule order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub strengths: Vec<PerformanceTag>,
    pub improvement_areas: Vec<PerformanceTag>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.improvement_areas.is_empty()
    }
}

/// Applies [`RULES`] with a set of thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthWeaknessClassifier {
    thresholds: ClassificationThresholds,
}

impl StrengthWeaknessClassifier {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(
        &self,
        record: &StudentPerformanceRecord,
        cohort: &CohortMetrics,
        engagement_score: f64,
    ) -> Classification {
        let input = RuleInput {
            record,
            cohort,
            engagement_score,
            thresholds: &self.thresholds,
        };
        RULES
            .iter()
            .fold(Classification::default(), |mut acc, rule| {
                match rule.evaluate(&input) {
                    Some(Verdict::Strength) => acc.strengths.push(rule.tag),
                    Some(Verdict::Weakness) => acc.improvement_areas.push(rule.tag),
                    None => {}
                }
                acc
            })
    }
}

/// Classify with the default thresholds
pub fn classify(
    record: &StudentPerformanceRecord,
    cohort: &CohortMetrics,
    engagement_score: f64,
) -> Classification {
    StrengthWeaknessClassifier::default().classify(record, cohort, engagement_score)
}
