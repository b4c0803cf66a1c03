//! Human-readable cohort insights
//!
//! Every rule in [`INSIGHT_RULES`] reads the cohort metrics and student
//! comparisons and returns zero or more [`Finding`]s. Findings are routed to
//! the output list named by their [`InsightKind`], in rule order.

use crate::aggregate::{CohortMetrics, LetterGrade};
use crate::classifier::PerformanceTag;
use crate::comparison::StudentComparison;
use crate::risk::RiskFactor;
use grade_core::math::ratio;
use grade_core::InsightThresholds;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    Insight,
    Recommendation,
    ConcerningTrend,
    PositiveHighlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: InsightKind,
    pub message: String,
}

impl Finding {
    fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortInsights {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub concerning_trends: Vec<String>,
    pub positive_highlights: Vec<String>,
}

impl CohortInsights {
    fn push(&mut self, finding: Finding) {
        let list = match finding.kind {
            InsightKind::Insight => &mut self.insights,
            InsightKind::Recommendation => &mut self.recommendations,
            InsightKind::ConcerningTrend => &mut self.concerning_trends,
            InsightKind::PositiveHighlight => &mut self.positive_highlights,
        };
        list.push(finding.message);
    }

    pub fn len(&self) -> usize {
        self.insights.len()
            + self.recommendations.len()
            + self.concerning_trends.len()
            + self.positive_highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inputs shared by every insight rule
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub cohort: &'a CohortMetrics,
    pub comparisons: &'a [StudentComparison],
    pub thresholds: &'a InsightThresholds,
}

pub type InsightRule = fn(&InsightContext<'_>) -> Vec<Finding>;

/// Rules in evaluation order
pub const INSIGHT_RULES: [InsightRule; 10] = [
    overview,
    failing_share,
    excellence_share,
    attendance,
    engagement,
    completion,
    common_strength,
    common_improvement_area,
    students_at_risk,
    declining_pace,
];

fn pct(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn overview(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let c = ctx.cohort;
    vec![Finding::new(
        InsightKind::Insight,
        format!(
            "Class average is {:.1}% (median {:.1}%) across {} students",
            c.average_grade, c.median_grade, c.student_count
        ),
    )]
}

fn failing_share(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let share: f64 = LetterGrade::ALL
        .iter()
        .filter(|grade| grade.is_failing())
        .map(|&grade| ctx.cohort.band_share(grade))
        .sum();
    if share <= ctx.thresholds.failing_share {
        return Vec::new();
    }
    vec![
        Finding::new(
            InsightKind::ConcerningTrend,
            format!("{} of students are currently failing", pct(share)),
        ),
        Finding::new(
            InsightKind::Recommendation,
            "Schedule review sessions and targeted support for students below 60%",
        ),
    ]
}

fn excellence_share(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let share = ctx.cohort.band_share(LetterGrade::A);
    if share <= ctx.thresholds.excellence_share {
        return Vec::new();
    }
    vec![Finding::new(
        InsightKind::PositiveHighlight,
        format!("{} of students are earning an A", pct(share)),
    )]
}

fn attendance(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let rate = ctx.cohort.average_attendance;
    if rate < ctx.thresholds.low_attendance {
        vec![
            Finding::new(
                InsightKind::ConcerningTrend,
                format!("Average attendance is low at {}", pct(rate)),
            ),
            Finding::new(
                InsightKind::Recommendation,
                "Follow up with frequently absent students and review session scheduling",
            ),
        ]
    } else if rate > ctx.thresholds.high_attendance {
        vec![Finding::new(
            InsightKind::PositiveHighlight,
            format!("Strong attendance at {}", pct(rate)),
        )]
    } else {
        Vec::new()
    }
}

fn engagement(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let score = ctx.cohort.average_engagement;
    if score < ctx.thresholds.low_engagement {
        vec![
            Finding::new(
                InsightKind::ConcerningTrend,
                format!("Average engagement score is low at {score:.2}"),
            ),
            Finding::new(
                InsightKind::Recommendation,
                "Add interactive activities and discussion prompts to raise engagement",
            ),
        ]
    } else if score > ctx.thresholds.high_engagement {
        vec![Finding::new(
            InsightKind::PositiveHighlight,
            format!("High engagement with an average score of {score:.2}"),
        )]
    } else {
        Vec::new()
    }
}

fn completion(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let rate = ctx.cohort.average_completion;
    if rate >= ctx.thresholds.low_completion {
        return Vec::new();
    }
    vec![
        Finding::new(
            InsightKind::ConcerningTrend,
            format!("Lesson completion averages only {}", pct(rate)),
        ),
        Finding::new(
            InsightKind::Recommendation,
            "Break long lessons into shorter units and send completion reminders",
        ),
    ]
}

fn common_strength(ctx: &InsightContext<'_>) -> Vec<Finding> {
    most_common_tag(ctx.comparisons.iter().map(|c| c.strengths.as_slice()))
        .map(|(tag, count)| {
            vec![Finding::new(
                InsightKind::Insight,
                format!("Most common strength: {tag} ({count} students)"),
            )]
        })
        .unwrap_or_default()
}

fn common_improvement_area(ctx: &InsightContext<'_>) -> Vec<Finding> {
    most_common_tag(ctx.comparisons.iter().map(|c| c.improvement_areas.as_slice()))
        .map(|(tag, count)| {
            vec![
                Finding::new(
                    InsightKind::Insight,
                    format!("Most common area for improvement: {tag} ({count} students)"),
                ),
                Finding::new(
                    InsightKind::Recommendation,
                    format!("Focus class-wide support on {}", tag.label().to_lowercase()),
                ),
            ]
        })
        .unwrap_or_default()
}

fn students_at_risk(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let at_risk: Vec<&StudentComparison> = ctx
        .comparisons
        .iter()
        .filter(|c| c.risk.level.needs_intervention())
        .collect();
    if at_risk.is_empty() {
        return Vec::new();
    }
    let mut message = format!("{} students are at high or critical risk", at_risk.len());
    if let Some(factor) = dominant_factor(&at_risk) {
        message.push_str(&format!(", most often for {}", factor.description()));
    }
    vec![
        Finding::new(InsightKind::ConcerningTrend, message),
        Finding::new(
            InsightKind::Recommendation,
            "Reach out individually to high-risk students this week",
        ),
    ]
}

/// Most frequent fired factor, ties going to the first seen
fn dominant_factor(at_risk: &[&StudentComparison]) -> Option<RiskFactor> {
    let mut counts: Vec<(RiskFactor, usize)> = Vec::new();
    for factor in at_risk.iter().flat_map(|c| c.risk.factors.iter()) {
        match counts.iter_mut().find(|(seen, _)| seen == factor) {
            Some((_, n)) => *n += 1,
            None => counts.push((*factor, 1)),
        }
    }
    counts
        .into_iter()
        .fold(None, |best: Option<(RiskFactor, usize)>, (factor, n)| match best {
            Some((_, top)) if n <= top => best,
            _ => Some((factor, n)),
        })
        .map(|(factor, _)| factor)
}

fn declining_pace(ctx: &InsightContext<'_>) -> Vec<Finding> {
    let declining = ctx
        .comparisons
        .iter()
        .filter(|c| c.improvement_areas.contains(&PerformanceTag::LearningVelocity))
        .count();
    let share = ratio(declining, ctx.comparisons.len());
    if share <= ctx.thresholds.declining_share {
        return Vec::new();
    }
    vec![
        Finding::new(
            InsightKind::ConcerningTrend,
            format!("{} of students show a declining completion pace", pct(share)),
        ),
        Finding::new(
            InsightKind::Recommendation,
            "Check course pacing and workload for the coming units",
        ),
    ]
}

/// Highest-frequency tag; ties go to the tag encountered first
pub fn most_common_tag<'a, I>(tag_lists: I) -> Option<(PerformanceTag, usize)>
where
    I: IntoIterator<Item = &'a [PerformanceTag]>,
{
    let mut tally: Vec<(PerformanceTag, usize)> = Vec::new();
    for tag in tag_lists.into_iter().flatten() {
        match tally.iter_mut().find(|(seen, _)| seen == tag) {
            Some((_, count)) => *count += 1,
            None => tally.push((*tag, 1)),
        }
    }
    tally
        .into_iter()
        .fold(None, |best, (tag, count)| match best {
            Some((_, top)) if count <= top => best,
            _ => Some((tag, count)),
        })
}

/// Evaluate every rule in order
#[instrument(skip_all, fields(course = %cohort.course_id, students = comparisons.len()))]
pub fn generate_insights(
    cohort: &CohortMetrics,
    comparisons: &[StudentComparison],
    thresholds: &InsightThresholds,
) -> CohortInsights {
    let ctx = InsightContext {
        cohort,
        comparisons,
        thresholds,
    };
    let mut out = CohortInsights::default();
    for finding in INSIGHT_RULES.iter().flat_map(|rule| rule(&ctx)) {
        out.push(finding);
    }
    debug!(findings = out.len(), "generated insights");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GradeBand;
    use crate::risk::{RiskAssessment, RiskLevel};
    use grade_core::StudentId;

    fn band(grade: LetterGrade, count: usize, total: usize) -> GradeBand {
        let (min, max) = grade.bounds();
        GradeBand {
            grade,
            range: format!("{min:.0}-{max:.0}"),
            min,
            max,
            count,
            percentage: ratio(count, total) * 100.0,
        }
    }

    fn cohort() -> CohortMetrics {
        CohortMetrics {
            course_id: "CHEM-140".to_string(),
            student_count: 10,
            graded_count: 10,
            average_grade: 78.4,
            median_grade: 79.0,
            grade_distribution: vec![
                band(LetterGrade::A, 2, 10),
                band(LetterGrade::B, 3, 10),
                band(LetterGrade::C, 4, 10),
                band(LetterGrade::F, 1, 10),
            ],
            average_attendance: 0.85,
            average_completion: 0.7,
            average_engagement: 0.6,
            average_submission_rate: 0.8,
        }
    }

    fn comparison(
        strengths: Vec<PerformanceTag>,
        improvement_areas: Vec<PerformanceTag>,
        level: RiskLevel,
    ) -> StudentComparison {
        StudentComparison {
            student_id: StudentId::new("s"),
            student_name: None,
            current_grade: 75.0,
            percentile_rank: 50,
            difference_from_average: 0.0,
            engagement_score: 0.6,
            strengths,
            improvement_areas,
            risk: RiskAssessment {
                level,
                score: 0,
                factors: Vec::new(),
            },
        }
    }

    #[test]
    fn test_quiet_cohort_only_reports_overview() {
        let out = generate_insights(&cohort(), &[], &InsightThresholds::default());
        assert_eq!(
            out.insights,
            vec!["Class average is 78.4% (median 79.0%) across 10 students".to_string()]
        );
        assert!(out.recommendations.is_empty());
        assert!(out.concerning_trends.is_empty());
        assert!(out.positive_highlights.is_empty());
    }

    #[test]
    fn test_struggling_cohort() {
        let mut metrics = cohort();
        metrics.grade_distribution = vec![band(LetterGrade::C, 6, 10), band(LetterGrade::F, 4, 10)];
        metrics.average_attendance = 0.6;
        metrics.average_engagement = 0.3;
        metrics.average_completion = 0.4;

        let out = generate_insights(&metrics, &[], &InsightThresholds::default());
        assert_eq!(out.concerning_trends.len(), 4);
        assert_eq!(out.recommendations.len(), 4);
        assert!(out.concerning_trends[0].starts_with("40.0% of students are currently failing"));
        assert!(out.concerning_trends[1].contains("attendance"));
    }

    #[test]
    fn test_thriving_cohort() {
        let mut metrics = cohort();
        metrics.grade_distribution = vec![band(LetterGrade::A, 5, 10), band(LetterGrade::B, 5, 10)];
        metrics.average_attendance = 0.95;
        metrics.average_engagement = 0.8;

        let out = generate_insights(&metrics, &[], &InsightThresholds::default());
        assert_eq!(out.positive_highlights.len(), 3);
        assert_eq!(out.positive_highlights[0], "50.0% of students are earning an A");
        assert!(out.concerning_trends.is_empty());
    }

    #[test]
    fn test_most_common_tag_ties_break_by_first_seen() {
        let lists: Vec<Vec<PerformanceTag>> = vec![
            vec![PerformanceTag::Engagement, PerformanceTag::Attendance],
            vec![PerformanceTag::Attendance],
            vec![PerformanceTag::Engagement],
        ];
        assert_eq!(
            most_common_tag(lists.iter().map(Vec::as_slice)),
            Some((PerformanceTag::Engagement, 2))
        );
        assert_eq!(most_common_tag(Vec::<&[PerformanceTag]>::new()), None);
    }

    #[test]
    fn test_common_tags_and_risk() {
        let comparisons = vec![
            comparison(
                vec![PerformanceTag::Attendance],
                vec![PerformanceTag::LearningVelocity],
                RiskLevel::High,
            ),
            comparison(
                vec![PerformanceTag::Attendance, PerformanceTag::Engagement],
                vec![PerformanceTag::TimeManagement],
                RiskLevel::Low,
            ),
            comparison(Vec::new(), Vec::new(), RiskLevel::Critical),
        ];
        let out = generate_insights(&cohort(), &comparisons, &InsightThresholds::default());

        assert_eq!(out.insights[1], "Most common strength: Attendance (2 students)");
        assert_eq!(
            out.insights[2],
            "Most common area for improvement: Learning Velocity (1 students)"
        );
        assert_eq!(
            out.concerning_trends,
            vec![
                "2 students are at high or critical risk".to_string(),
                "33.3% of students show a declining completion pace".to_string(),
            ]
        );
        assert_eq!(out.recommendations[0], "Focus class-wide support on learning velocity");
    }

    #[test]
    fn test_risk_finding_names_dominant_factor() {
        let mut failing = comparison(Vec::new(), Vec::new(), RiskLevel::High);
        failing.risk.factors = vec![RiskFactor::FailingGrade];
        let mut absent = comparison(Vec::new(), Vec::new(), RiskLevel::Critical);
        absent.risk.factors = vec![RiskFactor::LowAttendance, RiskFactor::FailingGrade];
        let mut fine = comparison(Vec::new(), Vec::new(), RiskLevel::Low);
        fine.risk.factors = vec![RiskFactor::LowAttendance, RiskFactor::DecliningTrend];

        let out = generate_insights(&cohort(), &[failing, absent, fine], &InsightThresholds::default());
        assert_eq!(
            out.concerning_trends[0],
            "2 students are at high or critical risk, most often for current grade below passing"
        );
    }

    #[test]
    fn test_rules_are_independent() {
        let ctx_metrics = cohort();
        let ctx = InsightContext {
            cohort: &ctx_metrics,
            comparisons: &[],
            thresholds: &InsightThresholds::default(),
        };
        let combined: usize = INSIGHT_RULES.iter().map(|rule| rule(&ctx).len()).sum();
        let out = generate_insights(&ctx_metrics, &[], &InsightThresholds::default());
        assert_eq!(combined, out.len());
    }
}
