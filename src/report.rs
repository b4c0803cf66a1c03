//! Report assembly
//!
//! Runs every analytics component over one course (or one assignment) and
//! gathers the results into a single serializable structure.

use grade_cohort::{
    aggregate_cohort, compare_students, generate_insights, AssignmentScore, CohortInsights,
    CohortMetrics, StudentComparison, StudentPerformanceRecord,
};
use grade_core::{AnalyticsConfig, Error, GradeSample, Result, StudentId};
use grade_histogram::{bin_sample, BoxPlotBuilder, BoxPlotData, HistogramData};
use grade_statistics::{compute_statistics, GradeStatistics};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, instrument};

/// Everything the engine derives for one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub course_id: String,
    pub statistics: GradeStatistics,
    pub histogram: HistogramData,
    pub box_plot: BoxPlotData,
    pub cohort: CohortMetrics,
    pub comparisons: Vec<StudentComparison>,
    pub insights: CohortInsights,
}

/// Numeric analysis of one assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentReport {
    pub assignment_id: String,
    /// Scorable submissions that entered the analysis
    pub scored_count: usize,
    pub statistics: GradeStatistics,
    pub histogram: HistogramData,
    pub box_plot: BoxPlotData,
}

/// Build a full report for one course
///
/// Students without a valid grade stay in the cohort roll-up and the
/// comparisons but are left out of the grade sample.
///
/// # Errors
///
/// `EmptyCohort` when `records` is empty, `EmptySample` when no record has a
/// valid grade.
#[instrument(skip_all, fields(course = course_id, n = records.len()))]
pub fn analyze_course(
    course_id: &str,
    records: &[StudentPerformanceRecord],
    config: &AnalyticsConfig,
) -> Result<CourseReport> {
    if records.is_empty() {
        return Err(Error::empty_cohort(course_id));
    }

    let sample = course_sample(records);
    sample.require_non_empty("course report")?;

    let statistics = compute_statistics(&sample)?;
    let histogram = bin_sample(&sample, &config.binning)?;
    let box_plot = BoxPlotBuilder::new().build(&sample)?;

    let cohort = aggregate_cohort(course_id, records)?;
    let comparisons = compare_students(records, &cohort, config)?;
    let insights = {
        let _span = info_span!("insights").entered();
        generate_insights(&cohort, &comparisons, &config.insights)
    };

    debug!(
        graded = sample.len(),
        bins = histogram.len(),
        outliers = box_plot.outliers.len(),
        "course report ready"
    );

    Ok(CourseReport {
        course_id: course_id.to_string(),
        statistics,
        histogram,
        box_plot,
        cohort,
        comparisons,
        insights,
    })
}

/// Statistics, histogram and box plot for one assignment
///
/// Scores are normalized with [`AssignmentScore::percentage`]; unscorable
/// entries (`max_score <= 0`) are skipped.
///
/// # Errors
///
/// `EmptySample` when no entry is scorable.
#[instrument(skip_all, fields(assignment = assignment_id))]
pub fn analyze_assignment<'a, I>(
    assignment_id: &str,
    scores: I,
    config: &AnalyticsConfig,
) -> Result<AssignmentReport>
where
    I: IntoIterator<Item = (&'a StudentId, &'a AssignmentScore)>,
{
    let sample = GradeSample::from_scores(
        scores
            .into_iter()
            .filter_map(|(id, score)| score.percentage().map(|pct| (id.clone(), pct))),
    );
    sample.require_non_empty("assignment report")?;

    Ok(AssignmentReport {
        assignment_id: assignment_id.to_string(),
        scored_count: sample.len(),
        statistics: compute_statistics(&sample)?,
        histogram: bin_sample(&sample, &config.binning)?,
        box_plot: BoxPlotBuilder::new().build(&sample)?,
    })
}

/// `(student, score)` pairs for one assignment across a course
pub fn assignment_scores<'a>(
    records: &'a [StudentPerformanceRecord],
    assignment_id: &'a str,
) -> impl Iterator<Item = (&'a StudentId, &'a AssignmentScore)> + 'a {
    records.iter().flat_map(move |record| {
        record
            .assignment_scores
            .iter()
            .filter(move |score| score.assignment_id == assignment_id)
            .map(move |score| (&record.student_id, score))
    })
}

fn course_sample(records: &[StudentPerformanceRecord]) -> GradeSample {
    GradeSample::from_scores(
        records
            .iter()
            .filter(|record| record.has_valid_grade())
            .map(|record| (record.student_id.clone(), record.current_grade)),
    )
}
