//! Per-student comparison against the cohort

use crate::aggregate::CohortMetrics;
use crate::classifier::{PerformanceTag, StrengthWeaknessClassifier};
use crate::engagement::EngagementScorer;
use crate::percentile::percentile_rank;
use crate::records::StudentPerformanceRecord;
use crate::risk::{assess_risk, RiskAssessment};
use grade_core::math::mean_of;
use grade_core::{AnalyticsConfig, Error, Result, StudentId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Derived view of one student relative to their course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentComparison {
    pub student_id: StudentId,
    pub student_name: Option<String>,
    pub current_grade: f64,
    /// 0-100, mean-rank method
    pub percentile_rank: u8,
    /// Signed, percentage points
    pub difference_from_average: f64,
    pub engagement_score: f64,
    pub strengths: Vec<PerformanceTag>,
    pub improvement_areas: Vec<PerformanceTag>,
    pub risk: RiskAssessment,
}

/// Builds [`StudentComparison`]s for a cohort
#[derive(Debug, Clone, Default)]
pub struct CohortComparator {
    scorer: EngagementScorer,
    config: AnalyticsConfig,
}

impl CohortComparator {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            scorer: EngagementScorer::standard(),
            config,
        }
    }

    pub fn with_scorer(mut self, scorer: EngagementScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// One comparison per record, in input order
    ///
    /// The engagement baseline is recomputed with this comparator's scorer, so
    /// `cohort.average_engagement` from a differently weighted aggregation is
    /// never compared against scores it was not built from.
    ///
    /// Students without a valid grade get rank 0 and a zero difference. With
    /// the `parallel` feature the records are evaluated on the rayon pool;
    /// output order is unchanged.
    #[instrument(skip_all, fields(course = %cohort.course_id, n = records.len()))]
    pub fn compare(
        &self,
        records: &[StudentPerformanceRecord],
        cohort: &CohortMetrics,
    ) -> Result<Vec<StudentComparison>> {
        if records.is_empty() {
            return Err(Error::empty_cohort(&cohort.course_id));
        }

        let grades: Vec<f64> = records
            .iter()
            .filter(|r| r.has_valid_grade())
            .map(|r| r.current_grade)
            .collect();
        if grades.is_empty() {
            warn!("no valid grades, percentile ranks default to 0");
        }

        let baseline =
            mean_of(records.iter().map(|r| self.scorer.score(&r.engagement))).unwrap_or(0.0);
        if baseline != cohort.average_engagement {
            debug!(
                cohort = cohort.average_engagement,
                baseline, "rescored engagement baseline"
            );
        }
        let cohort = &CohortMetrics {
            average_engagement: baseline,
            ..cohort.clone()
        };

        let classifier = StrengthWeaknessClassifier::new(self.config.classification);

        #[cfg(feature = "parallel")]
        let iter = records.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = records.iter();

        let comparisons: Vec<StudentComparison> = iter
            .map(|record| self.compare_one(record, cohort, &grades, &classifier))
            .collect::<Result<_>>()?;

        debug!(
            at_risk = comparisons
                .iter()
                .filter(|c| c.risk.level.needs_intervention())
                .count(),
            "compared students"
        );
        Ok(comparisons)
    }

    fn compare_one(
        &self,
        record: &StudentPerformanceRecord,
        cohort: &CohortMetrics,
        grades: &[f64],
        classifier: &StrengthWeaknessClassifier,
    ) -> Result<StudentComparison> {
        let engagement_score = self.scorer.score(&record.engagement);
        let (percentile_rank, difference_from_average) =
            if record.has_valid_grade() && !grades.is_empty() {
                (
                    percentile_rank(record.current_grade, grades)?,
                    record.current_grade - cohort.average_grade,
                )
            } else {
                (0, 0.0)
            };
        let tags = classifier.classify(record, cohort, engagement_score);
        let risk = assess_risk(
            record,
            engagement_score,
            &self.config.risk,
            self.config.as_of,
        );

        Ok(StudentComparison {
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            current_grade: record.current_grade,
            percentile_rank,
            difference_from_average,
            engagement_score,
            strengths: tags.strengths,
            improvement_areas: tags.improvement_areas,
            risk,
        })
    }
}

/// Compare every student with the standard engagement weights
pub fn compare_students(
    records: &[StudentPerformanceRecord],
    cohort: &CohortMetrics,
    config: &AnalyticsConfig,
) -> Result<Vec<StudentComparison>> {
    CohortComparator::new(config.clone()).compare(records, cohort)
}
