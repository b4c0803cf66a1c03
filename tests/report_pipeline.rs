//! Course report integration tests

use anyhow::Result;
use approx::assert_relative_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use grade_analytics::grade_cohort::{RiskFactor, StudentComparison};
use grade_analytics::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn course(seed: u64, size: usize) -> Vec<StudentPerformanceRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size)
        .map(|i| StudentPerformanceRecord {
            student_id: StudentId::new(format!("s{i:02}")),
            student_name: Some(format!("Student {i}")),
            course_id: "ECON-210".to_string(),
            current_grade: rng.gen_range(40.0..100.0),
            assignment_scores: (0..4)
                .map(|a| AssignmentScore {
                    assignment_id: format!("ps-{a}"),
                    score: rng.gen_range(0.0..25.0),
                    max_score: 25.0,
                    submitted_at: None,
                    is_late: rng.gen_bool(0.15),
                })
                .collect(),
            attendance_rate: rng.gen_range(0.5..1.0),
            engagement: EngagementMetrics {
                login_frequency: rng.gen_range(0.0..9.0),
                time_on_platform: rng.gen_range(30.0..360.0),
                completion_rate: rng.gen_range(0.3..1.0),
                submission_rate: rng.gen_range(0.5..1.0),
                forum_participation: rng.gen_range(0..7),
                last_activity: Some(Utc.with_ymd_and_hms(2026, 9, 1 + (i % 28) as u32, 12, 0, 0).unwrap()),
            },
            learning_velocity: LearningVelocity::default(),
        })
        .collect()
}

fn record_with_grade(id: &str, grade: f64) -> StudentPerformanceRecord {
    StudentPerformanceRecord {
        student_id: StudentId::new(id),
        student_name: None,
        course_id: "ECON-210".to_string(),
        current_grade: grade,
        assignment_scores: Vec::new(),
        attendance_rate: 0.9,
        engagement: EngagementMetrics::default(),
        learning_velocity: LearningVelocity::default(),
    }
}

#[test]
fn report_sections_agree() -> Result<()> {
    init_tracing();
    let records = course(11, 40);
    let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default())?;

    let stats = &report.statistics;
    assert_eq!(stats.quartiles.q2, stats.median);
    assert_eq!(stats.percentiles.p50, stats.median);
    assert_eq!(report.box_plot.q1, stats.quartiles.q1);
    assert_eq!(report.box_plot.median, stats.median);
    assert_eq!(report.box_plot.q3, stats.quartiles.q3);
    assert_eq!(report.histogram.statistics, *stats);

    assert_eq!(report.histogram.len(), 10);
    assert_eq!(report.histogram.binned_count(), 40);
    assert_eq!(report.cohort.student_count, 40);
    assert_relative_eq!(report.cohort.average_grade, stats.mean, epsilon = 1e-9);
    assert_eq!(report.comparisons.len(), 40);
    Ok(())
}

#[test]
fn report_is_idempotent() -> Result<()> {
    init_tracing();
    let records = course(5, 25);
    let config = AnalyticsConfig::default();
    let first = analyze_course("ECON-210", &records, &config)?;
    let second = analyze_course("ECON-210", &records, &config)?;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first)?,
        serde_json::to_string(&second)?
    );
    Ok(())
}

#[test]
fn single_student_course() -> Result<()> {
    let report = analyze_course(
        "ECON-210",
        &[record_with_grade("solo", 75.0)],
        &AnalyticsConfig::default(),
    )?;
    let stats = &report.statistics;
    assert_eq!(stats.mean, 75.0);
    assert_eq!(stats.median, 75.0);
    assert_eq!(stats.mode, vec![75.0]);
    assert_eq!(stats.standard_deviation, 0.0);
    assert_eq!(stats.range, 0.0);
    assert_eq!(report.histogram.len(), 1);
    assert_eq!(report.histogram.bins[0].percentage, 100.0);
    assert_eq!(report.comparisons[0].percentile_rank, 50);
    Ok(())
}

#[test]
fn identical_grades_do_not_divide_by_zero() -> Result<()> {
    let records: Vec<_> = (0..4)
        .map(|i| record_with_grade(&format!("s{i}"), 80.0))
        .collect();
    let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default())?;
    assert_eq!(report.statistics.quartiles.iqr, 0.0);
    assert!(report.box_plot.outliers.is_empty());
    assert_eq!(report.histogram.bin_width, Some(0.0));
    assert!(report.statistics.standard_deviation.is_finite());
    Ok(())
}

#[test]
fn outliers_carry_student_ids() -> Result<()> {
    let grades = [10.0, 50.0, 52.0, 54.0, 55.0, 56.0, 58.0, 60.0, 95.0];
    let records: Vec<_> = grades
        .iter()
        .enumerate()
        .map(|(i, &g)| record_with_grade(&format!("s{i}"), g))
        .collect();
    let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default())?;

    let outliers: Vec<(f64, Option<StudentId>)> = report
        .box_plot
        .outliers
        .iter()
        .map(|o| (o.value, o.student_id.clone()))
        .collect();
    assert_eq!(
        outliers,
        vec![
            (10.0, Some(StudentId::new("s0"))),
            (95.0, Some(StudentId::new("s8"))),
        ]
    );
    Ok(())
}

#[test]
fn custom_ranges_from_config() -> Result<()> {
    let config: AnalyticsConfig = serde_json::from_str(
        r#"{"binning": {"custom": [
            {"label": "fail", "min": 0.0, "max": 60.0},
            {"label": "pass", "min": 60.0, "max": 100.0}
        ]}}"#,
    )?;
    let records: Vec<_> = [45.0, 60.0, 100.0]
        .iter()
        .enumerate()
        .map(|(i, &g)| record_with_grade(&format!("s{i}"), g))
        .collect();
    let report = analyze_course("ECON-210", &records, &config)?;
    assert_eq!(report.histogram.counts(), vec![1, 2]);
    assert_eq!(report.histogram.bin_width, None);
    assert_eq!(report.histogram.bins[0].range, "fail");
    Ok(())
}

#[test]
fn oversized_bin_count_from_config_is_clamped() -> Result<()> {
    let config: AnalyticsConfig =
        serde_json::from_str(r#"{"binning": {"equalWidth": {"bins": 18446744073709551615}}}"#)?;
    let records = course(4, 12);
    let report = analyze_course("ECON-210", &records, &config)?;
    assert_eq!(report.histogram.len(), grade_analytics::grade_core::MAX_EQUAL_WIDTH_BINS);
    assert_eq!(report.histogram.binned_count(), 12);
    Ok(())
}

#[test]
fn inactivity_uses_reference_date() -> Result<()> {
    let records = course(9, 10);
    let config = AnalyticsConfig::new().as_of(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    let report = analyze_course("ECON-210", &records, &config)?;
    let inactive: Vec<&StudentComparison> = report
        .comparisons
        .iter()
        .filter(|c| c.risk.factors.contains(&RiskFactor::Inactive))
        .collect();
    // every student's last activity is in September
    assert_eq!(inactive.len(), 10);

    let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default())?;
    assert!(report
        .comparisons
        .iter()
        .all(|c| !c.risk.factors.contains(&RiskFactor::Inactive)));
    Ok(())
}

#[test]
fn assignment_report_over_course() -> Result<()> {
    let records = course(21, 30);
    let report = analyze_assignment(
        "ps-2",
        assignment_scores(&records, "ps-2"),
        &AnalyticsConfig::default(),
    )?;
    assert_eq!(report.scored_count, 30);
    assert!(report.statistics.min >= 0.0);
    assert!(report.statistics.max <= 100.0);
    Ok(())
}

#[test]
fn report_serializes_camel_case() -> Result<()> {
    let records = course(2, 8);
    let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default())?;
    let json = serde_json::to_value(&report)?;
    for key in ["courseId", "statistics", "histogram", "boxPlot", "cohort", "comparisons", "insights"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["statistics"].get("standardDeviation").is_some());
    assert!(json["histogram"].get("totalCount").is_some());
    assert!(json["insights"].get("concerningTrends").is_some());
    Ok(())
}

#[test]
fn empty_inputs_are_refused() {
    assert!(matches!(
        analyze_course("ECON-210", &[], &AnalyticsConfig::default()),
        Err(Error::EmptyCohort { .. })
    ));
    assert!(matches!(
        describe(&[]),
        Err(Error::EmptySample { .. })
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn median_quartile_and_box_plot_agree(
            grades in prop::collection::vec(0.0f64..110.0, 1..80),
        ) {
            let records: Vec<_> = grades
                .iter()
                .enumerate()
                .map(|(i, &g)| record_with_grade(&format!("p{i}"), g))
                .collect();
            let report = analyze_course("ECON-210", &records, &AnalyticsConfig::default()).unwrap();
            let stats = &report.statistics;
            prop_assert_eq!(stats.median, stats.quartiles.q2);
            prop_assert_eq!(stats.median, stats.percentiles.p50);
            prop_assert_eq!(report.box_plot.q1, stats.quartiles.q1);
            prop_assert_eq!(report.box_plot.q3, stats.quartiles.q3);
            let banded: usize = report.cohort.grade_distribution.iter().map(|b| b.count).sum();
            prop_assert_eq!(banded, grades.len());
        }
    }
}
