//! Mean-rank percentile of one grade within a cohort

use grade_core::{Error, Result};

/// Percentile rank of `grade` among `cohort_grades`, 0-100
///
/// `round((below + equal / 2) / total * 100)`, so a student tied with others
/// sits in the middle of the tie. The cohort does not need to be sorted.
///
/// # Errors
///
/// `EmptySample` when `cohort_grades` is empty.
pub fn percentile_rank(grade: f64, cohort_grades: &[f64]) -> Result<u8> {
    if cohort_grades.is_empty() {
        return Err(Error::empty_sample("percentile rank"));
    }
    let (below, equal) = cohort_grades
        .iter()
        .fold((0usize, 0usize), |(below, equal), &g| {
            if g < grade {
                (below + 1, equal)
            } else if g == grade {
                (below, equal + 1)
            } else {
                (below, equal)
            }
        });
    let rank = (below as f64 + 0.5 * equal as f64) / cohort_grades.len() as f64 * 100.0;
    Ok(rank.round().clamp(0.0, 100.0) as u8)
}
