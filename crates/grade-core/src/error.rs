//! Error types for grade analytics
//!
//! Provides a unified error type for all grade-analytics crates. Empty
//! inputs and invalid engagement weights are the only conditions under
//! which a computation refuses to produce a result.

use thiserror::Error;

/// Core error type for analytics operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A statistic was requested over a sample with no usable values
    #[error("Empty sample: cannot compute {context} without at least one value")]
    EmptySample { context: String },

    /// A cohort computation was requested with no student records
    #[error("Empty cohort: no student records supplied for course {course}")]
    EmptyCohort { course: String },

    /// Engagement weights do not form a valid convex combination
    #[error("Invalid weight configuration: weights must be non-negative and sum to 1.0, got {sum}")]
    InvalidWeightConfiguration { sum: f64 },

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for an empty sample
    pub fn empty_sample(context: &str) -> Self {
        Self::EmptySample {
            context: context.to_string(),
        }
    }

    /// Create an error for a course with no records
    pub fn empty_cohort(course: &str) -> Self {
        Self::EmptyCohort {
            course: course.to_string(),
        }
    }

    /// Create an error for weights that do not sum to one
    pub fn invalid_weights(sum: f64) -> Self {
        Self::InvalidWeightConfiguration { sum }
    }

    /// Create an error for a probability outside [0, 1]
    pub fn invalid_probability(p: f64) -> Self {
        Self::InvalidParameter(format!("Probability {p} must be in [0, 1]"))
    }

    /// True for the two empty-input variants
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptySample { .. } | Self::EmptyCohort { .. })
    }
}
