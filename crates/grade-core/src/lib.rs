//! Core types for grade analytics
//!
//! This crate holds what every analytics crate shares: the error taxonomy,
//! the [`GradeSample`] input type and the run configuration.
//!
//! # Example
//!
//! ```rust
//! use grade_core::{GradeSample, Error};
//!
//! let sample = GradeSample::from_scores(vec![("s-1", 72.0), ("s-2", 88.5)]);
//! assert_eq!(sample.len(), 2);
//!
//! let empty = GradeSample::from_values(&[]);
//! assert!(matches!(empty.require_non_empty("mean"), Err(Error::EmptySample { .. })));
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod sample;

pub use config::{
    AnalyticsConfig, BinningStrategy, ClassificationThresholds, GradeRange, InsightThresholds,
    RiskThresholds, MAX_EQUAL_WIDTH_BINS,
};
pub use error::{Error, Result};
pub use sample::{GradeEntry, GradeSample, StudentId};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
