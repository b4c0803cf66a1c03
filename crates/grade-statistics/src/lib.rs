//! Descriptive statistics for grade samples
//!
//! This crate is the statistics calculator of the analytics engine: it turns
//! a [`GradeSample`](grade_core::GradeSample) into a [`GradeStatistics`]
//! summary.
//!
//! | Statistic | Definition |
//! |-----------|------------|
//! | mean | arithmetic average |
//! | median | 0.5 quantile (linear interpolation) |
//! | mode | every value with the highest frequency |
//! | variance | population variance, divides by N |
//! | quartiles | 0.25 / 0.5 / 0.75 quantiles, IQR = Q3 - Q1 |
//! | percentiles | p10, p25, p50, p75, p90, p95 |
//!
//! # Examples
//!
//! ```rust
//! use grade_statistics::describe;
//!
//! let stats = describe(&[60.0, 70.0, 70.0, 80.0, 90.0]).unwrap();
//! assert_eq!(stats.median, 70.0);
//! assert_eq!(stats.mode, vec![70.0]);
//! assert_eq!(stats.median, stats.percentiles.p50);
//! ```

pub mod central;
pub mod iqr;
pub mod moments;
pub mod statistics;

// Re-exports
pub use central::{median_sorted, modes};
pub use iqr::{Quartiles, TUKEY_FENCE};
pub use moments::{mean, population_std_dev, population_variance};
pub use statistics::{compute_statistics, describe, GradeStatistics, Percentiles};
