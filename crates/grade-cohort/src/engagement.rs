//! Engagement scoring
//!
//! Five raw signals are normalized to `[0, 1]` and combined with weights that
//! must form a convex combination:
//!
//! | Signal | Weight | Saturates at |
//! |--------|--------|--------------|
//! | login frequency | 0.20 | 7 logins / week |
//! | time on platform | 0.20 | 300 minutes / week |
//! | lesson completion | 0.30 | 1.0 |
//! | assignment submission | 0.20 | 1.0 |
//! | forum participation | 0.10 | 5 posts |

use crate::records::EngagementMetrics;
use grade_core::math::unit_clamp;
use grade_core::{Error, Result};
use serde::Serialize;

/// Logins per week that count as full engagement
pub const LOGIN_CAP: f64 = 7.0;
/// Minutes per week that count as full engagement
pub const TIME_CAP_MINUTES: f64 = 300.0;
/// Forum posts that count as full engagement
pub const FORUM_CAP: f64 = 5.0;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Weights of the five engagement signals
///
/// Only constructible through [`EngagementWeights::new`] or
/// [`EngagementWeights::STANDARD`], so a value of this type always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementWeights {
    login: f64,
    time: f64,
    completion: f64,
    submission: f64,
    forum: f64,
}

impl EngagementWeights {
    pub const STANDARD: Self = Self {
        login: 0.20,
        time: 0.20,
        completion: 0.30,
        submission: 0.20,
        forum: 0.10,
    };

    /// Validate custom weights
    ///
    /// Fails with `InvalidWeightConfiguration` unless every weight is finite,
    /// non-negative, and the total is 1.0.
    pub fn new(login: f64, time: f64, completion: f64, submission: f64, forum: f64) -> Result<Self> {
        let weights = Self {
            login,
            time,
            completion,
            submission,
            forum,
        };
        let sum = weights.sum();
        let all_valid = weights
            .as_array()
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0);
        if !all_valid || (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(Error::invalid_weights(sum));
        }
        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 5] {
        [
            self.login,
            self.time,
            self.completion,
            self.submission,
            self.forum,
        ]
    }
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Scale a raw signal into `[0, 1]`, saturating at `cap`
fn saturate(value: f64, cap: f64) -> f64 {
    unit_clamp(value / cap)
}

/// Converts [`EngagementMetrics`] into a single score in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngagementScorer {
    weights: EngagementWeights,
}

impl EngagementScorer {
    /// Scorer with the standard weights
    pub const fn standard() -> Self {
        Self {
            weights: EngagementWeights::STANDARD,
        }
    }

    pub fn with_weights(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EngagementWeights {
        &self.weights
    }

    /// Weighted engagement score, always within `[0, 1]`
    pub fn score(&self, metrics: &EngagementMetrics) -> f64 {
        let signals = [
            saturate(metrics.login_frequency, LOGIN_CAP),
            saturate(metrics.time_on_platform, TIME_CAP_MINUTES),
            unit_clamp(metrics.completion_rate),
            unit_clamp(metrics.submission_rate),
            saturate(f64::from(metrics.forum_participation), FORUM_CAP),
        ];
        let total: f64 = signals
            .iter()
            .zip(self.weights.as_array())
            .map(|(signal, weight)| signal * weight)
            .sum();
        // weights may sum to 1 + epsilon
        unit_clamp(total)
    }
}

/// Engagement score with the standard weights
pub fn engagement_score(metrics: &EngagementMetrics) -> f64 {
    EngagementScorer::standard().score(metrics)
}
