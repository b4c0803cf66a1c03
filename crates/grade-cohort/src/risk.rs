//! Early-intervention risk assessment
//!
//! Factors are weighted and summed; the total maps onto a [`RiskLevel`].
//! Inactivity is measured against a caller-supplied date, never the clock.

use crate::records::{CompletionTrend, StudentPerformanceRecord};
use chrono::NaiveDate;
use grade_core::math::unit_clamp;
use grade_core::RiskThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Self::Low,
            1..=2 => Self::Moderate,
            3..=4 => Self::High,
            _ => Self::Critical,
        }
    }

    /// High or Critical
    pub fn needs_intervention(&self) -> bool {
        *self >= Self::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskFactor {
    FailingGrade,
    LowAttendance,
    LowEngagement,
    DecliningTrend,
    FrequentLateSubmissions,
    Inactive,
}

impl RiskFactor {
    pub fn weight(&self) -> u32 {
        match self {
            Self::FailingGrade => 3,
            Self::LowAttendance | Self::LowEngagement | Self::Inactive => 2,
            Self::DecliningTrend | Self::FrequentLateSubmissions => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FailingGrade => "current grade below passing",
            Self::LowAttendance => "attendance below expectations",
            Self::LowEngagement => "low platform engagement",
            Self::DecliningTrend => "completion pace is declining",
            Self::FrequentLateSubmissions => "frequent late submissions",
            Self::Inactive => "no recent platform activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: u32,
    /// Fired factors in evaluation order
    pub factors: Vec<RiskFactor>,
}

struct FactorCheck<'a> {
    record: &'a StudentPerformanceRecord,
    engagement_score: f64,
    thresholds: &'a RiskThresholds,
    as_of: Option<NaiveDate>,
}

type FactorRule = (RiskFactor, fn(&FactorCheck<'_>) -> bool);

const FACTORS: [FactorRule; 6] = [
    (RiskFactor::FailingGrade, |c| {
        c.record.has_valid_grade() && c.record.current_grade < c.thresholds.failing_grade
    }),
    (RiskFactor::LowAttendance, |c| {
        unit_clamp(c.record.attendance_rate) < c.thresholds.low_attendance
    }),
    (RiskFactor::LowEngagement, |c| {
        c.engagement_score < c.thresholds.low_engagement
    }),
    (RiskFactor::DecliningTrend, |c| {
        c.record.learning_velocity.completion_trend == CompletionTrend::Declining
    }),
    (RiskFactor::FrequentLateSubmissions, |c| {
        c.record
            .late_share()
            .is_some_and(|share| share > c.thresholds.high_late_share)
    }),
    (RiskFactor::Inactive, |c| {
        c.as_of
            .and_then(|date| c.record.engagement.days_inactive(date))
            .is_some_and(|days| days > c.thresholds.inactivity_days)
    }),
];

/// Score one student's risk factors
pub fn assess_risk(
    record: &StudentPerformanceRecord,
    engagement_score: f64,
    thresholds: &RiskThresholds,
    as_of: Option<NaiveDate>,
) -> RiskAssessment {
    let check = FactorCheck {
        record,
        engagement_score,
        thresholds,
        as_of,
    };
    let factors: Vec<RiskFactor> = FACTORS
        .iter()
        .filter(|(_, fires)| fires(&check))
        .map(|(factor, _)| *factor)
        .collect();
    let score: u32 = factors.iter().map(RiskFactor::weight).sum();
    RiskAssessment {
        level: RiskLevel::from_score(score),
        score,
        factors,
    }
}
