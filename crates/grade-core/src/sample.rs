//! Grade samples and student identifiers
//!
//! A [`GradeSample`] is an ordered list of percentage scores, optionally
//! tagged with the student each score belongs to. Samples only ever hold
//! finite values: NaN and infinities are dropped on construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Opaque student identifier as issued by the calling layer
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single score, with the student it belongs to when known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub student_id: Option<StudentId>,
    pub value: f64,
}

impl GradeEntry {
    pub fn new(student_id: Option<StudentId>, value: f64) -> Self {
        Self { student_id, value }
    }
}

/// Ordered list of finite percentage scores
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GradeSample {
    entries: Vec<GradeEntry>,
}

impl GradeSample {
    /// Build an anonymous sample from raw values
    pub fn from_values(values: &[f64]) -> Self {
        Self::from_entries(values.iter().map(|&v| GradeEntry::new(None, v)))
    }

    /// Build a sample of `(student, score)` pairs
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<StudentId>,
    {
        Self::from_entries(
            scores
                .into_iter()
                .map(|(id, value)| GradeEntry::new(Some(id.into()), value)),
        )
    }

    /// Build a sample from entries, dropping non-finite values
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = GradeEntry>,
    {
        let mut dropped = 0usize;
        let entries: Vec<GradeEntry> = entries
            .into_iter()
            .filter(|entry| {
                let keep = entry.value.is_finite();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            warn!(dropped, kept = entries.len(), "dropped non-finite grade values");
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in input order
    pub fn entries(&self) -> &[GradeEntry] {
        &self.entries
    }

    /// Values in input order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.value).collect()
    }

    /// Values sorted ascending
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut values = self.values();
        values.sort_by(f64::total_cmp);
        values
    }

    /// Entries sorted ascending by value; ties keep input order
    pub fn sorted_entries(&self) -> Vec<&GradeEntry> {
        let mut entries: Vec<&GradeEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));
        entries
    }

    /// Fail with [`Error::EmptySample`] when the sample holds no values
    pub fn require_non_empty(&self, context: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::empty_sample(context));
        }
        Ok(())
    }
}

impl FromIterator<f64> for GradeSample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(|v| GradeEntry::new(None, v)))
    }
}
