//! Grading outcomes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detect::FileType;

/// Outcome of evaluating one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvalResult {
    /// Whether the criterion is considered satisfied
    pub passed: bool,

    /// Points awarded (clamped and rounded)
    pub points: f64,

    /// Code of the matched rubric level
    pub level: Option<String>,

    /// Human-readable explanation
    pub reason: String,
}

impl CriterionEvalResult {
    /// A zero-score result with a reason.
    pub fn zero(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            points: 0.0,
            level: None,
            reason: reason.into(),
        }
    }

    /// Result for a criterion that has no rubric rule.
    pub fn not_configured(key: &str) -> Self {
        Self::zero(format!("criterion not configured: {}", key))
    }
}

/// The record handed to every consumer of the grading core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    /// Caller-supplied id (defaults to the file name)
    pub file_id: String,

    /// Original file name
    pub filename: String,

    /// Document type
    pub file_type: FileType,

    /// Name of the rubric used
    pub rubric_name: String,

    /// Sum of criterion points
    pub total_points: f64,

    /// Sum of criterion maxima
    pub max_possible_points: f64,

    /// `total / max * 100`, two decimals
    pub percentage: f64,

    /// Results keyed by criterion id
    pub by_criteria: BTreeMap<String, CriterionEvalResult>,

    /// When grading finished
    pub graded_at: DateTime<Utc>,

    /// Wall time spent grading, in milliseconds
    pub processing_time_ms: u64,
}

impl GradeResult {
    /// Check whether the grade reaches a pass threshold (percent).
    pub fn is_pass(&self, threshold: f64) -> bool {
        self.percentage >= threshold
    }
}
