//! Rubric documents.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::FileType;
use crate::error::{Error, Result};
use crate::scoring::RoundingPolicy;

const PRESENTATION_RUBRIC: &str = include_str!("../../rubrics/presentation.json");
const WORD_RUBRIC: &str = include_str!("../../rubrics/word.json");

/// A grading rubric: named criteria, each with discrete levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rubric {
    /// Rubric name
    pub name: String,

    /// Rounding applied to every criterion
    #[serde(default)]
    pub rounding: RoundingPolicy,

    /// Criteria in presentation order
    pub criteria: Vec<Criterion>,
}

/// One scoring dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    /// Stable id, used as the key in `by_criteria`
    pub id: String,

    /// Display name
    pub name: String,

    /// Checker that evaluates this criterion
    pub detector_key: String,

    /// Maximum points
    pub max_points: f64,

    /// Point tiers
    #[serde(default)]
    pub levels: Vec<RubricLevel>,
}

/// A discrete point tier of a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricLevel {
    /// Short code (`A`, `B`, ...)
    pub code: String,

    /// Display name
    pub name: String,

    /// Points awarded at this tier
    pub points: f64,

    /// Tier description
    #[serde(default)]
    pub description: String,
}

impl Rubric {
    /// Parse and validate a rubric from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let rubric: Rubric = serde_json::from_str(json)?;
        rubric.validate()?;
        Ok(rubric)
    }

    /// Load a rubric from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Built-in rubric for a document kind.
    pub fn builtin(file_type: FileType) -> Result<Self> {
        match file_type {
            FileType::Pptx => Self::from_json(PRESENTATION_RUBRIC),
            FileType::Docx => Self::from_json(WORD_RUBRIC),
        }
    }

    /// Raw JSON of a built-in rubric.
    pub fn builtin_json(file_type: FileType) -> &'static str {
        match file_type {
            FileType::Pptx => PRESENTATION_RUBRIC,
            FileType::Docx => WORD_RUBRIC,
        }
    }

    /// Check structural consistency.
    ///
    /// Criterion ids must be unique and non-empty, maximum points finite and
    /// non-negative, and no level may award more than its criterion's maximum.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::RubricMisconfigured("rubric has no name".into()));
        }

        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            if criterion.id.trim().is_empty() {
                return Err(Error::RubricMisconfigured(format!(
                    "criterion '{}' has an empty id",
                    criterion.name
                )));
            }
            if !seen.insert(criterion.id.as_str()) {
                return Err(Error::RubricMisconfigured(format!(
                    "duplicate criterion id: {}",
                    criterion.id
                )));
            }
            if !criterion.max_points.is_finite() || criterion.max_points < 0.0 {
                return Err(Error::RubricMisconfigured(format!(
                    "criterion {} has invalid maxPoints {}",
                    criterion.id, criterion.max_points
                )));
            }
            if let Some(level) = criterion
                .levels
                .iter()
                .find(|l| !l.points.is_finite() || l.points > criterion.max_points)
            {
                return Err(Error::RubricMisconfigured(format!(
                    "level {} of criterion {} exceeds maxPoints",
                    level.code, criterion.id
                )));
            }
        }
        Ok(())
    }

    /// Sum of all criterion maxima.
    pub fn max_points(&self) -> f64 {
        self.criteria.iter().map(|c| c.max_points).sum()
    }

    /// Criterion by id.
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// First criterion using a detector key.
    pub fn criterion_for(&self, detector_key: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.detector_key == detector_key)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Criterion {
    /// Levels ordered by descending points.
    pub fn sorted_levels(&self) -> Vec<&RubricLevel> {
        sorted_levels(&self.levels)
    }
}

/// Levels ordered by descending points, ties kept in rubric order.
pub fn sorted_levels(levels: &[RubricLevel]) -> Vec<&RubricLevel> {
    let mut sorted: Vec<&RubricLevel> = levels.iter().collect();
    sorted.sort_by(|a, b| b.points.total_cmp(&a.points));
    sorted
}
