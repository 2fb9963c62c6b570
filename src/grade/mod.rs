//! The grading pipeline: bytes in, [`GradeResult`] out.
//!
//! A [`Grader`] owns the extractor and checker registries and either a fixed
//! rubric or a [`RubricCache`] that supplies the built-in rubric for each
//! document kind. [`BatchGrader`] runs many documents on a bounded thread
//! pool.
//!
//! # Example
//!
//! ```no_run
//! use docgrade::grade::{GradeOptions, Grader};
//! use docgrade::scoring::RoundingPolicy;
//!
//! fn main() -> docgrade::Result<()> {
//!     let grader = Grader::new().with_options(GradeOptions::new().with_rounding(RoundingPolicy::None));
//!     let result = grader.grade_file("054206000135-DoanDinhHoan-DEPPT01.pptx")?;
//!     println!("{} / {} ({}%)", result.total_points, result.max_possible_points, result.percentage);
//!     Ok(())
//! }
//! ```

mod batch;
mod options;

pub use batch::{BatchError, BatchGrader, BatchJob, BatchOutcome, BatchReport};
pub use options::{GradeOptions, DEFAULT_PASS_THRESHOLD};

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::checks::CheckerRegistry;
use crate::error::Result;
use crate::extract::ExtractorRegistry;
use crate::model::{DocumentFeatures, GradeResult};
use crate::rubric::{Rubric, RubricCache};
use crate::scoring::{aggregate, calculate_percentage};

/// Grades documents against a rubric.
#[derive(Debug)]
pub struct Grader {
    extractors: Arc<ExtractorRegistry>,
    checkers: CheckerRegistry,
    rubrics: Arc<RubricCache>,
    rubric: Option<Arc<Rubric>>,
    options: GradeOptions,
}

impl Grader {
    /// Create a grader using the built-in rubric of each document kind.
    pub fn new() -> Self {
        Self {
            extractors: Arc::new(ExtractorRegistry::with_defaults()),
            checkers: CheckerRegistry::with_defaults(),
            rubrics: Arc::new(RubricCache::new()),
            rubric: None,
            options: GradeOptions::default(),
        }
    }

    /// Grade every document against one rubric.
    pub fn with_rubric(mut self, rubric: impl Into<Arc<Rubric>>) -> Self {
        self.rubric = Some(rubric.into());
        self
    }

    /// Share a rubric cache with other graders.
    pub fn with_rubric_cache(mut self, cache: Arc<RubricCache>) -> Self {
        self.rubrics = cache;
        self
    }

    /// Set grading options.
    pub fn with_options(mut self, options: GradeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the checker registry.
    pub fn with_checkers(mut self, checkers: CheckerRegistry) -> Self {
        self.checkers = checkers;
        self
    }

    /// Replace the extractor registry.
    pub fn with_extractors(mut self, extractors: ExtractorRegistry) -> Self {
        self.extractors = Arc::new(extractors);
        self
    }

    /// Grading options.
    pub fn options(&self) -> &GradeOptions {
        &self.options
    }

    /// Rubric used for a set of features.
    pub fn rubric_for(&self, features: &DocumentFeatures) -> Result<Arc<Rubric>> {
        match &self.rubric {
            Some(rubric) => Ok(rubric.clone()),
            None => self.rubrics.builtin(features.file_type),
        }
    }

    /// Grade a document held in memory.
    pub fn grade_bytes(&self, data: &[u8], filename: &str) -> Result<GradeResult> {
        let file_id = self.options.file_id.as_deref().unwrap_or(filename);
        self.grade_bytes_as(data, filename, file_id)
    }

    /// Grade a document on disk.
    pub fn grade_file<P: AsRef<Path>>(&self, path: P) -> Result<GradeResult> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.grade_bytes(&data, filename)
    }

    /// Extract the feature set of a document without grading it.
    pub fn extract(&self, data: &[u8], filename: &str) -> Result<DocumentFeatures> {
        self.extractors
            .extract_bytes(data, filename, &self.options.extract)
    }

    pub(crate) fn grade_bytes_as(&self, data: &[u8], filename: &str, file_id: &str) -> Result<GradeResult> {
        let started = Instant::now();
        let features = self.extract(data, filename)?;
        let rubric = self.rubric_for(&features)?;

        let mut result = self.score(&features, &rubric, file_id);
        result.processing_time_ms = started.elapsed().as_millis() as u64;
        log::debug!(
            "Graded {} against '{}': {}/{} in {}ms",
            filename,
            rubric.name,
            result.total_points,
            result.max_possible_points,
            result.processing_time_ms
        );
        Ok(result)
    }

    /// Score an extracted feature set against a rubric.
    pub fn score(&self, features: &DocumentFeatures, rubric: &Rubric, file_id: &str) -> GradeResult {
        let policy = self.options.rounding_for(rubric.rounding);
        let by_criteria = self.checkers.evaluate_rubric(features, rubric, policy);

        let total_points = aggregate(by_criteria.values().map(|r| r.points), policy);
        let max_possible_points = rubric.max_points();

        GradeResult {
            file_id: file_id.to_string(),
            filename: features.filename.clone(),
            file_type: features.file_type,
            rubric_name: rubric.name.clone(),
            total_points,
            max_possible_points,
            percentage: calculate_percentage(total_points, max_possible_points),
            by_criteria,
            graded_at: Utc::now(),
            processing_time_ms: 0,
        }
    }
}

impl Default for Grader {
    fn default() -> Self {
        Self::new()
    }
}
