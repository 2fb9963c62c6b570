//! Grading options and configuration.

use crate::extract::{ErrorMode, ExtractOptions};
use crate::scoring::RoundingPolicy;

/// Default pass threshold, in percent.
pub const DEFAULT_PASS_THRESHOLD: f64 = 50.0;

/// Options for grading a document.
#[derive(Debug, Clone)]
pub struct GradeOptions {
    /// Rounding policy overriding the rubric's own
    pub rounding: Option<RoundingPolicy>,

    /// Pass threshold in percent, used by batch statistics
    pub pass_threshold: f64,

    /// Id recorded in the result; defaults to the file name
    pub file_id: Option<String>,

    /// Extraction options
    pub extract: ExtractOptions,
}

impl GradeOptions {
    /// Create new grade options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the rubric's rounding policy.
    pub fn with_rounding(mut self, policy: RoundingPolicy) -> Self {
        self.rounding = Some(policy);
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.extract.error_mode = mode;
        self
    }

    /// Fail when the main document part is missing or malformed.
    pub fn strict(mut self) -> Self {
        self.extract.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the pass threshold (percent).
    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.pass_threshold = threshold;
        self
    }

    /// Set the id recorded in the result.
    pub fn with_file_id(mut self, id: impl Into<String>) -> Self {
        self.file_id = Some(id.into());
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Rounding policy in effect for a rubric policy.
    pub fn rounding_for(&self, rubric_policy: RoundingPolicy) -> RoundingPolicy {
        self.rounding.unwrap_or(rubric_policy)
    }
}

impl Default for GradeOptions {
    fn default() -> Self {
        Self {
            rounding: None,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            file_id: None,
            extract: ExtractOptions::default(),
        }
    }
}
