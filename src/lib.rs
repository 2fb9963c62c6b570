//! # docgrade
//!
//! Rubric-based grading of PowerPoint and Word documents from their OOXML
//! structure.
//!
//! The library opens a `.pptx` or `.docx` container, walks its XML parts into
//! a typed feature set (slides, shapes, styles, SmartArt trees, animation
//! timelines, headers and footers, tables of contents, ...) and scores that
//! feature set against a rubric of criteria with discrete levels.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docgrade::{grade_file, render};
//!
//! fn main() -> docgrade::Result<()> {
//!     // Grade against the built-in rubric for the document kind
//!     let result = grade_file("054206000135-DoanDinhHoan-DEPPT01.pptx")?;
//!
//!     println!("{} / {}", result.total_points, result.max_possible_points);
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Lenient extraction**: missing or malformed parts degrade to empty
//!   feature data instead of failing the grade
//! - **Style cascade**: run, paragraph, shape, layout, master and theme
//! - **Hierarchy rebuild**: SmartArt point lists and animation timelines
//! - **Deterministic scoring**: quarter-point rounding and level matching
//! - **Batch grading**: bounded thread pool with per-file error isolation

pub mod checks;
pub mod detect;
pub mod error;
pub mod extract;
pub mod grade;
pub mod model;
pub mod package;
pub mod render;
pub mod rubric;
pub mod scoring;
pub mod xml;

// Re-export commonly used types
pub use checks::{CheckFn, CheckerRegistry};
pub use detect::{detect_file_type, FileType};
pub use error::{Error, Result};
pub use extract::{extract_features, ErrorMode, ExtractOptions, ExtractorRegistry, FeatureExtractor};
pub use grade::{BatchError, BatchGrader, BatchJob, BatchReport, GradeOptions, Grader};
pub use model::{CriterionEvalResult, DocumentFeatures, GradeResult};
pub use render::JsonFormat;
pub use rubric::{Criterion, Rubric, RubricCache, RubricLevel};
pub use scoring::{calculate_batch_stats, BatchStats, RoundingPolicy};

use std::path::Path;

/// Grade a document file against the built-in rubric for its kind.
///
/// # Example
///
/// ```no_run
/// use docgrade::grade_file;
///
/// let result = grade_file("report.docx").unwrap();
/// println!("{}%", result.percentage);
/// ```
pub fn grade_file<P: AsRef<Path>>(path: P) -> Result<GradeResult> {
    Grader::new().grade_file(path)
}

/// Grade a document file against a custom rubric.
///
/// # Example
///
/// ```no_run
/// use docgrade::{grade_file_with_rubric, Rubric};
///
/// let rubric = Rubric::from_file("rubric.json").unwrap();
/// let result = grade_file_with_rubric("deck.pptx", rubric).unwrap();
/// ```
pub fn grade_file_with_rubric<P: AsRef<Path>>(path: P, rubric: Rubric) -> Result<GradeResult> {
    Grader::new().with_rubric(rubric).grade_file(path)
}

/// Grade a document held in memory against the built-in rubric.
///
/// # Arguments
///
/// * `data` - Document content
/// * `filename` - Original file name, checked by the `filename` criterion
pub fn grade_bytes(data: &[u8], filename: &str) -> Result<GradeResult> {
    Grader::new().grade_bytes(data, filename)
}

/// Grade a document held in memory with custom options.
pub fn grade_bytes_with_options(
    data: &[u8],
    filename: &str,
    rubric: &Rubric,
    options: GradeOptions,
) -> Result<GradeResult> {
    Grader::new()
        .with_rubric(rubric.clone())
        .with_options(options)
        .grade_bytes(data, filename)
}

/// Extract the feature set of a document file.
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentFeatures> {
    ExtractorRegistry::with_defaults().extract_file(path.as_ref(), &ExtractOptions::default())
}

/// Grade a document file and return the result as JSON.
pub fn grade_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let result = grade_file(path)?;
    render::to_json(&result, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_bytes_rejects_non_zip() {
        let err = grade_bytes(b"%PDF-1.7", "file.pptx").unwrap_err();
        assert!(matches!(err, Error::CorruptContainer(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_grade_file_missing() {
        let err = grade_file("/nonexistent/deck.pptx").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_builtin_rubrics_exposed() {
        let rubric = Rubric::builtin(FileType::Docx).unwrap();
        assert!(rubric.max_points() > 0.0);
    }
}
