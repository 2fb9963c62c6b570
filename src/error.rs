//! Error types for docgrade library.

use std::io;
use thiserror::Error;

/// Result type alias for docgrade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, extracting and grading documents.
///
/// Only [`Error::CorruptContainer`], [`Error::UnsupportedFormat`] and
/// [`Error::Io`] abort the grading of a single file. The other variants are
/// produced by strict helpers and are otherwise degraded to empty feature data
/// or zero-score results.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The byte buffer is not a readable ZIP archive.
    #[error("Corrupt container: {0}")]
    CorruptContainer(String),

    /// The archive is readable but is not a presentation or word-processing document.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// An expected XML part is absent from the container.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// An XML part failed to parse.
    #[error("Malformed markup in {0}")]
    MalformedMarkup(String),

    /// A rubric document is invalid or a criterion cannot be evaluated.
    #[error("Rubric misconfigured: {0}")]
    RubricMisconfigured(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::CorruptContainer(e.to_string()),
            _ => Error::CorruptContainer(err.to_string()),
        }
    }
}

impl Error {
    /// Whether this error stops the grading of the file it belongs to.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::CorruptContainer(_) | Error::UnsupportedFormat(_) | Error::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingPart("ppt/presentation.xml".to_string());
        assert_eq!(err.to_string(), "Missing part: ppt/presentation.xml");

        let err = Error::CorruptContainer("invalid Zip archive".to_string());
        assert_eq!(err.to_string(), "Corrupt container: invalid Zip archive");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_zip_error_is_corrupt_container() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad".into()).into();
        assert!(matches!(err, Error::CorruptContainer(_)));
    }

    #[test]
    fn test_non_fatal_errors() {
        assert!(!Error::MalformedMarkup("word/document.xml".into()).is_fatal());
        assert!(!Error::RubricMisconfigured("no criteria".into()).is_fatal());
    }
}
