//! Document format detection.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::package::Package;

/// Kind of document being graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PowerPoint presentation (`.pptx`)
    Pptx,
    /// Word document (`.docx`)
    Docx,
}

impl FileType {
    /// Canonical file extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pptx => "pptx",
            FileType::Docx => "docx",
        }
    }

    /// Map a file extension (case-insensitive, dot optional) to a type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pptx" | "pptm" | "ppsx" | "potx" => Some(FileType::Pptx),
            "docx" | "docm" | "dotx" => Some(FileType::Docx),
            _ => None,
        }
    }

    /// Map a file name to a type by its extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        filename
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Main part of a presentation package.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Main part of a word-processing package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// ZIP local file header magic: `PK\x03\x04`
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Check if bytes start like a ZIP container.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Detect the document type of an opened package.
///
/// The package content wins over the declared extension: a `.pptx` that
/// actually holds `word/document.xml` is graded as a Word document.
pub fn detect_file_type(package: &Package) -> Result<FileType> {
    if package.contains(PRESENTATION_PART) {
        return Ok(FileType::Pptx);
    }
    if package.contains(DOCUMENT_PART) {
        return Ok(FileType::Docx);
    }

    // Main part missing: fall back to the declared extension and let the
    // extractor degrade to empty feature data.
    if !package.list_entries("ppt/").is_empty() {
        return Ok(FileType::Pptx);
    }
    if !package.list_entries("word/").is_empty() {
        return Ok(FileType::Docx);
    }

    FileType::from_extension(package.extension()).ok_or_else(|| {
        Error::UnsupportedFormat(format!(
            "not a presentation or word-processing package (extension: {:?})",
            package.extension()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("PPTX"), Some(FileType::Pptx));
        assert_eq!(FileType::from_extension(".docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_extension("pdf"), None);
        assert_eq!(
            FileType::from_filename("054206000135-DoanDinhHoan-DEPPT01.pptx"),
            Some(FileType::Pptx)
        );
        assert_eq!(FileType::from_filename("noext"), None);
    }

    #[test]
    fn test_is_zip_bytes() {
        assert!(is_zip_bytes(b"PK\x03\x04rest"));
        assert!(!is_zip_bytes(b"%PDF-1.7"));
        assert!(!is_zip_bytes(b""));
    }

    #[test]
    fn test_detect_by_content() {
        let package = Package::from_parts([(DOCUMENT_PART, "<w:document/>")], "pptx");
        assert_eq!(detect_file_type(&package).unwrap(), FileType::Docx);

        let package = Package::from_parts([(PRESENTATION_PART, "<p:presentation/>")], "zip");
        assert_eq!(detect_file_type(&package).unwrap(), FileType::Pptx);
    }

    #[test]
    fn test_detect_fallback_to_extension() {
        let package = Package::from_parts([("docProps/app.xml", "<Properties/>")], "docx");
        assert_eq!(detect_file_type(&package).unwrap(), FileType::Docx);

        let package = Package::from_parts([("mimetype", "application/epub+zip")], "epub");
        assert!(matches!(
            detect_file_type(&package),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
