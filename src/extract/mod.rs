//! Feature extraction with a pluggable extractor per document kind.
//!
//! This module turns an opened [`Package`] into [`DocumentFeatures`]. Each
//! document kind has a [`FeatureExtractor`]; the [`ExtractorRegistry`]
//! dispatches on the detected file type or a declared extension.
//!
//! # Example
//!
//! ```no_run
//! use docgrade::extract::{extract_features, ExtractOptions};
//!
//! fn main() -> docgrade::Result<()> {
//!     let data = std::fs::read("deck.pptx")?;
//!     let features = extract_features(&data, "deck.pptx", &ExtractOptions::default())?;
//!     println!("{:?}", features.file_type);
//!     Ok(())
//! }
//! ```

mod animation;
mod drawing;
mod options;
mod presentation;
mod shapes;
mod slide;
mod smartart;
mod style;
mod theme;
mod word;

pub use animation::{parse_timing, MAX_ANIMATION_DEPTH};
pub use options::{ErrorMode, ExtractOptions};
pub use presentation::{
    extract_presentation, required_levels, FORMATTING_CONSISTENCY_THRESHOLD,
    HIERARCHY_USAGE_THRESHOLD, TITLE_CONSISTENCY_THRESHOLD,
};
pub use shapes::{extract_shapes, hyperlink_of, parse_chart, parse_table, ShapeContext};
pub use slide::{display_of, extract_slide, parse_transition, MasterSet};
pub use smartart::{leveled_points, parse_smart_art, rebuild_tree, MAX_SMARTART_DEPTH};
pub use style::{placeholder_of, ResolvedStyle, RunSource, StyleContext, DEFAULT_FONT, DEFAULT_FONT_SIZE};
pub use theme::parse_theme;
pub use word::extract_word;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::detect::{detect_file_type, FileType};
use crate::error::{Error, Result};
use crate::model::DocumentFeatures;
use crate::package::Package;

/// Trait for feature extractors.
///
/// Implement this trait to support a new document kind.
pub trait FeatureExtractor: Send + Sync {
    /// The document kind this extractor handles.
    fn file_type(&self) -> FileType;

    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Extract features from an opened package.
    fn extract(&self, package: &Package, filename: &str, options: &ExtractOptions) -> Result<DocumentFeatures>;

    /// Check if this extractor supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Presentation extractor.
#[derive(Debug, Default)]
pub struct PptxExtractor;

impl FeatureExtractor for PptxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pptx
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pptx", "pptm", "ppsx", "potx"]
    }

    fn extract(&self, package: &Package, filename: &str, options: &ExtractOptions) -> Result<DocumentFeatures> {
        let features = extract_presentation(package, options)?;
        Ok(DocumentFeatures::presentation(filename, features))
    }
}

/// Word-processing extractor.
#[derive(Debug, Default)]
pub struct DocxExtractor;

impl FeatureExtractor for DocxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Docx
    }

    fn supported_extensions(&self) -> &[&str] {
        &["docx", "docm", "dotx"]
    }

    fn extract(&self, package: &Package, filename: &str, options: &ExtractOptions) -> Result<DocumentFeatures> {
        let features = extract_word(package, options)?;
        Ok(DocumentFeatures::word(filename, features))
    }
}

/// Registry of feature extractors.
pub struct ExtractorRegistry {
    by_type: HashMap<FileType, Arc<dyn FeatureExtractor>>,
    by_extension: HashMap<String, Arc<dyn FeatureExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            by_type: HashMap::new(),
            by_extension: HashMap::new(),
        }
    }

    /// Create a registry with the presentation and word extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PptxExtractor));
        registry.register(Arc::new(DocxExtractor));
        registry
    }

    /// Register an extractor for its file type and extensions.
    pub fn register(&mut self, extractor: Arc<dyn FeatureExtractor>) {
        for ext in extractor.supported_extensions() {
            self.by_extension
                .insert(ext.to_lowercase(), extractor.clone());
        }
        self.by_type.insert(extractor.file_type(), extractor);
    }

    /// Get the extractor for a file type.
    pub fn get(&self, file_type: FileType) -> Option<Arc<dyn FeatureExtractor>> {
        self.by_type.get(&file_type).cloned()
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn FeatureExtractor>> {
        self.by_extension.get(&ext.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_lowercase())
    }

    /// Extract features from raw bytes.
    ///
    /// The container is opened first; the document kind is then detected
    /// from its parts, falling back to the extension of `filename`.
    pub fn extract_bytes(&self, data: &[u8], filename: &str, options: &ExtractOptions) -> Result<DocumentFeatures> {
        let package = Package::from_bytes(data, extension_of(filename))?;
        let file_type = detect_file_type(&package)?;

        let extractor = self
            .get(file_type)
            .ok_or_else(|| Error::UnsupportedFormat(format!("No extractor for {}", file_type)))?;

        extractor.extract(&package, filename, options)
    }

    /// Extract features from a file on disk.
    pub fn extract_file(&self, path: &Path, options: &ExtractOptions) -> Result<DocumentFeatures> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.extract_bytes(&data, filename, options)
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        f.debug_struct("ExtractorRegistry")
            .field("extensions", &extensions)
            .finish()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Extension of a filename without the dot.
pub(crate) fn extension_of(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
}

/// Extract features from raw bytes with the default extractors.
pub fn extract_features(data: &[u8], filename: &str, options: &ExtractOptions) -> Result<DocumentFeatures> {
    ExtractorRegistry::with_defaults().extract_bytes(data, filename, options)
}
