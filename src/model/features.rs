//! The per-file feature object handed to checkers.

use serde::{Deserialize, Serialize};

use super::{PresentationFeatures, WordFeatures};
use crate::detect::FileType;

/// Extracted features of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFeatures {
    /// Original file name
    pub filename: String,

    /// Detected document type
    pub file_type: FileType,

    /// Kind-specific features
    pub content: FeatureSet,
}

/// Kind-specific feature payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSet {
    /// Presentation features
    Presentation(PresentationFeatures),
    /// Word-processing features
    WordProcessing(WordFeatures),
}

impl DocumentFeatures {
    /// Wrap presentation features.
    pub fn presentation(filename: impl Into<String>, features: PresentationFeatures) -> Self {
        Self {
            filename: filename.into(),
            file_type: FileType::Pptx,
            content: FeatureSet::Presentation(features),
        }
    }

    /// Wrap word-processing features.
    pub fn word(filename: impl Into<String>, features: WordFeatures) -> Self {
        Self {
            filename: filename.into(),
            file_type: FileType::Docx,
            content: FeatureSet::WordProcessing(features),
        }
    }

    /// Presentation features, if this is a presentation.
    pub fn as_presentation(&self) -> Option<&PresentationFeatures> {
        match &self.content {
            FeatureSet::Presentation(p) => Some(p),
            FeatureSet::WordProcessing(_) => None,
        }
    }

    /// Word features, if this is a word-processing document.
    pub fn as_word(&self) -> Option<&WordFeatures> {
        match &self.content {
            FeatureSet::WordProcessing(w) => Some(w),
            FeatureSet::Presentation(_) => None,
        }
    }
}
