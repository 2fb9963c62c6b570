//! Paragraph and text-run types.

use serde::{Deserialize, Serialize};

/// A paragraph inside a shape's text body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs in document order
    pub runs: Vec<TextRun>,

    /// Outline level (`a:pPr@lvl`, 0 = top level)
    pub level: u8,

    /// Whether the paragraph shows a bullet or number
    pub has_bullet: bool,
}

impl Paragraph {
    /// Create an empty paragraph at the given level.
    pub fn new(level: u8) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::default();
        p.runs.push(TextRun::new(text));
        p
    }

    /// Concatenated run text.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// A run of text with its resolved formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Resolved bold flag
    pub is_bold: bool,

    /// Resolved italic flag
    pub is_italic: bool,

    /// Resolved font family
    pub font: String,

    /// Resolved size in points
    pub size: f64,

    /// Explicit color (hex `RRGGBB` or scheme name)
    pub color: Option<String>,

    /// Hyperlink attached to the run
    pub hyperlink: Option<Hyperlink>,

    /// List level when the owning paragraph is a list item
    pub list_level: Option<u8>,
}

impl TextRun {
    /// Create a run with default formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_bold: false,
            is_italic: false,
            font: String::new(),
            size: 18.0,
            color: None,
            hyperlink: None,
            list_level: None,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A hyperlink resolved through the owning part's relationships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Relationship id (`r:id`), when the link uses one
    pub rel_id: Option<String>,

    /// Resolved target URL or part path
    pub target: Option<String>,

    /// Whether the target is outside the package
    pub is_external: bool,

    /// Action verb for internal jumps (`ppaction://hlinksldjump`)
    pub action: Option<String>,
}
