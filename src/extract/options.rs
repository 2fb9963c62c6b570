//! Extraction options and configuration.

/// Options for extracting features from a document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to extract slides in parallel
    pub parallel: bool,

    /// Whether to rebuild animation timelines
    pub extract_animations: bool,

    /// Whether to follow diagram relationships into SmartArt data parts
    pub extract_smart_art: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail when the main document part is missing or malformed.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel slide extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable animation extraction.
    pub fn with_animations(mut self, extract: bool) -> Self {
        self.extract_animations = extract;
        self
    }

    /// Enable or disable SmartArt extraction.
    pub fn with_smart_art(mut self, extract: bool) -> Self {
        self.extract_smart_art = extract;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            extract_animations: true,
            extract_smart_art: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Missing or malformed main parts are errors
    Strict,
    /// Missing or malformed parts degrade to empty feature data
    #[default]
    Lenient,
}
