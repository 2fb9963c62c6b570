//! Word-processing feature set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything the checkers need to know about a Word document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordFeatures {
    /// Paragraph/heading/section counts
    pub structure: StructureInfo,
    /// Table of contents
    pub toc: TocInfo,
    /// Headers and footers
    pub header_footer: WordHeaderFooter,
    /// Column layout
    pub columns: ColumnsInfo,
    /// Drop caps
    pub drop_cap: DropCapInfo,
    /// Pictures
    pub pictures: PictureInfo,
    /// WordArt
    pub word_art: WordArtInfo,
    /// Tables
    pub tables: TableSummary,
    /// Equations
    pub equations: EquationInfo,
    /// Custom tab stops
    pub tab_stops: TabStopInfo,
    /// SmartArt diagrams
    pub smart_art: SmartArtInfo,
    /// Style usage
    pub styles: StyleSummary,
}

/// Document structure counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInfo {
    /// Non-empty paragraphs in the body
    pub paragraph_count: usize,
    /// Paragraphs with a heading level
    pub heading_count: usize,
    /// Heading count by level (1-9)
    pub headings_by_level: BTreeMap<u8, usize>,
    /// Sections (`w:sectPr` occurrences)
    pub section_count: usize,
    /// Explicit page breaks
    pub page_break_count: usize,
    /// Whitespace-separated words
    pub word_count: usize,
}

impl StructureInfo {
    /// Number of distinct heading levels used.
    pub fn heading_levels(&self) -> usize {
        self.headings_by_level.values().filter(|&&n| n > 0).count()
    }
}

/// Table of contents detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocInfo {
    /// A table of contents exists
    pub present: bool,
    /// Generated by a `TOC` field or TOC content control
    pub automatic: bool,
    /// Number of entries
    pub entry_count: usize,
    /// Deepest entry level
    pub max_level: u8,
}

/// Header and footer usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordHeaderFooter {
    /// A header with content exists
    pub has_header: bool,
    /// A footer with content exists
    pub has_footer: bool,
    /// A `PAGE` field appears in a header or footer
    pub has_page_number: bool,
    /// Header text
    pub header_text: String,
    /// Footer text
    pub footer_text: String,
}

/// Column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnsInfo {
    /// Widest column count over all sections
    pub max_columns: u32,
    /// Sections with two or more columns
    pub sections_with_columns: usize,
    /// A separator line is drawn between columns
    pub has_separator: bool,
}

/// Drop cap usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCapInfo {
    /// Number of drop-cap frames
    pub count: usize,
    /// Modes used (`drop`, `margin`)
    pub modes: Vec<String>,
}

impl DropCapInfo {
    /// A drop cap is present.
    pub fn present(&self) -> bool {
        self.count > 0
    }
}

/// Pictures in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureInfo {
    /// Total pictures
    pub count: usize,
    /// Inline pictures
    pub inline: usize,
    /// Floating (anchored) pictures
    pub floating: usize,
}

/// WordArt in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordArtInfo {
    /// Number of WordArt objects
    pub count: usize,
}

/// Tables in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Number of tables
    pub count: usize,
    /// Most rows in any table
    pub max_rows: usize,
    /// Most columns in any table
    pub max_columns: usize,
    /// A table marks a header row
    pub has_header_row: bool,
}

/// Equations in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationInfo {
    /// Number of `m:oMath` objects
    pub count: usize,
}

/// Custom tab stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStopInfo {
    /// Number of custom tab stops (excluding `clear`)
    pub count: usize,
    /// Tab stops with a leader (`dot`, `hyphen`, ...)
    pub with_leader: usize,
    /// Distinct alignments used (`left`, `center`, `right`, `decimal`)
    pub alignments: Vec<String>,
}

/// SmartArt in a Word document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartArtInfo {
    /// Number of diagrams
    pub count: usize,
    /// Total nodes over all diagrams
    pub node_count: usize,
    /// Deepest diagram
    pub max_depth: usize,
}

/// Style usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSummary {
    /// Styles defined with `w:customStyle="1"`
    pub custom_styles: Vec<String>,
    /// Heading levels whose styles are used in the body
    pub heading_styles_used: Vec<u8>,
    /// Distinct fonts set by styles or runs
    pub fonts: Vec<String>,
}
