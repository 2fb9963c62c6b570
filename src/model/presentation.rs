//! Presentation-level feature set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AnimationNode, ObjectKind, Slide, SlideSize, ThemeData, Transition};

/// Everything the checkers need to know about a presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationFeatures {
    /// Number of slides
    pub slide_count: usize,

    /// Slide dimensions
    pub slide_size: SlideSize,

    /// Slides in presentation order
    pub slides: Vec<Slide>,

    /// Theme of the first slide master
    pub theme: ThemeData,

    /// Slide master customization signals
    pub slide_master: SlideMasterInfo,

    /// Header/footer usage across slides
    pub header_footer: HeaderFooterSummary,

    /// Every hyperlink found on any slide
    pub hyperlinks: Vec<HyperlinkInfo>,

    /// Transitions by slide
    pub transitions: Vec<TransitionInfo>,

    /// Animation timelines by slide
    pub animations: Vec<SlideAnimation>,

    /// Inserted-object statistics
    pub objects: ObjectSummary,

    /// Outline-likelihood heuristics
    pub outline: OutlineSummary,
}

/// Slide master and layout signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideMasterInfo {
    /// Number of slide masters in the package
    pub master_count: usize,
    /// Number of layouts in the package
    pub layout_count: usize,
    /// Distinct layout names used by slides
    pub used_layouts: Vec<String>,
    /// Non-placeholder shapes placed on masters (logos, bands)
    pub custom_shape_count: usize,
    /// The master title style sets its own font, size or color
    pub customized_title_style: bool,
    /// A master placeholder overrides font, size or color
    pub customized_placeholders: bool,
}

impl SlideMasterInfo {
    /// Any customization of the master beyond the defaults.
    pub fn is_modified(&self) -> bool {
        self.custom_shape_count > 0 || self.customized_title_style || self.customized_placeholders
    }
}

/// Header/footer usage across the deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFooterSummary {
    /// Slides showing a footer
    pub slides_with_footer: usize,
    /// Slides showing the date
    pub slides_with_date: usize,
    /// Slides showing the slide number
    pub slides_with_number: usize,
    /// Whether the title slide hides footer and slide number
    pub title_slide_hidden: bool,
}

/// A hyperlink located on a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperlinkInfo {
    /// 1-indexed slide
    pub slide_index: usize,
    /// Shape holding the link
    pub shape_id: u32,
    /// Linked text (empty for shape-level links)
    pub text: String,
    /// Resolved target
    pub target: Option<String>,
    /// External link
    pub is_external: bool,
    /// Internal action verb
    pub action: Option<String>,
}

impl HyperlinkInfo {
    /// The link has a non-empty target.
    pub fn is_valid(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The target is non-blank after trimming.
    pub fn has_correct_target(&self) -> bool {
        self.target.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

/// Transition of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInfo {
    /// 1-indexed slide
    pub slide_index: usize,
    /// The transition
    pub transition: Transition,
}

/// Animation timeline of one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideAnimation {
    /// 1-indexed slide
    pub slide_index: usize,
    /// Number of effects
    pub effect_count: usize,
    /// Timeline root
    pub timeline: AnimationNode,
}

/// Counts of inserted objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Objects by kind (placeholders excluded)
    pub by_kind: BTreeMap<ObjectKind, usize>,
    /// Total objects
    pub total: usize,
    /// Objects per slide
    pub density: f64,
}

impl ObjectSummary {
    /// Number of distinct object kinds.
    pub fn distinct_kinds(&self) -> usize {
        self.by_kind.values().filter(|&&n| n > 0).count()
    }

    /// Count of a kind.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// Signals that the deck was built from an outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineSummary {
    /// Share of slides with a non-empty title
    pub title_consistency: f64,
    /// Share of slides whose body uses more than one list level
    pub hierarchy_usage: f64,
    /// Share of list slides matching the dominant body formatting
    pub formatting_consistency: f64,
    /// Distinct list levels used
    pub distinct_levels: usize,
    /// Number of list items
    pub list_item_count: usize,
    /// Distinct levels required for this many items
    pub required_levels: usize,
    /// Outcome of each heuristic
    pub titles_ok: bool,
    /// Hierarchy heuristic met
    pub hierarchy_ok: bool,
    /// Formatting heuristic met
    pub formatting_ok: bool,
    /// Level-count heuristic met
    pub levels_ok: bool,
}

impl OutlineSummary {
    /// Number of heuristics met (0..=4).
    pub fn conditions_met(&self) -> usize {
        [
            self.titles_ok,
            self.hierarchy_ok,
            self.formatting_ok,
            self.levels_ok,
        ]
        .iter()
        .filter(|&&ok| ok)
        .count()
    }

    /// All heuristics met.
    pub fn is_likely_outline(&self) -> bool {
        self.conditions_met() == 4
    }
}
