//! Slide-level types.

use serde::{Deserialize, Serialize};

use super::{AnimationNode, Shape};

/// A slide with its extracted shapes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-indexed position in the presentation
    pub index: usize,

    /// Name of the layout the slide uses
    pub layout_name: String,

    /// Title placeholder text
    pub title: Option<String>,

    /// Shapes in z-order
    pub shapes: Vec<Shape>,

    /// Slide transition
    pub transition: Option<Transition>,

    /// Animation timeline root
    pub animation: Option<AnimationNode>,

    /// Header/footer visibility
    pub display: DisplayInfo,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Shapes that have a transform.
    pub fn positioned_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| s.transform.is_some())
    }

    /// Title shape, if the slide has one.
    pub fn title_shape(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.is_title())
    }

    /// Number of animation effects on the slide.
    pub fn effect_count(&self) -> usize {
        self.animation.as_ref().map_or(0, |a| a.effect_count())
    }
}

/// Slide transition (`p:transition`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Effect element name (`fade`, `push`, `morph`, ...)
    pub kind: String,
    /// Speed attribute (`slow`, `med`, `fast`)
    pub speed: Option<String>,
    /// Duration in milliseconds (`p14:dur` / `dur`)
    pub duration_ms: Option<u32>,
    /// Advance on mouse click
    pub advance_on_click: bool,
    /// Auto advance after milliseconds
    pub advance_after_ms: Option<u32>,
}

/// Header/footer elements visible on a slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// Footer text is shown
    pub shows_footer: bool,
    /// Date/time is shown
    pub shows_date: bool,
    /// Slide number is shown
    pub shows_slide_number: bool,
}

impl DisplayInfo {
    /// Footer, date and number all shown.
    pub fn shows_all(&self) -> bool {
        self.shows_footer && self.shows_date && self.shows_slide_number
    }

    /// Nothing shown.
    pub fn shows_none(&self) -> bool {
        !self.shows_footer && !self.shows_date && !self.shows_slide_number
    }
}
