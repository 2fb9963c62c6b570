//! Normalized slide shapes and their graphic payloads.

use serde::{Deserialize, Serialize};

use super::{Hyperlink, Paragraph, SmartArt, TextRun, Transform};

/// Where a shape came from in the slide markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeOrigin {
    /// `p:sp` (text box, autoshape, placeholder)
    Shape,
    /// `p:pic`
    Picture,
    /// `p:cxnSp`
    Connector,
    /// `p:graphicFrame` (table, chart, diagram, OLE)
    GraphicFrame,
}

/// Category of visual object, used by creativity scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Title/body/footer placeholders inherited from the layout
    Placeholder,
    /// Free text box
    TextBox,
    /// Geometric autoshape or connector
    AutoShape,
    /// Picture
    Picture,
    /// Audio or video
    Media,
    /// Table
    Table,
    /// Chart
    Chart,
    /// SmartArt diagram
    SmartArt,
    /// Text with WordArt effects
    WordArt,
}

impl ObjectKind {
    /// Whether this kind counts as an inserted object.
    pub fn is_object(&self) -> bool {
        !matches!(self, ObjectKind::Placeholder)
    }
}

/// Placeholder reference (`p:nvPr/p:ph`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Placeholder type (`title`, `body`, `dt`, `ftr`, `sldNum`, ...); `body` when omitted
    pub kind: String,

    /// Placeholder index
    pub idx: Option<i64>,
}

impl Placeholder {
    /// Title or centered-title placeholder.
    pub fn is_title(&self) -> bool {
        matches!(self.kind.as_str(), "title" | "ctrTitle")
    }

    /// Footer, date or slide-number placeholder.
    pub fn is_header_footer(&self) -> bool {
        matches!(self.kind.as_str(), "ftr" | "dt" | "sldNum" | "hdr")
    }
}

/// A shape on a slide, normalized across markup origins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape id (`p:cNvPr@id`)
    pub id: u32,

    /// Shape name
    pub name: String,

    /// Markup origin
    pub origin: ShapeOrigin,

    /// Placeholder reference, if any
    pub placeholder: Option<Placeholder>,

    /// Placement (inherited from layout/master for placeholders)
    pub transform: Option<Transform>,

    /// Preset geometry (`rect`, `ellipse`, ...)
    pub geometry: Option<String>,

    /// Solid fill color of the shape
    pub fill_color: Option<String>,

    /// Text paragraphs
    pub paragraphs: Vec<Paragraph>,

    /// Table payload
    pub table: Option<TableData>,

    /// Chart payload
    pub chart: Option<ChartData>,

    /// SmartArt payload
    pub smart_art: Option<SmartArt>,

    /// WordArt effects on the shape text
    pub word_art: Option<WordArt>,

    /// Whether the picture embeds audio or video
    pub has_media: bool,

    /// Click action on the whole shape (`p:cNvPr/a:hlinkClick`)
    pub hyperlink: Option<Hyperlink>,
}

impl Shape {
    /// Create an empty shape.
    pub fn new(id: u32, name: impl Into<String>, origin: ShapeOrigin) -> Self {
        Self {
            id,
            name: name.into(),
            origin,
            placeholder: None,
            transform: None,
            geometry: None,
            fill_color: None,
            paragraphs: Vec::new(),
            table: None,
            chart: None,
            smart_art: None,
            word_art: None,
            has_media: false,
            hyperlink: None,
        }
    }

    /// All runs across paragraphs.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }

    /// Plain text with paragraphs separated by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check whether the shape carries visible text.
    pub fn has_text(&self) -> bool {
        self.paragraphs.iter().any(|p| !p.is_empty())
    }

    /// Check whether this is a title placeholder.
    pub fn is_title(&self) -> bool {
        self.placeholder.as_ref().is_some_and(|p| p.is_title())
    }

    /// Classify the shape for object statistics.
    pub fn object_kind(&self) -> ObjectKind {
        if self.smart_art.is_some() {
            return ObjectKind::SmartArt;
        }
        if self.chart.is_some() {
            return ObjectKind::Chart;
        }
        if self.table.is_some() {
            return ObjectKind::Table;
        }
        if self.word_art.is_some() {
            return ObjectKind::WordArt;
        }
        match self.origin {
            ShapeOrigin::Picture if self.has_media => ObjectKind::Media,
            ShapeOrigin::Picture => ObjectKind::Picture,
            ShapeOrigin::Connector => ObjectKind::AutoShape,
            ShapeOrigin::GraphicFrame => ObjectKind::AutoShape,
            ShapeOrigin::Shape if self.placeholder.is_some() => ObjectKind::Placeholder,
            ShapeOrigin::Shape => match self.geometry.as_deref() {
                None | Some("rect") if self.has_text() => ObjectKind::TextBox,
                _ => ObjectKind::AutoShape,
            },
        }
    }
}

/// Table contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Number of rows
    pub rows: usize,
    /// Number of columns (grid columns, or widest row)
    pub columns: usize,
    /// Cell text by row
    pub cells: Vec<Vec<String>>,
}

/// Chart summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Plot type element name without prefix (`barChart`, `pieChart`, ...)
    pub chart_type: String,
    /// Number of series
    pub series_count: usize,
    /// Chart title text
    pub title: Option<String>,
}

/// WordArt text effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordArt {
    /// Gradient fill on the text
    pub gradient: Option<GradientFill>,
    /// Outer shadow on the text
    pub shadow: Option<OuterShadow>,
    /// Preset text warp (`textArchUp`, ...)
    pub warp: Option<String>,
}

impl WordArt {
    /// Check whether any effect is present.
    pub fn has_effect(&self) -> bool {
        self.gradient.is_some() || self.shadow.is_some() || self.warp.is_some()
    }
}

/// Gradient fill with ordered stop colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientFill {
    /// Stop colors in position order
    pub stops: Vec<String>,
}

/// Outer shadow effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OuterShadow {
    /// Effect element (`outerShdw`, `prstShdw`)
    pub kind: String,
    /// Shadow color
    pub color: Option<String>,
    /// Blur radius in EMU
    pub blur: i64,
    /// Direction in 60000ths of a degree
    pub direction: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_priority() {
        let mut shape = Shape::new(1, "Diagram", ShapeOrigin::GraphicFrame);
        assert_eq!(shape.object_kind(), ObjectKind::AutoShape);

        shape.table = Some(TableData::default());
        assert_eq!(shape.object_kind(), ObjectKind::Table);

        shape.smart_art = Some(SmartArt::default());
        assert_eq!(shape.object_kind(), ObjectKind::SmartArt);
    }

    #[test]
    fn test_placeholder_and_text_box() {
        let mut title = Shape::new(2, "Title 1", ShapeOrigin::Shape);
        title.placeholder = Some(Placeholder {
            kind: "title".into(),
            idx: None,
        });
        assert!(title.is_title());
        assert_eq!(title.object_kind(), ObjectKind::Placeholder);
        assert!(!title.object_kind().is_object());

        let mut text_box = Shape::new(3, "TextBox 2", ShapeOrigin::Shape);
        text_box.paragraphs.push(Paragraph::with_text("note"));
        assert_eq!(text_box.object_kind(), ObjectKind::TextBox);

        text_box.geometry = Some("ellipse".into());
        assert_eq!(text_box.object_kind(), ObjectKind::AutoShape);
    }

    #[test]
    fn test_media_picture() {
        let mut pic = Shape::new(4, "Video", ShapeOrigin::Picture);
        assert_eq!(pic.object_kind(), ObjectKind::Picture);
        pic.has_media = true;
        assert_eq!(pic.object_kind(), ObjectKind::Media);
    }
}
