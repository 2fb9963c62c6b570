//! Document model types for grading.
//!
//! This module defines the typed feature set that bridges OOXML extraction
//! and rubric evaluation. Every type is created fresh per grading run and is
//! serializable so that feature sets and grades can be inspected as JSON.

mod animation;
mod features;
mod geometry;
mod presentation;
mod result;
mod shape;
mod slide;
mod smartart;
mod text;
mod theme;
mod word;

pub use animation::{AnimationKind, AnimationNode, EffectType, Timing, Trigger};
pub use features::{DocumentFeatures, FeatureSet};
pub use geometry::{SlideSize, Transform, EMU_PER_INCH};
pub use presentation::{
    HeaderFooterSummary, HyperlinkInfo, ObjectSummary, OutlineSummary, PresentationFeatures,
    SlideAnimation, SlideMasterInfo, TransitionInfo,
};
pub use result::{CriterionEvalResult, GradeResult};
pub use shape::{
    ChartData, GradientFill, ObjectKind, OuterShadow, Placeholder, Shape, ShapeOrigin, TableData,
    WordArt,
};
pub use slide::{DisplayInfo, Slide, Transition};
pub use smartart::{LeveledPoint, SmartArt, SmartArtNode};
pub use text::{Hyperlink, Paragraph, TextRun};
pub use theme::{FontScheme, SchemeColor, ThemeData, DEFAULT_THEME_NAMES};
pub use word::{
    ColumnsInfo, DropCapInfo, EquationInfo, PictureInfo, SmartArtInfo, StructureInfo,
    StyleSummary, TabStopInfo, TableSummary, TocInfo, WordArtInfo, WordFeatures,
    WordHeaderFooter,
};
