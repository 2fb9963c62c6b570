//! Word-processing checkers.

use super::presentation::{MIN_SMARTART_DEPTH, MIN_SMARTART_NODES};
use super::{award, require_word};
use crate::model::{CriterionEvalResult, DocumentFeatures, WordFeatures};
use crate::rubric::Criterion;

const HEADER_WEIGHT: f64 = 0.4;
const FOOTER_WEIGHT: f64 = 0.3;
const PAGE_NUMBER_WEIGHT: f64 = 0.3;

/// Entries an automatic table of contents needs for full marks.
pub const MIN_TOC_ENTRIES: usize = 3;

/// Heading levels needed for a structured document.
const MIN_HEADING_LEVELS: usize = 2;

/// Rows and columns of a non-trivial table.
const MIN_TABLE_ROWS: usize = 2;
const MIN_TABLE_COLUMNS: usize = 2;

/// Columns that count as a multi-column layout.
const MIN_COLUMNS: u32 = 2;

/// Pictures that earn full marks without floating placement.
const MIN_PICTURES: usize = 2;

/// Header 40%, footer 30%, page number 30%.
pub(crate) fn header_footer(w: &WordFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let hf = &w.header_footer;
    let mut fraction = 0.0;
    let mut found = Vec::new();
    if hf.has_header {
        fraction += HEADER_WEIGHT;
        found.push("header");
    }
    if hf.has_footer {
        fraction += FOOTER_WEIGHT;
        found.push("footer");
    }
    if hf.has_page_number {
        fraction += PAGE_NUMBER_WEIGHT;
        found.push("page number");
    }

    if found.is_empty() {
        return award(criterion, 0.0, "no header, footer or page number");
    }
    award(criterion, fraction, format!("found {}", found.join(", ")))
}

/// Tables, with full marks for one of at least 2x2.
pub(crate) fn objects(w: &WordFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let t = &w.tables;
    if t.count == 0 {
        return award(criterion, 0.0, "no tables");
    }
    if t.max_rows >= MIN_TABLE_ROWS && t.max_columns >= MIN_TABLE_COLUMNS {
        award(
            criterion,
            1.0,
            format!("{} tables, largest {}x{}", t.count, t.max_rows, t.max_columns),
        )
    } else {
        award(criterion, 0.5, format!("{} tables, none at least 2x2", t.count))
    }
}

/// SmartArt presence and size.
pub(crate) fn smart_art(w: &WordFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let s = &w.smart_art;
    if s.count == 0 {
        return award(criterion, 0.0, "no SmartArt");
    }
    if s.node_count >= MIN_SMARTART_NODES && s.max_depth >= MIN_SMARTART_DEPTH {
        award(
            criterion,
            1.0,
            format!("{} SmartArt diagrams, {} nodes, depth {}", s.count, s.node_count, s.max_depth),
        )
    } else {
        award(criterion, 0.5, format!("{} SmartArt diagrams without nested content", s.count))
    }
}

/// WordArt presence.
pub(crate) fn word_art(w: &WordFeatures, criterion: &Criterion) -> CriterionEvalResult {
    match w.word_art.count {
        0 => award(criterion, 0.0, "no WordArt"),
        n => award(criterion, 1.0, format!("{} WordArt objects", n)),
    }
}

/// Heading levels and sections.
pub fn check_structure(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let s = &w.structure;
    if s.paragraph_count == 0 {
        return award(criterion, 0.0, "document body is empty");
    }
    let levels = s.heading_levels();
    if levels >= MIN_HEADING_LEVELS && s.section_count >= 1 {
        award(
            criterion,
            1.0,
            format!("{} headings over {} levels, {} sections", s.heading_count, levels, s.section_count),
        )
    } else if s.heading_count > 0 {
        award(
            criterion,
            0.5,
            format!("{} headings on {} level", s.heading_count, levels),
        )
    } else {
        award(criterion, 0.0, "no headings")
    }
}

/// Table of contents.
pub fn check_toc(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let toc = &w.toc;
    if !toc.present {
        return award(criterion, 0.0, "no table of contents");
    }
    if !toc.automatic {
        return award(criterion, 0.5, "manual table of contents");
    }
    if toc.entry_count >= MIN_TOC_ENTRIES {
        award(
            criterion,
            1.0,
            format!("automatic table of contents with {} entries", toc.entry_count),
        )
    } else {
        award(
            criterion,
            0.75,
            format!(
                "automatic table of contents with only {} entries",
                toc.entry_count
            ),
        )
    }
}

/// Multi-column layout.
pub fn check_columns(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let c = &w.columns;
    if c.max_columns < MIN_COLUMNS {
        return award(criterion, 0.0, "single-column layout");
    }
    let separator = if c.has_separator {
        "with separator line"
    } else {
        "without separator line"
    };
    award(
        criterion,
        1.0,
        format!(
            "{} columns in {} sections, {}",
            c.max_columns, c.sections_with_columns, separator
        ),
    )
}

/// Drop caps.
pub fn check_drop_cap(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    if w.drop_cap.present() {
        award(
            criterion,
            1.0,
            format!("{} drop caps ({})", w.drop_cap.count, w.drop_cap.modes.join(", ")),
        )
    } else {
        award(criterion, 0.0, "no drop cap")
    }
}

/// Pictures, with full marks for several or any floating.
pub fn check_pictures(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let p = &w.pictures;
    let reason = format!("{} pictures ({} inline, {} floating)", p.count, p.inline, p.floating);
    match p.count {
        0 => award(criterion, 0.0, "no pictures"),
        n if n >= MIN_PICTURES || p.floating > 0 => award(criterion, 1.0, reason),
        _ => award(criterion, 0.5, reason),
    }
}

/// Equations.
pub fn check_equations(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    match w.equations.count {
        0 => award(criterion, 0.0, "no equations"),
        n => award(criterion, 1.0, format!("{} equations", n)),
    }
}

/// Custom tab stops, with full marks when a leader is used.
pub fn check_tab_stops(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let t = &w.tab_stops;
    if t.count == 0 {
        return award(criterion, 0.0, "no custom tab stops");
    }
    if t.with_leader > 0 {
        award(
            criterion,
            1.0,
            format!("{} tab stops, {} with leader", t.count, t.with_leader),
        )
    } else {
        award(criterion, 0.5, format!("{} tab stops without leader", t.count))
    }
}

/// Heading styles applied in the body.
pub fn check_styles(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let w = match require_word(features, criterion) {
        Ok(w) => w,
        Err(result) => return result,
    };

    let s = &w.styles;
    let custom = if s.custom_styles.is_empty() {
        String::new()
    } else {
        format!("; custom styles: {}", s.custom_styles.join(", "))
    };
    let levels = s.heading_styles_used.len();
    let fraction = match levels {
        0 => 0.0,
        1 => 0.5,
        _ => 1.0,
    };
    award(
        criterion,
        fraction,
        format!("{} heading styles used{}", levels, custom),
    )
}
