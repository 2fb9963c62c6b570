//! Per-slide extraction: shapes, title, transition, timeline and
//! header/footer visibility.

use std::collections::HashMap;

use crate::model::{DisplayInfo, Slide, ThemeData, Transition};
use crate::package::Package;
use crate::xml::XmlNode;

use super::animation::parse_timing;
use super::options::ExtractOptions;
use super::shapes::{extract_shapes, ShapeContext};
use super::style::{placeholder_of, StyleContext};
use super::theme::parse_theme;

/// Child elements of `p:transition` that are not the effect itself.
const TRANSITION_NON_EFFECTS: &[&str] = &["p:sndAc", "p:extLst"];

/// A parsed slide layout.
#[derive(Debug, Clone)]
pub struct LayoutPart {
    /// `p:sldLayout` root
    pub root: XmlNode,
    /// Layout name (`p:cSld@name`)
    pub name: String,
    /// Part path of the owning master
    pub master: Option<String>,
}

/// A parsed slide master with its theme.
#[derive(Debug, Clone)]
pub struct MasterPart {
    /// `p:sldMaster` root
    pub root: XmlNode,
    /// Theme referenced by the master
    pub theme: ThemeData,
}

/// All layouts and masters of a presentation, parsed once and shared by
/// every slide.
#[derive(Debug, Default)]
pub struct MasterSet {
    layouts: HashMap<String, LayoutPart>,
    masters: HashMap<String, MasterPart>,
    master_order: Vec<String>,
}

impl MasterSet {
    /// Load every layout and master of the package.
    pub fn load(package: &Package) -> Self {
        let mut set = Self::default();

        for path in package.list_entries("ppt/slideMasters/") {
            if !is_xml_part(path) {
                continue;
            }
            let Some(root) = package.read_xml(path) else {
                continue;
            };
            let theme = package
                .relationships(path)
                .first_of_type("theme")
                .and_then(|rel| package.read_xml(&rel.target))
                .map(|t| parse_theme(&t))
                .unwrap_or_default();

            set.master_order.push(path.to_string());
            set.masters.insert(path.to_string(), MasterPart { root, theme });
        }

        for path in package.list_entries("ppt/slideLayouts/") {
            if !is_xml_part(path) {
                continue;
            }
            let Some(root) = package.read_xml(path) else {
                continue;
            };
            let name = root
                .child("p:cSld")
                .and_then(|c| c.attr("name"))
                .unwrap_or_default()
                .to_string();
            let master = package
                .relationships(path)
                .first_of_type("slideMaster")
                .map(|rel| rel.target.clone());

            set.layouts.insert(path.to_string(), LayoutPart { root, name, master });
        }

        set
    }

    /// Layout by part path.
    pub fn layout(&self, path: &str) -> Option<&LayoutPart> {
        self.layouts.get(path)
    }

    /// Master by part path.
    pub fn master(&self, path: &str) -> Option<&MasterPart> {
        self.masters.get(path)
    }

    /// Masters in part-name order.
    pub fn masters(&self) -> impl Iterator<Item = &MasterPart> {
        self.master_order.iter().filter_map(|p| self.masters.get(p))
    }

    /// Number of layouts.
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }

    /// Number of masters.
    pub fn master_count(&self) -> usize {
        self.masters.len()
    }
}

fn is_xml_part(path: &str) -> bool {
    path.ends_with(".xml") && !path.contains("/_rels/")
}

/// Extract one slide part.
///
/// A missing or malformed slide part yields an empty slide so that the rest
/// of the deck is still graded.
pub fn extract_slide(package: &Package, part: &str, index: usize, masters: &MasterSet, options: &ExtractOptions) -> Slide {
    let mut slide = Slide::new(index);
    let Some(root) = package.read_xml(part) else {
        log::warn!("Slide part {} is missing or unreadable", part);
        return slide;
    };

    let rels = package.relationships(part);
    let layout = rels
        .first_of_type("slideLayout")
        .and_then(|rel| masters.layout(&rel.target));
    let master = layout
        .and_then(|l| l.master.as_deref())
        .and_then(|path| masters.master(path));

    let fallback_theme = ThemeData::default();
    let theme = master.map_or(&fallback_theme, |m| &m.theme);

    slide.layout_name = layout.map(|l| l.name.clone()).unwrap_or_default();

    if let Some(sp_tree) = root.find(&["p:cSld", "p:spTree"]) {
        let ctx = ShapeContext {
            package,
            rels: &rels,
            style: StyleContext::new(theme, layout.map(|l| &l.root), master.map(|m| &m.root)),
            options,
        };
        slide.shapes = extract_shapes(sp_tree, &ctx);
        slide.display = display_of(sp_tree);
    }

    slide.title = slide
        .title_shape()
        .map(|s| s.plain_text().trim().to_string())
        .filter(|t| !t.is_empty());
    slide.transition = parse_transition(&root);
    if options.extract_animations {
        slide.animation = root.child("p:timing").and_then(parse_timing);
    }

    log::debug!(
        "Slide {}: {} shapes, layout '{}'",
        index,
        slide.shapes.len(),
        slide.layout_name
    );
    slide
}

/// Parse the slide transition, looking inside markup-compatibility blocks.
pub fn parse_transition(slide_root: &XmlNode) -> Option<Transition> {
    let node = slide_root.child("p:transition").or_else(|| {
        slide_root
            .children_named("mc:AlternateContent")
            .find_map(|ac| {
                ac.find(&["mc:Choice", "p:transition"])
                    .or_else(|| ac.find(&["mc:Fallback", "p:transition"]))
            })
    })?;

    let effect = node
        .children
        .iter()
        .find(|c| !TRANSITION_NON_EFFECTS.contains(&c.name.as_str()))?;

    Some(Transition {
        kind: effect.local_name().to_string(),
        speed: node.attr("spd").map(str::to_string),
        duration_ms: node
            .attr("p14:dur")
            .or_else(|| node.attr("dur"))
            .and_then(|d| d.trim().parse().ok()),
        advance_on_click: node.attr_bool("advClick").unwrap_or(true),
        advance_after_ms: node.attr("advTm").and_then(|d| d.trim().parse().ok()),
    })
}

/// Header/footer elements shown on a slide.
///
/// Date and slide number count when their placeholder carries text or a
/// field; the footer counts only with visible text.
pub fn display_of(sp_tree: &XmlNode) -> DisplayInfo {
    let mut info = DisplayInfo::default();

    for sp in sp_tree.descendants_named("p:sp") {
        let Some(ph) = placeholder_of(sp) else {
            continue;
        };
        let body = sp.child("p:txBody");
        let has_text = body.is_some_and(|b| b.descendants_named("a:t").any(|t| !t.text.trim().is_empty()));
        let has_field = body.is_some_and(|b| b.descendant("a:fld").is_some());

        match ph.kind.as_str() {
            "ftr" => info.shows_footer |= has_text,
            "dt" => info.shows_date |= has_text || has_field,
            "sldNum" => info.shows_slide_number |= has_text || has_field,
            _ => {}
        }
    }

    info
}
