//! Presentation feature aggregation.

use std::collections::{BTreeMap, HashMap, HashSet};

use rayon::prelude::*;

use crate::detect::PRESENTATION_PART;
use crate::error::Result;
use crate::model::{
    HeaderFooterSummary, HyperlinkInfo, ObjectKind, ObjectSummary, OutlineSummary,
    PresentationFeatures, Slide, SlideAnimation, SlideMasterInfo, SlideSize, TransitionInfo,
};
use crate::package::Package;
use crate::xml::XmlNode;

use super::options::{ErrorMode, ExtractOptions};
use super::slide::{extract_slide, MasterSet};
use super::style::placeholder_of;

/// Share of slides that must carry a title.
pub const TITLE_CONSISTENCY_THRESHOLD: f64 = 0.8;

/// Share of list slides that must use more than one level.
pub const HIERARCHY_USAGE_THRESHOLD: f64 = 0.5;

/// Share of list slides that must match the dominant list formatting.
pub const FORMATTING_CONSISTENCY_THRESHOLD: f64 = 0.7;

/// Title size of an untouched master title style, in hundredths of a point.
const DEFAULT_TITLE_SIZE: i64 = 4400;

/// Master shape elements that count as custom content when not placeholders.
const MASTER_SHAPE_ELEMENTS: &[&str] = &["p:sp", "p:pic", "p:grpSp", "p:cxnSp", "p:graphicFrame"];

/// Extract the full feature set of a presentation package.
pub fn extract_presentation(package: &Package, options: &ExtractOptions) -> Result<PresentationFeatures> {
    let root = match options.error_mode {
        ErrorMode::Strict => package.require_xml(PRESENTATION_PART)?,
        ErrorMode::Lenient => package.xml_or_empty(PRESENTATION_PART),
    };

    let slide_size = root
        .child("p:sldSz")
        .map(|sz| SlideSize {
            width: sz.attr_i64("cx"),
            height: sz.attr_i64("cy"),
        })
        .filter(|sz| sz.width > 0 && sz.height > 0)
        .unwrap_or_default();

    let parts = slide_parts(package, &root);
    let masters = MasterSet::load(package);
    log::debug!(
        "Presentation has {} slides, {} masters, {} layouts",
        parts.len(),
        masters.master_count(),
        masters.layout_count()
    );

    let slides: Vec<Slide> = if options.parallel {
        parts
            .par_iter()
            .enumerate()
            .map(|(i, part)| extract_slide(package, part, i + 1, &masters, options))
            .collect()
    } else {
        parts
            .iter()
            .enumerate()
            .map(|(i, part)| extract_slide(package, part, i + 1, &masters, options))
            .collect()
    };

    let theme = masters
        .masters()
        .next()
        .map(|m| m.theme.clone())
        .unwrap_or_default();

    Ok(PresentationFeatures {
        slide_count: slides.len(),
        slide_size,
        theme,
        slide_master: summarize_masters(&masters, &slides),
        header_footer: summarize_header_footer(&slides),
        hyperlinks: collect_hyperlinks(&slides),
        transitions: slides
            .iter()
            .filter_map(|s| {
                s.transition.clone().map(|transition| TransitionInfo {
                    slide_index: s.index,
                    transition,
                })
            })
            .collect(),
        animations: slides
            .iter()
            .filter_map(|s| {
                s.animation.clone().map(|timeline| SlideAnimation {
                    slide_index: s.index,
                    effect_count: timeline.effect_count(),
                    timeline,
                })
            })
            .collect(),
        objects: summarize_objects(&slides),
        outline: summarize_outline(&slides),
        slides,
    })
}

/// Slide part paths in presentation order.
///
/// Follows `p:sldIdLst` through the presentation relationships; when the
/// list is missing, falls back to `ppt/slides/slideN.xml` in numeric order.
fn slide_parts(package: &Package, root: &XmlNode) -> Vec<String> {
    let rels = package.relationships(PRESENTATION_PART);
    let ordered: Vec<String> = root
        .find_all(&["p:sldIdLst", "p:sldId"])
        .into_iter()
        .filter_map(|id| id.attr("r:id"))
        .filter_map(|id| rels.target(id))
        .filter(|part| package.contains(part))
        .map(str::to_string)
        .collect();

    if !ordered.is_empty() {
        return ordered;
    }

    let mut numbered: Vec<(u32, String)> = package
        .list_entries("ppt/slides/")
        .into_iter()
        .filter_map(|path| {
            let n = path
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((n, path.to_string()))
        })
        .collect();
    numbered.sort_by_key(|(n, _)| *n);
    numbered.into_iter().map(|(_, p)| p).collect()
}

fn summarize_masters(masters: &MasterSet, slides: &[Slide]) -> SlideMasterInfo {
    let mut used_layouts: Vec<String> = Vec::new();
    for slide in slides {
        if !slide.layout_name.is_empty() && !used_layouts.contains(&slide.layout_name) {
            used_layouts.push(slide.layout_name.clone());
        }
    }

    let mut info = SlideMasterInfo {
        master_count: masters.master_count(),
        layout_count: masters.layout_count(),
        used_layouts,
        ..Default::default()
    };

    for master in masters.masters() {
        let root = &master.root;
        if let Some(tree) = root.find(&["p:cSld", "p:spTree"]) {
            info.custom_shape_count += tree
                .children
                .iter()
                .filter(|c| MASTER_SHAPE_ELEMENTS.contains(&c.name.as_str()))
                .filter(|c| placeholder_of(c).is_none())
                .count();

            info.customized_placeholders |= tree
                .children_named("p:sp")
                .filter(|sp| placeholder_of(sp).is_some())
                .any(|sp| {
                    sp.child("p:txBody").is_some_and(|body| {
                        body.descendants()
                            .filter(|n| n.name == "a:defRPr" || n.name == "a:rPr")
                            .any(overrides_format)
                    })
                });
        }

        info.customized_title_style |= root
            .find(&["p:txStyles", "p:titleStyle", "a:lvl1pPr", "a:defRPr"])
            .is_some_and(|def| {
                let custom_font = def
                    .child("a:latin")
                    .and_then(|l| l.attr("typeface"))
                    .is_some_and(|t| !t.is_empty() && !t.starts_with('+'));
                let custom_color = def.find(&["a:solidFill", "a:srgbClr"]).is_some();
                let custom_size = def.attr_i64_opt("sz").is_some_and(|sz| sz != DEFAULT_TITLE_SIZE);
                custom_font || custom_color || custom_size
            });
    }

    info
}

fn overrides_format(props: &XmlNode) -> bool {
    props.attr("sz").is_some() || props.child("a:latin").is_some() || props.child("a:solidFill").is_some()
}

fn summarize_header_footer(slides: &[Slide]) -> HeaderFooterSummary {
    HeaderFooterSummary {
        slides_with_footer: slides.iter().filter(|s| s.display.shows_footer).count(),
        slides_with_date: slides.iter().filter(|s| s.display.shows_date).count(),
        slides_with_number: slides.iter().filter(|s| s.display.shows_slide_number).count(),
        title_slide_hidden: slides
            .first()
            .is_some_and(|s| !s.display.shows_footer && !s.display.shows_slide_number),
    }
}

fn collect_hyperlinks(slides: &[Slide]) -> Vec<HyperlinkInfo> {
    let mut links = Vec::new();
    for slide in slides {
        for shape in &slide.shapes {
            if let Some(link) = &shape.hyperlink {
                links.push(HyperlinkInfo {
                    slide_index: slide.index,
                    shape_id: shape.id,
                    text: String::new(),
                    target: link.target.clone(),
                    is_external: link.is_external,
                    action: link.action.clone(),
                });
            }
            for run in shape.text_runs() {
                if let Some(link) = &run.hyperlink {
                    links.push(HyperlinkInfo {
                        slide_index: slide.index,
                        shape_id: shape.id,
                        text: run.text.clone(),
                        target: link.target.clone(),
                        is_external: link.is_external,
                        action: link.action.clone(),
                    });
                }
            }
        }
    }
    links
}

fn summarize_objects(slides: &[Slide]) -> ObjectSummary {
    let mut by_kind: BTreeMap<ObjectKind, usize> = BTreeMap::new();
    for shape in slides.iter().flat_map(|s| s.shapes.iter()) {
        let kind = shape.object_kind();
        if kind.is_object() {
            *by_kind.entry(kind).or_default() += 1;
        }
    }
    let total = by_kind.values().sum();

    ObjectSummary {
        by_kind,
        total,
        density: if slides.is_empty() {
            0.0
        } else {
            total as f64 / slides.len() as f64
        },
    }
}

/// Distinct list levels expected for a given number of list items.
pub fn required_levels(list_items: usize) -> usize {
    match list_items {
        0..=3 => 1,
        4..=9 => 2,
        _ => 3,
    }
}

fn summarize_outline(slides: &[Slide]) -> OutlineSummary {
    if slides.is_empty() {
        return OutlineSummary::default();
    }

    let titled = slides.iter().filter(|s| s.title.is_some()).count();
    let title_consistency = titled as f64 / slides.len() as f64;

    let mut levels: HashSet<u8> = HashSet::new();
    let mut list_item_count = 0;
    let mut list_slides = 0;
    let mut hierarchical_slides = 0;
    // dominant (font, size) of each list slide
    let mut signatures: Vec<(String, u64)> = Vec::new();

    for slide in slides {
        let items: Vec<_> = slide
            .shapes
            .iter()
            .filter(|s| !s.is_title())
            .flat_map(|s| s.paragraphs.iter())
            .filter(|p| p.has_bullet && !p.is_empty())
            .collect();
        if items.is_empty() {
            continue;
        }

        list_slides += 1;
        list_item_count += items.len();
        let slide_levels: HashSet<u8> = items.iter().map(|p| p.level).collect();
        if slide_levels.len() > 1 {
            hierarchical_slides += 1;
        }
        levels.extend(slide_levels);

        let mut counts: HashMap<(String, u64), usize> = HashMap::new();
        for run in items.iter().filter_map(|p| p.runs.first()) {
            *counts.entry((run.font.clone(), size_key(run.size))).or_default() += 1;
        }
        if let Some(sig) = dominant(counts) {
            signatures.push(sig);
        }
    }

    let ratio = |n: usize| if list_slides == 0 { 0.0 } else { n as f64 / list_slides as f64 };
    let hierarchy_usage = ratio(hierarchical_slides);
    let formatting_consistency = {
        let mut counts: HashMap<(String, u64), usize> = HashMap::new();
        for sig in &signatures {
            *counts.entry(sig.clone()).or_default() += 1;
        }
        ratio(counts.values().copied().max().unwrap_or(0))
    };

    let required = required_levels(list_item_count);
    OutlineSummary {
        title_consistency,
        hierarchy_usage,
        formatting_consistency,
        distinct_levels: levels.len(),
        list_item_count,
        required_levels: required,
        titles_ok: title_consistency >= TITLE_CONSISTENCY_THRESHOLD,
        hierarchy_ok: hierarchy_usage >= HIERARCHY_USAGE_THRESHOLD,
        formatting_ok: formatting_consistency >= FORMATTING_CONSISTENCY_THRESHOLD,
        levels_ok: list_item_count > 0 && levels.len() >= required,
    }
}

/// Font sizes compared at hundredth-of-a-point precision.
fn size_key(size: f64) -> u64 {
    (size * 100.0).round().max(0.0) as u64
}

/// Most frequent key; ties broken by key order for determinism.
fn dominant<K: Ord + Clone>(counts: HashMap<K, usize>) -> Option<K> {
    counts
        .into_iter()
        .max_by(|(ka, a), (kb, b)| a.cmp(b).then_with(|| kb.cmp(ka)))
        .map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Placeholder, Shape, ShapeOrigin, TextRun};

    fn list_slide(index: usize, title: Option<&str>, levels: &[u8]) -> Slide {
        let mut slide = Slide::new(index);
        slide.title = title.map(str::to_string);
        let mut body = Shape::new(3, "Content", ShapeOrigin::Shape);
        body.placeholder = Some(Placeholder {
            kind: "body".into(),
            idx: Some(1),
        });
        for &level in levels {
            let mut p = Paragraph::new(level);
            p.has_bullet = true;
            let mut run = TextRun::new("item");
            run.font = "Calibri".into();
            p.runs.push(run);
            body.paragraphs.push(p);
        }
        slide.shapes.push(body);
        slide
    }

    #[test]
    fn test_required_levels() {
        assert_eq!(required_levels(0), 1);
        assert_eq!(required_levels(3), 1);
        assert_eq!(required_levels(4), 2);
        assert_eq!(required_levels(9), 2);
        assert_eq!(required_levels(10), 3);
    }

    #[test]
    fn test_outline_all_conditions() {
        let slides: Vec<Slide> = (1..=5)
            .map(|i| list_slide(i, Some("Topic"), &[0, 1, 2]))
            .collect();
        let outline = summarize_outline(&slides);
        assert_eq!(outline.list_item_count, 15);
        assert_eq!(outline.required_levels, 3);
        assert_eq!(outline.distinct_levels, 3);
        assert!(outline.is_likely_outline());
    }

    #[test]
    fn test_outline_partial() {
        let slides = vec![
            list_slide(1, Some("Intro"), &[0, 0]),
            list_slide(2, None, &[0, 1]),
            list_slide(3, None, &[0]),
        ];
        let outline = summarize_outline(&slides);
        assert!(!outline.titles_ok);
        assert!(!outline.hierarchy_ok);
        assert!(outline.formatting_ok);
        // 5 items need 2 levels
        assert!(outline.levels_ok);
        assert_eq!(outline.conditions_met(), 2);
    }

    #[test]
    fn test_slide_order_fallback_is_numeric() {
        let package = Package::from_parts(
            [
                ("ppt/slides/slide10.xml", "<p:sld/>"),
                ("ppt/slides/slide2.xml", "<p:sld/>"),
                ("ppt/slides/slide1.xml", "<p:sld/>"),
                ("ppt/slides/_rels/slide1.xml.rels", "<Relationships/>"),
            ],
            "pptx",
        );
        let parts = slide_parts(&package, &XmlNode::default());
        assert_eq!(
            parts,
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide10.xml"
            ]
        );
    }

    #[test]
    fn test_strict_requires_presentation_part() {
        let package = Package::from_parts([("ppt/slides/slide1.xml", "<p:sld/>")], "pptx");
        assert!(extract_presentation(&package, &ExtractOptions::new().strict()).is_err());

        let features = extract_presentation(&package, &ExtractOptions::new().sequential()).unwrap();
        assert_eq!(features.slide_count, 1);
        assert_eq!(features.slide_size, SlideSize::default());
    }
}
