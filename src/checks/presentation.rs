//! Presentation checkers.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{award, require_presentation};
use crate::model::{
    CriterionEvalResult, DocumentFeatures, ObjectKind, PresentationFeatures, Slide, SlideSize,
};
use crate::rubric::Criterion;

/// Slides required before header/footer usage can be judged.
pub const HEADER_FOOTER_MIN_SLIDES: usize = 2;

/// Distinct object kinds that earn full diversity.
pub const MAX_KIND_DIVERSITY: usize = 5;

/// Objects per slide that earn full density.
pub const MAX_OBJECTS_PER_SLIDE: f64 = 3.0;

/// Centroid offset from the slide center at which balance drops to zero.
const MAX_BALANCE_OFFSET: f64 = 0.5;

/// Balance of a slide without positioned shapes.
const NEUTRAL_BALANCE: f64 = 0.5;

/// Distinct explicit colors considered a good palette.
pub const COLOR_COUNT_BEST: std::ops::RangeInclusive<usize> = 2..=5;

/// Distinct explicit colors considered a fair palette.
pub const COLOR_COUNT_FAIR: std::ops::RangeInclusive<usize> = 6..=7;

/// Distinct layouts that earn full layout diversity.
pub const MIN_DISTINCT_LAYOUTS: usize = 3;

/// Distinct transition kinds that count as varied.
const MIN_TRANSITION_KINDS: usize = 2;

/// Animated slides and effect types needed for the upper tiers.
const MIN_ANIMATED_SLIDES: usize = 2;
const MIN_EFFECT_TYPES: usize = 2;

/// SmartArt size that earns full marks.
pub(super) const MIN_SMARTART_NODES: usize = 3;
pub(super) const MIN_SMARTART_DEPTH: usize = 2;

/// Header, footer and slide-number usage.
///
/// Condition A: every slide after the first shows footer, date and number.
/// Condition B: the title slide shows neither footer nor slide number.
pub(crate) fn header_footer(p: &PresentationFeatures, criterion: &Criterion) -> CriterionEvalResult {
    if p.slides.len() < HEADER_FOOTER_MIN_SLIDES {
        return award(
            criterion,
            0.0,
            format!(
                "header/footer needs at least {} slides, found {}",
                HEADER_FOOTER_MIN_SLIDES,
                p.slides.len()
            ),
        );
    }

    let body_slides = &p.slides[1..];
    let incomplete: Vec<usize> = body_slides
        .iter()
        .filter(|s| !s.display.shows_all())
        .map(|s| s.index)
        .collect();
    let title = p.slides[0].display;
    let all_body_slides = incomplete.is_empty();
    let title_hidden = !title.shows_footer && !title.shows_slide_number;

    match (all_body_slides, title_hidden) {
        (true, true) => award(
            criterion,
            1.0,
            "footer, date and slide number on every slide after the title; title slide hidden",
        ),
        (false, true) => award(
            criterion,
            0.5,
            format!(
                "missing one condition: slides {:?} lack footer, date or slide number",
                incomplete
            ),
        ),
        (true, false) => award(
            criterion,
            0.5,
            "missing one condition: title slide shows footer or slide number",
        ),
        (false, false) if p.slides.iter().any(|s| s.display.shows_footer) => {
            award(criterion, 0.25, "footer only: date, numbering and title slide not set up")
        }
        (false, false) => award(criterion, 0.0, "no header/footer elements on any slide"),
    }
}

/// Hyperlink presence and validity.
pub fn check_hyperlinks(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };

    let total = p.hyperlinks.len();
    let valid = p.hyperlinks.iter().filter(|h| h.is_valid()).count();
    let correct = p.hyperlinks.iter().filter(|h| h.has_correct_target()).count();

    if total == 0 {
        return award(criterion, 0.0, "no hyperlinks found");
    }
    if valid == 0 {
        return award(criterion, 0.25, format!("{} hyperlinks, none has a target", total));
    }
    if valid < total {
        return award(
            criterion,
            0.5,
            format!("{}/{} valid, {} without a target", valid, total, total - valid),
        );
    }
    if correct < total {
        return award(
            criterion,
            0.75,
            format!(
                "minor errors: {}/{} valid, {} wrong target",
                valid,
                total,
                total - correct
            ),
        );
    }
    award(criterion, 1.0, format!("{}/{} hyperlinks valid", valid, total))
}

/// Layout balance of one slide in `[0, 1]`.
///
/// The area-weighted centroid of positioned shapes is normalized by the
/// slide size; balance falls linearly with its distance from the center.
pub fn layout_balance(slide: &Slide, size: SlideSize) -> f64 {
    if size.width <= 0 || size.height <= 0 {
        return NEUTRAL_BALANCE;
    }

    let mut weight = 0.0;
    let (mut cx, mut cy) = (0.0, 0.0);
    for transform in slide.positioned_shapes().filter_map(|s| s.transform) {
        let area = transform.area();
        if area <= 0.0 {
            continue;
        }
        let (x, y) = transform.center();
        cx += x * area;
        cy += y * area;
        weight += area;
    }
    if weight <= 0.0 {
        return NEUTRAL_BALANCE;
    }

    let nx = cx / weight / size.width as f64;
    let ny = cy / weight / size.height as f64;
    let offset = ((nx - 0.5).powi(2) + (ny - 0.5).powi(2)).sqrt();
    1.0 - (offset / MAX_BALANCE_OFFSET).min(1.0)
}

/// Object diversity and layout balance.
pub fn check_creativity(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };
    if p.slides.is_empty() {
        return award(criterion, 0.0, "presentation has no slides");
    }

    let kinds = p.objects.distinct_kinds();
    let kind_score = kinds.min(MAX_KIND_DIVERSITY) as f64 / MAX_KIND_DIVERSITY as f64;
    let density_score = p.objects.density.min(MAX_OBJECTS_PER_SLIDE) / MAX_OBJECTS_PER_SLIDE;
    let diversity = (kind_score + density_score) / 2.0;

    let balance = p
        .slides
        .iter()
        .map(|s| layout_balance(s, p.slide_size))
        .sum::<f64>()
        / p.slides.len() as f64;

    let score = 0.5 * diversity + 0.5 * balance;
    award(
        criterion,
        score,
        format!(
            "{} object kinds, {:.1} objects per slide, diversity {:.2}, balance {:.2}",
            kinds, p.objects.density, diversity, balance
        ),
    )
}

/// Font key with the size in hundredths of a point.
fn font_key(font: &str, size: f64) -> (String, i64) {
    (font.to_string(), (size * 100.0).round() as i64)
}

fn distinct_font_score(count: usize) -> f64 {
    match count {
        0..=2 => 1.0,
        3 => 0.5,
        _ => 0.2,
    }
}

/// Share of titled slides whose title matches the dominant font and size.
fn title_format_consistency(slides: &[Slide]) -> f64 {
    let keys: Vec<(String, i64)> = slides
        .iter()
        .filter_map(|s| s.title_shape())
        .filter_map(|shape| shape.text_runs().find(|r| !r.is_empty()))
        .map(|run| font_key(&run.font, run.size))
        .collect();
    if keys.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<&(String, i64), usize> = HashMap::new();
    for key in &keys {
        *counts.entry(key).or_default() += 1;
    }
    let dominant = counts.values().copied().max().unwrap_or(0);
    dominant as f64 / keys.len() as f64
}

fn color_score(count: usize) -> f64 {
    if COLOR_COUNT_BEST.contains(&count) {
        1.0
    } else if COLOR_COUNT_FAIR.contains(&count) {
        0.6
    } else {
        0.2
    }
}

/// Theme customization, font consistency and color palette.
pub fn check_theme(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };
    if p.slides.is_empty() {
        return award(criterion, 0.0, "presentation has no slides");
    }

    let custom = if p.theme.is_custom() { 1.0 } else { 0.0 };

    let fonts: HashSet<&str> = p
        .slides
        .iter()
        .flat_map(|s| s.shapes.iter())
        .flat_map(|shape| shape.text_runs())
        .filter(|r| !r.is_empty() && !r.font.is_empty())
        .map(|r| r.font.as_str())
        .collect();
    let title_consistency = title_format_consistency(&p.slides);
    let font_consistency = (distinct_font_score(fonts.len()) + title_consistency) / 2.0;

    let mut colors: HashSet<String> = p
        .slides
        .iter()
        .flat_map(|s| s.shapes.iter())
        .flat_map(|shape| {
            shape
                .text_runs()
                .filter_map(|r| r.color.clone())
                .chain(shape.fill_color.clone())
        })
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if colors.is_empty() {
        colors = p
            .theme
            .accent_colors()
            .into_iter()
            .map(str::to_ascii_uppercase)
            .collect();
    }
    let color_quality = color_score(colors.len());

    let score = 0.2 * custom + 0.4 * font_consistency + 0.4 * color_quality;
    award(
        criterion,
        score,
        format!(
            "theme '{}' ({}), {} fonts, title consistency {:.2}, {} colors",
            p.theme.name,
            if custom > 0.0 { "custom" } else { "default" },
            fonts.len(),
            title_consistency,
            colors.len()
        ),
    )
}

/// Layout diversity and slide master customization.
pub fn check_slide_master(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };

    let master = &p.slide_master;
    let layouts: BTreeSet<&str> = master
        .used_layouts
        .iter()
        .map(String::as_str)
        .filter(|l| !l.is_empty())
        .collect();
    let diversity = match layouts.len() {
        n if n >= MIN_DISTINCT_LAYOUTS => 1.0,
        2 => 0.5,
        _ => 0.0,
    };
    let customized = master.custom_shape_count > 0 || master.customized_title_style;
    let customization = if customized { 1.0 } else { 0.0 };

    award(
        criterion,
        0.5 * diversity + 0.5 * customization,
        format!(
            "{} distinct layouts, master {}",
            layouts.len(),
            if customized { "customized" } else { "unchanged" }
        ),
    )
}

/// Transition coverage and variety.
pub fn check_transitions(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };
    if p.slides.is_empty() {
        return award(criterion, 0.0, "presentation has no slides");
    }
    if p.transitions.is_empty() {
        return award(criterion, 0.0, "no slide transitions");
    }

    let covered: HashSet<usize> = p.transitions.iter().map(|t| t.slide_index).collect();
    let kinds: BTreeSet<&str> = p
        .transitions
        .iter()
        .map(|t| t.transition.kind.as_str())
        .collect();
    let coverage = (covered.len() as f64 / p.slides.len() as f64).min(1.0);
    let variety = if kinds.len() >= MIN_TRANSITION_KINDS { 1.0 } else { 0.0 };

    award(
        criterion,
        0.7 * coverage + 0.3 * variety,
        format!(
            "{}/{} slides with transitions, kinds: {}",
            covered.len(),
            p.slides.len(),
            kinds.into_iter().collect::<Vec<_>>().join(", ")
        ),
    )
}

/// Animation usage across slides.
pub fn check_animations(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };

    let animated: Vec<_> = p.animations.iter().filter(|a| a.effect_count > 0).collect();
    let effect_types: BTreeSet<_> = animated
        .iter()
        .flat_map(|a| a.timeline.effects())
        .filter_map(|e| e.effect_type())
        .collect();

    if animated.is_empty() {
        return award(criterion, 0.0, "no animations");
    }
    let (fraction, summary) = if animated.len() < MIN_ANIMATED_SLIDES {
        (0.5, "effects on one slide")
    } else if effect_types.len() >= MIN_EFFECT_TYPES {
        (1.0, "varied effects on several slides")
    } else {
        (0.75, "effects on several slides, one effect type")
    };
    award(
        criterion,
        fraction,
        format!(
            "{}: {} animated slides, {} effect types",
            summary,
            animated.len(),
            effect_types.len()
        ),
    )
}

/// Outline-likelihood heuristics.
pub fn check_outline(features: &DocumentFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let p = match require_presentation(features, criterion) {
        Ok(p) => p,
        Err(result) => return result,
    };
    if p.slides.is_empty() {
        return award(criterion, 0.0, "presentation has no slides");
    }

    let o = &p.outline;
    let met = o.conditions_met();
    let mut missing = Vec::new();
    if !o.titles_ok {
        missing.push("titles");
    }
    if !o.hierarchy_ok {
        missing.push("hierarchy");
    }
    if !o.formatting_ok {
        missing.push("formatting");
    }
    if !o.levels_ok {
        missing.push("levels");
    }

    let reason = if missing.is_empty() {
        "all 4 outline conditions met".to_string()
    } else {
        format!("{}/4 outline conditions met, missing: {}", met, missing.join(", "))
    };
    award(criterion, met as f64 / 4.0, reason)
}

/// SmartArt presence and size.
pub(crate) fn smart_art(p: &PresentationFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let diagrams: Vec<_> = p
        .slides
        .iter()
        .flat_map(|s| s.shapes.iter())
        .filter_map(|shape| shape.smart_art.as_ref())
        .collect();
    if diagrams.is_empty() {
        return award(criterion, 0.0, "no SmartArt");
    }

    let rich = diagrams
        .iter()
        .find(|d| d.node_count() >= MIN_SMARTART_NODES && d.depth() >= MIN_SMARTART_DEPTH);
    match rich {
        Some(d) => award(
            criterion,
            1.0,
            format!("SmartArt with {} nodes, depth {}", d.node_count(), d.depth()),
        ),
        None => award(
            criterion,
            0.5,
            format!("{} SmartArt diagrams, none with nested content", diagrams.len()),
        ),
    }
}

/// Table and chart usage.
pub(crate) fn objects(p: &PresentationFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let tables = p.objects.count(ObjectKind::Table);
    let charts = p.objects.count(ObjectKind::Chart);
    let fraction = match (tables > 0, charts > 0) {
        (true, true) => 1.0,
        (false, false) => 0.0,
        _ => 0.5,
    };
    award(criterion, fraction, format!("{} tables, {} charts", tables, charts))
}

/// WordArt presence.
pub(crate) fn word_art(p: &PresentationFeatures, criterion: &Criterion) -> CriterionEvalResult {
    let count = p
        .slides
        .iter()
        .flat_map(|s| s.shapes.iter())
        .filter(|shape| shape.word_art.is_some())
        .count();
    if count == 0 {
        award(criterion, 0.0, "no WordArt")
    } else {
        award(criterion, 1.0, format!("{} WordArt shapes", count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{check_header_footer, check_objects, check_smart_art, test_criterion};
    use crate::model::{
        AnimationNode, DisplayInfo, EffectType, HyperlinkInfo, Paragraph, Shape, ShapeOrigin,
        SlideAnimation, SmartArt, SmartArtNode, TextRun, Timing, Transform, Transition,
        TransitionInfo,
    };

    fn deck(slides: Vec<Slide>) -> PresentationFeatures {
        PresentationFeatures {
            slide_count: slides.len(),
            slides,
            ..Default::default()
        }
    }

    fn displayed(index: usize, footer: bool, date: bool, number: bool) -> Slide {
        let mut slide = Slide::new(index);
        slide.display = DisplayInfo {
            shows_footer: footer,
            shows_date: date,
            shows_slide_number: number,
        };
        slide
    }

    fn doc(p: PresentationFeatures) -> DocumentFeatures {
        DocumentFeatures::presentation("deck.pptx", p)
    }

    #[test]
    fn test_header_footer_tiers() {
        let c = test_criterion("header_footer", 1.0);
        let full = deck(vec![
            displayed(1, false, false, false),
            displayed(2, true, true, true),
            displayed(3, true, true, true),
        ]);
        let result = check_header_footer(&doc(full), &c);
        assert_eq!(result.points, 1.0);

        let no_date = deck(vec![
            displayed(1, false, false, false),
            displayed(2, true, true, true),
            displayed(3, true, false, true),
        ]);
        let result = check_header_footer(&doc(no_date), &c);
        assert_eq!(result.points, 0.5);
        assert!(result.reason.contains("missing one condition"));

        let footer_only = deck(vec![
            displayed(1, true, false, false),
            displayed(2, true, false, false),
        ]);
        let result = check_header_footer(&doc(footer_only), &c);
        assert_eq!(result.points, 0.25);
        assert!(result.reason.contains("footer only"));

        let single = deck(vec![displayed(1, true, true, true)]);
        assert_eq!(check_header_footer(&doc(single), &c).points, 0.0);
    }

    fn link(target: Option<&str>) -> HyperlinkInfo {
        HyperlinkInfo {
            slide_index: 1,
            target: target.map(String::from),
            is_external: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_hyperlink_tiers() {
        let c = test_criterion("hyperlinks", 1.0);
        let with_links = |links: Vec<HyperlinkInfo>| {
            let mut p = deck(vec![Slide::new(1)]);
            p.hyperlinks = links;
            check_hyperlinks(&doc(p), &c)
        };

        assert_eq!(with_links(vec![]).points, 0.0);
        assert_eq!(with_links(vec![link(None), link(Some(""))]).points, 0.25);
        assert_eq!(with_links(vec![link(Some("https://a")), link(None)]).points, 0.5);

        let minor = with_links(vec![
            link(Some("https://a")),
            link(Some("https://b")),
            link(Some("https://c")),
            link(Some("   ")),
        ]);
        assert_eq!(minor.points, 0.75);
        assert!(minor.reason.contains("4/4 valid"), "{}", minor.reason);
        assert!(minor.reason.contains("1 wrong target"), "{}", minor.reason);

        let full = with_links(vec![link(Some("https://a")), link(Some("slide3.xml"))]);
        assert_eq!(full.points, 1.0);
        assert!(full.passed);
    }

    fn boxed(x: i64, y: i64, w: i64, h: i64) -> Shape {
        let mut shape = Shape::new(1, "box", ShapeOrigin::Shape);
        shape.transform = Some(Transform::new(x, y, w, h));
        shape
    }

    #[test]
    fn test_layout_balance() {
        let size = SlideSize {
            width: 1000,
            height: 1000,
        };
        let mut centered = Slide::new(1);
        centered.shapes.push(boxed(250, 250, 500, 500));
        assert!((layout_balance(&centered, size) - 1.0).abs() < 1e-9);

        let mut corner = Slide::new(2);
        corner.shapes.push(boxed(0, 0, 10, 10));
        assert_eq!(layout_balance(&corner, size), 0.0);

        assert_eq!(layout_balance(&Slide::new(3), size), NEUTRAL_BALANCE);

        let mut symmetric = Slide::new(4);
        symmetric.shapes.push(boxed(0, 450, 100, 100));
        symmetric.shapes.push(boxed(900, 450, 100, 100));
        assert!((layout_balance(&symmetric, size) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_creativity_combines_diversity_and_balance() {
        let c = test_criterion("creativity", 1.0);
        let mut p = deck(vec![Slide::new(1)]);
        p.objects.by_kind.insert(ObjectKind::Picture, 3);
        p.objects.total = 3;
        p.objects.density = 3.0;
        // diversity = (1/5 + 1) / 2 = 0.6, balance = 0.5 -> 0.55
        let result = check_creativity(&doc(p), &c);
        assert!((result.points - 0.55).abs() < 1e-9);
    }

    fn titled(index: usize, font: &str, size: f64, color: &str) -> Slide {
        let mut slide = Slide::new(index);
        let mut shape = Shape::new(2, "Title", ShapeOrigin::Shape);
        shape.placeholder = Some(crate::model::Placeholder {
            kind: "title".into(),
            idx: None,
        });
        let mut run = TextRun::new("Heading");
        run.font = font.into();
        run.size = size;
        run.color = Some(color.into());
        let mut para = Paragraph::new(0);
        para.runs.push(run);
        shape.paragraphs.push(para);
        slide.shapes.push(shape);
        slide
    }

    #[test]
    fn test_theme_scoring() {
        let c = test_criterion("theme", 1.0);
        let mut p = deck(vec![
            titled(1, "Arial", 40.0, "FF0000"),
            titled(2, "Arial", 40.0, "00FF00"),
        ]);
        p.theme.name = "Office Theme".into();
        // default theme, 1 font and consistent titles, 2 colors
        let result = check_theme(&doc(p.clone()), &c);
        assert!((result.points - 0.8).abs() < 1e-9, "{}", result.points);

        p.theme.name = "Sunrise".into();
        assert!((check_theme(&doc(p), &c).points - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slide_master() {
        let c = test_criterion("slide_master", 1.0);
        let mut p = deck(vec![Slide::new(1)]);
        p.slide_master.used_layouts = vec!["Title Slide".into(), "Title and Content".into()];
        assert!((check_slide_master(&doc(p.clone()), &c).points - 0.25).abs() < 1e-9);

        p.slide_master.used_layouts.push("Two Content".into());
        p.slide_master.custom_shape_count = 1;
        assert_eq!(check_slide_master(&doc(p), &c).points, 1.0);
    }

    fn transition(index: usize, kind: &str) -> TransitionInfo {
        TransitionInfo {
            slide_index: index,
            transition: Transition {
                kind: kind.into(),
                advance_on_click: true,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_transitions() {
        let c = test_criterion("transitions", 1.0);
        let mut p = deck(vec![Slide::new(1), Slide::new(2)]);
        assert_eq!(check_transitions(&doc(p.clone()), &c).points, 0.0);

        p.transitions = vec![transition(1, "fade")];
        assert!((check_transitions(&doc(p.clone()), &c).points - 0.35).abs() < 1e-9);

        p.transitions.push(transition(2, "push"));
        assert!((check_transitions(&doc(p), &c).points - 1.0).abs() < 1e-9);
    }

    fn animated(index: usize, effects: &[EffectType]) -> SlideAnimation {
        let children = effects
            .iter()
            .enumerate()
            .map(|(i, e)| AnimationNode::effect(Timing::default(), i as u32 + 2, *e))
            .collect();
        let timeline = AnimationNode::sequence(Timing::default(), children);
        SlideAnimation {
            slide_index: index,
            effect_count: effects.len(),
            timeline,
        }
    }

    #[test]
    fn test_animation_tiers() {
        let c = test_criterion("animations", 1.0);
        let mut p = deck(vec![Slide::new(1), Slide::new(2)]);
        assert_eq!(check_animations(&doc(p.clone()), &c).points, 0.0);

        p.animations = vec![animated(1, &[EffectType::Fade, EffectType::FlyIn])];
        assert_eq!(check_animations(&doc(p.clone()), &c).points, 0.5);

        p.animations = vec![animated(1, &[EffectType::Fade]), animated(2, &[EffectType::Fade])];
        assert_eq!(check_animations(&doc(p.clone()), &c).points, 0.75);

        p.animations[1] = animated(2, &[EffectType::FlyIn]);
        assert_eq!(check_animations(&doc(p), &c).points, 1.0);
    }

    #[test]
    fn test_outline_share() {
        let c = test_criterion("outline", 2.0);
        let mut p = deck(vec![Slide::new(1)]);
        p.outline.titles_ok = true;
        p.outline.levels_ok = true;
        let result = check_outline(&doc(p), &c);
        assert_eq!(result.points, 1.0);
        assert!(result.reason.contains("hierarchy"));
    }

    #[test]
    fn test_smart_art_and_objects() {
        let c = test_criterion("smartart", 1.0);
        let mut slide = Slide::new(1);
        let mut frame = Shape::new(4, "Diagram", ShapeOrigin::GraphicFrame);
        let mut root = SmartArtNode::new("A");
        root.children.push(SmartArtNode::new("B"));
        frame.smart_art = Some(SmartArt {
            layout: None,
            roots: vec![root],
        });
        slide.shapes.push(frame);
        let mut p = deck(vec![slide]);
        assert_eq!(check_smart_art(&doc(p.clone()), &c).points, 0.5);

        if let Some(art) = p.slides[0].shapes[0].smart_art.as_mut() {
            art.roots.push(SmartArtNode::new("C"));
        }
        assert_eq!(check_smart_art(&doc(p.clone()), &c).points, 1.0);

        let oc = test_criterion("objects", 1.0);
        p.objects.by_kind.insert(ObjectKind::Table, 1);
        assert_eq!(check_objects(&doc(p.clone()), &oc).points, 0.5);
        p.objects.by_kind.insert(ObjectKind::Chart, 2);
        assert_eq!(check_objects(&doc(p), &oc).points, 1.0);
    }
}
