//! Animation timeline reconstruction from `p:timing`.

use crate::model::{AnimationKind, AnimationNode, EffectType, Timing, Trigger};
use crate::xml::XmlNode;

/// Deepest container nesting followed before the walk stops.
pub const MAX_ANIMATION_DEPTH: usize = 32;

/// Rebuild the timeline of a slide's `p:timing` element.
///
/// Returns `None` when the slide has no effects that target a shape.
pub fn parse_timing(timing: &XmlNode) -> Option<AnimationNode> {
    let root = timing.find(&["p:tnLst", "p:par"])?;
    parse_container(root, 0)
}

fn parse_container(node: &XmlNode, depth: usize) -> Option<AnimationNode> {
    if depth > MAX_ANIMATION_DEPTH {
        log::debug!("Animation nesting exceeds {} levels, truncating", MAX_ANIMATION_DEPTH);
        return None;
    }

    let ctn = node.child("p:cTn")?;
    let timing = timing_of(ctn);

    if ctn.attr("presetClass").is_some() {
        return parse_effect(ctn, timing);
    }

    let children: Vec<AnimationNode> = ctn
        .child("p:childTnLst")
        .map(|list| {
            list.children
                .iter()
                .filter(|c| c.name == "p:par" || c.name == "p:seq")
                .filter_map(|c| parse_container(c, depth + 1))
                .collect()
        })
        .unwrap_or_default();

    if children.is_empty() {
        return None;
    }

    Some(if node.name == "p:seq" {
        AnimationNode::sequence(timing, children)
    } else {
        AnimationNode::parallel(timing, children)
    })
}

fn parse_effect(ctn: &XmlNode, timing: Timing) -> Option<AnimationNode> {
    let target = ctn
        .descendant("p:spTgt")
        .and_then(|t| t.attr("spid"))
        .and_then(|id| id.trim().parse::<u32>().ok());

    let Some(target_shape_id) = target else {
        log::debug!("Dropping animation effect without a shape target");
        return None;
    };

    Some(AnimationNode {
        timing,
        kind: AnimationKind::Effect {
            target_shape_id,
            effect_type: classify_effect(ctn),
            direction: ctn
                .attr("presetSubtype")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        },
    })
}

/// Classify an effect by the behaviors it contains.
fn classify_effect(ctn: &XmlNode) -> EffectType {
    let behaviors: Vec<&XmlNode> = ctn.descendants().collect();

    let animates = |attr: &str| {
        behaviors.iter().any(|n| {
            n.name == "p:anim"
                && n.descendants_named("p:attrName")
                    .any(|a| a.text.trim() == attr)
        })
    };

    if behaviors.iter().any(|n| n.name == "p:animMotion") || animates("ppt_x") || animates("ppt_y") {
        return EffectType::FlyIn;
    }

    let fade_filter = behaviors.iter().any(|n| {
        n.name == "p:animEffect"
            && n.attr("filter")
                .is_some_and(|f| f.to_ascii_lowercase().contains("fade"))
    });
    if fade_filter || animates("style.opacity") {
        return EffectType::Fade;
    }

    EffectType::Unknown
}

fn timing_of(ctn: &XmlNode) -> Timing {
    let delay = ctn
        .find(&["p:stCondLst", "p:cond"])
        .and_then(|c| c.attr("delay"));

    Timing {
        trigger: ctn
            .attr("nodeType")
            .map(Trigger::from_node_type)
            .unwrap_or_default(),
        delay_ms: millis(delay),
        duration_ms: millis(ctn.attr("dur")),
    }
}

/// Parse a millisecond attribute; `indefinite` and garbage are 0.
fn millis(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0)
}
