//! Small DrawingML accessors shared by the presentation and word extractors.

use crate::model::{GradientFill, OuterShadow, ThemeData, Transform, WordArt};
use crate::xml::XmlNode;

/// Elements that carry a color value.
const COLOR_ELEMENTS: &[&str] = &["a:srgbClr", "a:schemeClr", "a:sysClr", "a:prstClr"];

/// Read the transform of an `a:xfrm` / `p:xfrm` node.
pub fn transform_of(xfrm: &XmlNode) -> Option<Transform> {
    let off = xfrm.child("a:off");
    let ext = xfrm.child("a:ext");
    if off.is_none() && ext.is_none() {
        return None;
    }
    Some(Transform::new(
        off.map_or(0, |n| n.attr_i64("x")),
        off.map_or(0, |n| n.attr_i64("y")),
        ext.map_or(0, |n| n.attr_i64("cx")),
        ext.map_or(0, |n| n.attr_i64("cy")),
    ))
}

/// Color of the first color element directly under `parent`.
///
/// Scheme colors are resolved against the theme when one is given.
pub fn color_of(parent: &XmlNode, theme: Option<&ThemeData>) -> Option<String> {
    let node = parent
        .children
        .iter()
        .find(|c| COLOR_ELEMENTS.contains(&c.name.as_str()))?;

    match node.name.as_str() {
        "a:srgbClr" => node.attr("val").map(|v| v.to_uppercase()),
        "a:sysClr" => node
            .attr("lastClr")
            .or_else(|| node.attr("val"))
            .map(|v| v.to_uppercase()),
        "a:schemeClr" => {
            let slot = node.attr("val")?;
            theme
                .and_then(|t| t.color(slot))
                .map(|v| v.to_uppercase())
                .or_else(|| Some(slot.to_string()))
        }
        _ => node.attr("val").map(str::to_string),
    }
}

/// Solid fill color of a properties node (`a:rPr`, `p:spPr`).
pub fn solid_fill_of(props: &XmlNode, theme: Option<&ThemeData>) -> Option<String> {
    props
        .child("a:solidFill")
        .and_then(|fill| color_of(fill, theme))
}

/// Gradient fill of a properties node, stops ordered by position.
pub fn gradient_of(props: &XmlNode, theme: Option<&ThemeData>) -> Option<GradientFill> {
    let grad = props.child("a:gradFill")?;
    let mut stops: Vec<(i64, String)> = grad
        .find_all(&["a:gsLst", "a:gs"])
        .into_iter()
        .filter_map(|gs| color_of(gs, theme).map(|c| (gs.attr_i64("pos"), c)))
        .collect();
    stops.sort_by_key(|(pos, _)| *pos);

    Some(GradientFill {
        stops: stops.into_iter().map(|(_, c)| c).collect(),
    })
}

/// Outer shadow in the effect list of a properties node.
pub fn outer_shadow_of(props: &XmlNode, theme: Option<&ThemeData>) -> Option<OuterShadow> {
    let effects = props.child("a:effectLst")?;
    let shadow = effects
        .child("a:outerShdw")
        .or_else(|| effects.child("a:prstShdw"))?;

    Some(OuterShadow {
        kind: shadow.local_name().to_string(),
        color: color_of(shadow, theme),
        blur: shadow.attr_i64("blurRad"),
        direction: shadow.attr_i64("dir"),
    })
}

/// Preset text warp of a body properties node, ignoring the no-op preset.
pub fn text_warp_of(body_pr: &XmlNode) -> Option<String> {
    body_pr
        .child("a:prstTxWarp")
        .and_then(|w| w.attr("prst"))
        .filter(|prst| *prst != "textNoShape")
        .map(str::to_string)
}

/// Collect WordArt effects from run properties and the body's warp.
///
/// Returns `None` when no effect is present.
pub fn word_art_of<'a, I>(run_props: I, body_pr: Option<&XmlNode>, theme: Option<&ThemeData>) -> Option<WordArt>
where
    I: IntoIterator<Item = &'a XmlNode>,
{
    let mut art = WordArt {
        warp: body_pr.and_then(text_warp_of),
        ..Default::default()
    };

    for props in run_props {
        if art.gradient.is_none() {
            art.gradient = gradient_of(props, theme);
        }
        if art.shadow.is_none() {
            art.shadow = outer_shadow_of(props, theme);
        }
        if art.gradient.is_some() && art.shadow.is_some() {
            break;
        }
    }

    art.has_effect().then_some(art)
}

/// Parse a shape id, `0` when absent or out of range.
pub fn shape_id_of(c_nv_pr: Option<&XmlNode>) -> u32 {
    c_nv_pr
        .map(|n| n.attr_i64("id"))
        .and_then(|id| u32::try_from(id).ok())
        .unwrap_or(0)
}
