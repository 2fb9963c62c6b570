//! Shape-tree extraction for slides, layouts and masters.

use crate::model::{
    ChartData, Hyperlink, Paragraph, Placeholder, Shape, ShapeOrigin, SmartArt, TableData,
    TextRun, Transform,
};
use crate::package::{Package, Relationships};
use crate::xml::XmlNode;

use super::drawing::{shape_id_of, solid_fill_of, transform_of, word_art_of};
use super::options::ExtractOptions;
use super::smartart::parse_smart_art;
use super::style::{placeholder_of, RunSource, StyleContext};

/// Deepest `p:grpSp` nesting that is flattened.
const MAX_GROUP_DEPTH: usize = 16;

const URI_TABLE: &str = "drawingml/2006/table";
const URI_CHART: &str = "drawingml/2006/chart";
const URI_DIAGRAM: &str = "drawingml/2006/diagram";

/// Action prefix of link targets that jump within the show.
const SHOW_JUMP_ACTION: &str = "ppaction://hlinkshowjump";

/// Everything a shape needs from its surroundings.
#[derive(Clone, Copy)]
pub struct ShapeContext<'a> {
    /// Package for chart and diagram parts
    pub package: &'a Package,
    /// Relationships of the part that owns the shapes
    pub rels: &'a Relationships,
    /// Style chain of the part
    pub style: StyleContext<'a>,
    /// Extraction options
    pub options: &'a ExtractOptions,
}

/// Extract all shapes of a `p:spTree`, flattening groups.
pub fn extract_shapes(sp_tree: &XmlNode, ctx: &ShapeContext<'_>) -> Vec<Shape> {
    let mut shapes = Vec::new();
    collect_shapes(sp_tree, ctx, 0, &mut shapes);
    shapes
}

fn collect_shapes(tree: &XmlNode, ctx: &ShapeContext<'_>, depth: usize, out: &mut Vec<Shape>) {
    for node in &tree.children {
        let shape = match node.name.as_str() {
            "p:sp" => parse_sp(node, ctx),
            "p:pic" => parse_pic(node, ctx),
            "p:cxnSp" => parse_connector(node, ctx),
            "p:graphicFrame" => parse_graphic_frame(node, ctx),
            "p:grpSp" => {
                if depth < MAX_GROUP_DEPTH {
                    collect_shapes(node, ctx, depth + 1, out);
                } else {
                    log::debug!("Group nesting deeper than {}, skipping", MAX_GROUP_DEPTH);
                }
                continue;
            }
            "mc:AlternateContent" => {
                if let Some(branch) = node.child("mc:Choice").or_else(|| node.child("mc:Fallback")) {
                    collect_shapes(branch, ctx, depth, out);
                }
                continue;
            }
            _ => continue,
        };
        if let Some(shape) = shape {
            out.push(shape);
        }
    }
}

/// Common non-visual properties.
fn base_shape(node: &XmlNode, nv_name: &str, origin: ShapeOrigin, ctx: &ShapeContext<'_>) -> Shape {
    let c_nv_pr = node.find(&[nv_name, "p:cNvPr"]);
    let mut shape = Shape::new(
        shape_id_of(c_nv_pr),
        c_nv_pr.and_then(|n| n.attr("name")).unwrap_or_default(),
        origin,
    );
    shape.placeholder = placeholder_of(node);
    shape.hyperlink = c_nv_pr
        .and_then(|n| n.child("a:hlinkClick"))
        .map(|click| hyperlink_of(click, ctx.rels));
    shape
}

/// Own transform, or the one inherited by a placeholder.
fn resolve_transform(own: Option<Transform>, placeholder: Option<&Placeholder>, ctx: &ShapeContext<'_>) -> Option<Transform> {
    own.or_else(|| {
        let ph = placeholder?;
        let inherited = |sp: &XmlNode| sp.find(&["p:spPr", "a:xfrm"]).and_then(transform_of);
        ctx.style
            .layout_placeholder(ph)
            .and_then(inherited)
            .or_else(|| ctx.style.master_placeholder(ph).and_then(inherited))
    })
}

fn parse_sp(node: &XmlNode, ctx: &ShapeContext<'_>) -> Option<Shape> {
    let mut shape = base_shape(node, "p:nvSpPr", ShapeOrigin::Shape, ctx);
    let sp_pr = node.child("p:spPr");

    let own = sp_pr.and_then(|p| p.child("a:xfrm")).and_then(transform_of);
    shape.transform = resolve_transform(own, shape.placeholder.as_ref(), ctx);
    if shape.transform.is_none() {
        log::debug!("Skipping shape {} without transform", shape.id);
        return None;
    }

    shape.geometry = sp_pr
        .and_then(|p| p.child("a:prstGeom"))
        .and_then(|g| g.attr("prst"))
        .map(str::to_string);
    shape.fill_color = sp_pr.and_then(|p| solid_fill_of(p, Some(ctx.style.theme)));

    if let Some(body) = node.child("p:txBody") {
        shape.paragraphs = parse_text_body(body, node, shape.placeholder.as_ref(), ctx);

        // shape-level fill and effects count once the shape carries text
        let has_text = shape.paragraphs.iter().any(|p| !p.plain_text().trim().is_empty());
        let run_props = body
            .children_named("a:p")
            .flat_map(|p| p.children.iter())
            .filter_map(|r| r.child("a:rPr"))
            .chain(sp_pr.filter(|_| has_text));
        shape.word_art = word_art_of(run_props, body.child("a:bodyPr"), Some(ctx.style.theme));
    }

    Some(shape)
}

fn parse_pic(node: &XmlNode, ctx: &ShapeContext<'_>) -> Option<Shape> {
    let mut shape = base_shape(node, "p:nvPicPr", ShapeOrigin::Picture, ctx);
    let own = node.find(&["p:spPr", "a:xfrm"]).and_then(transform_of);
    shape.transform = resolve_transform(own, shape.placeholder.as_ref(), ctx);
    if shape.transform.is_none() {
        log::debug!("Skipping picture {} without transform", shape.id);
        return None;
    }

    shape.has_media = node.find(&["p:nvPicPr", "p:nvPr"]).is_some_and(|nv| {
        nv.child("a:videoFile").is_some()
            || nv.child("a:audioFile").is_some()
            || nv.descendant("p14:media").is_some()
    });
    Some(shape)
}

fn parse_connector(node: &XmlNode, ctx: &ShapeContext<'_>) -> Option<Shape> {
    let mut shape = base_shape(node, "p:nvCxnSpPr", ShapeOrigin::Connector, ctx);
    shape.transform = node.find(&["p:spPr", "a:xfrm"]).and_then(transform_of);
    shape.transform?;
    shape.geometry = node
        .find(&["p:spPr", "a:prstGeom"])
        .and_then(|g| g.attr("prst"))
        .map(str::to_string);
    Some(shape)
}

fn parse_graphic_frame(node: &XmlNode, ctx: &ShapeContext<'_>) -> Option<Shape> {
    let mut shape = base_shape(node, "p:nvGraphicFramePr", ShapeOrigin::GraphicFrame, ctx);
    let own = node.child("p:xfrm").and_then(transform_of);
    shape.transform = resolve_transform(own, shape.placeholder.as_ref(), ctx);
    if shape.transform.is_none() {
        log::debug!("Skipping graphic frame {} without transform", shape.id);
        return None;
    }

    let Some(data) = node.find(&["a:graphic", "a:graphicData"]) else {
        return Some(shape);
    };
    let uri = data.attr("uri").unwrap_or_default();

    if uri.ends_with(URI_TABLE) {
        shape.table = data.child("a:tbl").map(parse_table);
    } else if uri.ends_with(URI_CHART) {
        shape.chart = data
            .child("c:chart")
            .and_then(|c| c.attr("r:id"))
            .and_then(|id| ctx.rels.target(id))
            .and_then(|part| ctx.package.read_xml(part))
            .map(|root| parse_chart(&root));
    } else if uri.ends_with(URI_DIAGRAM) && ctx.options.extract_smart_art {
        shape.smart_art = data
            .child("dgm:relIds")
            .map(|ids| load_smart_art(ids, ctx.package, ctx.rels));
    }

    Some(shape)
}

/// Load a diagram through its `dgm:relIds` references.
pub(crate) fn load_smart_art(rel_ids: &XmlNode, package: &Package, rels: &Relationships) -> SmartArt {
    let layout = rel_ids
        .attr("r:lo")
        .and_then(|id| rels.target(id))
        .and_then(|part| package.read_xml(part))
        .and_then(|root| root.attr("uniqueId").map(str::to_string));

    match rel_ids
        .attr("r:dm")
        .and_then(|id| rels.target(id))
        .and_then(|part| package.read_xml(part))
    {
        Some(data) => parse_smart_art(&data, layout),
        None => {
            log::debug!("Diagram data part not found");
            SmartArt {
                layout,
                roots: Vec::new(),
            }
        }
    }
}

/// Parse the paragraphs of a text body with fully resolved run styles.
fn parse_text_body(body: &XmlNode, shape: &XmlNode, placeholder: Option<&Placeholder>, ctx: &ShapeContext<'_>) -> Vec<Paragraph> {
    let bulleted_by_default = placeholder.is_some_and(|p| matches!(p.kind.as_str(), "body" | "obj"));

    body.children_named("a:p")
        .map(|p| {
            let ppr = p.child("a:pPr");
            let level = ppr
                .map(|n| n.attr_i64("lvl").clamp(0, 8) as u8)
                .unwrap_or(0);
            let has_bullet = match ppr {
                Some(n) if n.child("a:buNone").is_some() => false,
                Some(n) if n.child("a:buChar").is_some() || n.child("a:buAutoNum").is_some() => true,
                _ => bulleted_by_default,
            };

            let runs = p
                .children
                .iter()
                .filter(|r| r.name == "a:r" || r.name == "a:fld")
                .map(|r| {
                    let rpr = r.child("a:rPr");
                    let style = ctx.style.resolve(RunSource {
                        run_pr: rpr,
                        para_pr: ppr,
                        shape: Some(shape),
                        placeholder,
                        level,
                    });
                    TextRun {
                        text: r.child("a:t").map(|t| t.text.clone()).unwrap_or_default(),
                        is_bold: style.is_bold,
                        is_italic: style.is_italic,
                        font: style.font,
                        size: style.size,
                        color: style.color,
                        hyperlink: rpr
                            .and_then(|n| n.child("a:hlinkClick"))
                            .map(|click| hyperlink_of(click, ctx.rels)),
                        list_level: has_bullet.then_some(level),
                    }
                })
                .collect();

            Paragraph {
                runs,
                level,
                has_bullet,
            }
        })
        .collect()
}

/// Resolve an `a:hlinkClick` through the owning part's relationships.
pub fn hyperlink_of(click: &XmlNode, rels: &Relationships) -> Hyperlink {
    let rel_id = click
        .attr("r:id")
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let action = click
        .attr("action")
        .filter(|a| !a.is_empty())
        .map(str::to_string);
    let rel = rel_id.as_deref().and_then(|id| rels.get(id));

    let target = match rel {
        Some(rel) => Some(rel.target.clone()),
        None => action
            .as_deref()
            .filter(|a| a.starts_with(SHOW_JUMP_ACTION))
            .map(str::to_string),
    };

    Hyperlink {
        rel_id,
        target,
        is_external: rel.is_some_and(|r| r.external),
        action,
    }
}

/// Parse an `a:tbl` element.
pub fn parse_table(tbl: &XmlNode) -> TableData {
    let cells: Vec<Vec<String>> = tbl
        .children_named("a:tr")
        .map(|tr| {
            tr.children_named("a:tc")
                .map(|tc| {
                    tc.descendants_named("a:t")
                        .map(|t| t.text.as_str())
                        .collect::<String>()
                })
                .collect()
        })
        .collect();

    let grid = tbl.find_all(&["a:tblGrid", "a:gridCol"]).len();
    let widest = cells.iter().map(Vec::len).max().unwrap_or(0);

    TableData {
        rows: cells.len(),
        columns: grid.max(widest),
        cells,
    }
}

/// Summarize a `c:chartSpace` part.
pub fn parse_chart(chart_space: &XmlNode) -> ChartData {
    let chart = chart_space.child("c:chart");
    let plots: Vec<&XmlNode> = chart
        .and_then(|c| c.child("c:plotArea"))
        .map(|area| {
            area.children
                .iter()
                .filter(|n| n.local_name().ends_with("Chart"))
                .collect()
        })
        .unwrap_or_default();

    let title = chart
        .and_then(|c| c.child("c:title"))
        .map(|t| {
            t.descendants_named("a:t")
                .map(|n| n.text.as_str())
                .collect::<String>()
        })
        .filter(|t| !t.trim().is_empty());

    ChartData {
        chart_type: plots
            .first()
            .map(|p| p.local_name().to_string())
            .unwrap_or_default(),
        series_count: plots.iter().map(|p| p.children_named("c:ser").count()).sum(),
        title,
    }
}
