//! SmartArt data-model parsing and tree reconstruction.
//!
//! A diagram's data part stores a flat point list plus `parOf` connections.
//! Points are first flattened into a pre-order list annotated with levels,
//! then rebuilt into a forest with a bounded parent stack.

use std::collections::{HashMap, HashSet};

use crate::model::{LeveledPoint, SmartArt, SmartArtNode};
use crate::xml::XmlNode;

/// Size of the parent stack. Points at this level or deeper become roots.
pub const MAX_SMARTART_DEPTH: usize = 16;

/// Point types that carry no content.
const NON_CONTENT_TYPES: &[&str] = &["doc", "parTrans", "sibTrans", "pres"];

/// Rebuild a forest from a flat list of leveled points.
///
/// Level 0 starts a new root and resets the stack. A point at level `L`
/// attaches to the most recent point recorded at `L - 1`; if there is none,
/// or `L` is beyond the stack, it becomes a root so that no content is lost.
/// Only `stack[L]` is replaced, deeper entries stay in place.
pub fn rebuild_tree(points: &[LeveledPoint]) -> Vec<SmartArtNode> {
    // Arena of (node, children indices) so children can be attached by index
    let mut arena: Vec<(String, Vec<usize>)> = Vec::with_capacity(points.len());
    let mut roots: Vec<usize> = Vec::new();
    let mut stack: [Option<usize>; MAX_SMARTART_DEPTH] = [None; MAX_SMARTART_DEPTH];

    for point in points {
        let level = point.level;
        let idx = arena.len();
        arena.push((point.text.clone(), Vec::new()));

        if level >= MAX_SMARTART_DEPTH {
            log::debug!("SmartArt point at level {} kept as a root", level);
            roots.push(idx);
            continue;
        }

        if level == 0 {
            stack = [None; MAX_SMARTART_DEPTH];
            roots.push(idx);
        } else {
            match stack[level - 1] {
                Some(parent) => arena[parent].1.push(idx),
                None => roots.push(idx),
            }
        }

        stack[level] = Some(idx);
    }

    roots.iter().map(|&idx| build_node(&arena, idx)).collect()
}

fn build_node(arena: &[(String, Vec<usize>)], idx: usize) -> SmartArtNode {
    // Depth is bounded by MAX_SMARTART_DEPTH, so recursion stays shallow
    let (text, children) = &arena[idx];
    SmartArtNode {
        text: text.clone(),
        children: children.iter().map(|&c| build_node(arena, c)).collect(),
    }
}

/// A content point of the data model.
#[derive(Debug, Clone)]
struct Point {
    id: String,
    text: String,
}

/// Flatten a `dgm:dataModel` into leveled points in document order.
///
/// Levels come from `parOf` connections: children of the document point are
/// level 0, their children level 1, and so on. Content points not reachable
/// from the document point are appended at level 0.
pub fn leveled_points(data_model: &XmlNode) -> Vec<LeveledPoint> {
    let mut doc_id: Option<String> = None;
    let mut points: Vec<Point> = Vec::new();

    for pt in data_model.find_all(&["dgm:ptLst", "dgm:pt"]) {
        let id = pt.attr("modelId").unwrap_or_default().to_string();
        let kind = pt.attr("type").unwrap_or("node");
        if kind == "doc" {
            doc_id.get_or_insert(id);
            continue;
        }
        if NON_CONTENT_TYPES.contains(&kind) {
            continue;
        }
        points.push(Point {
            id,
            text: point_text(pt),
        });
    }

    // parent id -> [(order, child id)]
    let mut children: HashMap<&str, Vec<(i64, &str)>> = HashMap::new();
    for cxn in data_model.find_all(&["dgm:cxnLst", "dgm:cxn"]) {
        if cxn.attr("type").is_some_and(|t| t != "parOf") {
            continue;
        }
        let (Some(src), Some(dest)) = (cxn.attr("srcId"), cxn.attr("destId")) else {
            continue;
        };
        children
            .entry(src)
            .or_default()
            .push((cxn.attr_i64("srcOrd"), dest));
    }
    for list in children.values_mut() {
        list.sort_by_key(|(ord, _)| *ord);
    }

    let by_id: HashMap<&str, &Point> = points.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut out = Vec::with_capacity(points.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(points.len());

    // Iterative pre-order walk: (id, level)
    let mut pending: Vec<(&str, usize)> = Vec::new();
    if let Some(doc) = doc_id.as_deref() {
        if let Some(roots) = children.get(doc) {
            pending.extend(roots.iter().rev().map(|(_, id)| (*id, 0)));
        }
    }
    while let Some((id, level)) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }

        let Some(point) = by_id.get(id) else {
            continue;
        };
        out.push(LeveledPoint::new(point.text.clone(), level));
        if let Some(kids) = children.get(id) {
            pending.extend(kids.iter().rev().map(|(_, kid)| (*kid, level + 1)));
        }
    }

    for point in &points {
        if !visited.contains(point.id.as_str()) {
            out.push(LeveledPoint::new(point.text.clone(), 0));
        }
    }

    out
}

fn point_text(pt: &XmlNode) -> String {
    pt.child("dgm:t")
        .map(|t| {
            t.children_named("a:p")
                .map(|p| {
                    p.descendants_named("a:t")
                        .map(|r| r.text.as_str())
                        .collect::<String>()
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// Parse a diagram data part into a [`SmartArt`] tree.
pub fn parse_smart_art(data_model: &XmlNode, layout: Option<String>) -> SmartArt {
    let points = leveled_points(data_model);
    log::debug!("SmartArt data model has {} content points", points.len());

    SmartArt {
        layout,
        roots: rebuild_tree(&points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(text: &str, level: usize) -> LeveledPoint {
        LeveledPoint::new(text, level)
    }

    #[test]
    fn test_rebuild_two_roots() {
        let roots = rebuild_tree(&[p("A", 0), p("B", 1), p("C", 1), p("D", 0)]);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].text, "A");
        let kids: Vec<_> = roots[0].children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(kids, vec!["B", "C"]);
        assert_eq!(roots[1].text, "D");
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let roots = rebuild_tree(&[p("X", 2), p("A", 0), p("B", 1)]);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].text, "X");
        assert_eq!(roots[1].children[0].text, "B");
    }

    #[test]
    fn test_deeper_stack_entries_survive() {
        let roots = rebuild_tree(&[p("A", 0), p("B", 1), p("B1", 2), p("C", 1), p("C1", 2)]);
        let a = &roots[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].children[0].text, "B1");
        assert_eq!(a.children[1].children[0].text, "C1");

        // Bx is still recorded at level 2 when Z arrives after C
        let roots = rebuild_tree(&[p("A", 0), p("B", 1), p("Bx", 2), p("C", 1), p("Z", 3)]);
        assert_eq!(roots.len(), 1);
        let b = &roots[0].children[0];
        assert_eq!(b.text, "B");
        assert_eq!(b.children[0].text, "Bx");
        assert_eq!(b.children[0].children[0].text, "Z");
        assert_eq!(roots[0].children[1].text, "C");
        assert!(roots[0].children[1].children.is_empty());
    }

    #[test]
    fn test_levels_beyond_stack_become_roots() {
        let mut points: Vec<_> = (0..40).map(|i| p(&format!("n{}", i), i)).collect();
        points.push(p("tail", 100));
        let roots = rebuild_tree(&points);

        // n0..n15 chain, every deeper point is its own root
        assert_eq!(roots.len(), 1 + (40 - MAX_SMARTART_DEPTH) + 1);
        assert_eq!(roots[0].depth(), MAX_SMARTART_DEPTH);
        assert_eq!(roots[1].text, format!("n{}", MAX_SMARTART_DEPTH));
        assert_eq!(roots.last().map(|r| r.text.as_str()), Some("tail"));
        let total: usize = roots.iter().map(SmartArtNode::count).sum();
        assert_eq!(total, 41);
    }

    #[test]
    fn test_level_beyond_stack_keeps_parents() {
        let roots = rebuild_tree(&[p("A", 0), p("deep", 16), p("B", 1)]);
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1].text, "deep");
        assert_eq!(roots[0].children[0].text, "B");
    }

    #[test]
    fn test_empty_input() {
        assert!(rebuild_tree(&[]).is_empty());
    }

    const DATA: &str = r#"<dgm:dataModel xmlns:dgm="d" xmlns:a="a">
  <dgm:ptLst>
    <dgm:pt modelId="0" type="doc"/>
    <dgm:pt modelId="1"><dgm:t><a:p><a:r><a:t>Plan</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="2"><dgm:t><a:p><a:r><a:t>Research</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="3"><dgm:t><a:p><a:r><a:t>Build</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="4"><dgm:t><a:p><a:r><a:t>Ship</a:t></a:r></a:p></dgm:t></dgm:pt>
    <dgm:pt modelId="9" type="parTrans"/>
    <dgm:pt modelId="10" type="pres"/>
  </dgm:ptLst>
  <dgm:cxnLst>
    <dgm:cxn modelId="20" srcId="0" destId="4" srcOrd="1"/>
    <dgm:cxn modelId="21" srcId="0" destId="1" srcOrd="0"/>
    <dgm:cxn modelId="22" srcId="1" destId="3" srcOrd="1"/>
    <dgm:cxn modelId="23" srcId="1" destId="2" srcOrd="0"/>
    <dgm:cxn modelId="24" type="presOf" srcId="1" destId="10"/>
  </dgm:cxnLst>
</dgm:dataModel>"#;

    #[test]
    fn test_leveled_points_follow_connections() {
        let points = leveled_points(&XmlNode::parse(DATA));
        assert_eq!(
            points,
            vec![p("Plan", 0), p("Research", 1), p("Build", 1), p("Ship", 0)]
        );
    }

    #[test]
    fn test_parse_smart_art() {
        let art = parse_smart_art(&XmlNode::parse(DATA), Some("hierarchy1".into()));
        assert_eq!(art.node_count(), 4);
        assert_eq!(art.depth(), 2);
        assert_eq!(art.layout.as_deref(), Some("hierarchy1"));
    }

    #[test]
    fn test_unconnected_points_kept_as_roots() {
        let data = r#"<dgm:dataModel xmlns:dgm="d" xmlns:a="a"><dgm:ptLst>
            <dgm:pt modelId="1"><dgm:t><a:p><a:r><a:t>Loose</a:t></a:r></a:p></dgm:t></dgm:pt>
        </dgm:ptLst></dgm:dataModel>"#;
        let points = leveled_points(&XmlNode::parse(data));
        assert_eq!(points, vec![p("Loose", 0)]);
    }
}
