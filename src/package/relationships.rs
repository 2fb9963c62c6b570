//! Relationship parts (`*.rels`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::xml::XmlNode;

/// A single relationship entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship id (`rId3`)
    pub id: String,

    /// Relationship type URI
    pub rel_type: String,

    /// Resolved target: an absolute part path, or the raw URL for external targets
    pub target: String,

    /// Whether the target lives outside the package
    pub external: bool,
}

impl Relationship {
    /// Check whether the relationship type ends with the given short name
    /// (e.g. `slideLayout`, `hyperlink`).
    pub fn is_type(&self, short: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(short)
    }
}

/// Relationship map of one part, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
    order: Vec<String>,
}

impl Relationships {
    /// Build from a parsed `Relationships` root, resolving internal targets
    /// against the directory of `source_part`.
    pub fn from_xml(root: &XmlNode, source_part: &str) -> Self {
        let mut rels = Self::default();
        for node in root.children_named("Relationship") {
            let Some(id) = node.attr("Id") else {
                continue;
            };
            let raw_target = node.attr("Target").unwrap_or_default();
            let external = node.attr("TargetMode") == Some("External");
            let target = if external {
                raw_target.to_string()
            } else {
                resolve_target(source_part, raw_target)
            };

            rels.insert(Relationship {
                id: id.to_string(),
                rel_type: node.attr("Type").unwrap_or_default().to_string(),
                target,
                external,
            });
        }
        rels
    }

    /// Add a relationship.
    pub fn insert(&mut self, rel: Relationship) {
        if !self.by_id.contains_key(&rel.id) {
            self.order.push(rel.id.clone());
        }
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Look up a relationship by id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Resolved target of a relationship id.
    pub fn target(&self, id: &str) -> Option<&str> {
        self.get(id).map(|r| r.target.as_str())
    }

    /// First relationship of the given short type, in document order.
    pub fn first_of_type(&self, short: &str) -> Option<&Relationship> {
        self.iter().find(|r| r.is_type(short))
    }

    /// All relationships of the given short type, in document order.
    pub fn all_of_type<'a>(&'a self, short: &'a str) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.iter().filter(move |r| r.is_type(short))
    }

    /// Iterate in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Resolve a relative relationship target against the part that owns it.
///
/// `resolve_target("ppt/slides/slide1.xml", "../slideLayouts/slideLayout2.xml")`
/// yields `ppt/slideLayouts/slideLayout2.xml`. Absolute targets (`/word/x.xml`)
/// are taken from the package root.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    let target = target.replace('\\', "/");
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        let mut dir: Vec<&str> = source_part.split('/').collect();
        dir.pop();
        dir
    };

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
