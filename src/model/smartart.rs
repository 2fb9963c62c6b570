//! SmartArt diagram trees.

use serde::{Deserialize, Serialize};

/// A SmartArt diagram reconstructed into a forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartArt {
    /// Layout definition id (`urn:microsoft.com/office/officeart/2005/8/layout/hierarchy1`)
    pub layout: Option<String>,

    /// Root nodes in document order
    pub roots: Vec<SmartArtNode>,
}

impl SmartArt {
    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(SmartArtNode::count).sum()
    }

    /// Depth of the deepest branch (0 when empty, 1 for roots only).
    pub fn depth(&self) -> usize {
        self.roots.iter().map(SmartArtNode::depth).max().unwrap_or(0)
    }

    /// Check if the diagram has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// A node in a SmartArt tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmartArtNode {
    /// Node text
    pub text: String,

    /// Child nodes
    pub children: Vec<SmartArtNode>,
}

impl SmartArtNode {
    /// Create a leaf node.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(SmartArtNode::count).sum::<usize>()
    }

    /// Depth of this subtree.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SmartArtNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// A flat SmartArt point annotated with its level, the input of the tree
/// rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeveledPoint {
    /// Point text
    pub text: String,

    /// Nesting level (0 = root)
    pub level: usize,
}

impl LeveledPoint {
    /// Create a point.
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}
