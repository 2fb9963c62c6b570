//! Animation timeline trees.

use serde::{Deserialize, Serialize};

/// How an animation node starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Starts on mouse click
    OnClick,
    /// Starts together with the previous effect
    WithPrevious,
    /// Starts after the previous effect
    AfterPrevious,
    /// No trigger in markup
    #[default]
    Unspecified,
}

impl Trigger {
    /// Map a `p:cTn@nodeType` value.
    pub fn from_node_type(value: &str) -> Self {
        match value {
            "clickEffect" | "clickPar" => Trigger::OnClick,
            "withEffect" | "withGroup" => Trigger::WithPrevious,
            "afterEffect" | "afterGroup" => Trigger::AfterPrevious,
            _ => Trigger::Unspecified,
        }
    }
}

/// Timing attached to every animation node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    /// Start trigger
    pub trigger: Trigger,
    /// Start delay in milliseconds
    pub delay_ms: u32,
    /// Duration in milliseconds (0 when indefinite or absent)
    pub duration_ms: u32,
}

/// Best-effort classification of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Motion-path based entrance
    FlyIn,
    /// Opacity based effect
    Fade,
    /// Anything else
    Unknown,
}

/// One node of an animation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationNode {
    /// Timing of this node
    pub timing: Timing,

    /// Node payload
    pub kind: AnimationKind,
}

/// Payload of an animation node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnimationKind {
    /// Children play one after another
    Sequence {
        /// Child nodes
        children: Vec<AnimationNode>,
    },
    /// Children play together
    Parallel {
        /// Child nodes
        children: Vec<AnimationNode>,
    },
    /// A single effect on a shape
    Effect {
        /// Target shape id
        target_shape_id: u32,
        /// Classified effect type
        effect_type: EffectType,
        /// Direction preset (`presetSubtype`)
        direction: Option<String>,
    },
}

impl AnimationNode {
    /// Create a sequence node.
    pub fn sequence(timing: Timing, children: Vec<AnimationNode>) -> Self {
        Self {
            timing,
            kind: AnimationKind::Sequence { children },
        }
    }

    /// Create a parallel node.
    pub fn parallel(timing: Timing, children: Vec<AnimationNode>) -> Self {
        Self {
            timing,
            kind: AnimationKind::Parallel { children },
        }
    }

    /// Create an effect leaf.
    pub fn effect(timing: Timing, target_shape_id: u32, effect_type: EffectType) -> Self {
        Self {
            timing,
            kind: AnimationKind::Effect {
                target_shape_id,
                effect_type,
                direction: None,
            },
        }
    }

    /// Child nodes (empty for effects).
    pub fn children(&self) -> &[AnimationNode] {
        match &self.kind {
            AnimationKind::Sequence { children } | AnimationKind::Parallel { children } => {
                children
            }
            AnimationKind::Effect { .. } => &[],
        }
    }

    /// All effect leaves in timeline order.
    pub fn effects(&self) -> Vec<&AnimationNode> {
        let mut out = Vec::new();
        self.collect_effects(&mut out);
        out
    }

    fn collect_effects<'a>(&'a self, out: &mut Vec<&'a AnimationNode>) {
        match &self.kind {
            AnimationKind::Effect { .. } => out.push(self),
            _ => {
                for child in self.children() {
                    child.collect_effects(out);
                }
            }
        }
    }

    /// Number of effect leaves.
    pub fn effect_count(&self) -> usize {
        self.effects().len()
    }

    /// Effect type of a leaf.
    pub fn effect_type(&self) -> Option<EffectType> {
        match &self.kind {
            AnimationKind::Effect { effect_type, .. } => Some(*effect_type),
            _ => None,
        }
    }
}
