//! Flowgraph types: the program a player assembles in the editor.
//!
//! The in-memory model is a closed set of sum types so that every consumer
//! matches exhaustively. The wire shape is produced and consumed through
//! private `Raw*` mirrors, which also accept the editor's older vocabulary
//! (`type`/`data`, `start`/`end`, `sourceHandle`, `loopCount`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKey;

// ══════════════════════════════════════════════════════════════════════════════
// Actions & predicates
// ══════════════════════════════════════════════════════════════════════════════

/// A primitive the character performs when an action node runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Move,
    TurnLeft,
    TurnRight,
    Wait,
}

impl ActionKind {
    /// Every action kind, in palette order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Move,
        ActionKind::TurnLeft,
        ActionKind::TurnRight,
        ActionKind::Wait,
    ];

    /// Wire name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Move => "move",
            ActionKind::TurnLeft => "turnLeft",
            ActionKind::TurnRight => "turnRight",
            ActionKind::Wait => "wait",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownKey::Action(s.to_string()))
    }
}

/// What an action node asks for, as decoded from the wire.
///
/// Keys outside [`ActionKind::ALL`] are kept verbatim so a graph from a newer
/// palette still loads; such an action only costs a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKey {
    Known(ActionKind),
    Unknown(String),
}

impl ActionKey {
    pub fn key(&self) -> &str {
        match self {
            ActionKey::Known(kind) => kind.as_str(),
            ActionKey::Unknown(key) => key,
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            ActionKey::Known(kind) => Some(*kind),
            ActionKey::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ActionKey::Known(_))
    }
}

impl From<ActionKind> for ActionKey {
    fn from(kind: ActionKind) -> Self {
        ActionKey::Known(kind)
    }
}

impl From<String> for ActionKey {
    fn from(key: String) -> Self {
        match key.parse::<ActionKind>() {
            Ok(kind) => ActionKey::Known(kind),
            Err(_) => ActionKey::Unknown(key),
        }
    }
}

impl From<&str> for ActionKey {
    fn from(key: &str) -> Self {
        ActionKey::from(key.to_string())
    }
}

impl From<ActionKey> for String {
    fn from(action: ActionKey) -> Self {
        match action {
            ActionKey::Known(kind) => kind.as_str().to_string(),
            ActionKey::Unknown(key) => key,
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The question a condition node asks about the world.
///
/// Keys outside the known set are kept verbatim in [`Predicate::Unknown`]
/// so graphs authored against a newer palette still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Predicate {
    WallAhead,
    CanMove,
    AtGoal,
    NotAtGoal,
    Unknown(String),
}

impl Predicate {
    /// Every predicate the evaluator understands, in palette order.
    pub const KNOWN: [Predicate; 4] = [
        Predicate::WallAhead,
        Predicate::CanMove,
        Predicate::AtGoal,
        Predicate::NotAtGoal,
    ];

    /// Wire key of the predicate.
    pub fn key(&self) -> &str {
        match self {
            Predicate::WallAhead => "wallAhead",
            Predicate::CanMove => "canMove",
            Predicate::AtGoal => "atGoal",
            Predicate::NotAtGoal => "notAtGoal",
            Predicate::Unknown(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Predicate::Unknown(_))
    }
}

impl Default for Predicate {
    /// Condition nodes saved without a predicate ask "can I move?".
    fn default() -> Self {
        Predicate::CanMove
    }
}

impl From<String> for Predicate {
    fn from(key: String) -> Self {
        match key.as_str() {
            "wallAhead" => Predicate::WallAhead,
            "canMove" => Predicate::CanMove,
            "atGoal" => Predicate::AtGoal,
            "notAtGoal" => Predicate::NotAtGoal,
            _ => Predicate::Unknown(key),
        }
    }
}

impl From<&str> for Predicate {
    fn from(key: &str) -> Self {
        Predicate::from(key.to_string())
    }
}

impl From<Predicate> for String {
    fn from(p: Predicate) -> Self {
        match p {
            Predicate::Unknown(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Nodes
// ══════════════════════════════════════════════════════════════════════════════

/// Discriminant of a node, as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTag {
    #[serde(alias = "start")]
    Entry,
    Action,
    Condition,
    Loop,
    #[serde(alias = "end")]
    Exit,
}

impl NodeTag {
    pub const ALL: [NodeTag; 5] = [
        NodeTag::Entry,
        NodeTag::Action,
        NodeTag::Condition,
        NodeTag::Loop,
        NodeTag::Exit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeTag::Entry => "entry",
            NodeTag::Action => "action",
            NodeTag::Condition => "condition",
            NodeTag::Loop => "loop",
            NodeTag::Exit => "exit",
        }
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a node does, with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Entry,
    /// `None` when the editor saved an action node before an action was picked;
    /// such a node is passed through without taking a step.
    Action { action: Option<ActionKey> },
    Condition { predicate: Predicate },
    /// Always at least 1.
    Loop { iterations: u32 },
    Exit,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Entry => NodeTag::Entry,
            NodeKind::Action { .. } => NodeTag::Action,
            NodeKind::Condition { .. } => NodeTag::Condition,
            NodeKind::Loop { .. } => NodeTag::Loop,
            NodeKind::Exit => NodeTag::Exit,
        }
    }
}

/// One step of the authored program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Display only.
    pub label: String,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: String::new(),
        }
    }

    pub fn entry(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Entry)
    }

    pub fn exit(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Exit)
    }

    pub fn action(id: impl Into<String>, action: impl Into<ActionKey>) -> Self {
        Self::new(
            id,
            NodeKind::Action {
                action: Some(action.into()),
            },
        )
    }

    pub fn condition(id: impl Into<String>, predicate: impl Into<Predicate>) -> Self {
        Self::new(
            id,
            NodeKind::Condition {
                predicate: predicate.into(),
            },
        )
    }

    pub fn repeat(id: impl Into<String>, iterations: u32) -> Self {
        Self::new(
            id,
            NodeKind::Loop {
                iterations: iterations.max(1),
            },
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Label if set, otherwise the id. Used in human-facing messages.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    id: String,
    #[serde(alias = "type")]
    kind: NodeTag,
    #[serde(default)]
    label: String,
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    payload: Option<RawPayload>,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    #[serde(default, alias = "action", skip_serializing_if = "Option::is_none")]
    action_kind: Option<String>,
    #[serde(default, alias = "condition", skip_serializing_if = "Option::is_none")]
    predicate_id: Option<String>,
    #[serde(default, alias = "loopCount", skip_serializing_if = "Option::is_none")]
    iterations: Option<i64>,
}

/// A missing, zero or negative count runs the body once.
fn normalize_iterations(count: Option<i64>) -> u32 {
    let count = count.unwrap_or(1).max(1);
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let payload = raw.payload.unwrap_or_default();
        let kind = match raw.kind {
            NodeTag::Entry => NodeKind::Entry,
            NodeTag::Action => NodeKind::Action {
                action: payload
                    .action_kind
                    .filter(|key| !key.is_empty())
                    .map(ActionKey::from),
            },
            NodeTag::Condition => NodeKind::Condition {
                predicate: payload
                    .predicate_id
                    .filter(|key| !key.is_empty())
                    .map(Predicate::from)
                    .unwrap_or_default(),
            },
            NodeTag::Loop => NodeKind::Loop {
                iterations: normalize_iterations(payload.iterations),
            },
            NodeTag::Exit => NodeKind::Exit,
        };
        Node {
            id: raw.id,
            kind,
            label: raw.label,
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let tag = node.kind.tag();
        let payload = match node.kind {
            NodeKind::Entry | NodeKind::Exit => None,
            NodeKind::Action { action } => Some(RawPayload {
                action_kind: action.map(String::from),
                ..RawPayload::default()
            }),
            NodeKind::Condition { predicate } => Some(RawPayload {
                predicate_id: Some(predicate.into()),
                ..RawPayload::default()
            }),
            NodeKind::Loop { iterations } => Some(RawPayload {
                iterations: Some(i64::from(iterations)),
                ..RawPayload::default()
            }),
        };
        RawNode {
            id: node.id,
            kind: tag,
            label: node.label,
            payload,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Edges
// ══════════════════════════════════════════════════════════════════════════════

/// Which side of a condition an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    True,
    False,
}

impl Branch {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "true" => Some(Branch::True),
            "false" => Some(Branch::False),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Branch::True => "true",
            Branch::False => "false",
        }
    }
}

impl From<bool> for Branch {
    fn from(b: bool) -> Self {
        if b {
            Branch::True
        } else {
            Branch::False
        }
    }
}

/// Directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEdge", into = "RawEdge")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Only meaningful when leaving a condition node.
    pub branch: Option<Branch>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            branch: None,
        }
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branch = Some(branch);
        self
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEdge {
    #[serde(default)]
    id: String,
    source: String,
    target: String,
    #[serde(default, alias = "sourceHandle", skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    /// Older editors marked condition edges through their label.
    #[serde(default, skip_serializing)]
    label: Option<String>,
}

impl From<RawEdge> for Edge {
    fn from(raw: RawEdge) -> Self {
        let branch = raw
            .branch
            .as_deref()
            .and_then(Branch::from_key)
            .or_else(|| raw.label.as_deref().and_then(Branch::from_key));
        Edge {
            id: raw.id,
            source: raw.source,
            target: raw.target,
            branch,
        }
    }
}

impl From<Edge> for RawEdge {
    fn from(edge: Edge) -> Self {
        RawEdge {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            branch: edge.branch.map(|b| b.as_str().to_string()),
            label: None,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Graph
// ══════════════════════════════════════════════════════════════════════════════

/// A complete authored program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All nodes of one kind, in declaration order.
    pub fn nodes_of(&self, tag: NodeTag) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.tag() == tag)
    }

    /// The first entry node, which is where execution starts.
    pub fn entry(&self) -> Option<&Node> {
        self.nodes_of(NodeTag::Entry).next()
    }
}
