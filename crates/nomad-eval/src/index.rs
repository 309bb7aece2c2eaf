//! Id lookups over a graph, built once per run.

use std::collections::HashMap;

use nomad_types::{Branch, Edge, Node, NodeTag};

/// Forward adjacency over borrowed nodes and edges.
///
/// Outgoing edges keep declaration order, so "first outgoing edge" means the
/// first one the editor saved. When ids repeat, the first declared node wins.
#[derive(Debug)]
pub struct GraphIndex<'a> {
    nodes: HashMap<&'a str, &'a Node>,
    outgoing: HashMap<&'a str, Vec<&'a Edge>>,
    entry: Option<&'a Node>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut by_id: HashMap<&str, &Node> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }

        let mut outgoing: HashMap<&str, Vec<&Edge>> = HashMap::new();
        for edge in edges {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }

        Self {
            nodes: by_id,
            outgoing,
            entry: nodes.iter().find(|n| n.tag() == NodeTag::Entry),
        }
    }

    /// First declared entry node.
    pub fn entry(&self) -> Option<&'a Node> {
        self.entry
    }

    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    pub fn outgoing(&self, id: &str) -> &[&'a Edge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Target of the first outgoing edge.
    pub fn next(&self, node: &Node) -> Option<&'a Node> {
        let edge = self.outgoing(&node.id).first()?;
        self.node(&edge.target)
    }

    /// Target for a condition outcome.
    ///
    /// A labelled edge wins; otherwise the first edge is the true branch and
    /// the second the false branch, falling back to the first.
    pub fn branch(&self, node: &Node, outcome: bool) -> Option<&'a Node> {
        let edges = self.outgoing(&node.id);
        let wanted = Branch::from(outcome);
        let labelled = edges.iter().find(|e| e.branch == Some(wanted));
        let positional = if outcome {
            edges.first()
        } else {
            edges.get(1).or_else(|| edges.first())
        };
        let edge = labelled.or(positional)?;
        self.node(&edge.target)
    }
}
