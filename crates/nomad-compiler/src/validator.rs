//! Graph validator: structural checks run before a graph is executed.
//!
//! Entry point: [`GraphValidator::check`].
//!
//! Errors (make the graph invalid), in report order:
//! - E100 / E101: no entry node / more than one entry node
//! - E102: no exit node
//! - E200 / E201: edge source / target not found (source first, per edge)
//! - E300: entry node has no outgoing edge
//! - E301: no exit node has an incoming edge
//! - E302: a non-entry, non-exit node is not referenced by any edge
//!
//! Warnings (advisory, never affect `valid`):
//! - E103: duplicate node id
//! - E303: connected node not reachable from the entry node
//! - E400: action node without an action kind
//! - E401: condition node with an unknown predicate
//! - E402: condition node with fewer than two outgoing edges
//! - E403: loop node with a single outgoing edge
//! - E404: action node with an unknown action key

use std::collections::{HashMap, HashSet};

use nomad_types::{Diagnostic, DiagnosticCode, Diagnostics, Graph, Node, NodeKind, NodeTag};

use crate::order;

// ══════════════════════════════════════════════════════════════════════════════
// GraphValidator
// ══════════════════════════════════════════════════════════════════════════════

/// Walks a [`Graph`] and records every structural problem it finds.
///
/// Never stops at the first problem and never executes anything.
pub struct GraphValidator<'a> {
    graph: &'a Graph,
    diagnostics: &'a mut Diagnostics,
    /// Every declared node id.
    node_ids: HashSet<&'a str>,
    /// Ids appearing as an edge source or target.
    connected: HashSet<&'a str>,
    /// Outgoing edge count per source id.
    out_degree: HashMap<&'a str, usize>,
}

impl<'a> GraphValidator<'a> {
    pub fn new(graph: &'a Graph, diagnostics: &'a mut Diagnostics) -> Self {
        let mut connected = HashSet::new();
        let mut out_degree: HashMap<&str, usize> = HashMap::new();
        for edge in &graph.edges {
            connected.insert(edge.source.as_str());
            connected.insert(edge.target.as_str());
            *out_degree.entry(edge.source.as_str()).or_default() += 1;
        }

        Self {
            graph,
            diagnostics,
            node_ids: graph.nodes.iter().map(|n| n.id.as_str()).collect(),
            connected,
            out_degree,
        }
    }

    /// Run all checks.
    pub fn check(&mut self) {
        self.check_structure();
        self.check_edges();
        self.check_connectivity();
        self.check_duplicates();
        self.check_payloads();
        self.check_reachability();
    }

    // ══════════════════════════════════════════════════════════════════════
    // Errors
    // ══════════════════════════════════════════════════════════════════════

    fn check_structure(&mut self) {
        let entries = self.graph.nodes_of(NodeTag::Entry).count();
        if entries == 0 {
            self.error(DiagnosticCode::NO_ENTRY, "Graph has no entry node", None);
        } else if entries > 1 {
            self.error(
                DiagnosticCode::MULTIPLE_ENTRIES,
                format!("Graph must have exactly one entry node (found {entries})"),
                None,
            );
        }

        if self.graph.nodes_of(NodeTag::Exit).next().is_none() {
            self.error(DiagnosticCode::NO_EXIT, "Graph has no exit node", None);
        }
    }

    fn check_edges(&mut self) {
        let graph = self.graph;
        for edge in &graph.edges {
            if !self.node_ids.contains(edge.source.as_str()) {
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::UNKNOWN_EDGE_SOURCE,
                        format!("Edge source node not found: {}", edge.source),
                    )
                    .with_edge(&edge.id),
                );
            }
            if !self.node_ids.contains(edge.target.as_str()) {
                self.diagnostics.push(
                    Diagnostic::error(
                        DiagnosticCode::UNKNOWN_EDGE_TARGET,
                        format!("Edge target node not found: {}", edge.target),
                    )
                    .with_edge(&edge.id),
                );
            }
        }
    }

    fn check_connectivity(&mut self) {
        let graph = self.graph;

        if let Some(entry) = graph.entry() {
            if self.out_degree(&entry.id) == 0 {
                self.error(
                    DiagnosticCode::ENTRY_WITHOUT_OUTGOING,
                    "Entry node has no outgoing edge",
                    Some(entry),
                );
            }
        }

        let mut exits = graph.nodes_of(NodeTag::Exit).peekable();
        if exits.peek().is_some() {
            let reached = exits.any(|exit| graph.edges.iter().any(|e| e.target == exit.id));
            if !reached {
                self.error(
                    DiagnosticCode::EXIT_WITHOUT_INCOMING,
                    "No exit node has an incoming edge",
                    None,
                );
            }
        }

        for node in &graph.nodes {
            if matches!(node.tag(), NodeTag::Entry | NodeTag::Exit) {
                continue;
            }
            if !self.connected.contains(node.id.as_str()) {
                self.error(
                    DiagnosticCode::DISCONNECTED_NODE,
                    format!("Node \"{}\" is not connected", node.display_name()),
                    Some(node),
                );
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Warnings
    // ══════════════════════════════════════════════════════════════════════

    fn check_duplicates(&mut self) {
        let graph = self.graph;
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for node in &graph.nodes {
            let id = node.id.as_str();
            if !seen.insert(id) && reported.insert(id) {
                self.warning(
                    DiagnosticCode::DUPLICATE_NODE_ID,
                    format!("Duplicate node id: {id}; only the first declaration is executed"),
                    node,
                );
            }
        }
    }

    fn check_payloads(&mut self) {
        let graph = self.graph;
        for node in &graph.nodes {
            match &node.kind {
                NodeKind::Action { action: None } => self.warning(
                    DiagnosticCode::MISSING_ACTION,
                    format!(
                        "Action node \"{}\" has no action and will be skipped",
                        node.display_name()
                    ),
                    node,
                ),
                NodeKind::Action {
                    action: Some(action),
                } if !action.is_known() => self.warning(
                    DiagnosticCode::UNKNOWN_ACTION,
                    format!(
                        "Action node \"{}\" uses unknown action '{}'; it only costs a step",
                        node.display_name(),
                        action
                    ),
                    node,
                ),
                NodeKind::Condition { predicate } => {
                    if !predicate.is_known() {
                        self.warning(
                            DiagnosticCode::UNKNOWN_PREDICATE,
                            format!(
                                "Condition node \"{}\" uses unknown predicate '{}'; it always takes the true branch",
                                node.display_name(),
                                predicate
                            ),
                            node,
                        );
                    }
                    if self.out_degree(&node.id) < 2 {
                        self.warning(
                            DiagnosticCode::MISSING_BRANCH,
                            format!(
                                "Condition node \"{}\" needs a true and a false edge",
                                node.display_name()
                            ),
                            node,
                        );
                    }
                }
                NodeKind::Loop { .. } if self.out_degree(&node.id) == 1 => self.warning(
                    DiagnosticCode::LOOP_SINGLE_EDGE,
                    format!(
                        "Loop node \"{}\" has a single outgoing edge; it restarts its body when the count runs out",
                        node.display_name()
                    ),
                    node,
                ),
                _ => {}
            }
        }
    }

    /// Only connected nodes: disconnected ones are already errors.
    fn check_reachability(&mut self) {
        let graph = self.graph;
        if graph.entry().is_none() {
            return;
        }
        let reachable: HashSet<&str> = order::execution_order(graph)
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        for node in &graph.nodes {
            let id = node.id.as_str();
            if !reachable.contains(id) && self.connected.contains(id) {
                self.warning(
                    DiagnosticCode::UNREACHABLE_NODE,
                    format!(
                        "Node \"{}\" cannot be reached from the entry node",
                        node.display_name()
                    ),
                    node,
                );
            }
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Helpers
    // ══════════════════════════════════════════════════════════════════════

    fn out_degree(&self, id: &str) -> usize {
        self.out_degree.get(id).copied().unwrap_or(0)
    }

    fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, node: Option<&Node>) {
        let mut diagnostic = Diagnostic::error(code, message);
        if let Some(node) = node {
            diagnostic = diagnostic.with_node(&node.id);
        }
        self.diagnostics.push(diagnostic);
    }

    fn warning(&mut self, code: DiagnosticCode, message: impl Into<String>, node: &Node) {
        self.diagnostics
            .push(Diagnostic::warning(code, message).with_node(&node.id));
    }
}
