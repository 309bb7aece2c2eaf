//! Breadth-first listing of the nodes reachable from the entry node.

use std::collections::{HashSet, VecDeque};

use nomad_eval::GraphIndex;
use nomad_types::{Graph, Node};

/// Nodes reachable from the first entry node, breadth first.
///
/// Edges are followed in declaration order and each node id is listed once.
/// This is a reachability listing for the editor, not the run order: loops
/// and branches are not interpreted. Empty when the graph has no entry node.
pub fn execution_order(graph: &Graph) -> Vec<&Node> {
    let index = GraphIndex::build(&graph.nodes, &graph.edges);
    let Some(entry) = index.entry() else {
        return Vec::new();
    };

    let mut order = Vec::new();
    let mut seen: HashSet<&str> = HashSet::from([entry.id.as_str()]);
    let mut queue = VecDeque::from([entry]);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for edge in index.outgoing(&current.id) {
            let Some(next) = index.node(&edge.target) else {
                continue;
            };
            if seen.insert(next.id.as_str()) {
                queue.push_back(next);
            }
        }
    }

    order
}
