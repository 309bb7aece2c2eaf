//! Stable content hash of a graph.

use nomad_types::Graph;
use sha2::{Digest, Sha256};

/// SHA-256 of the graph's canonical JSON, as lowercase hex.
///
/// Canonical means the serialized form: legacy aliases collapse to the same
/// digest as the canonical vocabulary. Node and edge order are significant.
pub fn graph_fingerprint(graph: &Graph) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_vec(graph)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomad_types::{ActionKind, Edge, Node};

    fn sample() -> Graph {
        Graph::new(
            vec![
                Node::entry("s"),
                Node::action("m", ActionKind::Move),
                Node::exit("e"),
            ],
            vec![Edge::new("e1", "s", "m"), Edge::new("e2", "m", "e")],
        )
    }

    #[test]
    fn fingerprint_is_hex_sha256() {
        let digest = graph_fingerprint(&sample()).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn fingerprint_is_stable() {
        let first = graph_fingerprint(&sample()).unwrap();
        for _ in 0..50 {
            assert_eq!(graph_fingerprint(&sample()).unwrap(), first);
        }
    }

    #[test]
    fn legacy_vocabulary_hashes_like_canonical() {
        let legacy: Graph = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "s", "type": "start"},
                    {"id": "m", "type": "action", "data": {"action": "move"}},
                    {"id": "e", "type": "end"}
                ],
                "edges": [
                    {"id": "e1", "source": "s", "target": "m"},
                    {"id": "e2", "source": "m", "target": "e"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            graph_fingerprint(&legacy).unwrap(),
            graph_fingerprint(&sample()).unwrap()
        );
    }

    #[test]
    fn any_change_changes_fingerprint() {
        let mut changed = sample();
        changed.nodes[1] = Node::action("m", ActionKind::Wait);
        assert_ne!(
            graph_fingerprint(&changed).unwrap(),
            graph_fingerprint(&sample()).unwrap()
        );
    }
}
