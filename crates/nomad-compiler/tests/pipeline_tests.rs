//! End-to-end JSON pipeline: decode → validate / execute → encode.

use nomad_compiler::pipeline::{
    decode_config, decode_graph, diagnose_json, execute_json, execution_order_json,
    fingerprint_json, validate_json, DecodeError,
};
use nomad_compiler::{execute_algorithm, validate_flowgraph, ENGINE_VERSION};
use nomad_types::{Direction, Grid, Position, PuzzleLevel};
use serde_json::Value;

// ══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ══════════════════════════════════════════════════════════════════════════════

/// Two moves to the goal, in the canonical vocabulary.
const TWO_MOVES: &str = r#"{
  "nodes": [
    {"id": "s", "kind": "entry", "label": "Start"},
    {"id": "m1", "kind": "action", "label": "Move", "payload": {"actionKind": "move"}},
    {"id": "m2", "kind": "action", "label": "Move", "payload": {"actionKind": "move"}},
    {"id": "e", "kind": "exit", "label": "End"}
  ],
  "edges": [
    {"id": "e1", "source": "s", "target": "m1"},
    {"id": "e2", "source": "m1", "target": "m2"},
    {"id": "e3", "source": "m2", "target": "e"}
  ]
}"#;

/// Same graph as the editor used to save it.
const TWO_MOVES_LEGACY: &str = r#"{
  "nodes": [
    {"id": "s", "type": "start", "label": "Start", "position": {"x": 10, "y": 40}},
    {"id": "m1", "type": "action", "label": "Move", "data": {"action": "move"}},
    {"id": "m2", "type": "action", "label": "Move", "data": {"action": "move"}},
    {"id": "e", "type": "end", "label": "End"}
  ],
  "edges": [
    {"id": "e1", "source": "s", "target": "m1"},
    {"id": "e2", "source": "m1", "target": "m2"},
    {"id": "e3", "source": "m2", "target": "e"}
  ]
}"#;

/// A condition that spins on itself until the ceiling stops it.
const SPIN: &str = r#"{
  "nodes": [
    {"id": "s", "type": "start"},
    {"id": "c", "type": "condition", "data": {"condition": "atGoal"}},
    {"id": "e", "type": "end"}
  ],
  "edges": [
    {"id": "e1", "source": "s", "target": "c"},
    {"id": "e2", "source": "c", "target": "e", "sourceHandle": "true"},
    {"id": "e3", "source": "c", "target": "c", "sourceHandle": "false"}
  ]
}"#;

fn level_json() -> String {
    let level = PuzzleLevel::new(
        "tutorial-1",
        Grid::from_rows(&["S.G"]),
        Position::new(0, 0),
        Direction::East,
        Position::new(2, 0),
        5,
    );
    serde_json::to_string(&level).unwrap()
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("pipeline output should be valid JSON")
}

// ══════════════════════════════════════════════════════════════════════════════
// validate_json / diagnose_json
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn validate_valid_graph() {
    let out = parse(&validate_json(TWO_MOVES));
    assert_eq!(out["valid"], true);
    assert_eq!(out["errors"], serde_json::json!([]));
}

#[test]
fn validate_legacy_graph() {
    let out = parse(&validate_json(TWO_MOVES_LEGACY));
    assert_eq!(out["valid"], true);
}

#[test]
fn validate_reports_errors() {
    let out = parse(&validate_json(r#"{"nodes": [], "edges": []}"#));
    assert_eq!(out["valid"], false);
    assert_eq!(out["errors"][0], "Graph has no entry node");
    assert_eq!(out["errors"][1], "Graph has no exit node");
}

#[test]
fn validate_accepts_missing_edges_field() {
    let out = parse(&validate_json(r#"{"nodes": [{"id": "s", "kind": "entry"}]}"#));
    assert_eq!(out["valid"], false);
    assert_eq!(out["errors"][0], "Graph has no exit node");
}

#[test]
fn validate_rejects_garbage() {
    let out = parse(&validate_json("not json"));
    assert_eq!(out["valid"], false);
    let message = out["errors"][0].as_str().unwrap();
    assert!(message.starts_with("invalid graph JSON"), "{message}");
}

#[test]
fn validate_rejects_unknown_node_kind() {
    let out = parse(&validate_json(
        r#"{"nodes": [{"id": "x", "kind": "teleport"}], "edges": []}"#,
    ));
    assert_eq!(out["valid"], false);
}

#[test]
fn validate_tolerates_unknown_action_key() {
    let graph = r#"{
      "nodes": [
        {"id": "s", "type": "start"},
        {"id": "j", "type": "action", "data": {"action": "jump"}},
        {"id": "e", "type": "end"}
      ],
      "edges": [
        {"id": "e1", "source": "s", "target": "j"},
        {"id": "e2", "source": "j", "target": "e"}
      ]
    }"#;

    let out = parse(&validate_json(graph));
    assert_eq!(out["valid"], true);
    assert_eq!(out["errors"], serde_json::json!([]));

    let out = parse(&diagnose_json(graph));
    assert_eq!(out["warnings"][0]["code"], 404);

    let out = parse(&execute_json(graph, &level_json(), None));
    assert_eq!(out["result"]["stepCount"], 1);
    assert_eq!(out["executionSteps"], 3);
}

#[test]
fn diagnose_includes_warnings() {
    let graph = r#"{
      "nodes": [
        {"id": "s", "kind": "entry"},
        {"id": "a", "kind": "action"},
        {"id": "e", "kind": "exit"}
      ],
      "edges": [
        {"id": "e1", "source": "s", "target": "a"},
        {"id": "e2", "source": "a", "target": "e"}
      ]
    }"#;
    let out = parse(&diagnose_json(graph));
    assert_eq!(out["totalErrors"], 0);
    assert_eq!(out["totalWarnings"], 1);
    assert_eq!(out["warnings"][0]["code"], 400);
    assert_eq!(out["warnings"][0]["severity"], "warning");
    assert_eq!(out["warnings"][0]["category"], "payload");
    assert_eq!(out["warnings"][0]["nodeId"], "a");
}

// ══════════════════════════════════════════════════════════════════════════════
// execute_json
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn execute_two_moves() {
    let out = parse(&execute_json(TWO_MOVES, &level_json(), None));

    assert_eq!(out["result"]["success"], true);
    assert_eq!(out["result"]["stepCount"], 2);
    assert_eq!(out["result"]["finalState"]["isComplete"], true);
    assert_eq!(out["result"]["finalState"]["lastAction"], "move");
    assert_eq!(out["executionSteps"], 3);
    assert_eq!(out["visited"], serde_json::json!(["s", "m1", "m2"]));
}

#[test]
fn legacy_and_canonical_graphs_run_identically() {
    let level = level_json();
    assert_eq!(
        execute_json(TWO_MOVES, &level, None),
        execute_json(TWO_MOVES_LEGACY, &level, None)
    );
}

#[test]
fn execute_with_config_ceiling() {
    let out = parse(&execute_json(
        SPIN,
        &level_json(),
        Some(r#"{"maxExecutionSteps": 5}"#),
    ));

    assert_eq!(out["executionSteps"], 5);
    assert_eq!(out["result"]["success"], false);
    assert_eq!(out["result"]["finalState"]["failureReason"], "infiniteLoop");
}

#[test]
fn blank_config_uses_defaults() {
    let out = parse(&execute_json(SPIN, &level_json(), Some("  ")));
    assert_eq!(out["executionSteps"], 100);
}

#[test]
fn execute_rejects_bad_level() {
    let out = parse(&execute_json(TWO_MOVES, r#"{"id": "x"}"#, None));
    assert_eq!(out["error"]["kind"], "level");
    assert!(out["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid level JSON"));
}

#[test]
fn execute_rejects_bad_graph_before_level() {
    let out = parse(&execute_json("nope", "also bad", None));
    assert_eq!(out["error"]["kind"], "graph");
}

#[test]
fn execute_rejects_zero_ceiling() {
    let out = parse(&execute_json(
        TWO_MOVES,
        &level_json(),
        Some(r#"{"maxExecutionSteps": 0}"#),
    ));
    assert_eq!(out["error"]["kind"], "config");
    assert_eq!(out["error"]["message"], "maxExecutionSteps must be > 0");
}

#[test]
fn decode_config_errors_are_typed() {
    assert!(matches!(
        decode_config(Some("{")),
        Err(DecodeError::Config(_))
    ));
    assert!(matches!(
        decode_config(Some(r#"{"maxExecutionSteps": 0}"#)),
        Err(DecodeError::InvalidConfig(_))
    ));
    assert_eq!(decode_config(None).unwrap().max_execution_steps, 100);
}

// ══════════════════════════════════════════════════════════════════════════════
// Order and fingerprint
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn execution_order_lists_nodes() {
    let out = parse(&execution_order_json(TWO_MOVES));
    let ids: Vec<&str> = out
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["s", "m1", "m2", "e"]);
    assert_eq!(out[1]["payload"]["actionKind"], "move");
}

#[test]
fn fingerprint_ignores_vocabulary() {
    let canonical = parse(&fingerprint_json(TWO_MOVES));
    let legacy = parse(&fingerprint_json(TWO_MOVES_LEGACY));
    assert_eq!(canonical["fingerprint"].as_str().unwrap().len(), 64);
    assert_eq!(canonical, legacy);
}

#[test]
fn fingerprint_rejects_garbage() {
    let out = parse(&fingerprint_json("{"));
    assert_eq!(out["error"]["kind"], "graph");
}

// ══════════════════════════════════════════════════════════════════════════════
// Rust entry points
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn rust_entry_points_agree_with_json() {
    let graph = decode_graph(TWO_MOVES).unwrap();
    let level: PuzzleLevel = serde_json::from_str(&level_json()).unwrap();

    assert!(validate_flowgraph(&graph).valid);

    let result = execute_algorithm(&graph.nodes, &level, &graph.edges);
    let out = parse(&execute_json(TWO_MOVES, &level_json(), None));
    assert_eq!(serde_json::to_value(&result).unwrap(), out["result"]);
}

#[test]
fn version_is_set() {
    assert!(!ENGINE_VERSION.is_empty());
}
