//! LogicNomad engine as a WASM module for the browser editor and game.
//!
//! Two surfaces: `validateFlowgraph` / `executeAlgorithm` take and return
//! plain JS objects, and the `*_json` functions take and return JSON strings
//! for hosts that already hold serialized graphs.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { validateFlowgraph, executeAlgorithm } from 'nomad-wasm';
//!
//! await init();
//!
//! const { valid, errors } = validateFlowgraph({ nodes, edges });
//! const result = executeAlgorithm(nodes, level, edges);
//! // { success: true, stepCount: 2, message: "Success! 🎉 (Well done!)", finalState: { ... } }
//! ```

use nomad_compiler::pipeline;
use nomad_types::{Edge, Graph, Node, PuzzleLevel};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// JS object surface
// ══════════════════════════════════════════════════════════════════════════════

/// Validate a `{ nodes, edges }` graph object.
///
/// Returns `{ valid, errors }`. Throws only when the argument is not shaped
/// like a graph.
#[wasm_bindgen(js_name = validateFlowgraph)]
pub fn validate_flowgraph(graph: JsValue) -> Result<JsValue, JsValue> {
    let graph: Graph = serde_wasm_bindgen::from_value(graph)?;
    to_js(&nomad_compiler::validate_flowgraph(&graph))
}

/// Run `nodes`/`edges` on `level` with the default engine configuration.
///
/// `edges` may be omitted. Returns `{ success, stepCount, message, finalState }`.
#[wasm_bindgen(js_name = executeAlgorithm)]
pub fn execute_algorithm(nodes: JsValue, level: JsValue, edges: JsValue) -> Result<JsValue, JsValue> {
    let nodes: Vec<Node> = serde_wasm_bindgen::from_value(nodes)?;
    let level: PuzzleLevel = serde_wasm_bindgen::from_value(level)?;
    let edges: Vec<Edge> = if edges.is_undefined() || edges.is_null() {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(edges)?
    };
    to_js(&nomad_compiler::execute_algorithm(&nodes, &level, &edges))
}

/// Plain objects and `null` for absent optionals, matching the JSON surface.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

// ══════════════════════════════════════════════════════════════════════════════
// JSON string surface
// ══════════════════════════════════════════════════════════════════════════════

/// Validate a graph given as JSON.
///
/// Returns a JSON string `{ "valid": bool, "errors": [string] }`. A graph
/// that cannot be decoded is invalid with the decode error as its message.
#[wasm_bindgen]
pub fn validate_json(graph_json: &str) -> String {
    pipeline::validate_json(graph_json)
}

/// Execute a graph on a level, both given as JSON.
///
/// `config_json` is an optional engine configuration such as
/// `{ "maxExecutionSteps": 200 }`. Returns a JSON string:
/// ```json
/// {
///   "result": { "success": true, "stepCount": 2, "message": "...", "finalState": { ... } },
///   "executionSteps": 3,
///   "visited": ["start", "move-1", "move-2"]
/// }
/// ```
/// or `{ "error": { "kind": "graph" | "level" | "config", "message": "..." } }`.
#[wasm_bindgen]
pub fn execute_json(graph_json: &str, level_json: &str, config_json: Option<String>) -> String {
    pipeline::execute_json(graph_json, level_json, config_json.as_deref())
}

/// Full diagnostics for the editor's problem panel.
///
/// Returns `{ errors, warnings, totalErrors, totalWarnings }`; each entry
/// carries `code`, `severity`, `category`, `message` and, where it applies,
/// `nodeId` / `edgeId`.
#[wasm_bindgen]
pub fn diagnose(graph_json: &str) -> String {
    pipeline::diagnose_json(graph_json)
}

/// Nodes reachable from the entry node, breadth first, as a JSON array.
#[wasm_bindgen]
pub fn execution_order(graph_json: &str) -> String {
    pipeline::execution_order_json(graph_json)
}

/// `{ "fingerprint": "<sha256 hex>" }` of the graph's canonical form.
#[wasm_bindgen]
pub fn graph_fingerprint(graph_json: &str) -> String {
    pipeline::fingerprint_json(graph_json)
}

/// JSON table of node kinds, actions and predicates for the editor palette.
///
/// Generated from the engine's closed sets, so it always matches what the
/// engine accepts.
#[wasm_bindgen]
pub fn palette() -> String {
    nomad_compiler::reference::generate_palette()
}

/// Return the engine version string.
#[wasm_bindgen]
pub fn version() -> String {
    nomad_compiler::ENGINE_VERSION.to_string()
}
