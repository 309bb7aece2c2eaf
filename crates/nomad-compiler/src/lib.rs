//! LogicNomad graph tooling: validation and the public entry points.
//!
//! ```text
//! Graph ─┬→ GraphValidator (advisory) → { valid, errors }
//!        └→ nomad_eval::Engine (authoritative) → ExecutionResult
//! ```
//!
//! The validator never executes and the engine never requires a valid graph:
//! callers may run a graph that fails validation and get a result anyway.

pub mod fingerprint;
pub mod level;
pub mod order;
pub mod pipeline;
pub mod reference;
pub mod validator;

use nomad_types::{Diagnostics, Edge, ExecutionResult, Graph, Node, PuzzleLevel, ValidationResult};
use tracing::debug;

pub use fingerprint::graph_fingerprint;
pub use level::check_level;
pub use order::execution_order;
pub use pipeline::DecodeError;
pub use validator::GraphValidator;

/// Engine version reported to hosts.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every error and warning for `graph`.
pub fn diagnose(graph: &Graph) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    GraphValidator::new(graph, &mut diagnostics).check();
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        errors = diagnostics.total_errors,
        warnings = diagnostics.total_warnings,
        "graph validated"
    );
    diagnostics
}

/// Structural validity of `graph`: `{ valid, errors }`. Warnings are dropped.
pub fn validate_flowgraph(graph: &Graph) -> ValidationResult {
    ValidationResult::from(&diagnose(graph))
}

/// Run `nodes`/`edges` on `level` with the default engine configuration.
pub fn execute_algorithm(nodes: &[Node], level: &PuzzleLevel, edges: &[Edge]) -> ExecutionResult {
    nomad_eval::execute(nodes, level, edges)
}
