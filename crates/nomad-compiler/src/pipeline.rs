//! JSON in, JSON out.
//!
//! The string boundary used by the WASM module and by hosts that hold graphs
//! and levels as JSON. Decoding failures become structured JSON; nothing
//! here panics on bad input.

use nomad_eval::{ConfigError, Engine, EngineConfig};
use nomad_types::{Graph, PuzzleLevel, ValidationResult};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{diagnose, fingerprint, order};

/// Malformed input at the JSON boundary.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid graph JSON: {0}")]
    Graph(#[source] serde_json::Error),

    #[error("invalid level JSON: {0}")]
    Level(#[source] serde_json::Error),

    #[error("invalid engine config JSON: {0}")]
    Config(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl DecodeError {
    /// Which input was rejected.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Graph(_) => "graph",
            DecodeError::Level(_) => "level",
            DecodeError::Config(_) | DecodeError::InvalidConfig(_) => "config",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'a str,
    message: String,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Decoding
// ══════════════════════════════════════════════════════════════════════════════

pub fn decode_graph(json: &str) -> Result<Graph, DecodeError> {
    serde_json::from_str(json).map_err(DecodeError::Graph)
}

pub fn decode_level(json: &str) -> Result<PuzzleLevel, DecodeError> {
    serde_json::from_str(json).map_err(DecodeError::Level)
}

/// `None` or blank input gives the default configuration.
pub fn decode_config(json: Option<&str>) -> Result<EngineConfig, DecodeError> {
    let config = match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str(json).map_err(DecodeError::Config)?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

// ══════════════════════════════════════════════════════════════════════════════
// JSON entry points
// ══════════════════════════════════════════════════════════════════════════════

/// Validate a graph: `{ "valid": bool, "errors": [string] }`.
///
/// An undecodable graph is reported as invalid with the decode error as its
/// only message.
pub fn validate_json(graph_json: &str) -> String {
    let result = match decode_graph(graph_json) {
        Ok(graph) => ValidationResult::from(&diagnose(&graph)),
        Err(err) => {
            debug!(error = %err, "rejected graph JSON");
            ValidationResult {
                valid: false,
                errors: vec![err.to_string()],
            }
        }
    };
    serde_json::to_string(&result).unwrap_or_else(|e| {
        format!(
            r#"{{"valid":false,"errors":["Serialization error: {}"]}}"#,
            e
        )
    })
}

/// Full structured diagnostics: `{ errors, warnings, totalErrors, totalWarnings }`.
pub fn diagnose_json(graph_json: &str) -> String {
    match decode_graph(graph_json) {
        Ok(graph) => to_json(&diagnose(&graph)),
        Err(err) => error_json(&err),
    }
}

/// Run a graph on a level. `graph_json` holds `{ nodes, edges }`.
///
/// Returns the execution report `{ result, executionSteps, visited }` or
/// `{ "error": { kind, message } }` when an input cannot be decoded.
pub fn execute_json(graph_json: &str, level_json: &str, config_json: Option<&str>) -> String {
    match run_json(graph_json, level_json, config_json) {
        Ok(json) => json,
        Err(err) => {
            debug!(kind = err.kind(), error = %err, "rejected execution input");
            error_json(&err)
        }
    }
}

fn run_json(
    graph_json: &str,
    level_json: &str,
    config_json: Option<&str>,
) -> Result<String, DecodeError> {
    let graph = decode_graph(graph_json)?;
    let level = decode_level(level_json)?;
    let engine = Engine::new(decode_config(config_json)?)?;
    let report = engine.run(&graph.nodes, &level, &graph.edges);
    Ok(to_json(&report))
}

/// Reachable nodes in breadth-first order, as a JSON array of nodes.
pub fn execution_order_json(graph_json: &str) -> String {
    match decode_graph(graph_json) {
        Ok(graph) => to_json(&order::execution_order(&graph)),
        Err(err) => error_json(&err),
    }
}

/// `{ "fingerprint": "<sha256 hex>" }`.
pub fn fingerprint_json(graph_json: &str) -> String {
    let graph = match decode_graph(graph_json) {
        Ok(graph) => graph,
        Err(err) => return error_json(&err),
    };
    match fingerprint::graph_fingerprint(&graph) {
        Ok(digest) => to_json(&serde_json::json!({ "fingerprint": digest })),
        Err(err) => envelope("graph", err.to_string()),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Encoding helpers
// ══════════════════════════════════════════════════════════════════════════════

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| envelope("encode", e.to_string()))
}

fn error_json(err: &DecodeError) -> String {
    envelope(err.kind(), err.to_string())
}

fn envelope(kind: &str, message: String) -> String {
    let body = ErrorEnvelope {
        error: ErrorBody { kind, message },
    };
    serde_json::to_string(&body).unwrap_or_else(|e| {
        format!(
            r#"{{"error":{{"kind":"encode","message":"Serialization error: {}"}}}}"#,
            e
        )
    })
}
