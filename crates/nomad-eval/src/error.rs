//! Error types for the evaluator crate.
//!
//! Runs never fail with an error: every outcome, including a graph with no
//! entry node, is reported through [`nomad_types::ExecutionResult`]. Errors
//! here cover building an engine from bad configuration.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A ceiling of zero would stop every run before the entry node.
    #[error("maxExecutionSteps must be > 0")]
    ZeroExecutionCeiling,
}
