//! LogicNomad flowgraph interpreter.
//!
//! Executes a player's flowgraph against a puzzle level and reports whether
//! the character reached the goal. Runs are synchronous, deterministic and
//! bounded by an execution-step ceiling; they never mutate their inputs.
//!
//! ```text
//! (nodes, edges, level) → GraphIndex → Interpreter loop → ExecutionResult
//! ```

pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod index;
pub mod outcome;

pub use config::{EngineConfig, DEFAULT_MAX_EXECUTION_STEPS};
pub use engine::{execute, Engine, ExecutionReport};
pub use error::ConfigError;
pub use index::GraphIndex;
