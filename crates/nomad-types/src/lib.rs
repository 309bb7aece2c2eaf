//! Shared types for the LogicNomad engine.
//!
//! This crate defines the flowgraph a player authors, the puzzle level it is
//! judged against, the simulated world state, the execution result, and the
//! structured diagnostics produced by graph validation. It has no behavior
//! beyond small geometric helpers; every other crate derives from these sets.

mod error;
pub mod game;
pub mod graph;

pub use error::{
    Diagnostic, DiagnosticCategory, DiagnosticCode, Diagnostics, Severity, UnknownKey,
    ValidationResult,
};
pub use game::{
    Cell, CellKind, CellProbe, Character, Difficulty, Direction, ExecutionResult, FailureReason,
    Grid, LastAction, Position, PuzzleLevel, WorldState,
};
pub use graph::{ActionKey, ActionKind, Branch, Edge, Graph, Node, NodeKind, NodeTag, Predicate};
