//! Execution engine: walks a flowgraph against a puzzle level.
//!
//! The interpreter is a flat work-list loop over a "current node" pointer.
//! Loops are tracked on an explicit [`LoopStack`] keyed by loop node id and
//! close when control comes back to the loop node. Every dispatch costs one
//! unit against the execution ceiling; only action nodes cost a step of the
//! level's budget.

use nomad_types::{
    ActionKey, ActionKind, CellProbe, Edge, ExecutionResult, FailureReason, LastAction, Node, NodeKind,
    PuzzleLevel, WorldState,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::condition;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::frame::{LoopFrame, LoopStack};
use crate::index::GraphIndex;
use crate::outcome;

/// A run's result plus the interpreter trace, for playback in the game UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub result: ExecutionResult,
    /// Node dispatches performed (never above the ceiling).
    pub execution_steps: u32,
    /// Ids of dispatched nodes, in dispatch order.
    pub visited: Vec<String>,
}

/// Stateless across calls: each run works on its own copy of the level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_max_execution_steps(max_execution_steps: u32) -> Result<Self, ConfigError> {
        Self::new(EngineConfig {
            max_execution_steps,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run `nodes`/`edges` on `level` and return the verdict.
    pub fn execute(&self, nodes: &[Node], level: &PuzzleLevel, edges: &[Edge]) -> ExecutionResult {
        self.run(nodes, level, edges).result
    }

    /// Like [`Engine::execute`], keeping the dispatch trace.
    pub fn run(&self, nodes: &[Node], level: &PuzzleLevel, edges: &[Edge]) -> ExecutionReport {
        let mut interp = Interpreter::new(nodes, edges, level);

        let Some(entry) = interp.index.entry() else {
            debug!(level = %level.id, "no entry node, nothing to run");
            return ExecutionReport {
                result: ExecutionResult {
                    success: false,
                    step_count: 0,
                    message: outcome::NO_ENTRY_MESSAGE.to_string(),
                    final_state: Some(interp.state),
                },
                execution_steps: 0,
                visited: Vec::new(),
            };
        };

        debug!(
            level = %level.id,
            nodes = nodes.len(),
            edges = edges.len(),
            ceiling = self.config.max_execution_steps,
            "execution started"
        );

        let mut current = Some(entry);
        while let Some(node) = current {
            if interp.state.is_terminal()
                || interp.execution_steps >= self.config.max_execution_steps
            {
                break;
            }
            interp.execution_steps += 1;
            interp.visited.push(node.id.clone());
            trace!(
                node = %node.id,
                kind = %node.tag(),
                step_count = interp.state.step_count,
                loop_depth = interp.loops.depth(),
                "dispatch"
            );
            current = interp.dispatch(node);
        }

        // Spending the whole ceiling without a verdict counts as a runaway,
        // even when the last dispatch was an exit.
        if interp.execution_steps >= self.config.max_execution_steps
            && !interp.state.is_terminal()
        {
            interp.state.mark_failed(FailureReason::InfiniteLoop);
        }

        let report = interp.finish();
        debug!(
            level = %level.id,
            success = report.result.success,
            step_count = report.result.step_count,
            execution_steps = report.execution_steps,
            failure = ?report.result.failure_reason(),
            "execution finished"
        );
        report
    }
}

/// Run with the default configuration.
pub fn execute(nodes: &[Node], level: &PuzzleLevel, edges: &[Edge]) -> ExecutionResult {
    Engine::default().execute(nodes, level, edges)
}

// ══════════════════════════════════════════════════════════════════════════════
// Interpreter
// ══════════════════════════════════════════════════════════════════════════════

struct Interpreter<'a> {
    index: GraphIndex<'a>,
    level: &'a PuzzleLevel,
    state: WorldState,
    loops: LoopStack,
    execution_steps: u32,
    visited: Vec<String>,
}

impl<'a> Interpreter<'a> {
    fn new(nodes: &'a [Node], edges: &'a [Edge], level: &'a PuzzleLevel) -> Self {
        Self {
            index: GraphIndex::build(nodes, edges),
            level,
            state: WorldState::from_level(level),
            loops: LoopStack::new(),
            execution_steps: 0,
            visited: Vec::new(),
        }
    }

    /// Execute `node` and pick the next one. `None` ends the traversal.
    fn dispatch(&mut self, node: &'a Node) -> Option<&'a Node> {
        match &node.kind {
            NodeKind::Entry => self.index.next(node),
            NodeKind::Action { action } => {
                if let Some(action) = action {
                    apply_action(action, &mut self.state, self.level);
                }
                self.index.next(node)
            }
            NodeKind::Condition { predicate } => {
                let outcome = condition::evaluate(predicate, &self.state, self.level);
                self.index.branch(node, outcome)
            }
            NodeKind::Loop { iterations } => self.enter_loop(node, *iterations),
            NodeKind::Exit => None,
        }
    }

    fn enter_loop(&mut self, node: &'a Node, iterations: u32) -> Option<&'a Node> {
        let body = self.index.next(node)?;

        let Some(frame) = self.loops.find_mut(&node.id) else {
            self.loops.push(LoopFrame {
                loop_node_id: node.id.clone(),
                iterations,
                current_iteration: 1,
                body_entry_node_id: body.id.clone(),
            });
            return Some(body);
        };

        frame.current_iteration += 1;
        if frame.current_iteration >= frame.iterations {
            self.loops.remove(&node.id);
            // Leaves through the same first edge that entered the body. With a
            // single outgoing edge this re-enters the loop as a fresh frame.
            self.index.next(node)
        } else {
            self.index.node(&frame.body_entry_node_id)
        }
    }

    fn finish(self) -> ExecutionReport {
        let state = self.state;
        let step_count = state.step_count;
        let (success, message) = match (state.is_complete, state.failure_reason) {
            (true, _) => (true, outcome::success_message(step_count, self.level)),
            (false, Some(reason)) => (false, outcome::failure_message(reason, step_count, self.level)),
            (false, None) => (false, outcome::DID_NOT_FINISH_MESSAGE.to_string()),
        };
        ExecutionReport {
            result: ExecutionResult {
                success,
                step_count,
                message,
                final_state: Some(state),
            },
            execution_steps: self.execution_steps,
            visited: self.visited,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Action primitives
// ══════════════════════════════════════════════════════════════════════════════

/// Apply one primitive. Always costs a step, blocked moves and unknown
/// actions included.
fn apply_action(action: &ActionKey, state: &mut WorldState, level: &PuzzleLevel) {
    let kind = match action {
        ActionKey::Known(kind) => *kind,
        ActionKey::Unknown(key) => {
            debug!(action = %key, "unknown action, counted as a step");
            state.step_count += 1;
            check_completion(state, level);
            return;
        }
    };

    match kind {
        ActionKind::Move => {
            let ahead = state.character.position.ahead(state.character.direction);
            match state.grid.probe(ahead) {
                CellProbe::Open => {
                    state.character.position = ahead;
                    state.last_action = Some(LastAction::Move);
                }
                CellProbe::Wall => {
                    state.mark_failed(FailureReason::Collision);
                    state.last_action = Some(LastAction::MoveBlocked);
                }
                CellProbe::OutOfBounds => {
                    state.mark_failed(FailureReason::OutOfBounds);
                    state.last_action = Some(LastAction::MoveBlocked);
                }
            }
        }
        ActionKind::TurnLeft => {
            state.character.direction = state.character.direction.turn_left();
            state.last_action = Some(LastAction::TurnLeft);
        }
        ActionKind::TurnRight => {
            state.character.direction = state.character.direction.turn_right();
            state.last_action = Some(LastAction::TurnRight);
        }
        ActionKind::Wait => {
            state.last_action = Some(LastAction::Wait);
        }
    }

    state.step_count += 1;
    check_completion(state, level);
}

/// Goal first, then the level's step budget.
fn check_completion(state: &mut WorldState, level: &PuzzleLevel) {
    if state.is_failed {
        return;
    }
    if state.character.position == level.goal_position {
        state.mark_complete();
    } else if state.step_count >= level.max_steps {
        state.mark_failed(FailureReason::MaxSteps);
    }
}
