//! Advisory checks of a graph against the level it will be played on.
//!
//! Warnings emitted:
//! - E500: a required action never appears in the graph
//! - E501: a required action key outside the known action set
//! - E502 / E503: start / goal position off-grid or on a wall

use std::collections::HashSet;
use std::str::FromStr;

use nomad_types::{
    ActionKind, Diagnostic, DiagnosticCode, Diagnostics, Graph, NodeKind, Position, PuzzleLevel,
};

/// Check `graph` against `level`. Every finding is a warning.
pub fn check_level(graph: &Graph, level: &PuzzleLevel) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();

    let used: HashSet<ActionKind> = graph
        .nodes
        .iter()
        .filter_map(|n| match &n.kind {
            NodeKind::Action { action: Some(action) } => action.kind(),
            _ => None,
        })
        .collect();

    for key in level.required_actions.iter().flatten() {
        match ActionKind::from_str(key) {
            Ok(action) if !used.contains(&action) => diagnostics.push(Diagnostic::warning(
                DiagnosticCode::REQUIRED_ACTION_UNUSED,
                format!("Level \"{}\" expects the '{action}' action", level.name),
            )),
            Ok(_) => {}
            Err(err) => diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UNKNOWN_REQUIRED_ACTION,
                format!("Level \"{}\" requires an {err}", level.name),
            )),
        }
    }

    check_position(
        &mut diagnostics,
        level,
        level.start_position,
        DiagnosticCode::START_NOT_OPEN,
        "Start",
    );
    check_position(
        &mut diagnostics,
        level,
        level.goal_position,
        DiagnosticCode::GOAL_NOT_OPEN,
        "Goal",
    );

    diagnostics
}

fn check_position(
    diagnostics: &mut Diagnostics,
    level: &PuzzleLevel,
    pos: Position,
    code: DiagnosticCode,
    what: &str,
) {
    if !level.grid.is_open(pos) {
        diagnostics.push(Diagnostic::warning(
            code,
            format!(
                "{what} position ({}, {}) is off the grid or on a wall",
                pos.x, pos.y
            ),
        ));
    }
}
