//! Condition evaluator: yes/no questions about the current world.

use nomad_types::{Predicate, PuzzleLevel, WorldState};
use tracing::debug;

/// Answer `predicate` for the character in `state`.
///
/// Pure. "Ahead" is the cell one unit along the facing direction, checked
/// against the run's own copy of the grid. Unknown predicate keys answer
/// `true` so graphs built against a newer palette still run.
pub fn evaluate(predicate: &Predicate, state: &WorldState, level: &PuzzleLevel) -> bool {
    match predicate {
        Predicate::WallAhead => wall_ahead(state),
        Predicate::CanMove => !wall_ahead(state),
        Predicate::AtGoal => at_goal(state, level),
        Predicate::NotAtGoal => !at_goal(state, level),
        Predicate::Unknown(key) => {
            debug!(predicate = %key, "unknown predicate, evaluating as true");
            true
        }
    }
}

/// Out of bounds counts as a wall.
fn wall_ahead(state: &WorldState) -> bool {
    let ahead = state.character.position.ahead(state.character.direction);
    !state.grid.is_open(ahead)
}

fn at_goal(state: &WorldState, level: &PuzzleLevel) -> bool {
    state.character.position == level.goal_position
}
