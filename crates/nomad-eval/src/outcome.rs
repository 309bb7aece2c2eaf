//! Result messages shown to the player.

use nomad_types::{FailureReason, PuzzleLevel};

pub const NO_ENTRY_MESSAGE: &str = "No entry node found";
pub const SUCCESS_MESSAGE: &str = "Success! 🎉";
pub const DID_NOT_FINISH_MESSAGE: &str =
    "The algorithm did not finish: the graph ended before the goal was reached.";

/// Baseline success message, upgraded by how close the run came to the
/// level's reference solution.
///
/// A `minSteps` of zero is treated as absent.
pub fn success_message(step_count: u32, level: &PuzzleLevel) -> String {
    let mut message = String::from(SUCCESS_MESSAGE);
    let upgrade = match level.min_steps.filter(|&min| min > 0) {
        Some(min) if step_count == min => Some(" (Optimal solution!)"),
        Some(min) if step_count <= min.saturating_add(2) => Some(" (Great job!)"),
        _ if f64::from(step_count) < f64::from(level.max_steps) * 0.7 => Some(" (Well done!)"),
        _ => None,
    };
    if let Some(suffix) = upgrade {
        message.push_str(suffix);
    }
    message
}

pub fn failure_message(reason: FailureReason, step_count: u32, level: &PuzzleLevel) -> String {
    match reason {
        FailureReason::MaxSteps => format!("Too many steps ({step_count}/{})", level.max_steps),
        FailureReason::Collision => "Hit a wall!".to_string(),
        FailureReason::OutOfBounds => "Walked off the map!".to_string(),
        FailureReason::InfiniteLoop => {
            "Infinite loop detected. Check your algorithm.".to_string()
        }
    }
}
