//! Repeated runs over the same input produce byte-identical output.

use nomad_compiler::pipeline::{diagnose_json, execute_json, fingerprint_json, validate_json};
use nomad_compiler::reference::generate_palette;
use nomad_types::{Direction, Grid, Position, PuzzleLevel};

// ══════════════════════════════════════════════════════════════════════════════
// Fixtures
// ══════════════════════════════════════════════════════════════════════════════

/// Walk east while the way is clear, turning right at walls, three times over.
const WALKER: &str = r#"{
  "nodes": [
    {"id": "s", "kind": "entry"},
    {"id": "l", "kind": "loop", "payload": {"iterations": 3}},
    {"id": "c", "kind": "condition", "payload": {"predicateId": "canMove"}},
    {"id": "m", "kind": "action", "payload": {"actionKind": "move"}},
    {"id": "r", "kind": "action", "payload": {"actionKind": "turnRight"}},
    {"id": "e", "kind": "exit"}
  ],
  "edges": [
    {"id": "e1", "source": "s", "target": "l"},
    {"id": "e2", "source": "l", "target": "c"},
    {"id": "e3", "source": "c", "target": "m", "branch": "true"},
    {"id": "e4", "source": "c", "target": "r", "branch": "false"},
    {"id": "e5", "source": "m", "target": "l"},
    {"id": "e6", "source": "r", "target": "l"},
    {"id": "e7", "source": "l", "target": "e"}
  ]
}"#;

fn level_json() -> String {
    let level = PuzzleLevel::new(
        "walker",
        Grid::from_rows(&["S..#", "...G"]),
        Position::new(0, 0),
        Direction::East,
        Position::new(3, 1),
        12,
    )
    .with_min_steps(4);
    serde_json::to_string(&level).unwrap()
}

const RUNS: usize = 100;

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn execution_is_byte_identical() {
    let level = level_json();
    let first = execute_json(WALKER, &level, None);
    for _ in 0..RUNS {
        assert_eq!(execute_json(WALKER, &level, None), first);
    }
}

#[test]
fn validation_is_byte_identical() {
    let first = (validate_json(WALKER), diagnose_json(WALKER));
    for _ in 0..RUNS {
        assert_eq!((validate_json(WALKER), diagnose_json(WALKER)), first);
    }
}

#[test]
fn fingerprint_is_byte_identical() {
    let first = fingerprint_json(WALKER);
    for _ in 0..RUNS {
        assert_eq!(fingerprint_json(WALKER), first);
    }
}

#[test]
fn palette_is_byte_identical() {
    let first = generate_palette();
    for _ in 0..RUNS {
        assert_eq!(generate_palette(), first);
    }
}
