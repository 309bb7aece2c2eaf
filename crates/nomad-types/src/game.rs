//! Puzzle, world and result types.

use serde::{Deserialize, Serialize};

use crate::graph::ActionKind;

// ══════════════════════════════════════════════════════════════════════════════
// Geometry
// ══════════════════════════════════════════════════════════════════════════════

/// Grid coordinate. `y` grows southwards (row index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step ahead when facing `direction`.
    pub fn ahead(self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Facing direction of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Unit step `(dx, dy)` for this facing.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Rotate 90° counter-clockwise: north → west → south → east → north.
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Rotate 90° clockwise: north → east → south → west → north.
    pub fn turn_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Grid
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Empty,
    Wall,
    Treasure,
    Start,
    Goal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(alias = "type")]
    pub kind: CellKind,
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(kind: CellKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }
}

/// What occupies a coordinate, from the character's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellProbe {
    Open,
    Wall,
    OutOfBounds,
}

/// Rows of cells, indexed `[y][x]`. Rows may differ in length; bounds are
/// checked against the row the coordinate falls in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub Vec<Vec<Cell>>);

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self(rows)
    }

    /// Build a grid from one character per cell: `#` wall, `S` start,
    /// `G` goal, `T` treasure, anything else empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .zip(0i32..)
            .map(|(row, y)| {
                row.chars()
                    .zip(0i32..)
                    .map(|(ch, x)| {
                        let kind = match ch {
                            '#' => CellKind::Wall,
                            'S' => CellKind::Start,
                            'G' => CellKind::Goal,
                            'T' => CellKind::Treasure,
                            _ => CellKind::Empty,
                        };
                        Cell::new(kind, x, y)
                    })
                    .collect()
            })
            .collect();
        Self(cells)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.0.get(y)?.get(x)
    }

    pub fn probe(&self, pos: Position) -> CellProbe {
        match self.cell(pos) {
            None => CellProbe::OutOfBounds,
            Some(cell) if cell.kind == CellKind::Wall => CellProbe::Wall,
            Some(_) => CellProbe::Open,
        }
    }

    /// In bounds and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        self.probe(pos) == CellProbe::Open
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Level
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub position: Position,
    pub direction: Direction,
}

/// A puzzle supplied by the level catalog. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleLevel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub grid: Grid,
    pub start_position: Position,
    pub start_direction: Direction,
    pub goal_position: Position,
    /// Action budget; reaching it without standing on the goal fails the run.
    pub max_steps: u32,
    /// Length of the reference solution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
    /// Action keys a solution is expected to use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_actions: Option<Vec<String>>,
}

impl PuzzleLevel {
    /// A level with only the fields the engine needs.
    pub fn new(
        id: impl Into<String>,
        grid: Grid,
        start: Position,
        direction: Direction,
        goal: Position,
        max_steps: u32,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            grid,
            start_position: start,
            start_direction: direction,
            goal_position: goal,
            max_steps,
            min_steps: None,
            difficulty: None,
            hints: None,
            required_actions: None,
        }
    }

    pub fn with_min_steps(mut self, min_steps: u32) -> Self {
        self.min_steps = Some(min_steps);
        self
    }

    pub fn with_required_actions(mut self, actions: &[ActionKind]) -> Self {
        self.required_actions = Some(actions.iter().map(|a| a.as_str().to_string()).collect());
        self
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// World state & result
// ══════════════════════════════════════════════════════════════════════════════

/// Why a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// Ran out of the level's step budget.
    MaxSteps,
    /// Walked into a wall.
    Collision,
    /// Walked off the grid.
    OutOfBounds,
    /// Hit the engine's execution ceiling.
    InfiniteLoop,
}

/// The most recent primitive applied, for the game UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LastAction {
    #[serde(rename = "move")]
    Move,
    #[serde(rename = "move (blocked)")]
    MoveBlocked,
    #[serde(rename = "turnLeft")]
    TurnLeft,
    #[serde(rename = "turnRight")]
    TurnRight,
    #[serde(rename = "wait")]
    Wait,
}

/// Simulated world, owned by a single engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    pub character: Character,
    pub grid: Grid,
    pub step_count: u32,
    pub is_complete: bool,
    pub is_failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<LastAction>,
}

impl WorldState {
    /// Fresh state at the level's start, with its own copy of the grid.
    pub fn from_level(level: &PuzzleLevel) -> Self {
        Self {
            character: Character {
                position: level.start_position,
                direction: level.start_direction,
            },
            grid: level.grid.clone(),
            step_count: 0,
            is_complete: false,
            is_failed: false,
            failure_reason: None,
            last_action: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_complete || self.is_failed
    }

    /// Ignored once the run has failed.
    pub fn mark_complete(&mut self) {
        if !self.is_failed {
            self.is_complete = true;
        }
    }

    /// Ignored once the run has completed or already failed.
    pub fn mark_failed(&mut self, reason: FailureReason) {
        if !self.is_terminal() {
            self.is_failed = true;
            self.failure_reason = Some(reason);
        }
    }
}

/// The engine's verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    pub step_count: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_state: Option<WorldState>,
}

impl ExecutionResult {
    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.final_state.as_ref().and_then(|s| s.failure_reason)
    }
}
