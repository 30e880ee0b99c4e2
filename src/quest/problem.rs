//! The medal quest: a grid walker collecting every medal on the map.
//!
//! Rows grow southward and columns grow eastward, so `N` decreases the row
//! and `W` decreases the column. Each direction has its own step cost.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::search::Problem;

/// A grid coordinate as `(row, column)`.
pub type Position = (i32, i32);

/// One of the four compass moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

/// All directions in expansion order.
pub const ALL_DIRECTIONS: [Direction; 4] =
    [Direction::N, Direction::S, Direction::E, Direction::W];

impl Direction {
    /// Returns the `(row, column)` offset of one step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (-1, 0),
            Direction::S => (1, 0),
            Direction::E => (0, 1),
            Direction::W => (0, -1),
        }
    }

    /// Parses a direction from its single-letter name.
    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'N' => Some(Direction::N),
            'S' => Some(Direction::S),
            'E' => Some(Direction::E),
            'W' => Some(Direction::W),
            _ => None,
        }
    }
}

/// Per-direction step costs. Missing fields deserialize as 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectionCosts {
    pub n: f64,
    pub s: f64,
    pub e: f64,
    pub w: f64,
}

impl DirectionCosts {
    /// Same cost in every direction.
    pub const fn uniform(cost: f64) -> Self {
        DirectionCosts {
            n: cost,
            s: cost,
            e: cost,
            w: cost,
        }
    }

    /// Parses `"N,S,E,W"`, e.g. `"4,1,9,1"`. Costs must be finite and
    /// non-negative.
    pub fn from_list(text: &str) -> Option<Self> {
        let values: Vec<f64> = text
            .split(',')
            .map(|v| v.trim().parse::<f64>().ok())
            .collect::<Option<_>>()?;
        match values[..] {
            [n, s, e, w] if values.iter().all(|c| c.is_finite() && *c >= 0.0) => {
                Some(DirectionCosts { n, s, e, w })
            }
            _ => None,
        }
    }

    pub const fn get(&self, dir: Direction) -> f64 {
        match dir {
            Direction::N => self.n,
            Direction::S => self.s,
            Direction::E => self.e,
            Direction::W => self.w,
        }
    }
}

impl Default for DirectionCosts {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Walker position plus the medals still on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestState {
    pub position: Position,
    /// Remaining medals in layout reading order.
    pub medals: Vec<Position>,
}

/// A medal quest on a walled rectangular grid.
#[derive(Debug, Clone)]
pub struct QuestProblem {
    pub rows: i32,
    pub cols: i32,
    pub walls: HashSet<Position>,
    pub start: Position,
    pub medals: Vec<Position>,
    pub cost: DirectionCosts,
}

impl QuestProblem {
    /// Creates a quest with uniform unit step costs.
    pub fn new(
        rows: i32,
        cols: i32,
        walls: HashSet<Position>,
        start: Position,
        medals: Vec<Position>,
    ) -> Self {
        QuestProblem {
            rows,
            cols,
            walls,
            start,
            medals,
            cost: DirectionCosts::default(),
        }
    }

    /// Replaces the step costs.
    pub fn with_costs(mut self, cost: DirectionCosts) -> Self {
        self.cost = cost;
        self
    }

    /// Returns true if `pos` is on the grid and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        (0..self.rows).contains(&pos.0)
            && (0..self.cols).contains(&pos.1)
            && !self.walls.contains(&pos)
    }

    /// Applies one step, or returns `None` if it would leave the open cells.
    pub fn step(&self, state: &QuestState, dir: Direction) -> Option<QuestState> {
        let (dr, dc) = dir.delta();
        let next = (state.position.0 + dr, state.position.1 + dc);
        if !self.is_open(next) {
            return None;
        }
        let medals = state.medals.iter().copied().filter(|&m| m != next).collect();
        Some(QuestState {
            position: next,
            medals,
        })
    }

    /// Replays `plan` from the start state.
    ///
    /// Returns the total cost if every step is legal and the final state is a
    /// goal, `None` otherwise.
    pub fn plan_cost(&self, plan: &[Direction]) -> Option<f64> {
        let mut state = self.start_state();
        let mut total = 0.0;
        for &dir in plan {
            state = self.step(&state, dir)?;
            total += self.cost.get(dir);
        }
        self.is_goal(&state).then_some(total)
    }
}

impl Problem for QuestProblem {
    type State = QuestState;
    type Action = Direction;

    fn start_state(&self) -> QuestState {
        QuestState {
            position: self.start,
            medals: self.medals.iter().copied().filter(|&m| m != self.start).collect(),
        }
    }

    fn is_goal(&self, state: &QuestState) -> bool {
        state.medals.is_empty()
    }

    fn expand(&self, state: &QuestState) -> Vec<(QuestState, Direction, f64)> {
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&dir| {
                self.step(state, dir)
                    .map(|next| (next, dir, self.cost.get(dir)))
            })
            .collect()
    }
}
