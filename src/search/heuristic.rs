//! Heuristics for A* over medal-quest states.
//!
//! `null_heuristic` works for any problem. The others estimate the remaining
//! cost of a `QuestState`:
//!
//! - `single_heuristic`: Manhattan distance to the first remaining medal.
//! - `better_heuristic`: the same target, with each axis weighted by the
//!   quest's step cost in the direction of travel.
//! - `gen_heuristic`: a weighted Euclidean estimate to every remaining medal,
//!   taking the largest. Not proven admissible; A* may return a suboptimal
//!   plan with it.
//!
//! Direction choice at a boundary: a medal in the same row counts as "south"
//! and a medal in the same column counts as "east".

use serde::{Deserialize, Serialize};

use crate::quest::{Direction, Position, QuestProblem, QuestState};

/// Row weight used by `gen_heuristic` when the medal lies to the north.
const GEN_NORTH_WEIGHT: f64 = 4.0;
/// Row weight used by `gen_heuristic` otherwise.
const GEN_SOUTH_WEIGHT: f64 = 3.0;
/// Column weight used by `gen_heuristic` when the medal lies to the west.
const GEN_WEST_WEIGHT: f64 = 1.0;
/// Column weight used by `gen_heuristic` otherwise.
const GEN_EAST_WEIGHT: f64 = 5.0;

/// Manhattan distance between two grid positions.
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// Always 0. A* with this heuristic behaves like UCS.
pub fn null_heuristic<S, P>(_state: &S, _problem: &P) -> f64 {
    0.0
}

/// Manhattan distance to the first remaining medal, or 0 if none remain.
pub fn single_heuristic(state: &QuestState, _problem: &QuestProblem) -> f64 {
    match state.medals.first() {
        Some(&medal) => manhattan_distance(state.position, medal) as f64,
        None => 0.0,
    }
}

/// Direction-weighted Manhattan distance to the first remaining medal.
pub fn better_heuristic(state: &QuestState, problem: &QuestProblem) -> f64 {
    let Some(&goal) = state.medals.first() else {
        return 0.0;
    };
    let (row, col) = state.position;

    let x = if row > goal.0 {
        problem.cost.get(Direction::N)
    } else {
        problem.cost.get(Direction::S)
    };
    let y = if col > goal.1 {
        problem.cost.get(Direction::W)
    } else {
        problem.cost.get(Direction::E)
    };

    x * (row - goal.0).abs() as f64 + y * (col - goal.1).abs() as f64
}

/// Largest weighted Euclidean estimate over all remaining medals.
pub fn gen_heuristic(state: &QuestState, _problem: &QuestProblem) -> f64 {
    let (row, col) = state.position;
    state
        .medals
        .iter()
        .map(|&(goal_row, goal_col)| {
            let x = if row > goal_row {
                GEN_NORTH_WEIGHT
            } else {
                GEN_SOUTH_WEIGHT
            };
            let y = if col > goal_col {
                GEN_WEST_WEIGHT
            } else {
                GEN_EAST_WEIGHT
            };
            let dr = x * (row - goal_row) as f64;
            let dc = y * (col - goal_col) as f64;
            (dr * dr + dc * dc).sqrt()
        })
        .fold(0.0, f64::max)
}

/// Named heuristic selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Null,
    Single,
    Better,
    Gen,
}

impl HeuristicKind {
    /// Returns the heuristic function for this kind.
    pub fn function(self) -> fn(&QuestState, &QuestProblem) -> f64 {
        match self {
            HeuristicKind::Null => null_heuristic::<QuestState, QuestProblem>,
            HeuristicKind::Single => single_heuristic,
            HeuristicKind::Better => better_heuristic,
            HeuristicKind::Gen => gen_heuristic,
        }
    }

    /// Parses a heuristic from its lowercase name.
    pub fn from_name(name: &str) -> Option<HeuristicKind> {
        match name {
            "null" => Some(HeuristicKind::Null),
            "single" => Some(HeuristicKind::Single),
            "better" => Some(HeuristicKind::Better),
            "gen" => Some(HeuristicKind::Gen),
            _ => None,
        }
    }
}
