//! Medal quest domain.
//!
//! A concrete `Problem` for the graph-search engine: a walker on a walled
//! grid who must collect every medal, paying a per-direction step cost.
//! The heuristics in `search::heuristic` are written against this domain.

pub mod layout;
pub mod problem;

pub use layout::{parse_layout, LayoutError};
pub use problem::{
    Direction, DirectionCosts, Position, QuestProblem, QuestState, ALL_DIRECTIONS,
};
