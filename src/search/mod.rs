//! Graph search.
//!
//! Uninformed (BFS, UCS) and informed (A*) search over any `Problem`,
//! sharing one driver, one node arena and two frontier policies.

pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;

pub use frontier::{Frontier, PriorityQueue, Queue};
pub use graph::{
    astar, astar_search, bfs, bfs_search, graph_search, ucs, ucs_search, Problem, SearchResult,
};
pub use heuristic::{
    better_heuristic, gen_heuristic, manhattan_distance, null_heuristic, single_heuristic,
    HeuristicKind,
};
pub use node::{Node, NodeArena, NodeId};
