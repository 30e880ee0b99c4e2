//! Searchkit library.
//!
//! Exposes the graph-search engine and heuristics, the medal quest domain,
//! adversarial game search, belief tracking and the Sudoku CSP solver for use
//! by integration tests, benchmarks and the binary entry point.

pub mod belief;
pub mod config;
pub mod csp;
pub mod game;
pub mod quest;
pub mod search;
pub mod sudoku;
