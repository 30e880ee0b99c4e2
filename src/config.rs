//! Solver configuration and the dispatch from configuration to search.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::quest::{Direction, DirectionCosts, QuestProblem};
use crate::search::{astar_search, bfs_search, ucs_search, HeuristicKind, SearchResult};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Graph-search algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bfs,
    Ucs,
    #[default]
    Astar,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Algorithm> {
        match name {
            "bfs" => Some(Algorithm::Bfs),
            "ucs" => Some(Algorithm::Ucs),
            "astar" => Some(Algorithm::Astar),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Ucs => "ucs",
            Algorithm::Astar => "astar",
        }
    }
}

/// Configuration for one solver run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolveConfig {
    pub algorithm: Algorithm,
    /// Only consulted by A*.
    pub heuristic: HeuristicKind,
    /// Step costs applied to the quest before searching.
    pub costs: DirectionCosts,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            algorithm: Algorithm::Astar,
            heuristic: HeuristicKind::Null,
            costs: DirectionCosts::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl SolveConfig {
    /// Loads a JSON configuration. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Solves `problem` with the configured step costs, algorithm and heuristic.
///
/// The configured costs replace whatever costs `problem` carries.
pub fn solve(problem: &QuestProblem, config: &SolveConfig) -> Option<SearchResult<Direction>> {
    let problem = problem.clone().with_costs(config.costs);
    info!(
        algorithm = config.algorithm.name(),
        heuristic = ?config.heuristic,
        costs = ?config.costs,
        medals = problem.medals.len(),
        "solving"
    );
    match config.algorithm {
        Algorithm::Bfs => bfs_search(&problem),
        Algorithm::Ucs => ucs_search(&problem),
        Algorithm::Astar => astar_search(&problem, config.heuristic.function()),
    }
}

/// Machine-readable summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub algorithm: Algorithm,
    /// `None` when no plan exists.
    pub actions: Option<Vec<Direction>>,
    pub cost: Option<f64>,
    pub expanded: Option<u64>,
}

impl Report {
    pub fn new(algorithm: Algorithm, result: Option<SearchResult<Direction>>) -> Self {
        match result {
            Some(r) => Report {
                algorithm,
                actions: Some(r.actions),
                cost: Some(r.cost),
                expanded: Some(r.expanded),
            },
            None => Report {
                algorithm,
                actions: None,
                cost: None,
                expanded: None,
            },
        }
    }
}
