//! Graph search: BFS, uniform-cost search and A*.
//!
//! All three algorithms share one driver, `graph_search`, which differs only
//! in the frontier policy and the priority assigned to each generated node:
//!
//! | algorithm | frontier        | priority                 |
//! |-----------|-----------------|--------------------------|
//! | BFS       | `Queue`         | ignored                  |
//! | UCS       | `PriorityQueue` | `g`                      |
//! | A*        | `PriorityQueue` | `g + h(state, problem)`  |
//!
//! The goal test happens when a node is popped, not when it is generated, and
//! a state is expanded at most once per call (graph search, not tree search).

use std::collections::HashSet;
use std::hash::Hash;

use tracing::{debug, trace};

use super::frontier::{Frontier, PriorityQueue, Queue};
use super::node::{Node, NodeArena};

/// A search problem as seen by the graph-search engine.
///
/// Step costs must be non-negative for UCS and A* to return optimal plans.
/// This is not checked.
pub trait Problem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn start_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Returns every `(child_state, action, step_cost)` reachable in one step.
    fn expand(&self, state: &Self::State) -> Vec<(Self::State, Self::Action, f64)>;
}

/// A plan found by `graph_search`, with bookkeeping counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<A> {
    /// Actions from the start state to the goal, oldest first.
    pub actions: Vec<A>,
    /// Sum of step costs along `actions`.
    pub cost: f64,
    /// Number of states passed to `Problem::expand`.
    pub expanded: u64,
    /// Number of nodes created, including the root.
    pub generated: u64,
}

/// Generic graph-search driver.
///
/// `priority` receives a node's state and its path cost `g` and returns the
/// key under which the node is pushed onto `frontier`. Returns `None` when the
/// frontier is exhausted without reaching a goal.
pub fn graph_search<P, F, K>(
    problem: &P,
    mut frontier: F,
    priority: K,
) -> Option<SearchResult<P::Action>>
where
    P: Problem,
    F: Frontier,
    K: Fn(&P::State, f64) -> f64,
{
    let mut arena: NodeArena<P::State, P::Action> = NodeArena::new();
    let mut closed: HashSet<P::State> = HashSet::new();
    let mut expanded = 0u64;

    let start = problem.start_state();
    let root_priority = priority(&start, 0.0);
    let root = arena.allocate(Node::root(start));
    frontier.push(root, root_priority);

    while let Some(id) = frontier.pop() {
        let node = arena.get(id);
        if problem.is_goal(&node.state) {
            let result = SearchResult {
                actions: arena.actions(id),
                cost: node.cumulative_cost,
                expanded,
                generated: arena.len() as u64,
            };
            debug!(
                expanded = result.expanded,
                generated = result.generated,
                cost = result.cost,
                plan_len = result.actions.len(),
                "graph search reached goal"
            );
            return Some(result);
        }

        if closed.contains(&node.state) {
            continue;
        }
        let state = node.state.clone();
        let cost = node.cumulative_cost;
        let successors = problem.expand(&state);
        expanded += 1;
        trace!(node = id.0, successors = successors.len(), g = cost, "expand");
        closed.insert(state);

        for (child_state, action, step_cost) in successors {
            let g = cost + step_cost;
            let key = priority(&child_state, g);
            let child = arena.allocate(Node::child(child_state, id, action, g));
            frontier.push(child, key);
        }
    }

    debug!(
        expanded,
        generated = arena.len() as u64,
        "graph search exhausted frontier"
    );
    None
}

/// Breadth-first graph search. Optimal only when every step costs the same.
pub fn bfs<P: Problem>(problem: &P) -> Option<Vec<P::Action>> {
    bfs_search(problem).map(|r| r.actions)
}

/// Uniform-cost graph search. Optimal for non-negative step costs.
pub fn ucs<P: Problem>(problem: &P) -> Option<Vec<P::Action>> {
    ucs_search(problem).map(|r| r.actions)
}

/// A* graph search with the given heuristic.
///
/// The plan is optimal only if `heuristic` is admissible and consistent;
/// neither property is verified, and violating them silently yields a
/// suboptimal plan.
pub fn astar<P, H>(problem: &P, heuristic: H) -> Option<Vec<P::Action>>
where
    P: Problem,
    H: Fn(&P::State, &P) -> f64,
{
    astar_search(problem, heuristic).map(|r| r.actions)
}

/// BFS returning the full `SearchResult`.
pub fn bfs_search<P: Problem>(problem: &P) -> Option<SearchResult<P::Action>> {
    graph_search(problem, Queue::new(), |_, _| 0.0)
}

/// UCS returning the full `SearchResult`.
pub fn ucs_search<P: Problem>(problem: &P) -> Option<SearchResult<P::Action>> {
    graph_search(problem, PriorityQueue::new(), |_, g| g)
}

/// A* returning the full `SearchResult`.
pub fn astar_search<P, H>(problem: &P, heuristic: H) -> Option<SearchResult<P::Action>>
where
    P: Problem,
    H: Fn(&P::State, &P) -> f64,
{
    graph_search(problem, PriorityQueue::new(), |state, g| {
        g + heuristic(state, problem)
    })
}
