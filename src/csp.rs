//! Binary constraint satisfaction problems.
//!
//! A `Csp` has a finite domain per variable, a neighbour graph naming which
//! variable pairs are constrained, and one predicate
//! `constraint(x, vx, y, vy)` that must hold for every assigned neighbour
//! pair. Solving is chronological backtracking, optionally after AC-3 arc
//! consistency pruning, with static or minimum-remaining-values ordering.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use tracing::{debug, trace};

/// Binary constraint predicate: `f(x, value_x, y, value_y)`.
pub type Constraint<V, T> = Box<dyn Fn(&V, &T, &V, &T) -> bool>;

/// Complete or partial variable assignment.
pub type Assignment<V, T> = BTreeMap<V, T>;

/// How the backtracking search picks the next variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariableOrdering {
    /// First unassigned variable in key order.
    #[default]
    Static,
    /// Unassigned variable with the fewest consistent values left; ties go
    /// to the first in key order.
    Mrv,
}

pub struct Csp<V, T> {
    domains: BTreeMap<V, BTreeSet<T>>,
    neighbors: BTreeMap<V, BTreeSet<V>>,
    constraint: Constraint<V, T>,
    /// Number of value assignments made by the last search.
    assignments: u64,
}

impl<V, T> Csp<V, T>
where
    V: Clone + Ord,
    T: Clone + Ord,
{
    pub fn new(
        domains: BTreeMap<V, BTreeSet<T>>,
        neighbors: BTreeMap<V, BTreeSet<V>>,
        constraint: Constraint<V, T>,
    ) -> Self {
        Csp {
            domains,
            neighbors,
            constraint,
            assignments: 0,
        }
    }

    pub fn domains(&self) -> &BTreeMap<V, BTreeSet<T>> {
        &self.domains
    }

    pub fn neighbors(&self, var: &V) -> impl Iterator<Item = &V> {
        self.neighbors.get(var).into_iter().flatten()
    }

    /// Value assignments made by the most recent `backtracking_search`.
    pub fn assignments(&self) -> u64 {
        self.assignments
    }

    /// Prunes domains until every arc is consistent.
    ///
    /// Returns `false` if some domain became empty, in which case the
    /// problem has no solution.
    pub fn ac3(&mut self) -> bool {
        let mut queue: VecDeque<(V, V)> = self
            .neighbors
            .iter()
            .flat_map(|(x, ns)| ns.iter().map(move |y| (x.clone(), y.clone())))
            .collect();
        let mut revisions = 0u64;

        while let Some((x, y)) = queue.pop_front() {
            if !self.revise(&x, &y) {
                continue;
            }
            revisions += 1;
            if self.domains.get(&x).map_or(true, BTreeSet::is_empty) {
                debug!(revisions, "ac3 wiped out a domain");
                return false;
            }
            for z in self.neighbors(&x) {
                if *z != y {
                    queue.push_back((z.clone(), x.clone()));
                }
            }
        }
        debug!(revisions, "ac3 finished");
        true
    }

    /// Removes values of `x` with no supporting value in `y`'s domain.
    fn revise(&mut self, x: &V, y: &V) -> bool {
        let Some(dy) = self.domains.get(y) else {
            return false;
        };
        let Some(dx) = self.domains.get(x) else {
            return false;
        };
        let unsupported: Vec<T> = dx
            .iter()
            .filter(|vx| !dy.iter().any(|vy| (self.constraint)(x, *vx, y, vy)))
            .cloned()
            .collect();
        if unsupported.is_empty() {
            return false;
        }
        if let Some(dx) = self.domains.get_mut(x) {
            for v in &unsupported {
                dx.remove(v);
            }
        }
        true
    }

    /// Searches for a complete, consistent assignment.
    pub fn backtracking_search(&mut self, ordering: VariableOrdering) -> Option<Assignment<V, T>> {
        self.assignments = 0;
        let mut assignment = Assignment::new();
        let solved = self.backtrack(&mut assignment, ordering);
        debug!(
            assignments = self.assignments,
            solved,
            ?ordering,
            "backtracking search finished"
        );
        solved.then_some(assignment)
    }

    fn backtrack(
        &mut self,
        assignment: &mut Assignment<V, T>,
        ordering: VariableOrdering,
    ) -> bool {
        let Some(var) = self.select_unassigned(assignment, ordering) else {
            return true;
        };
        for value in self.legal_values(&var, assignment) {
            assignment.insert(var.clone(), value);
            self.assignments += 1;
            trace!(assigned = assignment.len(), "assign");
            if self.backtrack(assignment, ordering) {
                return true;
            }
            assignment.remove(&var);
        }
        false
    }

    fn select_unassigned(
        &self,
        assignment: &Assignment<V, T>,
        ordering: VariableOrdering,
    ) -> Option<V> {
        let mut unassigned = self.domains.keys().filter(|v| !assignment.contains_key(*v));
        match ordering {
            VariableOrdering::Static => unassigned.next().cloned(),
            VariableOrdering::Mrv => {
                let mut best: Option<(&V, usize)> = None;
                for var in unassigned {
                    let n = self.legal_values(var, assignment).len();
                    if best.map_or(true, |(_, b)| n < b) {
                        best = Some((var, n));
                    }
                }
                best.map(|(v, _)| v.clone())
            }
        }
    }

    /// Domain values of `var` consistent with every assigned neighbour.
    fn legal_values(&self, var: &V, assignment: &Assignment<V, T>) -> Vec<T> {
        let Some(domain) = self.domains.get(var) else {
            return Vec::new();
        };
        domain
            .iter()
            .filter(|value| {
                self.neighbors(var).all(|n| match assignment.get(n) {
                    Some(nv) => (self.constraint)(var, *value, n, nv),
                    None => true,
                })
            })
            .cloned()
            .collect()
    }
}

impl<V: fmt::Debug, T: fmt::Debug> fmt::Debug for Csp<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Csp")
            .field("variables", &self.domains.len())
            .field("assignments", &self.assignments)
            .finish_non_exhaustive()
    }
}
