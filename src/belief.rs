//! Discrete Bayesian belief over the cells of a square grid.
//!
//! The belief tracks where a hidden target is, given noisy colour readings
//! from a sensor whose output depends only on the Manhattan distance between
//! the sensed cell and the target. Cells that have been sensed are "closed";
//! the rest are "open".

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::quest::Position;
use crate::search::manhattan_distance;

/// Likelihood of a sensor reading given the distance to the target.
pub trait SensorModel {
    type Color;

    /// `P(color | distance)`.
    fn probability(&self, color: &Self::Color, distance: i32) -> f64;
}

/// Probability distribution over grid cells plus the set of unsensed cells.
#[derive(Debug, Clone)]
pub struct Belief {
    size: i32,
    open: BTreeSet<Position>,
    distribution: BTreeMap<Position, f64>,
}

impl Belief {
    /// Uniform belief over a `size x size` grid with every cell open.
    pub fn new(size: i32) -> Self {
        let open: BTreeSet<Position> = (0..size)
            .flat_map(|x| (0..size).map(move |y| (x, y)))
            .collect();
        let p = 1.0 / (size * size).max(1) as f64;
        let distribution = open.iter().map(|&pos| (pos, p)).collect();
        Belief {
            size,
            open,
            distribution,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Current probability of `pos`; 0 for cells off the grid.
    pub fn probability(&self, pos: Position) -> f64 {
        self.distribution.get(&pos).copied().unwrap_or(0.0)
    }

    pub fn distribution(&self) -> &BTreeMap<Position, f64> {
        &self.distribution
    }

    /// Cells not yet sensed.
    pub fn open(&self) -> &BTreeSet<Position> {
        &self.open
    }

    /// Incorporates a reading of `color` taken at `sensor`.
    ///
    /// Each cell's prior is multiplied by `P(color | distance(sensor, cell))`
    /// and the result renormalised. If every posterior is zero the
    /// distribution is left unnormalised (all zero). The sensed cell is closed.
    pub fn update<M: SensorModel>(&mut self, color: &M::Color, sensor: Position, model: &M) {
        let mut total = 0.0;
        for (&cell, p) in self.distribution.iter_mut() {
            *p *= model.probability(color, manhattan_distance(sensor, cell));
            total += *p;
        }
        if total > 0.0 {
            for p in self.distribution.values_mut() {
                *p /= total;
            }
        }
        self.open.remove(&sensor);
        debug!(
            sensor_row = sensor.0,
            sensor_col = sensor.1,
            evidence = total,
            open = self.open.len(),
            "belief updated"
        );
    }

    /// Suggests the next cell to sense.
    ///
    /// - Open cells remain, some with non-zero probability: the most probable
    ///   open cell.
    /// - Open cells remain, all at zero: the open cell closest to the most
    ///   probable sensed cell.
    /// - No open cells: the most probable cell overall.
    ///
    /// Ties go to the first cell in `(row, col)` order.
    pub fn recommend_sensing(&self) -> Option<Position> {
        if self.open.is_empty() {
            return argmax(self.distribution.iter().map(|(&c, &p)| (c, p)));
        }

        let all_zero = self.open.iter().all(|c| self.probability(*c) == 0.0);
        if !all_zero {
            return argmax(self.open.iter().map(|&c| (c, self.probability(c))));
        }

        let observed = self
            .distribution
            .iter()
            .filter(|(c, _)| !self.open.contains(*c))
            .map(|(&c, &p)| (c, p));
        let best_observed = argmax(observed)?;
        closest_point(best_observed, self.open.iter().copied())
    }
}

/// First cell with the highest probability.
fn argmax(cells: impl Iterator<Item = (Position, f64)>) -> Option<Position> {
    let mut best: Option<(Position, f64)> = None;
    for (cell, p) in cells {
        if best.map_or(true, |(_, b)| p > b) {
            best = Some((cell, p));
        }
    }
    best.map(|(c, _)| c)
}

/// The candidate nearest to `from` by Manhattan distance; the first on ties.
pub fn closest_point(
    from: Position,
    candidates: impl IntoIterator<Item = Position>,
) -> Option<Position> {
    candidates
        .into_iter()
        .fold(None, |best: Option<(Position, i32)>, c| {
            let d = manhattan_distance(from, c);
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((c, d)),
            }
        })
        .map(|(c, _)| c)
}
