//! Minimax, alpha-beta and depth-limited alpha-beta search.
//!
//! Every evaluator checks terminal positions in the same order: AI win,
//! user win, tie. Terminal utilities are +1, -1 and 0. The depth-limited
//! variant substitutes `GameState::eval` for positions at its depth limit
//! and clamps terminal utilities so a won position never scores below 1 and
//! a lost one never above -1.
//!
//! Plain `minimax` and `alphabeta` search to the end of the game. On deep
//! game trees they can exhaust the stack; use `abdl` to bound the recursion.

use rand::Rng;
use tracing::debug;

use super::{Agent, GameState};

/// Picks the move whose successor scores highest. Ties keep the first move.
fn best_move<G, F>(state: &G, mut score: F) -> Option<G::Move>
where
    G: GameState,
    F: FnMut(&G) -> f64,
{
    let mut best: Option<(G::Move, f64)> = None;
    for mv in state.possible_moves() {
        let v = score(&state.successor(&mv, Agent::Ai));
        if best.as_ref().map_or(true, |(_, b)| v > *b) {
            best = Some((mv, v));
        }
    }
    if let Some((_, v)) = &best {
        debug!(value = *v, "selected move");
    }
    best.map(|(mv, _)| mv)
}

/// Terminal utility, or `None` if the game is still running.
fn terminal_utility<G: GameState>(state: &G) -> Option<f64> {
    if state.is_win(Agent::Ai) {
        Some(1.0)
    } else if state.is_win(Agent::User) {
        Some(-1.0)
    } else if state.is_tie() {
        Some(0.0)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Minimax
// ---------------------------------------------------------------------------

/// Best AI move by exhaustive minimax, or `None` if no move is possible.
pub fn minimax<G: GameState>(state: &G) -> Option<G::Move> {
    best_move(state, |next| value(next, Agent::User))
}

/// Minimax value of `state` with `agent` to move.
pub fn value<G: GameState>(state: &G, agent: Agent) -> f64 {
    if let Some(u) = terminal_utility(state) {
        return u;
    }
    match agent {
        Agent::Ai => max_value(state),
        Agent::User => min_value(state),
    }
}

/// Value of a non-terminal state with the AI to move.
pub fn max_value<G: GameState>(state: &G) -> f64 {
    state
        .possible_moves()
        .iter()
        .map(|mv| value(&state.successor(mv, Agent::Ai), Agent::User))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Value of a non-terminal state with the user to move.
pub fn min_value<G: GameState>(state: &G) -> f64 {
    state
        .possible_moves()
        .iter()
        .map(|mv| value(&state.successor(mv, Agent::User), Agent::Ai))
        .fold(f64::INFINITY, f64::min)
}

// ---------------------------------------------------------------------------
// Alpha-beta
// ---------------------------------------------------------------------------

/// Best AI move by minimax with alpha-beta pruning.
///
/// Each root move is scored with a fresh `(-inf, +inf)` window, so the
/// returned move matches `minimax` whenever the best value is unique.
pub fn alphabeta<G: GameState>(state: &G) -> Option<G::Move> {
    best_move(state, |next| {
        ab_value(next, Agent::User, f64::NEG_INFINITY, f64::INFINITY)
    })
}

/// Alpha-beta value of `state` with `agent` to move.
pub fn ab_value<G: GameState>(state: &G, agent: Agent, alpha: f64, beta: f64) -> f64 {
    if let Some(u) = terminal_utility(state) {
        return u;
    }
    match agent {
        Agent::Ai => ab_max_value(state, alpha, beta),
        Agent::User => ab_min_value(state, alpha, beta),
    }
}

fn ab_max_value<G: GameState>(state: &G, alpha: f64, beta: f64) -> f64 {
    let mut a = alpha;
    let mut v = f64::NEG_INFINITY;
    for mv in state.possible_moves() {
        let next = state.successor(&mv, Agent::Ai);
        v = v.max(ab_value(&next, Agent::User, a, beta));
        if v >= beta {
            return v;
        }
        a = a.max(v);
    }
    v
}

fn ab_min_value<G: GameState>(state: &G, alpha: f64, beta: f64) -> f64 {
    let mut b = beta;
    let mut v = f64::INFINITY;
    for mv in state.possible_moves() {
        let next = state.successor(&mv, Agent::User);
        v = v.min(ab_value(&next, Agent::Ai, alpha, b));
        if v <= alpha {
            return v;
        }
        b = b.min(v);
    }
    v
}

// ---------------------------------------------------------------------------
// Depth-limited alpha-beta
// ---------------------------------------------------------------------------

/// Best AI move by alpha-beta limited to `depth` plies below each root move.
pub fn abdl<G: GameState>(state: &G, depth: u32) -> Option<G::Move> {
    best_move(state, |next| {
        abdl_value(next, Agent::User, f64::NEG_INFINITY, f64::INFINITY, depth)
    })
}

/// Depth-limited alpha-beta value of `state` with `agent` to move.
///
/// Won and lost positions score `max(1, eval)` and `min(-1, eval)`; at
/// `depth == 0` a running game scores `eval`.
pub fn abdl_value<G: GameState>(
    state: &G,
    agent: Agent,
    alpha: f64,
    beta: f64,
    depth: u32,
) -> f64 {
    if state.is_win(Agent::Ai) {
        return state.eval().max(1.0);
    }
    if state.is_win(Agent::User) {
        return state.eval().min(-1.0);
    }
    if state.is_tie() {
        return 0.0;
    }
    if depth == 0 {
        return state.eval();
    }
    match agent {
        Agent::Ai => abdl_max_value(state, alpha, beta, depth),
        Agent::User => abdl_min_value(state, alpha, beta, depth),
    }
}

fn abdl_max_value<G: GameState>(state: &G, alpha: f64, beta: f64, depth: u32) -> f64 {
    let mut a = alpha;
    let mut v = f64::NEG_INFINITY;
    for mv in state.possible_moves() {
        let next = state.successor(&mv, Agent::Ai);
        v = v.max(abdl_value(&next, Agent::User, a, beta, depth - 1));
        if v >= beta {
            return v;
        }
        a = a.max(v);
    }
    v
}

fn abdl_min_value<G: GameState>(state: &G, alpha: f64, beta: f64, depth: u32) -> f64 {
    let mut b = beta;
    let mut v = f64::INFINITY;
    for mv in state.possible_moves() {
        let next = state.successor(&mv, Agent::User);
        v = v.min(abdl_value(&next, Agent::Ai, alpha, b, depth - 1));
        if v <= alpha {
            return v;
        }
        b = b.min(v);
    }
    v
}

/// Picks a uniformly random available cell, or `None` if the position has no
/// possible moves.
pub fn random_move<G: GameState>(state: &G, rng: &mut impl Rng) -> Option<(usize, usize)> {
    if state.size() == 0 || state.possible_moves().is_empty() {
        return None;
    }
    loop {
        let row = rng.gen_range(0..state.size());
        let col = rng.gen_range(0..state.size());
        if state.available(row, col) {
            return Some((row, col));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TicTacToe;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::Cell;

    fn board(s: &str) -> TicTacToe {
        s.parse().unwrap()
    }

    /// Wraps a board and counts how many positions the search visits.
    #[derive(Clone)]
    struct Counting<'a> {
        inner: TicTacToe,
        visits: &'a Cell<u64>,
    }

    impl GameState for Counting<'_> {
        type Move = (usize, usize);

        fn size(&self) -> usize {
            self.inner.size()
        }
        fn available(&self, row: usize, col: usize) -> bool {
            self.inner.available(row, col)
        }
        fn possible_moves(&self) -> Vec<(usize, usize)> {
            self.inner.possible_moves()
        }
        fn successor(&self, mv: &(usize, usize), agent: Agent) -> Self {
            self.visits.set(self.visits.get() + 1);
            Counting {
                inner: self.inner.successor(mv, agent),
                visits: self.visits,
            }
        }
        fn is_win(&self, agent: Agent) -> bool {
            self.inner.is_win(agent)
        }
        fn is_tie(&self) -> bool {
            self.inner.is_tie()
        }
        fn eval(&self) -> f64 {
            self.inner.eval()
        }
    }

    /// A terminal position whose static evaluation disagrees with the result.
    struct Fixed {
        ai_won: bool,
        user_won: bool,
        eval: f64,
    }

    impl GameState for Fixed {
        type Move = ();

        fn size(&self) -> usize {
            0
        }
        fn available(&self, _: usize, _: usize) -> bool {
            false
        }
        fn possible_moves(&self) -> Vec<()> {
            Vec::new()
        }
        fn successor(&self, _: &(), _: Agent) -> Self {
            unreachable!("terminal position has no successors")
        }
        fn is_win(&self, agent: Agent) -> bool {
            match agent {
                Agent::Ai => self.ai_won,
                Agent::User => self.user_won,
            }
        }
        fn is_tie(&self) -> bool {
            false
        }
        fn eval(&self) -> f64 {
            self.eval
        }
    }

    fn sign(x: f64) -> i8 {
        if x > 0.0 {
            1
        } else if x < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Random non-terminal positions reached by seeded random play.
    fn random_positions(count: usize, plies: usize, seed: u64) -> Vec<TicTacToe> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut out = Vec::new();
        while out.len() < count {
            let mut b = TicTacToe::new(3);
            let mut agent = Agent::Ai;
            for _ in 0..plies {
                let mv = random_move(&b, &mut rng).unwrap();
                b = b.successor(&mv, agent);
                agent = agent.opponent();
            }
            if terminal_utility(&b).is_none() {
                out.push(b);
            }
        }
        out
    }

    #[test]
    fn all_searches_take_the_immediate_win() {
        // AI (X) completes the top row at (0, 2).
        let b = board("XX./OO./...");
        assert_eq!(minimax(&b), Some((0, 2)));
        assert_eq!(alphabeta(&b), Some((0, 2)));
        assert_eq!(abdl(&b, 4), Some((0, 2)));
    }

    #[test]
    fn searches_agree_on_winning_value() {
        let b = board("XX./OO./...");
        let next = b.successor(&(0, 2), Agent::Ai);
        let inf = f64::INFINITY;
        assert_eq!(value(&next, Agent::User), 1.0);
        assert_eq!(ab_value(&next, Agent::User, -inf, inf), 1.0);
        assert!(abdl_value(&next, Agent::User, -inf, inf, 9) >= 1.0);

        // Before the winning move the position is still running, so each
        // evaluator has to search to find the win.
        assert_eq!(terminal_utility(&b), None);
        assert_eq!(value(&b, Agent::Ai), 1.0);
        assert_eq!(ab_value(&b, Agent::Ai, -inf, inf), 1.0);
        assert!(abdl_value(&b, Agent::Ai, -inf, inf, 9) >= 1.0);
        assert_eq!(max_value(&b), value(&b, Agent::Ai));
    }

    #[test]
    fn blocks_the_opponents_threat() {
        // User threatens the middle row; AI has no win of its own.
        let b = board("X../OO./..X");
        assert_eq!(minimax(&b), Some((1, 2)));
        assert_eq!(alphabeta(&b), Some((1, 2)));
    }

    #[test]
    fn no_moves_means_no_move() {
        let full = board("XOX/XOO/OXX");
        assert_eq!(minimax(&full), None);
        assert_eq!(alphabeta(&full), None);
        assert_eq!(abdl(&full, 3), None);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(random_move(&full, &mut rng), None);
    }

    #[test]
    fn empty_board_is_a_draw_with_perfect_play() {
        let b = TicTacToe::new(3);
        let inf = f64::INFINITY;
        assert_eq!(ab_value(&b, Agent::Ai, -inf, inf), 0.0);
    }

    #[test]
    fn alphabeta_matches_minimax_everywhere() {
        let inf = f64::INFINITY;
        for plies in 1..7 {
            for b in random_positions(5, plies, plies as u64) {
                for agent in [Agent::Ai, Agent::User] {
                    assert_eq!(
                        ab_value(&b, agent, -inf, inf),
                        value(&b, agent),
                        "position {}",
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn full_depth_abdl_matches_minimax_sign() {
        let inf = f64::INFINITY;
        for b in random_positions(10, 4, 7) {
            let exact = value(&b, Agent::Ai);
            let limited = abdl_value(&b, Agent::Ai, -inf, inf, 9);
            assert_eq!(sign(exact), sign(limited), "position {}", b);
        }
    }

    #[test]
    fn pruning_visits_fewer_positions() {
        let full = Cell::new(0);
        let pruned = Cell::new(0);
        let start = board("X../.O./...");
        let a = Counting {
            inner: start.clone(),
            visits: &full,
        };
        let b = Counting {
            inner: start,
            visits: &pruned,
        };
        let inf = f64::INFINITY;
        assert_eq!(value(&a, Agent::Ai), ab_value(&b, Agent::Ai, -inf, inf));
        assert!(pruned.get() < full.get());
    }

    #[test]
    fn depth_zero_returns_static_evaluation() {
        let b = board(".../.X./...");
        let inf = f64::INFINITY;
        assert_eq!(abdl_value(&b, Agent::User, -inf, inf, 0), b.eval());
    }

    #[test]
    fn abdl_clamps_terminal_utilities() {
        let inf = f64::INFINITY;
        let won = Fixed {
            ai_won: true,
            user_won: false,
            eval: -7.5,
        };
        assert_eq!(abdl_value(&won, Agent::User, -inf, inf, 3), 1.0);
        let big_win = Fixed {
            ai_won: true,
            user_won: false,
            eval: 40.0,
        };
        assert_eq!(abdl_value(&big_win, Agent::Ai, -inf, inf, 3), 40.0);
        let lost = Fixed {
            ai_won: false,
            user_won: true,
            eval: 2.0,
        };
        assert_eq!(abdl_value(&lost, Agent::Ai, -inf, inf, 0), -1.0);
    }

    #[test]
    fn random_move_only_picks_available_cells() {
        let b = board("XOX/O.O/XOX");
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(random_move(&b, &mut rng), Some((1, 1)));
        }
    }
}
