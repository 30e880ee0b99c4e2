//! Adversarial search over two-player, alternating-turn games.
//!
//! The maximizing player is `Agent::Ai`; the minimizing player is
//! `Agent::User`. A game exposes itself to the search through `GameState`.

pub mod adversarial;
pub mod tictactoe;

pub use adversarial::{
    ab_value, abdl, abdl_value, alphabeta, max_value, min_value, minimax, random_move, value,
};
pub use tictactoe::{BoardError, TicTacToe};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Agent {
    /// The maximizing player.
    Ai,
    /// The minimizing player.
    User,
}

impl Agent {
    /// Returns the player who moves next.
    pub const fn opponent(self) -> Agent {
        match self {
            Agent::Ai => Agent::User,
            Agent::User => Agent::Ai,
        }
    }
}

/// A game position as seen by the adversarial search engine.
pub trait GameState: Sized {
    type Move: Clone;

    /// Board dimension.
    fn size(&self) -> usize;

    /// Returns true if the cell at `(row, col)` can be played.
    fn available(&self, row: usize, col: usize) -> bool;

    /// Legal moves from this position. Empty when no move is possible.
    fn possible_moves(&self) -> Vec<Self::Move>;

    /// The position after `agent` plays `mv`.
    fn successor(&self, mv: &Self::Move, agent: Agent) -> Self;

    fn is_win(&self, agent: Agent) -> bool;

    fn is_tie(&self) -> bool;

    /// Static evaluation of a non-terminal position, from `Ai`'s side.
    /// Only depth-limited search calls this.
    fn eval(&self) -> f64;
}
