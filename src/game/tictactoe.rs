//! Tic-Tac-Toe on an `n x n` board, where `n` marks in a line win.
//!
//! `X` is the AI and `O` is the user. Boards parse from rows separated by
//! `/` or newlines, e.g. `"XO./.X./..O"`.

use std::fmt;
use std::str::FromStr;

use super::{Agent, GameState};

/// Errors that can occur while parsing a board.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,

    #[error("board has {rows} rows but row {row} has {found} cells")]
    NotSquare { rows: usize, row: usize, found: usize },

    #[error("invalid mark '{0}'")]
    InvalidMark(char),
}

/// An `n x n` Tic-Tac-Toe position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToe {
    size: usize,
    /// Row-major cells; `None` is empty.
    cells: Vec<Option<Agent>>,
}

impl TicTacToe {
    /// Creates an empty board.
    pub fn new(size: usize) -> Self {
        TicTacToe {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Returns the mark at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Agent> {
        self.cells[row * self.size + col]
    }

    /// Places `agent`'s mark at `(row, col)`, overwriting whatever was there.
    pub fn set(&mut self, row: usize, col: usize, agent: Agent) {
        self.cells[row * self.size + col] = Some(agent);
    }

    /// Every winning line as a list of cell indices: rows, columns, then
    /// the two diagonals.
    fn lines(&self) -> Vec<Vec<usize>> {
        let n = self.size;
        let mut lines = Vec::with_capacity(2 * n + 2);
        for r in 0..n {
            lines.push((0..n).map(|c| r * n + c).collect());
        }
        for c in 0..n {
            lines.push((0..n).map(|r| r * n + c).collect());
        }
        lines.push((0..n).map(|i| i * n + i).collect());
        lines.push((0..n).map(|i| i * n + (n - 1 - i)).collect());
        lines
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl GameState for TicTacToe {
    type Move = (usize, usize);

    fn size(&self) -> usize {
        self.size
    }

    fn available(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.get(row, col).is_none()
    }

    fn possible_moves(&self) -> Vec<(usize, usize)> {
        (0..self.cells.len())
            .filter(|&i| self.cells[i].is_none())
            .map(|i| (i / self.size, i % self.size))
            .collect()
    }

    fn successor(&self, mv: &(usize, usize), agent: Agent) -> Self {
        let mut next = self.clone();
        next.set(mv.0, mv.1, agent);
        next
    }

    fn is_win(&self, agent: Agent) -> bool {
        self.size > 0
            && self
                .lines()
                .iter()
                .any(|line| line.iter().all(|&i| self.cells[i] == Some(agent)))
    }

    fn is_tie(&self) -> bool {
        self.is_full() && !self.is_win(Agent::Ai) && !self.is_win(Agent::User)
    }

    /// Open-line balance in `[-1, 1]`.
    ///
    /// A line holding only AI marks adds its mark count; a line holding only
    /// user marks subtracts it. The sum is divided by the largest possible
    /// magnitude (every line full).
    fn eval(&self) -> f64 {
        let lines = self.lines();
        let mut score = 0i64;
        for line in &lines {
            let ai = line.iter().filter(|&&i| self.cells[i] == Some(Agent::Ai)).count() as i64;
            let user = line
                .iter()
                .filter(|&&i| self.cells[i] == Some(Agent::User))
                .count() as i64;
            if user == 0 {
                score += ai;
            } else if ai == 0 {
                score -= user;
            }
        }
        let bound = (lines.len() * self.size).max(1) as f64;
        score as f64 / bound
    }
}

impl FromStr for TicTacToe {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(BoardError::Empty);
        }

        let size = rows.len();
        let mut board = TicTacToe::new(size);
        for (r, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != size {
                return Err(BoardError::NotSquare {
                    rows: size,
                    row: r,
                    found,
                });
            }
            for (c, mark) in row.chars().enumerate() {
                match mark {
                    'X' | 'x' => board.set(r, c, Agent::Ai),
                    'O' | 'o' => board.set(r, c, Agent::User),
                    '.' | '-' | '_' => {}
                    other => return Err(BoardError::InvalidMark(other)),
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            if r > 0 {
                f.write_str("/")?;
            }
            for c in 0..self.size {
                let mark = match self.get(r, c) {
                    Some(Agent::Ai) => 'X',
                    Some(Agent::User) => 'O',
                    None => '.',
                };
                write!(f, "{}", mark)?;
            }
        }
        Ok(())
    }
}
