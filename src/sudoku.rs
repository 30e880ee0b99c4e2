//! Sudoku as a constraint satisfaction problem.
//!
//! Each of the 81 cells is a variable. Cells sharing a row, column or 3x3 box
//! are neighbours and must hold different digits. Givens start with a
//! single-value domain; blank cells start with `1..=9`.
//!
//! Puzzle text is 81 cells in reading order: `1`-`9` for givens, `0` or `.`
//! for blanks. Whitespace and `|`, `-`, `+` separators are ignored so grids
//! can be written out with box borders.

use std::collections::{BTreeMap, BTreeSet};

use crate::csp::{Assignment, Csp, VariableOrdering};

/// A cell as `(row, column)`, both in `0..9`.
pub type Cell = (usize, usize);

/// Givens keyed by cell.
pub type Puzzle = BTreeMap<Cell, u8>;

/// A solved (or partially solved) grid.
pub type Grid = Assignment<Cell, u8>;

/// Errors that can occur while parsing a puzzle.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("expected 81 cells, got {0}")]
    WrongLength(usize),

    #[error("invalid cell character '{0}'")]
    InvalidChar(char),
}

/// Parses puzzle text into its givens.
pub fn parse_puzzle(text: &str) -> Result<Puzzle, PuzzleError> {
    let mut cells = Vec::with_capacity(81);
    for c in text.chars() {
        match c {
            '1'..='9' => cells.push(Some(c as u8 - b'0')),
            '0' | '.' => cells.push(None),
            '|' | '-' | '+' => {}
            c if c.is_whitespace() => {}
            other => return Err(PuzzleError::InvalidChar(other)),
        }
    }
    if cells.len() != 81 {
        return Err(PuzzleError::WrongLength(cells.len()));
    }
    Ok(cells
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|d| ((i / 9, i % 9), d)))
        .collect())
}

/// Renders a grid as 81 characters, `.` for missing cells.
pub fn format_grid(grid: &Grid) -> String {
    (0..81)
        .map(|i| match grid.get(&(i / 9, i % 9)) {
            Some(d) => char::from(b'0' + d),
            None => '.',
        })
        .collect()
}

/// All 81 cells in reading order.
pub fn variables() -> Vec<Cell> {
    (0..9).flat_map(|r| (0..9).map(move |c| (r, c))).collect()
}

/// Every cell's row, column and box peers, excluding the cell itself.
pub fn neighbors() -> BTreeMap<Cell, BTreeSet<Cell>> {
    variables()
        .into_iter()
        .map(|(r, c)| {
            let (br, bc) = (r / 3 * 3, c / 3 * 3);
            let peers: BTreeSet<Cell> = (0..9)
                .map(|i| (r, i))
                .chain((0..9).map(|i| (i, c)))
                .chain((br..br + 3).flat_map(|i| (bc..bc + 3).map(move |j| (i, j))))
                .filter(|&p| p != (r, c))
                .collect();
            ((r, c), peers)
        })
        .collect()
}

/// Constraint predicate for the given neighbour graph: neighbouring cells
/// may not share a digit. Non-neighbours are unconstrained.
pub fn constraint(
    neighbors: BTreeMap<Cell, BTreeSet<Cell>>,
) -> impl Fn(&Cell, &u8, &Cell, &u8) -> bool {
    move |x: &Cell, vx: &u8, y: &Cell, vy: &u8| {
        !(neighbors.get(y).is_some_and(|ns| ns.contains(x)) && vx == vy)
    }
}

/// Builds the CSP for `puzzle`.
pub fn build_csp(puzzle: &Puzzle) -> Csp<Cell, u8> {
    let domains = variables()
        .into_iter()
        .map(|cell| {
            let domain: BTreeSet<u8> = match puzzle.get(&cell) {
                Some(&d) => BTreeSet::from([d]),
                None => (1..=9).collect(),
            };
            (cell, domain)
        })
        .collect();
    let neighbors = neighbors();
    let check = constraint(neighbors.clone());
    Csp::new(domains, neighbors, Box::new(check))
}

/// Plain backtracking search.
pub fn solve_basic(puzzle: &Puzzle) -> (Option<Grid>, Csp<Cell, u8>) {
    let mut csp = build_csp(puzzle);
    let solution = csp.backtracking_search(VariableOrdering::Static);
    (solution, csp)
}

/// Backtracking search after AC-3 preprocessing.
pub fn solve_ac3(puzzle: &Puzzle) -> (Option<Grid>, Csp<Cell, u8>) {
    solve_after_ac3(puzzle, VariableOrdering::Static)
}

/// Backtracking search with MRV ordering after AC-3 preprocessing.
pub fn solve_ac3_mrv(puzzle: &Puzzle) -> (Option<Grid>, Csp<Cell, u8>) {
    solve_after_ac3(puzzle, VariableOrdering::Mrv)
}

fn solve_after_ac3(puzzle: &Puzzle, ordering: VariableOrdering) -> (Option<Grid>, Csp<Cell, u8>) {
    let mut csp = build_csp(puzzle);
    if !csp.ac3() {
        return (None, csp);
    }
    let solution = csp.backtracking_search(ordering);
    (solution, csp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300";
    const SOLUTION: &str =
        "483921657967345821251876493548132976729564138136798245372689514814253769695417382";

    /// The solution with its first two rows blanked.
    fn easy_puzzle() -> Puzzle {
        let text: String = SOLUTION
            .chars()
            .enumerate()
            .map(|(i, c)| if i < 18 { '.' } else { c })
            .collect();
        parse_puzzle(&text).unwrap()
    }

    #[test]
    fn every_cell_has_twenty_peers() {
        let ns = neighbors();
        assert_eq!(ns.len(), 81);
        assert!(ns.values().all(|p| p.len() == 20));
        assert!(!ns[&(4, 4)].contains(&(4, 4)));
        assert!(ns[&(0, 0)].contains(&(2, 2)));
        assert!(!ns[&(0, 0)].contains(&(3, 3)));
    }

    #[test]
    fn constraint_only_binds_neighbours() {
        let check = constraint(neighbors());
        assert!(!check(&(0, 0), &5, &(0, 8), &5));
        assert!(check(&(0, 0), &5, &(0, 8), &6));
        assert!(check(&(0, 0), &5, &(4, 4), &5));
    }

    #[test]
    fn givens_get_singleton_domains() {
        let csp = build_csp(&parse_puzzle(PUZZLE).unwrap());
        assert_eq!(csp.domains()[&(0, 2)], BTreeSet::from([3]));
        assert_eq!(csp.domains()[&(0, 0)].len(), 9);
    }

    #[test]
    fn parses_bordered_grids() {
        let bordered: String = PUZZLE
            .as_bytes()
            .chunks(9)
            .map(|row| format!("{}|\n", std::str::from_utf8(row).unwrap()))
            .collect();
        assert_eq!(parse_puzzle(&bordered), parse_puzzle(PUZZLE));
        assert_eq!(parse_puzzle(PUZZLE).unwrap().len(), 32);
    }

    #[test]
    fn rejects_bad_puzzles() {
        assert_eq!(parse_puzzle("123"), Err(PuzzleError::WrongLength(3)));
        let bad = format!("x{}", &PUZZLE[1..]);
        assert_eq!(parse_puzzle(&bad), Err(PuzzleError::InvalidChar('x')));
    }

    #[test]
    fn basic_backtracking_fills_blank_rows() {
        let (solution, csp) = solve_basic(&easy_puzzle());
        assert_eq!(format_grid(&solution.unwrap()), SOLUTION);
        assert!(csp.assignments() >= 81);
    }

    #[test]
    fn ac3_solves_without_backtracking() {
        let puzzle = parse_puzzle(PUZZLE).unwrap();
        let (solution, csp) = solve_ac3(&puzzle);
        assert_eq!(format_grid(&solution.unwrap()), SOLUTION);
        assert_eq!(csp.assignments(), 81);
        assert!(csp.domains().values().all(|d| d.len() == 1));
    }

    #[test]
    fn mrv_agrees_with_static_ordering() {
        let puzzle = parse_puzzle(PUZZLE).unwrap();
        let (solution, _) = solve_ac3_mrv(&puzzle);
        assert_eq!(format_grid(&solution.unwrap()), SOLUTION);
    }

    #[test]
    fn contradictory_givens_have_no_solution() {
        let mut puzzle = parse_puzzle(PUZZLE).unwrap();
        // Two 3s in the first row.
        puzzle.insert((0, 0), 3);
        assert!(solve_ac3(&puzzle).0.is_none());
        assert!(solve_ac3_mrv(&puzzle).0.is_none());
    }
}
