//! Text layouts for medal quests.
//!
//! A layout is a rectangular grid of tiles, one row per line:
//!
//! | tile        | meaning                 |
//! |-------------|-------------------------|
//! | `%`         | wall                    |
//! | `S`         | walker start (exactly 1)|
//! | `M`         | medal                   |
//! | `.` or ` `  | open floor              |
//!
//! Blank lines at either end are ignored; trailing `\r` is stripped.

use std::collections::HashSet;

use super::problem::{Position, QuestProblem};

/// Errors that can occur while parsing a quest layout.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile '{tile}' at row {row}, column {col}")]
    UnknownTile { tile: char, row: usize, col: usize },

    #[error("layout has no start tile 'S'")]
    MissingStart,

    #[error("second start tile at row {row}, column {col}")]
    MultipleStarts { row: usize, col: usize },
}

/// Parses a quest layout into a problem with unit step costs.
pub fn parse_layout(text: &str) -> Result<QuestProblem, LayoutError> {
    let lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .skip_while(|l| l.trim().is_empty())
        .collect();
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .ok_or(LayoutError::Empty)?;
    let lines = &lines[..=end];

    let width = lines[0].chars().count();
    let mut walls = HashSet::new();
    let mut medals = Vec::new();
    let mut start: Option<Position> = None;

    for (row, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }
        for (col, tile) in line.chars().enumerate() {
            let pos = (row as i32, col as i32);
            match tile {
                '%' => {
                    walls.insert(pos);
                }
                'M' => medals.push(pos),
                'S' => {
                    if start.is_some() {
                        return Err(LayoutError::MultipleStarts { row, col });
                    }
                    start = Some(pos);
                }
                '.' | ' ' => {}
                other => {
                    return Err(LayoutError::UnknownTile {
                        tile: other,
                        row,
                        col,
                    })
                }
            }
        }
    }

    let start = start.ok_or(LayoutError::MissingStart)?;
    Ok(QuestProblem::new(
        lines.len() as i32,
        width as i32,
        walls,
        start,
        medals,
    ))
}

impl std::str::FromStr for QuestProblem {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_layout(s)
    }
}
