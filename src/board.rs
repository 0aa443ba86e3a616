//! Bingo board data model
//!
//! A board is an immutable 5×5 grid of cells stored in row-major order.
//! Cells are identified by their linear index, which doubles as the key
//! the presentation layer uses for each square. This module also knows
//! the twelve lines of the grid that can complete a bingo.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::board::{CELL_COUNT, LINE_COUNT, LINE_LENGTH, SIDE},
    error::Error,
};

/// Stable identifier of a cell, the linear index `row * 5 + col`
///
/// Any `u8` can be turned into a `CellId` since ids arrive from the
/// presentation layer; only ids below [`CELL_COUNT`] exist on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(u8);

impl CellId {
    /// Creates a cell id from a raw linear index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Creates the id of the cell at `(row, col)`
    ///
    /// Returns `None` if the coordinates fall outside the board.
    pub fn from_coords(row: u8, col: u8) -> Option<Self> {
        let side = SIDE as u8;
        (row < side && col < side).then(|| Self(row * side + col))
    }

    /// Returns the raw linear index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if this id names a cell of a board
    pub const fn is_on_board(self) -> bool {
        self.index() < CELL_COUNT
    }

    /// Returns the row of this cell
    pub const fn row(self) -> u8 {
        self.0 / SIDE as u8
    }

    /// Returns the column of this cell
    pub const fn col(self) -> u8 {
        self.0 % SIDE as u8
    }

    /// Iterates over every id of a board in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT as u8).map(Self)
    }
}

impl Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for CellId {
    fn from(index: u8) -> Self {
        Self(index)
    }
}

/// A single square of the bingo board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Stable identifier, equal to `row * 5 + col`
    id: CellId,
    /// Row index in `0..5`
    row: u8,
    /// Column index in `0..5`
    col: u8,
    /// The prompt shown on this square
    prompt: String,
}

impl Cell {
    /// Creates the cell with the given id and prompt
    pub(crate) fn new(id: CellId, prompt: String) -> Self {
        Self {
            id,
            row: id.row(),
            col: id.col(),
            prompt,
        }
    }

    /// Returns the cell id
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Returns the row index
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the column index
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Returns the prompt text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// An immutable 5×5 arrangement of distinct prompts
///
/// Boards only come out of [`crate::generator::BoardGenerator`], which
/// guarantees exactly one cell per position and no repeated prompt.
/// Deserialized boards go through the same checks and are rejected with
/// [`Error::InvalidBoard`] if any of them fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    /// Cells in id order
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board by assigning `prompts` to ids `0..25` in order
    ///
    /// Callers must pass exactly [`CELL_COUNT`] distinct prompts.
    pub(crate) fn from_prompts(prompts: Vec<String>) -> Self {
        debug_assert_eq!(prompts.len(), CELL_COUNT);
        debug_assert!(prompts.iter().all_unique());

        Self {
            cells: CellId::all()
                .zip(prompts)
                .map(|(id, prompt)| Cell::new(id, prompt))
                .collect_vec(),
        }
    }

    /// Returns every cell in id order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell with the given id, if it is on the board
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    /// Checks if the board has a cell with the given id
    pub fn contains(&self, id: CellId) -> bool {
        id.index() < self.cells.len()
    }

    /// Iterates over the cells row by row
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(SIDE)
    }
}

/// Serialized form of a [`Board`], checked before it becomes one
#[derive(Deserialize)]
struct BoardRecord {
    cells: Vec<CellRecord>,
}

#[derive(Deserialize)]
struct CellRecord {
    id: CellId,
    row: u8,
    col: u8,
    prompt: String,
}

impl TryFrom<BoardRecord> for Board {
    type Error = Error;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        if record.cells.len() != CELL_COUNT {
            return Err(Error::InvalidBoard(format!(
                "expected {CELL_COUNT} cells, found {}",
                record.cells.len()
            )));
        }

        let misplaced = record.cells.iter().enumerate().find(|(index, cell)| {
            cell.id.index() != *index || cell.row != cell.id.row() || cell.col != cell.id.col()
        });
        if let Some((index, cell)) = misplaced {
            return Err(Error::InvalidBoard(format!(
                "cell {index} has id {} at ({}, {})",
                cell.id, cell.row, cell.col
            )));
        }

        if !record.cells.iter().map(|cell| &cell.prompt).all_unique() {
            return Err(Error::InvalidBoard("repeated prompt".to_owned()));
        }

        Ok(Self::from_prompts(
            record.cells.into_iter().map(|cell| cell.prompt).collect_vec(),
        ))
    }
}

/// One of the twelve lines that complete a bingo
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Line {
    /// A full row, by row index
    Row(u8),
    /// A full column, by column index
    Column(u8),
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Line {
    /// Every line of the board: rows, then columns, then both diagonals
    pub fn all() -> [Line; LINE_COUNT] {
        let side = SIDE as u8;
        std::array::from_fn(|i| {
            let i = i as u8;
            match i {
                _ if i < side => Line::Row(i),
                _ if i < 2 * side => Line::Column(i - side),
                _ if i == 2 * side => Line::Diagonal,
                _ => Line::AntiDiagonal,
            }
        })
    }

    /// Returns the ids of this line's cells, ordered along the line
    pub fn cells(self) -> [CellId; LINE_LENGTH] {
        let last = SIDE as u8 - 1;
        std::array::from_fn(|i| {
            let i = i as u8;
            let (row, col) = match self {
                Line::Row(row) => (row, i),
                Line::Column(col) => (i, col),
                Line::Diagonal => (i, i),
                Line::AntiDiagonal => (i, last - i),
            };
            CellId(row * SIDE as u8 + col)
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn numbered_board() -> Board {
        Board::from_prompts((0..CELL_COUNT).map(|i| format!("prompt {i}")).collect_vec())
    }

    #[test]
    fn test_cell_id_coords() {
        let id = CellId::from_coords(2, 3).unwrap();
        assert_eq!(id.index(), 13);
        assert_eq!(id.row(), 2);
        assert_eq!(id.col(), 3);

        assert!(CellId::from_coords(5, 0).is_none());
        assert!(CellId::from_coords(0, 5).is_none());
    }

    #[test]
    fn test_cell_id_on_board() {
        assert!(CellId::new(0).is_on_board());
        assert!(CellId::new(24).is_on_board());
        assert!(!CellId::new(25).is_on_board());
        assert_eq!(CellId::all().count(), CELL_COUNT);
    }

    #[test]
    fn test_board_layout() {
        let board = numbered_board();
        assert_eq!(board.cells().len(), CELL_COUNT);

        for (index, cell) in board.cells().iter().enumerate() {
            assert_eq!(cell.id().index(), index);
            assert_eq!(usize::from(cell.row()) * SIDE + usize::from(cell.col()), index);
            assert_eq!(cell.prompt(), format!("prompt {index}"));
        }

        let positions: HashSet<_> = board.cells().iter().map(|c| (c.row(), c.col())).collect();
        assert_eq!(positions.len(), CELL_COUNT);
    }

    #[test]
    fn test_board_lookup() {
        let board = numbered_board();
        assert_eq!(board.cell(CellId::new(7)).unwrap().prompt(), "prompt 7");
        assert!(board.cell(CellId::new(25)).is_none());
        assert!(board.contains(CellId::new(24)));
        assert!(!board.contains(CellId::new(200)));
    }

    #[test]
    fn test_board_rows() {
        let board = numbered_board();
        let rows = board.rows().collect_vec();
        assert_eq!(rows.len(), SIDE);
        assert!(rows.iter().all(|row| row.len() == SIDE));
        assert_eq!(rows[1][0].id(), CellId::new(5));
    }

    #[test]
    fn test_all_lines() {
        let lines = Line::all();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines.iter().unique().count(), 12);
        assert_eq!(lines[0], Line::Row(0));
        assert_eq!(lines[5], Line::Column(0));
        assert_eq!(lines[10], Line::Diagonal);
        assert_eq!(lines[11], Line::AntiDiagonal);
    }

    #[test]
    fn test_line_cells() {
        let ids = |line: Line| line.cells().map(CellId::index);

        assert_eq!(ids(Line::Row(0)), [0, 1, 2, 3, 4]);
        assert_eq!(ids(Line::Row(4)), [20, 21, 22, 23, 24]);
        assert_eq!(ids(Line::Column(2)), [2, 7, 12, 17, 22]);
        assert_eq!(ids(Line::Diagonal), [0, 6, 12, 18, 24]);
        assert_eq!(ids(Line::AntiDiagonal), [4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_board_deserialization_round_trip() {
        let board = numbered_board();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_board_deserialization_rejects_broken_layout() {
        let short = r#"{"cells":[{"id":0,"row":4,"col":4,"prompt":"dup"},{"id":0,"row":0,"col":0,"prompt":"dup"}]}"#;
        let error = serde_json::from_str::<Board>(short).unwrap_err();
        assert!(error.to_string().contains("expected 25 cells, found 2"));

        let mut value = serde_json::to_value(numbered_board()).unwrap();
        value["cells"][0]["row"] = 4.into();
        value["cells"][0]["col"] = 4.into();
        let error = serde_json::from_value::<Board>(value).unwrap_err();
        assert!(error.to_string().contains("cell 0 has id 0 at (4, 4)"));

        let mut value = serde_json::to_value(numbered_board()).unwrap();
        value["cells"][1]["id"] = 0.into();
        assert!(serde_json::from_value::<Board>(value).is_err());

        let mut value = serde_json::to_value(numbered_board()).unwrap();
        value["cells"][24]["prompt"] = "prompt 0".into();
        let error = serde_json::from_value::<Board>(value).unwrap_err();
        assert!(error.to_string().contains("repeated prompt"));
    }

    #[test]
    fn test_cell_id_serializes_as_index() {
        assert_eq!(serde_json::to_string(&CellId::new(12)).unwrap(), "12");
        let id: CellId = serde_json::from_str("3").unwrap();
        assert_eq!(id, CellId::new(3));
    }
}
