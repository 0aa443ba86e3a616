//! Win detection for bingo boards.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;
use tracing::instrument;

use crate::board::{Board, CellId, Line};

/// The cells of every line completed at the moment of the win
///
/// When one selection completes several lines at once all of them are
/// kept, and `cells` holds the deduplicated union of their ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinningLine {
    /// Completed lines in board order (rows, columns, diagonals)
    lines: Vec<Line>,
    /// Union of the completed lines' cell ids in ascending order
    cells: BTreeSet<CellId>,
}

impl WinningLine {
    /// Returns the completed lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns every winning cell id in ascending order
    pub fn cells(&self) -> &BTreeSet<CellId> {
        &self.cells
    }

    /// Checks if the given cell is part of a completed line
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains(&id)
    }

    /// Returns the number of distinct winning cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Checks if no cell is part of the win
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Checks every line of the board against the selection
///
/// Returns `Some` with all completed lines if at least one line has every
/// cell selected, `None` otherwise. All twelve lines are always scanned so
/// that simultaneous completions are reported together.
#[instrument(level = "trace", skip(board))]
pub fn detect_win(board: &Board, selection: &BTreeSet<CellId>) -> Option<WinningLine> {
    let lines = Line::all()
        .into_iter()
        .filter(|line| {
            line.cells()
                .iter()
                .all(|id| board.contains(*id) && selection.contains(id))
        })
        .collect_vec();

    if lines.is_empty() {
        return None;
    }

    let cells = lines.iter().flat_map(|line| line.cells()).collect();
    Some(WinningLine { lines, cells })
}
