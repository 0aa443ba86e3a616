//! Bingo game state machine
//!
//! The engine owns one game session: the board, the selected cells and,
//! once a line is complete, the winning line. Its phase is an enum that
//! carries exactly the data each phase has, so an idle engine cannot hold
//! a board and a playing engine cannot hold a winning line.
//!
//! Unknown cell ids are always rejected with [`Error::UnknownCell`]. This
//! includes any toggle while idle, since there is no board to look in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    board::{Board, CellId, Line},
    error::{Error, Result},
    generator::BoardGenerator,
    prompts::PromptPool,
    win::{WinningLine, detect_win},
};

/// Current phase of a bingo session with the data owned by that phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No board; before the first start and after a reset
    #[default]
    Idle,
    /// A board is in play and no line is complete yet
    Playing {
        /// The board being played
        board: Board,
        /// Ids of the selected cells
        selection: BTreeSet<CellId>,
    },
    /// A line was completed; the selection is frozen
    Won {
        /// The board that was won
        board: Board,
        /// Ids of the selected cells at the moment of the win
        selection: BTreeSet<CellId>,
        /// Every line completed by the winning toggle
        winning_line: WinningLine,
        /// Whether the win notice is still to be shown
        show_notice: bool,
    },
}

/// Payload-free tag of a [`Phase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// See [`Phase::Idle`]
    Idle,
    /// See [`Phase::Playing`]
    Playing,
    /// See [`Phase::Won`]
    Won,
}

impl Phase {
    /// Returns the tag of this phase
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::Playing { .. } => PhaseKind::Playing,
            Self::Won { .. } => PhaseKind::Won,
        }
    }
}

/// Result of a single toggle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The cell was added to the selection
    Selected,
    /// The cell was removed from the selection
    Deselected,
    /// The toggle completed at least one line
    Won,
    /// The game is already won, nothing changed
    Frozen,
}

impl ToggleOutcome {
    /// Whether the presentation layer has anything new to render
    pub const fn has_update(self) -> bool {
        match self {
            Self::Selected | Self::Deselected | Self::Won => true,
            Self::Frozen => false,
        }
    }
}

/// The bingo state machine driven by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct BingoEngine {
    /// Source of new boards
    generator: BoardGenerator,
    /// Current phase and its data
    phase: Phase,
}

impl BingoEngine {
    /// Creates an idle engine drawing boards from `generator`
    pub fn new(generator: BoardGenerator) -> Self {
        Self {
            generator,
            phase: Phase::Idle,
        }
    }

    /// Starts a new game from any phase
    ///
    /// The previous board, selection and winning line are discarded.
    ///
    /// # Arguments
    ///
    /// * `pool` - The prompts the new board is drawn from
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientPrompts`] if `pool` cannot fill a
    /// board; the current phase is left untouched in that case.
    pub fn start(&mut self, pool: &PromptPool) -> Result<()> {
        let board = self.generator.generate(pool).inspect_err(|error| {
            tracing::warn!(%error, phase = ?self.phase.kind(), "could not start bingo game");
        })?;

        tracing::info!(previous = ?self.phase.kind(), "starting bingo game");
        self.phase = Phase::Playing {
            board,
            selection: BTreeSet::new(),
        };
        Ok(())
    }

    /// Flips the selection of a cell and checks for a win
    ///
    /// While playing, the cell is added or removed and every line is
    /// checked. The first toggle that completes a line moves the engine
    /// to [`Phase::Won`]. Once won, toggles change nothing.
    ///
    /// # Arguments
    ///
    /// * `id` - The cell the player tapped
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCell`] if the id is not on the current
    /// board or no board exists.
    pub fn toggle(&mut self, id: CellId) -> Result<ToggleOutcome> {
        let kind = self.phase.kind();
        let (board, selection) = match &mut self.phase {
            Phase::Playing { board, selection } => (board, selection),
            Phase::Won { board, .. } if board.contains(id) => {
                tracing::debug!(%id, "ignoring toggle on a won board");
                return Ok(ToggleOutcome::Frozen);
            }
            Phase::Won { .. } | Phase::Idle => {
                tracing::warn!(%id, phase = ?kind, "toggle on unknown cell");
                return Err(Error::UnknownCell(id));
            }
        };

        if !board.contains(id) {
            tracing::warn!(%id, "toggle on unknown cell");
            return Err(Error::UnknownCell(id));
        }

        let outcome = if selection.remove(&id) {
            ToggleOutcome::Deselected
        } else {
            selection.insert(id);
            ToggleOutcome::Selected
        };
        tracing::debug!(%id, ?outcome, selected = selection.len(), "toggled cell");

        let Some(winning_line) = detect_win(board, selection) else {
            return Ok(outcome);
        };

        tracing::info!(lines = ?winning_line.lines(), "bingo");
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Playing { board, selection } => Phase::Won {
                board,
                selection,
                winning_line,
                show_notice: true,
            },
            other => other,
        };
        Ok(ToggleOutcome::Won)
    }

    /// Discards the current game and returns to idle
    pub fn reset(&mut self) {
        tracing::info!(previous = ?self.phase.kind(), "resetting bingo game");
        self.phase = Phase::Idle;
    }

    /// Acknowledges the win notice without leaving the won phase
    pub fn dismiss(&mut self) {
        if let Phase::Won { show_notice, .. } = &mut self.phase {
            *show_notice = false;
        }
    }

    /// Returns the current phase with its data
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the tag of the current phase
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Returns the current board, if any
    pub fn board(&self) -> Option<&Board> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Playing { board, .. } | Phase::Won { board, .. } => Some(board),
        }
    }

    /// Returns the selected cell ids, if a board exists
    pub fn selection(&self) -> Option<&BTreeSet<CellId>> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Playing { selection, .. } | Phase::Won { selection, .. } => Some(selection),
        }
    }

    /// Checks if the given cell is selected
    pub fn is_selected(&self, id: CellId) -> bool {
        self.selection().is_some_and(|selection| selection.contains(&id))
    }

    /// Returns the winning line once the game is won
    pub fn winning_line(&self) -> Option<&WinningLine> {
        match &self.phase {
            Phase::Won { winning_line, .. } => Some(winning_line),
            _ => None,
        }
    }

    /// True from the winning toggle until the next [`BingoEngine::dismiss`]
    pub fn show_win_notice(&self) -> bool {
        matches!(
            self.phase,
            Phase::Won {
                show_notice: true,
                ..
            }
        )
    }

    /// Builds the view of the session the presentation layer renders
    pub fn snapshot(&self) -> BingoSnapshot {
        let cells = self.board().map(|board| {
            board
                .cells()
                .iter()
                .map(|cell| CellView {
                    id: cell.id(),
                    prompt: cell.prompt().to_owned(),
                    selected: self.is_selected(cell.id()),
                    winning: self
                        .winning_line()
                        .is_some_and(|line| line.contains(cell.id())),
                })
                .collect()
        });

        BingoSnapshot {
            phase: self.kind(),
            cells,
            winning_lines: self.winning_line().map(|line| line.lines().to_vec()),
            show_win_notice: self.show_win_notice(),
        }
    }
}

/// A single square as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// Cell id, usable as a render key
    pub id: CellId,
    /// Prompt text
    pub prompt: String,
    /// Whether the player marked this square
    pub selected: bool,
    /// Whether this square belongs to a completed line
    pub winning: bool,
}

/// Read-only view of a bingo session
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BingoSnapshot {
    /// Current phase
    pub phase: PhaseKind,
    /// Cells in id order, absent while idle
    pub cells: Option<Vec<CellView>>,
    /// Lines completed by the win, absent unless won
    pub winning_lines: Option<Vec<Line>>,
    /// Whether the win notice should be displayed
    pub show_win_notice: bool,
}
