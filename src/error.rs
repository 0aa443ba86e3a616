//! Error types shared by the bingo engine and the quiz wizard

use serde::Serialize;
use thiserror::Error;

use crate::board::CellId;

/// Errors that can occur while generating boards or driving a game
///
/// None of these are transient: every variant points at bad input data
/// or a caller that drove the state machine incorrectly.
#[derive(Error, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The prompt pool does not hold enough distinct prompts
    #[error("not enough distinct prompts: {required} required, {available} available")]
    InsufficientPrompts {
        /// Number of distinct prompts the operation needs
        required: usize,
        /// Number of distinct prompts the pool actually holds
        available: usize,
    },
    /// The cell id is not part of the current board
    #[error("cell {0} is not on the current board")]
    UnknownCell(CellId),
    /// A custom prompt pool failed validation
    #[error("invalid prompt pool: {0}")]
    InvalidPrompts(String),
    /// A board read back from storage breaks the board layout
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    /// The quiz wizard has already walked through every prompt
    #[error("quiz wizard already finished, no more prompts remain")]
    WizardFinished,
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
