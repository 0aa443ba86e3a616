//! Configuration constants for the Soc Ops companion
//!
//! This module contains the fixed board geometry and the limits applied
//! to prompt pools, so that every component agrees on the same boundaries.

/// Bingo board geometry
pub mod board {
    /// Number of cells along each side of the board
    pub const SIDE: usize = 5;
    /// Total number of cells on a board
    pub const CELL_COUNT: usize = SIDE * SIDE;
    /// Number of cells that make up a winning line
    pub const LINE_LENGTH: usize = SIDE;
    /// Number of winning lines: every row, every column and both diagonals
    pub const LINE_COUNT: usize = 2 * SIDE + 2;
}

/// Prompt pool configuration constants
pub mod prompt {
    /// Minimum length of a prompt in characters
    pub const MIN_LENGTH: usize = 1;
    /// Maximum length of a prompt in characters
    pub const MAX_LENGTH: usize = 200;
    /// Maximum number of prompts accepted in a custom pool
    pub const MAX_POOL_SIZE: usize = 500;
}

/// Quiz wizard configuration constants
pub mod wizard {
    /// Minimum width of the zero-padded step labels
    pub const LABEL_WIDTH: usize = 2;
}
