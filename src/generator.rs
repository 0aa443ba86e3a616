//! Random board generation
//!
//! Boards are drawn from a prompt pool with an injected random source so
//! that a seeded generator always produces the same sequence of boards.

use itertools::Itertools;

use crate::{
    board::Board,
    constants::board::CELL_COUNT,
    error::{Error, Result},
    prompts::PromptPool,
};

/// Produces randomized, duplicate-free boards from a prompt pool
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    rng: fastrand::Rng,
}

impl BoardGenerator {
    /// Creates a generator seeded from system entropy
    pub fn new() -> Self {
        Self::from_rng(fastrand::Rng::new())
    }

    /// Creates a deterministic generator from a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    /// Creates a generator drawing from the given random source
    pub fn from_rng(rng: fastrand::Rng) -> Self {
        Self { rng }
    }

    /// Generates a new board
    ///
    /// Picks 25 distinct prompts uniformly at random without replacement,
    /// shuffles them, and assigns them to cell ids `0..25` in order.
    ///
    /// # Arguments
    ///
    /// * `pool` - The prompts to draw from; duplicates count once
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientPrompts`] if the pool has fewer than
    /// 25 distinct prompts. No smaller board is ever produced.
    pub fn generate(&mut self, pool: &PromptPool) -> Result<Board> {
        let distinct = pool.distinct();
        if distinct.len() < CELL_COUNT {
            return Err(Error::InsufficientPrompts {
                required: CELL_COUNT,
                available: distinct.len(),
            });
        }

        let mut selected = self.rng.choose_multiple(distinct, CELL_COUNT);
        self.rng.shuffle(&mut selected);

        Ok(Board::from_prompts(
            selected.into_iter().map(str::to_owned).collect_vec(),
        ))
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}
