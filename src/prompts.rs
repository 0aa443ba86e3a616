//! Prompt pool management and validation
//!
//! The prompt pool is the raw content source for both game modes. A
//! curated default pool ships with the crate; custom pools are validated
//! for length and blank entries before they are accepted.

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::prompt::{MAX_LENGTH, MAX_POOL_SIZE, MIN_LENGTH},
    error::{Error, Result},
};

/// The built-in "find someone who…" prompts
pub const DEFAULT_PROMPTS: &[&str] = &[
    "has lived in another country",
    "speaks more than two languages",
    "has run a marathon",
    "plays a musical instrument",
    "has never seen Star Wars",
    "was born in the same month as you",
    "has a pet that isn't a cat or a dog",
    "can juggle",
    "has been on TV or in a newspaper",
    "prefers tea over coffee",
    "has climbed a mountain",
    "is left-handed",
    "has read more than 20 books this year",
    "knows how to knit or crochet",
    "has broken a bone",
    "has met a celebrity",
    "can cook a dish from another culture",
    "has gone skydiving or bungee jumping",
    "grew up on a farm",
    "has more than three siblings",
    "has written code today",
    "owns a houseplant they named",
    "has visited more than ten countries",
    "can solve a Rubik's cube",
    "has an unusual hobby",
    "has performed on stage",
    "woke up before 6am today",
    "has a birthday this month",
    "volunteers regularly",
    "has built something with their hands",
    "is wearing mismatched socks",
    "has changed careers",
];

type ValidationResult = garde::Result;

/// Rejects pools containing prompts made only of whitespace
fn validate_not_blank(prompts: &[String]) -> ValidationResult {
    match prompts.iter().position(|prompt| prompt.trim().is_empty()) {
        Some(index) => Err(garde::Error::new(format!("prompt {index} is blank"))),
        None => Ok(()),
    }
}

/// An ordered collection of social prompts
///
/// The pool keeps prompts in the order they were supplied. Duplicates are
/// tolerated here but never reach a board: consumers work from
/// [`PromptPool::distinct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PromptPool {
    /// The prompts in their curated order
    #[garde(
        length(max = MAX_POOL_SIZE),
        inner(length(chars, min = MIN_LENGTH, max = MAX_LENGTH)),
        custom(|v, _| validate_not_blank(v))
    )]
    prompts: Vec<String>,
}

impl PromptPool {
    /// Creates a validated prompt pool
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrompts`] if the pool is too large or any
    /// prompt is blank or too long.
    pub fn new<I, S>(prompts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool = Self {
            prompts: prompts.into_iter().map(Into::into).collect_vec(),
        };
        pool.validate().map_err(|report| {
            tracing::warn!(%report, "rejected prompt pool");
            Error::InvalidPrompts(report.to_string())
        })?;
        Ok(pool)
    }

    /// Returns every prompt, duplicates included, in pool order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Returns the number of prompts, duplicates included
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Checks if the pool holds no prompts at all
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Returns the prompts without duplicates, keeping first occurrences
    pub fn distinct(&self) -> Vec<&str> {
        self.prompts.iter().map(String::as_str).unique().collect_vec()
    }

    /// Returns the number of distinct prompts
    pub fn distinct_count(&self) -> usize {
        self.prompts.iter().unique().count()
    }
}

impl Default for PromptPool {
    /// The curated pool of [`DEFAULT_PROMPTS`]
    fn default() -> Self {
        Self {
            prompts: DEFAULT_PROMPTS.iter().map(ToString::to_string).collect_vec(),
        }
    }
}

impl TryFrom<Vec<String>> for PromptPool {
    type Error = Error;

    fn try_from(prompts: Vec<String>) -> Result<Self> {
        Self::new(prompts)
    }
}

impl From<PromptPool> for Vec<String> {
    fn from(pool: PromptPool) -> Self {
        pool.prompts
    }
}
