//! Quiz wizard mode
//!
//! The quiz wizard walks through every prompt of the pool in a shuffled
//! order, one at a time. For each prompt the players report whether they
//! found someone matching it or skipped it, and the wizard keeps a tally
//! until the last prompt has been answered.

use enum_map::{Enum, EnumMap};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    constants::wizard::LABEL_WIDTH,
    error::{Error, Result},
    prompts::PromptPool,
};

/// Answer given for a single prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
pub enum Verdict {
    /// Someone matching the prompt was found
    Found,
    /// The prompt was skipped
    Skipped,
}

/// What happened after answering a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Moved on to the next prompt
    Next,
    /// The last prompt was answered
    Finished,
}

/// Sequential walker over a shuffled copy of the prompt pool
#[derive(Debug, Clone, Serialize)]
pub struct QuizWizard {
    /// Distinct prompts in shuffled order
    prompts: Vec<String>,
    /// Index of the current prompt; stays on the last one once finished
    index: usize,
    /// Number of answers given per verdict
    tally: EnumMap<Verdict, usize>,
    /// Whether every prompt has been answered
    done: bool,
}

impl QuizWizard {
    /// Creates a wizard over the distinct prompts of `pool`, shuffled by `rng`
    ///
    /// # Arguments
    ///
    /// * `pool` - The prompts to walk through; duplicates are asked once
    /// * `rng` - Random source for the prompt order
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientPrompts`] if the pool is empty.
    pub fn new(pool: &PromptPool, rng: &mut fastrand::Rng) -> Result<Self> {
        let mut prompts = pool.distinct().into_iter().map(str::to_owned).collect_vec();
        if prompts.is_empty() {
            return Err(Error::InsufficientPrompts {
                required: 1,
                available: 0,
            });
        }
        rng.shuffle(&mut prompts);

        tracing::info!(total = prompts.len(), "starting quiz wizard");
        Ok(Self {
            prompts,
            index: 0,
            tally: EnumMap::default(),
            done: false,
        })
    }

    /// Returns the prompt currently asked, or `None` once finished
    pub fn current(&self) -> Option<&str> {
        if self.done {
            None
        } else {
            self.prompts.get(self.index).map(String::as_str)
        }
    }

    /// Records the verdict for the current prompt and moves on
    ///
    /// # Errors
    ///
    /// Returns [`Error::WizardFinished`] if every prompt was already answered.
    pub fn advance(&mut self, verdict: Verdict) -> Result<WizardStep> {
        if self.done {
            return Err(Error::WizardFinished);
        }

        self.tally[verdict] += 1;

        if self.index + 1 >= self.prompts.len() {
            self.done = true;
            tracing::info!(
                found = self.found_count(),
                total = self.total(),
                "quiz wizard finished"
            );
            Ok(WizardStep::Finished)
        } else {
            self.index += 1;
            Ok(WizardStep::Next)
        }
    }

    /// Returns the shuffled prompts
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Returns the 0-based index of the current prompt
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the 1-based step number of the current prompt
    pub fn step(&self) -> usize {
        self.index + 1
    }

    /// Returns the number of prompts
    pub fn total(&self) -> usize {
        self.prompts.len()
    }

    /// Returns the step number zero-padded to two digits, e.g. `"07"`
    pub fn step_label(&self) -> String {
        format!("{:0width$}", self.step(), width = LABEL_WIDTH)
    }

    /// Returns the prompt count zero-padded to two digits
    pub fn total_label(&self) -> String {
        format!("{:0width$}", self.total(), width = LABEL_WIDTH)
    }

    /// Returns the share of prompts before the current one, in percent
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> u8 {
        ((self.index as f64 / self.total() as f64) * 100.).round() as u8
    }

    /// Returns how many prompts received the given verdict
    pub fn count(&self, verdict: Verdict) -> usize {
        self.tally[verdict]
    }

    /// Returns how many prompts were found
    pub fn found_count(&self) -> usize {
        self.count(Verdict::Found)
    }

    /// Returns how many prompts were skipped
    pub fn skipped_count(&self) -> usize {
        self.count(Verdict::Skipped)
    }

    /// Checks if every prompt has been answered
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Builds the view the presentation layer renders
    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            prompt: self.current().map(str::to_owned),
            step_label: self.step_label(),
            total_label: self.total_label(),
            progress_percent: self.progress_percent(),
            found: self.found_count(),
            total: self.total(),
            done: self.done,
        }
    }
}

/// Read-only view of the quiz wizard
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSnapshot {
    /// Current prompt, absent once finished
    pub prompt: Option<String>,
    /// Zero-padded 1-based step number
    pub step_label: String,
    /// Zero-padded prompt count
    pub total_label: String,
    /// Progress through the prompts in percent
    pub progress_percent: u8,
    /// Number of prompts found so far
    pub found: usize,
    /// Number of prompts
    pub total: usize,
    /// Whether every prompt has been answered
    pub done: bool,
}
