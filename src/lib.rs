//! # Soc Ops Library
//!
//! This library provides the game logic for the Soc Ops social bingo
//! companion. It generates 5×5 boards of "find someone who…" prompts,
//! tracks the squares players mark, detects completed lines, and walks
//! through prompts one at a time in the quiz wizard mode. Rendering is
//! left to a presentation layer that talks to [`session::Companion`].

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

use serde::Serialize;

pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod generator;
pub mod prompts;
pub mod session;
pub mod win;
pub mod wizard;

pub use error::{Error, Result};

/// Messages sent to synchronize the presentation layer with the current screen
///
/// Each variant carries everything needed to draw its screen from scratch.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, derive_more::From)]
pub enum SyncMessage {
    /// The mode selection screen
    #[from(skip)]
    Start,
    /// A bingo board in play or won
    Bingo(engine::BingoSnapshot),
    /// The quiz wizard
    QuizWizard(wizard::WizardSnapshot),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// One-off notifications the presentation layer may animate
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum UpdateMessage {
    /// A toggle completed one or more lines
    Bingo {
        /// Every line completed by the toggle
        lines: Vec<board::Line>,
    },
    /// The quiz wizard answered its last prompt
    WizardFinished {
        /// Number of prompts found
        found: usize,
        /// Number of prompts asked
        total: usize,
    },
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
