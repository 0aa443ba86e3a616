//! Presentation-layer session management
//!
//! This module connects the game modes to the presentation layer. The
//! [`Companion`] plays the role of the start screen: it routes incoming
//! messages to the bingo engine or the quiz wizard and pushes a fresh
//! view through a [`Tunnel`] after every applied message.

use serde::{Deserialize, Serialize};

use crate::{
    SyncMessage, UpdateMessage,
    board::CellId,
    engine::{BingoEngine, PhaseKind, ToggleOutcome},
    error::Result,
    generator::BoardGenerator,
    prompts::PromptPool,
    wizard::{QuizWizard, Verdict, WizardStep},
};

/// Trait for sending messages to the presentation layer
///
/// Implementations decide how messages reach the screen, whether that is
/// a direct render call, a channel, or a web view bridge.
pub trait Tunnel {
    /// Sends a one-off notification, such as a bingo announcement
    ///
    /// # Arguments
    ///
    /// * `message` - The update message to send
    fn send_message(&self, message: &UpdateMessage);

    /// Sends the complete view of the current screen
    ///
    /// # Arguments
    ///
    /// * `state` - The synchronization message to send
    fn send_state(&self, state: &SyncMessage);
}

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    /// Mode selection
    Start,
    /// A bingo board, playing or won
    Bingo,
    /// The quiz wizard, asking or showing its summary
    QuizWizard,
}

/// Messages the presentation layer sends in response to user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IncomingMessage {
    /// Start a bingo game from the start screen
    StartBingo,
    /// Start the quiz wizard from the start screen
    StartQuizWizard,
    /// Mark or unmark a bingo square
    Toggle(CellId),
    /// Hide the bingo notice, keeping the board won
    Dismiss,
    /// Abandon the bingo game and return to the start screen
    Reset,
    /// Someone matching the current wizard prompt was found
    Found,
    /// Skip the current wizard prompt
    Skip,
    /// Leave the quiz wizard and return to the start screen
    BackToStart,
}

/// Top-level state of the companion app
#[derive(Debug, Clone)]
pub struct Companion {
    /// Prompts shared by both modes
    pool: PromptPool,
    /// The bingo state machine; idle while on the start screen
    engine: BingoEngine,
    /// The active quiz wizard, if any
    wizard: Option<QuizWizard>,
    /// Random source for wizard shuffles
    rng: fastrand::Rng,
}

impl Default for Companion {
    /// A companion over the built-in prompts, seeded from system entropy
    fn default() -> Self {
        Self::new(PromptPool::default(), fastrand::Rng::new())
    }
}

impl Companion {
    /// Creates a companion on the start screen
    ///
    /// Board generation and wizard shuffles both draw from `rng`, so a
    /// seeded source makes the whole session reproducible.
    pub fn new(pool: PromptPool, mut rng: fastrand::Rng) -> Self {
        Self {
            pool,
            engine: BingoEngine::new(BoardGenerator::from_rng(rng.fork())),
            wizard: None,
            rng,
        }
    }

    /// Returns the screen currently shown
    pub fn screen(&self) -> Screen {
        if self.wizard.is_some() {
            Screen::QuizWizard
        } else if self.engine.kind() == PhaseKind::Idle {
            Screen::Start
        } else {
            Screen::Bingo
        }
    }

    /// Returns the bingo engine
    pub fn engine(&self) -> &BingoEngine {
        &self.engine
    }

    /// Returns the active quiz wizard, if any
    pub fn wizard(&self) -> Option<&QuizWizard> {
        self.wizard.as_ref()
    }

    /// Returns the prompt pool
    pub fn pool(&self) -> &PromptPool {
        &self.pool
    }

    /// Builds the complete view of the current screen
    pub fn sync(&self) -> SyncMessage {
        match (&self.wizard, self.screen()) {
            (Some(wizard), _) => SyncMessage::QuizWizard(wizard.snapshot()),
            (None, Screen::Start) => SyncMessage::Start,
            (None, _) => SyncMessage::Bingo(self.engine.snapshot()),
        }
    }

    /// Handles a message from the presentation layer
    ///
    /// Messages that do not apply to the current screen are ignored, and so
    /// are toggles on a won board. After every message that changes the
    /// view, the new view is sent through `tunnel`.
    ///
    /// # Arguments
    ///
    /// * `message` - The message decoded from user input
    /// * `tunnel` - The channel to the presentation layer
    ///
    /// # Errors
    ///
    /// Propagates errors from the bingo engine and the quiz wizard; nothing
    /// is sent through `tunnel` in that case.
    pub fn receive_message<T: Tunnel>(
        &mut self,
        message: IncomingMessage,
        tunnel: &T,
    ) -> Result<()> {
        let screen = self.screen();
        match (message, screen) {
            (IncomingMessage::StartBingo, Screen::Start) => {
                self.engine.start(&self.pool)?;
            }
            (IncomingMessage::StartQuizWizard, Screen::Start) => {
                self.wizard = Some(QuizWizard::new(&self.pool, &mut self.rng)?);
            }
            (IncomingMessage::Toggle(id), Screen::Bingo) => {
                let outcome = self.engine.toggle(id)?;
                if !outcome.has_update() {
                    return Ok(());
                }
                if outcome == ToggleOutcome::Won
                    && let Some(winning_line) = self.engine.winning_line()
                {
                    tunnel.send_message(&UpdateMessage::Bingo {
                        lines: winning_line.lines().to_vec(),
                    });
                }
            }
            (IncomingMessage::Dismiss, Screen::Bingo) => self.engine.dismiss(),
            (IncomingMessage::Reset, Screen::Bingo) => self.engine.reset(),
            (IncomingMessage::Found | IncomingMessage::Skip, Screen::QuizWizard) => {
                let verdict = if message == IncomingMessage::Found {
                    Verdict::Found
                } else {
                    Verdict::Skipped
                };
                if let Some(wizard) = &mut self.wizard
                    && wizard.advance(verdict)? == WizardStep::Finished
                {
                    tunnel.send_message(&UpdateMessage::WizardFinished {
                        found: wizard.found_count(),
                        total: wizard.total(),
                    });
                }
            }
            (IncomingMessage::BackToStart, Screen::QuizWizard) => {
                tracing::info!("leaving quiz wizard");
                self.wizard = None;
            }
            (message, screen) => {
                tracing::debug!(?message, ?screen, "ignoring message for another screen");
                return Ok(());
            }
        }

        tunnel.send_state(&self.sync());
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{board::Line, error::Error};

    #[derive(Default)]
    struct MockTunnel {
        messages: RefCell<Vec<UpdateMessage>>,
        states: RefCell<Vec<SyncMessage>>,
    }

    impl Tunnel for MockTunnel {
        fn send_message(&self, message: &UpdateMessage) {
            self.messages.borrow_mut().push(message.clone());
        }

        fn send_state(&self, state: &SyncMessage) {
            self.states.borrow_mut().push(state.clone());
        }
    }

    fn companion() -> Companion {
        Companion::new(PromptPool::default(), fastrand::Rng::with_seed(21))
    }

    fn send(companion: &mut Companion, tunnel: &MockTunnel, messages: &[IncomingMessage]) {
        for message in messages {
            companion.receive_message(*message, tunnel).unwrap();
        }
    }

    #[test]
    fn test_starts_on_start_screen() {
        let companion = companion();
        assert_eq!(companion.screen(), Screen::Start);
        assert_eq!(companion.sync(), SyncMessage::Start);
        assert!(companion.wizard().is_none());
        assert_eq!(companion.pool(), &PromptPool::default());
    }

    #[test]
    fn test_bingo_flow() {
        let mut companion = companion();
        let tunnel = MockTunnel::default();

        send(&mut companion, &tunnel, &[IncomingMessage::StartBingo]);
        assert_eq!(companion.screen(), Screen::Bingo);
        assert_eq!(tunnel.states.borrow().len(), 1);

        let row = Line::Row(1).cells().map(IncomingMessage::Toggle);
        send(&mut companion, &tunnel, &row);

        assert_eq!(companion.engine().kind(), PhaseKind::Won);
        assert_eq!(
            tunnel.messages.borrow().as_slice(),
            [UpdateMessage::Bingo {
                lines: vec![Line::Row(1)]
            }]
        );
        assert_eq!(tunnel.states.borrow().len(), 6);

        let Some(SyncMessage::Bingo(snapshot)) = tunnel.states.borrow().last().cloned() else {
            panic!("expected bingo view");
        };
        assert!(snapshot.show_win_notice);

        send(&mut companion, &tunnel, &[IncomingMessage::Dismiss]);
        assert!(!companion.engine().show_win_notice());
        assert_eq!(companion.screen(), Screen::Bingo);

        send(&mut companion, &tunnel, &[IncomingMessage::Reset]);
        assert_eq!(companion.screen(), Screen::Start);
        assert_eq!(tunnel.states.borrow().last(), Some(&SyncMessage::Start));
    }

    #[test]
    fn test_frozen_toggles_send_nothing() {
        let mut companion = companion();
        let tunnel = MockTunnel::default();

        send(&mut companion, &tunnel, &[IncomingMessage::StartBingo]);
        let column = Line::Column(0).cells().map(IncomingMessage::Toggle);
        send(&mut companion, &tunnel, &column);
        send(&mut companion, &tunnel, &[IncomingMessage::Toggle(CellId::new(12))]);

        assert_eq!(tunnel.messages.borrow().len(), 1);
        assert_eq!(tunnel.states.borrow().len(), 6);
        assert!(!companion.engine().is_selected(CellId::new(12)));
    }

    #[test]
    fn test_unknown_cell_is_reported() {
        let mut companion = companion();
        let tunnel = MockTunnel::default();

        send(&mut companion, &tunnel, &[IncomingMessage::StartBingo]);
        let result = companion.receive_message(IncomingMessage::Toggle(CellId::new(40)), &tunnel);

        assert_eq!(result, Err(Error::UnknownCell(CellId::new(40))));
        assert_eq!(tunnel.states.borrow().len(), 1);
    }

    #[test]
    fn test_start_bingo_with_small_pool_fails() {
        let pool = PromptPool::new((0..24).map(|i| format!("prompt {i}"))).unwrap();
        let mut companion = Companion::new(pool, fastrand::Rng::with_seed(1));
        let tunnel = MockTunnel::default();

        assert!(matches!(
            companion.receive_message(IncomingMessage::StartBingo, &tunnel),
            Err(Error::InsufficientPrompts { .. })
        ));
        assert_eq!(companion.screen(), Screen::Start);
        assert!(tunnel.states.borrow().is_empty());
    }

    #[test]
    fn test_quiz_wizard_flow() {
        let pool = PromptPool::new(["a", "b", "c"]).unwrap();
        let mut companion = Companion::new(pool, fastrand::Rng::with_seed(3));
        let tunnel = MockTunnel::default();

        send(&mut companion, &tunnel, &[IncomingMessage::StartQuizWizard]);
        assert_eq!(companion.screen(), Screen::QuizWizard);

        send(
            &mut companion,
            &tunnel,
            &[
                IncomingMessage::Found,
                IncomingMessage::Skip,
                IncomingMessage::Found,
            ],
        );

        let wizard = companion.wizard().unwrap();
        assert!(wizard.is_done());
        assert_eq!(wizard.found_count(), 2);
        assert_eq!(
            tunnel.messages.borrow().as_slice(),
            [UpdateMessage::WizardFinished { found: 2, total: 3 }]
        );
        assert_eq!(
            companion.receive_message(IncomingMessage::Found, &tunnel),
            Err(Error::WizardFinished)
        );

        send(&mut companion, &tunnel, &[IncomingMessage::BackToStart]);
        assert_eq!(companion.screen(), Screen::Start);
        assert!(companion.wizard().is_none());
    }

    #[test]
    fn test_messages_for_other_screens_are_ignored() {
        let mut companion = companion();
        let tunnel = MockTunnel::default();

        send(
            &mut companion,
            &tunnel,
            &[
                IncomingMessage::Toggle(CellId::new(0)),
                IncomingMessage::Dismiss,
                IncomingMessage::Reset,
                IncomingMessage::Found,
                IncomingMessage::BackToStart,
            ],
        );
        assert_eq!(companion.screen(), Screen::Start);
        assert!(tunnel.states.borrow().is_empty());

        send(&mut companion, &tunnel, &[IncomingMessage::StartQuizWizard]);
        send(
            &mut companion,
            &tunnel,
            &[IncomingMessage::StartBingo, IncomingMessage::Toggle(CellId::new(0))],
        );
        assert_eq!(companion.engine().kind(), PhaseKind::Idle);
        assert_eq!(tunnel.states.borrow().len(), 1);
    }

    #[test]
    fn test_incoming_message_deserialization() {
        let message: IncomingMessage = serde_json::from_str("{\"Toggle\":12}").unwrap();
        assert_eq!(message, IncomingMessage::Toggle(CellId::new(12)));

        let message: IncomingMessage = serde_json::from_str("\"Dismiss\"").unwrap();
        assert_eq!(message, IncomingMessage::Dismiss);
    }
}
