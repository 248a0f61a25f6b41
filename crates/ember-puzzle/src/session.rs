//! The shared mini-game phase machine.
//!
//! Every mini-game runs the same lifecycle:
//!
//! ```text
//! Tutorial --start--> [Example --proceed-->] Active
//! Active --submit ok--> Feedback(Correct) --delay--> next round | Result(Success)
//! Active --submit bad--> Feedback(Wrong) --flash--> Active (same round)
//! Active --give up--> Result(GaveUp)
//! any --exit--> closed
//! ```
//!
//! Timed transitions go through a [`Scheduler`] that the caller drives with
//! [`PuzzleSession::advance`]. While feedback is on screen, player input is
//! ignored. Exiting cancels anything pending.

use std::fmt;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::cipher::Alphabet;
use crate::config::PuzzleConfig;
use crate::deck::PuzzleDeck;
use crate::error::{PuzzleError, PuzzleResult};
use crate::input::{Edit, InputBuffer};
use crate::round::{self, Round, Submission, WorkedExample};
use crate::scheduler::Scheduler;

/// Result of a submission shown during feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The answer was right.
    Correct,
    /// The answer was wrong.
    Wrong,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every round solved.
    Success,
    /// The player gave up.
    GaveUp,
    /// The player left before finishing.
    Aborted,
}

impl Outcome {
    /// The boolean reported to the caller.
    pub fn completed(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::GaveUp => write!(f, "gave up"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rules screen.
    Tutorial,
    /// Worked example before a round.
    Example,
    /// Waiting for the player's answer.
    Active,
    /// Showing the verdict until a timer fires.
    Feedback(Verdict),
    /// Terminal.
    Result(Outcome),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tutorial => write!(f, "tutorial"),
            Self::Example => write!(f, "example"),
            Self::Active => write!(f, "active"),
            Self::Feedback(Verdict::Correct) => write!(f, "feedback (correct)"),
            Self::Feedback(Verdict::Wrong) => write!(f, "feedback (wrong)"),
            Self::Result(outcome) => write!(f, "result ({outcome})"),
        }
    }
}

/// Player or caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the tutorial.
    Start,
    /// Leave the worked example.
    Proceed,
    /// Reveal the hint for this round.
    ShowHint,
    /// Change the input buffer.
    Edit(Edit),
    /// Check the input buffer.
    Submit,
    /// Abandon the game.
    GiveUp,
    /// Close the session from any phase.
    Exit,
}

/// What an action or timer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A round was entered, in the given phase.
    RoundStarted {
        /// Zero-based round index.
        round: usize,
        /// `Example` or `Active`.
        phase: Phase,
    },
    /// The phase changed without a new round.
    PhaseChanged(Phase),
    /// The hint text.
    Hint(String),
    /// The input buffer changed.
    Edited,
    /// A correct answer.
    Correct {
        /// Round answered.
        round: usize,
        /// Whether it was the last round.
        last: bool,
    },
    /// A wrong answer.
    Wrong {
        /// Round answered.
        round: usize,
    },
    /// The session reached its result.
    Finished {
        /// How it ended.
        outcome: Outcome,
        /// Wrong submissions over the whole session.
        mistakes: u32,
    },
    /// The session was closed.
    Exited {
        /// The value passed to the completion callback.
        completed: bool,
    },
    /// Input was not accepted right now (locked or incomplete).
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    NextRound,
    Finish,
    ClearFlash,
}

/// Per-round transient state, rebuilt on every new round.
#[derive(Debug, Clone)]
struct RoundState {
    input: InputBuffer,
    hint_shown: bool,
    explanation_shown: bool,
    ciphertext: Option<String>,
}

/// One play-through of a [`PuzzleDeck`].
pub struct PuzzleSession<'d> {
    deck: &'d PuzzleDeck,
    config: PuzzleConfig,
    alphabet: Alphabet,
    rng: StdRng,
    phase: Phase,
    round: usize,
    state: RoundState,
    scheduler: Scheduler<Transition>,
    mistakes: u32,
    closed: bool,
    on_finish: Option<Box<dyn FnOnce(bool) + 'd>>,
}

impl<'d> PuzzleSession<'d> {
    /// Open a session on the tutorial screen.
    pub fn new(deck: &'d PuzzleDeck, config: PuzzleConfig) -> PuzzleResult<Self> {
        deck.validate()?;
        let first = &deck.rounds[0];
        Ok(Self {
            deck,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            alphabet: Alphabet::russian(),
            phase: Phase::Tutorial,
            round: 0,
            state: RoundState {
                input: InputBuffer::for_round(first),
                hint_shown: false,
                explanation_shown: false,
                ciphertext: None,
            },
            scheduler: Scheduler::new(),
            mistakes: 0,
            closed: false,
            on_finish: None,
        })
    }

    /// Call `callback` with the completion flag when the session is exited.
    pub fn with_on_finish(mut self, callback: impl FnOnce(bool) + 'd) -> Self {
        self.on_finish = Some(Box::new(callback));
        self
    }

    /// Feed an action into the machine.
    pub fn handle(&mut self, action: Action) -> PuzzleResult<Event> {
        if self.closed {
            return Err(PuzzleError::Closed);
        }
        match action {
            Action::Exit => Ok(self.exit()),
            Action::Start => self.start(),
            Action::Proceed => self.proceed(),
            Action::ShowHint => self.show_hint(),
            Action::Edit(edit) => self.edit(edit),
            Action::Submit => self.submit(),
            Action::GiveUp => self.give_up(),
        }
    }

    /// Let `elapsed` pass; fire the pending transition if it is due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Event> {
        if self.closed {
            return None;
        }
        let event = match self.scheduler.advance(elapsed)? {
            Transition::NextRound => self.enter_round(self.round + 1),
            Transition::Finish => self.finish(Outcome::Success),
            Transition::ClearFlash => {
                self.phase = Phase::Active;
                Event::PhaseChanged(Phase::Active)
            }
        };
        Some(event)
    }

    /// Time until the pending transition fires.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.scheduler.remaining()
    }

    fn start(&mut self) -> PuzzleResult<Event> {
        self.expect_phase(Phase::Tutorial, "start")?;
        tracing::debug!(kind = %self.deck.kind, "puzzle started");
        Ok(self.enter_round(0))
    }

    fn proceed(&mut self) -> PuzzleResult<Event> {
        self.expect_phase(Phase::Example, "proceed")?;
        self.phase = Phase::Active;
        Ok(Event::PhaseChanged(Phase::Active))
    }

    fn show_hint(&mut self) -> PuzzleResult<Event> {
        if self.input_locked() {
            return Ok(Event::Ignored);
        }
        self.expect_phase(Phase::Active, "show a hint")?;
        if self.state.hint_shown {
            return Ok(Event::Ignored);
        }
        self.state.hint_shown = true;
        Ok(Event::Hint(self.hint_text()))
    }

    fn edit(&mut self, edit: Edit) -> PuzzleResult<Event> {
        if self.input_locked() {
            return Ok(Event::Ignored);
        }
        self.expect_phase(Phase::Active, "edit input")?;
        let round = self.current_round();
        self.state.input.apply(edit, round)?;
        Ok(Event::Edited)
    }

    fn submit(&mut self) -> PuzzleResult<Event> {
        if self.input_locked() {
            return Ok(Event::Ignored);
        }
        self.expect_phase(Phase::Active, "submit")?;
        let Some(submission) = self.state.input.submission() else {
            return Ok(Event::Ignored);
        };
        Ok(self.judge(&submission))
    }

    fn judge(&mut self, submission: &Submission) -> Event {
        let round = self.round;
        if round::check(self.current_round(), submission) {
            let last = round + 1 == self.deck.len();
            self.phase = Phase::Feedback(Verdict::Correct);
            let next = if last {
                Transition::Finish
            } else {
                Transition::NextRound
            };
            self.scheduler.schedule(self.config.advance_delay, next);
            tracing::debug!(round, last, "correct answer");
            Event::Correct { round, last }
        } else {
            self.mistakes += 1;
            if self.deck.kind.reveals_on_wrong() {
                self.state.explanation_shown = true;
            }
            if self.config.clear_input_on_wrong {
                self.state.input = InputBuffer::for_round(self.current_round());
            }
            self.phase = Phase::Feedback(Verdict::Wrong);
            self.scheduler
                .schedule(self.config.wrong_flash, Transition::ClearFlash);
            tracing::debug!(round, mistakes = self.mistakes, "wrong answer");
            Event::Wrong { round }
        }
    }

    fn give_up(&mut self) -> PuzzleResult<Event> {
        if self.input_locked() {
            return Ok(Event::Ignored);
        }
        self.expect_phase(Phase::Active, "give up")?;
        Ok(self.finish(Outcome::GaveUp))
    }

    fn exit(&mut self) -> Event {
        self.scheduler.cancel();
        let completed = matches!(self.phase, Phase::Result(Outcome::Success));
        if !matches!(self.phase, Phase::Result(_)) {
            self.phase = Phase::Result(Outcome::Aborted);
        }
        self.closed = true;
        tracing::info!(kind = %self.deck.kind, completed, "puzzle closed");
        if let Some(callback) = self.on_finish.take() {
            callback(completed);
        }
        Event::Exited { completed }
    }

    fn enter_round(&mut self, index: usize) -> Event {
        self.round = index;
        let deck = self.deck;
        let round = &deck.rounds[index];
        let ciphertext = match round {
            Round::Cipher(r) => Some(r.encrypt(&self.alphabet, &mut self.rng)),
            _ => None,
        };
        self.state = RoundState {
            input: InputBuffer::for_round(round),
            hint_shown: false,
            explanation_shown: false,
            ciphertext,
        };
        self.phase = if round.example().is_some() {
            Phase::Example
        } else {
            Phase::Active
        };
        tracing::debug!(round = index, phase = %self.phase, "round entered");
        Event::RoundStarted {
            round: index,
            phase: self.phase,
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Event {
        self.scheduler.cancel();
        self.phase = Phase::Result(outcome);
        self.state.explanation_shown = true;
        tracing::info!(
            kind = %self.deck.kind,
            %outcome,
            round = self.round,
            mistakes = self.mistakes,
            "puzzle finished"
        );
        Event::Finished {
            outcome,
            mistakes: self.mistakes,
        }
    }

    fn input_locked(&self) -> bool {
        matches!(self.phase, Phase::Feedback(_))
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> PuzzleResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(PuzzleError::WrongPhase {
                action,
                phase: self.phase.to_string(),
            })
        }
    }

    fn hint_text(&self) -> String {
        match self.current_round() {
            Round::Cipher(r) => r.transform.hint(),
            _ => self.deck.hint.clone(),
        }
    }

    /// The deck being played.
    pub fn deck(&self) -> &'d PuzzleDeck {
        self.deck
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Zero-based index of the current round.
    pub fn round_index(&self) -> usize {
        self.round
    }

    /// The current round's content.
    pub fn current_round(&self) -> &'d Round {
        &self.deck.rounds[self.round]
    }

    /// The worked example for the current round, if it has one.
    pub fn example(&self) -> Option<&'d WorkedExample> {
        self.current_round().example()
    }

    /// What the player has entered so far.
    pub fn input(&self) -> &InputBuffer {
        &self.state.input
    }

    /// Ciphertext for the current cipher round, fixed for the round.
    pub fn ciphertext(&self) -> Option<&str> {
        self.state.ciphertext.as_deref()
    }

    /// The hint, once revealed for this round.
    pub fn hint(&self) -> Option<String> {
        self.state.hint_shown.then(|| self.hint_text())
    }

    /// Whether the explanation is visible.
    pub fn explanation_visible(&self) -> bool {
        self.state.explanation_shown
    }

    /// Explanation lines for the current round.
    pub fn explanation(&self) -> Vec<String> {
        self.current_round().explanation()
    }

    /// Per-slot correctness of the current input, for games that mark slots.
    pub fn marks(&self) -> Option<Vec<bool>> {
        match (self.current_round(), &self.state.input) {
            (Round::Matching(r), InputBuffer::Slots(slots)) => {
                let filled: Vec<usize> = slots.iter().map(|s| s.unwrap_or(usize::MAX)).collect();
                Some(r.marks(&filled))
            }
            (Round::Prioritization(r), InputBuffer::Order(order)) => Some(r.marks(order)),
            _ => None,
        }
    }

    /// Wrong submissions so far.
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// The outcome once the session has reached its result.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Whether the session has been exited.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl fmt::Debug for PuzzleSession<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleSession")
            .field("kind", &self.deck.kind)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("mistakes", &self.mistakes)
            .field("closed", &self.closed)
            .finish()
    }
}
