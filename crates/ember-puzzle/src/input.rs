//! Per-round input buffers.
//!
//! The buffer holds what the player has entered so far for the current
//! round. It turns into a [`Submission`] only when it is complete enough
//! to be checked.

use std::collections::BTreeSet;

use crate::error::{PuzzleError, PuzzleResult};
use crate::round::{Round, Submission};

/// A change to the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the typed text.
    Type(String),
    /// Pick a single row.
    Pick(usize),
    /// Put a candidate into a slot, taking it out of any other slot.
    Assign {
        /// Candidate index.
        candidate: usize,
        /// Slot index.
        slot: usize,
    },
    /// Empty a slot.
    Unassign(usize),
    /// Move the task at position `from` to position `to`.
    Move {
        /// Current position.
        from: usize,
        /// New position.
        to: usize,
    },
    /// Put a waypoint into an intermediate route slot, taking it out of
    /// any other slot.
    Place {
        /// Waypoint name.
        waypoint: String,
        /// Intermediate slot index.
        slot: usize,
    },
    /// Select or deselect a service.
    ToggleService(String),
    /// Select or deselect a line.
    ToggleLine(usize),
    /// Reset the buffer to its initial state.
    Clear,
}

/// What the player has entered for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputBuffer {
    /// Typed answer.
    Text(String),
    /// Picked row.
    Row(Option<usize>),
    /// Candidate per slot.
    Slots(Vec<Option<usize>>),
    /// Current task arrangement.
    Order(Vec<usize>),
    /// Waypoint per intermediate slot.
    Stops(Vec<Option<String>>),
    /// Selected services.
    Services(BTreeSet<String>),
    /// Selected lines.
    Lines(BTreeSet<usize>),
}

impl InputBuffer {
    /// The empty buffer for `round`.
    pub fn for_round(round: &Round) -> Self {
        match round {
            Round::Cipher(_) => Self::Text(String::new()),
            Round::Anomaly(_) => Self::Row(None),
            Round::Matching(r) => Self::Slots(vec![None; r.positions.len()]),
            Round::Prioritization(r) => Self::Order((0..r.tasks.len()).collect()),
            Round::Route(r) => Self::Stops(vec![None; r.slots()]),
            Round::Incident(_) => Self::Services(BTreeSet::new()),
            Round::BugHunt(_) => Self::Lines(BTreeSet::new()),
        }
    }

    /// Apply an edit. Edits of the wrong shape or out of range are rejected
    /// and leave the buffer unchanged.
    pub fn apply(&mut self, edit: Edit, round: &Round) -> PuzzleResult<()> {
        if edit == Edit::Clear {
            *self = Self::for_round(round);
            return Ok(());
        }
        match (self, edit, round) {
            (Self::Text(text), Edit::Type(typed), _) => {
                *text = typed.to_uppercase();
            }
            (Self::Row(picked), Edit::Pick(row), Round::Anomaly(r)) => {
                if row >= r.rows.len() {
                    return Err(out_of_range("row", row, r.rows.len()));
                }
                *picked = Some(row);
            }
            (Self::Slots(slots), Edit::Assign { candidate, slot }, Round::Matching(r)) => {
                if candidate >= r.candidates.len() {
                    return Err(out_of_range("candidate", candidate, r.candidates.len()));
                }
                if slot >= slots.len() {
                    return Err(out_of_range("slot", slot, slots.len()));
                }
                for s in slots.iter_mut() {
                    if *s == Some(candidate) {
                        *s = None;
                    }
                }
                slots[slot] = Some(candidate);
            }
            (Self::Slots(slots), Edit::Unassign(slot), _) => {
                let len = slots.len();
                let entry = slots
                    .get_mut(slot)
                    .ok_or_else(|| out_of_range("slot", slot, len))?;
                *entry = None;
            }
            (Self::Order(order), Edit::Move { from, to }, _) => {
                if from >= order.len() || to >= order.len() {
                    return Err(out_of_range("position", from.max(to), order.len()));
                }
                let task = order.remove(from);
                order.insert(to, task);
            }
            (Self::Stops(stops), Edit::Place { waypoint, slot }, Round::Route(r)) => {
                if !r.waypoints.contains(&waypoint) {
                    return Err(PuzzleError::InvalidInput(format!(
                        "'{waypoint}' is not a waypoint"
                    )));
                }
                if slot >= stops.len() {
                    return Err(out_of_range("slot", slot, stops.len()));
                }
                for s in stops.iter_mut() {
                    if s.as_deref() == Some(waypoint.as_str()) {
                        *s = None;
                    }
                }
                stops[slot] = Some(waypoint);
            }
            (Self::Stops(stops), Edit::Unassign(slot), _) => {
                let len = stops.len();
                let entry = stops
                    .get_mut(slot)
                    .ok_or_else(|| out_of_range("slot", slot, len))?;
                *entry = None;
            }
            (Self::Services(selected), Edit::ToggleService(service), Round::Incident(r)) => {
                if !r.services.contains(&service) {
                    return Err(PuzzleError::InvalidInput(format!(
                        "unknown service '{service}'"
                    )));
                }
                if !selected.remove(&service) {
                    selected.insert(service);
                }
            }
            (Self::Lines(selected), Edit::ToggleLine(line), Round::BugHunt(r)) => {
                if line >= r.lines.len() {
                    return Err(out_of_range("line", line, r.lines.len()));
                }
                if !selected.remove(&line) {
                    selected.insert(line);
                }
            }
            (_, edit, round) => {
                return Err(PuzzleError::InvalidInput(format!(
                    "{edit:?} does not apply to a {} round",
                    round.kind()
                )));
            }
        }
        Ok(())
    }

    /// The submission, or `None` while the buffer is incomplete.
    pub fn submission(&self) -> Option<Submission> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Submission::Text(trimmed.to_uppercase()))
            }
            Self::Row(row) => row.map(Submission::Row),
            Self::Slots(slots) => slots
                .iter()
                .copied()
                .collect::<Option<Vec<_>>>()
                .map(Submission::Assignment),
            Self::Order(order) => Some(Submission::Order(order.clone())),
            Self::Stops(stops) => stops
                .iter()
                .cloned()
                .collect::<Option<Vec<_>>>()
                .map(Submission::Route),
            Self::Services(selected) => {
                (!selected.is_empty()).then(|| Submission::Services(selected.clone()))
            }
            Self::Lines(selected) => {
                (!selected.is_empty()).then(|| Submission::Lines(selected.clone()))
            }
        }
    }
}

fn out_of_range(what: &str, index: usize, len: usize) -> PuzzleError {
    PuzzleError::InvalidInput(format!("{what} {index} is out of range (0..{len})"))
}
