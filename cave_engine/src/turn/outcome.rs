//! What a single turn produced.

use serde::{Deserialize, Serialize};

use crate::events::OutputEvent;

/// A turn outcome that ends the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Captured,
    Escaped,
}

/// Events of one turn, in order, plus what the session needs to know about them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub events: Vec<OutputEvent>,
    /// Whether the monster took (or would have taken) a turn after the action.
    pub adversary_should_move: bool,
    pub session_event: Option<SessionEvent>,
}

impl TurnOutcome {
    /// An empty outcome for an action that does or does not let the monster move.
    pub fn new(adversary_should_move: bool) -> Self {
        Self {
            events: Vec::new(),
            adversary_should_move,
            session_event: None,
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: OutputEvent) {
        self.events.push(event);
    }

    /// End the round. The monster does not act after an escape.
    pub fn finish(&mut self, event: SessionEvent) {
        if event == SessionEvent::Escaped {
            self.adversary_should_move = false;
        }
        self.session_event = Some(event);
    }

    /// Whether this turn ended the round.
    pub fn is_terminal(&self) -> bool {
        self.session_event.is_some()
    }
}
