//! The monster that stalks the player through the cave.

use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// What the monster did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryStep {
    /// Repelled; held still and burned one turn of suppression.
    Suppressed { turns_remaining: u32 },
    /// Took one step toward its target.
    Advanced { from: Position, to: Position },
    /// Already standing on its target.
    Holding,
}

/// Greedy single-step pursuer.
///
/// Each turn the monster closes one unit along whichever axis separates it most from its
/// target, preferring the x-axis on ties. While suppressed it holds still instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuitAgent {
    pub position: Position,
    pub suppression_turns_remaining: u32,
}

impl PursuitAgent {
    /// Create an unsuppressed monster at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            suppression_turns_remaining: 0,
        }
    }

    /// Check whether the monster is currently repelled.
    pub fn is_suppressed(&self) -> bool {
        self.suppression_turns_remaining > 0
    }

    /// Take one turn chasing `target`.
    pub fn move_toward(&mut self, target: Position) -> AdversaryStep {
        if self.suppression_turns_remaining > 0 {
            self.suppression_turns_remaining -= 1;
            return AdversaryStep::Suppressed {
                turns_remaining: self.suppression_turns_remaining,
            };
        }

        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        if dx == 0 && dy == 0 {
            return AdversaryStep::Holding;
        }

        let from = self.position;
        if dx.abs() >= dy.abs() {
            self.position.x += dx.signum();
        } else {
            self.position.y += dy.signum();
        }

        AdversaryStep::Advanced {
            from,
            to: self.position,
        }
    }

    /// Repel the monster for `turns` turns, replacing any suppression already running.
    pub fn suppress(&mut self, turns: u32) {
        self.suppression_turns_remaining = turns;
    }

    /// Check whether the monster shares the player's cell.
    pub fn is_caught(&self, player_position: Position) -> bool {
        self.position == player_position
    }
}
