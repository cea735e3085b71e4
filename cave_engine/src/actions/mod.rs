//! Canonical actions - the closed set of things a turn can do.

use cave_rules::{CommandCategory, CommandTable, Direction};
use serde::{Deserialize, Serialize};

/// A resolved player command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Dig,
    /// Light a torch and read the map.
    Light,
    /// Sweep with the metal detector.
    Sweep,
    /// Spray monster repellent.
    Repel,
    Unlock,
    ShowInventory,
    Hint,
    Cheat,
    /// Anything the vocabulary did not recognise, kept verbatim.
    Unknown(String),
}

impl Action {
    /// Map a vocabulary category to the action it triggers during play.
    ///
    /// Quit and the yes/no answers are session-level and have no action.
    pub fn from_category(category: CommandCategory) -> Option<Self> {
        let action = match category {
            CommandCategory::Up => Action::Move(Direction::North),
            CommandCategory::Down => Action::Move(Direction::South),
            CommandCategory::Left => Action::Move(Direction::West),
            CommandCategory::Right => Action::Move(Direction::East),
            CommandCategory::Dig => Action::Dig,
            CommandCategory::Torch => Action::Light,
            CommandCategory::Sweep => Action::Sweep,
            CommandCategory::Repel => Action::Repel,
            CommandCategory::Unlock => Action::Unlock,
            CommandCategory::Inventory => Action::ShowInventory,
            CommandCategory::Help => Action::Hint,
            CommandCategory::Cheat => Action::Cheat,
            CommandCategory::Quit | CommandCategory::Yes | CommandCategory::No => return None,
        };
        Some(action)
    }

    /// Resolve a typed word against the vocabulary. Never fails: unknown words become
    /// [`Action::Unknown`].
    pub fn resolve(token: &str, commands: &CommandTable) -> Self {
        commands
            .resolve_play(token)
            .and_then(Action::from_category)
            .unwrap_or_else(|| Action::Unknown(token.to_string()))
    }

    /// Whether the monster gets a turn after this action.
    ///
    /// Purely informational actions leave the world untouched and cost no time.
    pub fn advances_monster(&self) -> bool {
        !matches!(
            self,
            Action::ShowInventory | Action::Hint | Action::Cheat | Action::Unknown(_)
        )
    }
}
