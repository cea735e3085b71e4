//! Output events - the structured record of what happened during a turn.
//!
//! Events carry data, not layout. On the wire they are `{ "kind": ..., "payload": ... }`;
//! the `Display` impl gives the stock English text for callers that just want to print.

use cave_rules::{item_names, Cell, Direction, GridView, ProximitySignal};
use serde::{Deserialize, Serialize};

/// Something the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum OutputEvent {
    /// A new round has started.
    Welcome,
    /// The raw input, repeated back before its effects.
    CommandEcho { input: String },

    Moved { direction: Direction },
    Blocked { direction: Direction },

    AlreadyDug,
    KeyFound,
    LootFound { item: String },
    NothingFound,

    TorchLit,
    GridRendered { view: GridView },
    Legend { cells: Vec<Cell> },
    TorchBurnedOut { remaining: u32 },
    NoTorches,

    DetectorSignal { signal: ProximitySignal },
    NoDetector,

    RepellentUsed,
    NoRepellent,
    /// The monster spent its turn repelled.
    MonsterHeldOff { turns_remaining: u32 },

    Escaped,
    DoorLocked,
    NothingToUnlock,

    InventoryHeader,
    InventoryItem { item: String, quantity: u32 },
    InventoryEmpty,

    Hint { text: String },
    Unknown { input: String },

    Captured,
    ReplayPrompt,
    AnswerRequired,
    Farewell,
    /// Input arrived after the session ended.
    SessionOver,
}

impl OutputEvent {
    /// Stable snake_case name of the event, matching its serialized `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            OutputEvent::Welcome => "welcome",
            OutputEvent::CommandEcho { .. } => "command_echo",
            OutputEvent::Moved { .. } => "moved",
            OutputEvent::Blocked { .. } => "blocked",
            OutputEvent::AlreadyDug => "already_dug",
            OutputEvent::KeyFound => "key_found",
            OutputEvent::LootFound { .. } => "loot_found",
            OutputEvent::NothingFound => "nothing_found",
            OutputEvent::TorchLit => "torch_lit",
            OutputEvent::GridRendered { .. } => "grid_rendered",
            OutputEvent::Legend { .. } => "legend",
            OutputEvent::TorchBurnedOut { .. } => "torch_burned_out",
            OutputEvent::NoTorches => "no_torches",
            OutputEvent::DetectorSignal { .. } => "detector_signal",
            OutputEvent::NoDetector => "no_detector",
            OutputEvent::RepellentUsed => "repellent_used",
            OutputEvent::NoRepellent => "no_repellent",
            OutputEvent::MonsterHeldOff { .. } => "monster_held_off",
            OutputEvent::Escaped => "escaped",
            OutputEvent::DoorLocked => "door_locked",
            OutputEvent::NothingToUnlock => "nothing_to_unlock",
            OutputEvent::InventoryHeader => "inventory_header",
            OutputEvent::InventoryItem { .. } => "inventory_item",
            OutputEvent::InventoryEmpty => "inventory_empty",
            OutputEvent::Hint { .. } => "hint",
            OutputEvent::Unknown { .. } => "unknown",
            OutputEvent::Captured => "captured",
            OutputEvent::ReplayPrompt => "replay_prompt",
            OutputEvent::AnswerRequired => "answer_required",
            OutputEvent::Farewell => "farewell",
            OutputEvent::SessionOver => "session_over",
        }
    }

    /// Whether this event ends a round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OutputEvent::Captured | OutputEvent::Escaped)
    }
}

impl std::fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputEvent::Welcome => f.write_str("You find yourself in a dark cave..."),
            OutputEvent::CommandEcho { input } => write!(f, "> {}", input),
            OutputEvent::Moved { direction } => write!(f, "You move {}.", direction),
            OutputEvent::Blocked { .. } => f.write_str("The way is blocked."),
            OutputEvent::AlreadyDug => f.write_str("You have already dug here."),
            OutputEvent::KeyFound => f.write_str("You found the key!"),
            OutputEvent::LootFound { item } => write!(f, "You found {}!", with_article(item)),
            OutputEvent::NothingFound => f.write_str("There is nothing here."),
            OutputEvent::TorchLit => f.write_str("You light a torch and check your map."),
            OutputEvent::GridRendered { view } => write!(f, "{}", view),
            OutputEvent::Legend { cells } => {
                let lines: Vec<_> = cells
                    .iter()
                    .map(|cell| format!("{}- {}", cell.glyph(), cell.description()))
                    .collect();
                f.write_str(&lines.join("\n"))
            }
            OutputEvent::TorchBurnedOut { remaining } => {
                let noun = if *remaining == 1 { "torch" } else { "torches" };
                write!(f, "The light has gone out. You have {} {} left", remaining, noun)
            }
            OutputEvent::NoTorches => f.write_str("You don't have any torches left"),
            OutputEvent::DetectorSignal { signal } => f.write_str(match signal {
                ProximitySignal::Wild => "The metal detector is going wild!!",
                ProximitySignal::RapidBeeping => "The metal detector is beeping rapidly!",
                ProximitySignal::SlowBeeping => "The metal detector is slowly beeping.",
                ProximitySignal::Silent => "The metal detector is silent.",
            }),
            OutputEvent::NoDetector => f.write_str("You don't have a metal detector."),
            OutputEvent::RepellentUsed => f.write_str(
                "You used a monster repellent. You hear a disgruntled growl as the sound of heavy footfalls fade away.",
            ),
            OutputEvent::NoRepellent => f.write_str("You don't have any monster repellent."),
            OutputEvent::MonsterHeldOff { .. } => {
                f.write_str("Somewhere in the dark, the monster keeps its distance.")
            }
            OutputEvent::Escaped => f.write_str("You unlock the door and escape!"),
            OutputEvent::DoorLocked => {
                f.write_str("The door is locked. You need the key to open it.")
            }
            OutputEvent::NothingToUnlock => f.write_str("There is nothing to unlock here."),
            OutputEvent::InventoryHeader => {
                f.write_str("You check the contents of your backpack...")
            }
            OutputEvent::InventoryItem { item, quantity } => write!(f, "{}: {}", item, quantity),
            OutputEvent::InventoryEmpty => f.write_str("Your inventory is empty."),
            OutputEvent::Hint { text } => f.write_str(text),
            OutputEvent::Unknown { input } => write!(f, "I don't know what '{}' means.", input),
            OutputEvent::Captured => f.write_str("You were caught by the monster!"),
            OutputEvent::ReplayPrompt => f.write_str("Do you want to play again? (Y/N)"),
            OutputEvent::AnswerRequired => f.write_str("Please answer 'Y' or 'N'."),
            OutputEvent::Farewell => f.write_str("Thank you for playing!"),
            OutputEvent::SessionOver => f.write_str("The game is over."),
        }
    }
}

fn with_article(item: &str) -> String {
    if item == item_names::MONSTER_REPELLENT {
        return format!("some {}", item);
    }
    match item.chars().next() {
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => format!("an {}", item),
        _ => format!("a {}", item),
    }
}

/// Legend shown under the torch-lit map.
pub fn torch_legend() -> Vec<Cell> {
    vec![Cell::Player, Cell::Dug, Cell::Monster, Cell::Exit]
}
