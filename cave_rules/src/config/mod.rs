//! Round configuration: grid size, starting layout, starting kit, hints and loot.
//!
//! Everything here is data supplied from outside the rules. A configuration is checked once,
//! up front, so a bad layout is reported before the first turn instead of mid-game.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::grid::{GridBounds, Position};
use crate::items::{Inventory, ItemStack, LootTable};
use crate::mechanics::item_names;
use crate::vocabulary::CommandCategory;

/// Largest width or height a configured grid may have.
pub const MAX_GRID_SIDE: u32 = 1024;

/// Everything that can be wrong with externally supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("grid {width}x{height} exceeds the {max}x{max} limit")]
    GridTooLarge { width: u32, height: u32, max: u32 },

    #[error("{what} position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("loot die must have at least one side")]
    ZeroSidedDie,

    #[error("loot band {min}..={max} does not fit a {sides}-sided die")]
    LootBandOutOfRange { min: u32, max: u32, sides: u32 },

    #[error("no loot band covers roll {roll}")]
    LootGap { roll: u32 },

    #[error("more than one loot band covers roll {roll}")]
    LootOverlap { roll: u32 },

    #[error("hint pool is empty")]
    EmptyHintPool,

    #[error("the key may only be found by digging, but the {place} contains one")]
    KeyOutsideGrid { place: &'static str },

    #[error("command '{literal}' is claimed by both '{first}' and '{second}'")]
    ConflictingCommand {
        literal: String,
        first: CommandCategory,
        second: CommandCategory,
    },

    #[error("no words are configured for the '{category}' command")]
    MissingCommand { category: CommandCategory },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The layout and starting kit of every round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridBounds,
    pub player_start: Position,
    pub monster_start: Position,
    pub exit_position: Position,
    pub key_position: Position,
    pub starting_inventory: Vec<ItemStack>,
    pub hints: Vec<String>,
    pub loot: LootTable,
    /// How many monster turns a single repellent buys.
    pub repellent_turns: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridBounds::new(5, 5),
            player_start: Position::new(0, 0),
            monster_start: Position::new(4, 0),
            exit_position: Position::new(4, 4),
            key_position: Position::new(2, 2),
            starting_inventory: vec![
                ItemStack::new(item_names::MAP, 1),
                ItemStack::new(item_names::METAL_DETECTOR, 1),
                ItemStack::new(item_names::MONSTER_REPELLENT, 1),
                ItemStack::new(item_names::SHOVEL, 1),
                ItemStack::new(item_names::TORCH, 3),
            ],
            hints: default_hints(),
            loot: LootTable::default(),
            repellent_turns: 3,
        }
    }
}

fn default_hints() -> Vec<String> {
    [
        "Try checking your inventory.",
        "You could check your map, if you could see...",
        "The metal detector might help you find something.",
        "You can use torches to light your way.",
        "The monster doesn't like the smell of repellent.",
        "You can use the shovel to dig for treasure.",
        "You can use a key to unlock a door.",
        "You can move north, south, east, or west.",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl GameConfig {
    /// Parse and validate a TOML configuration. Missing fields fall back to the defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check every invariant a round relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.is_empty() {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.grid.width > MAX_GRID_SIDE || self.grid.height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid.width,
                height: self.grid.height,
                max: MAX_GRID_SIDE,
            });
        }

        let placements = [
            ("player", self.player_start),
            ("monster", self.monster_start),
            ("exit", self.exit_position),
            ("key", self.key_position),
        ];
        for (what, position) in placements {
            if !self.grid.contains(position) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    position,
                    width: self.grid.width,
                    height: self.grid.height,
                });
            }
        }

        if self.hints.is_empty() {
            return Err(ConfigError::EmptyHintPool);
        }

        // The key starts buried and nowhere else.
        if self
            .starting_inventory
            .iter()
            .any(|stack| stack.item == item_names::KEY)
        {
            return Err(ConfigError::KeyOutsideGrid {
                place: "starting inventory",
            });
        }
        if self
            .loot
            .entries
            .iter()
            .any(|entry| entry.item.as_deref() == Some(item_names::KEY))
        {
            return Err(ConfigError::KeyOutsideGrid { place: "loot table" });
        }

        self.loot.validate()
    }

    /// A fresh copy of the starting kit.
    pub fn starting_inventory(&self) -> Inventory {
        Inventory::from_stacks(&self.starting_inventory)
    }
}
