//! The loot table rolled whenever the player digs an empty spot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Inventory;
use crate::config::ConfigError;
use crate::mechanics::item_names;

/// One band of die results and what it yields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Lowest roll (inclusive) in this band.
    pub min: u32,
    /// Highest roll (inclusive) in this band.
    pub max: u32,
    /// Item awarded; `None` means the spot is empty.
    #[serde(default)]
    pub item: Option<String>,
}

impl LootEntry {
    /// A band that awards one `item`.
    pub fn item(min: u32, max: u32, item: impl Into<String>) -> Self {
        Self {
            min,
            max,
            item: Some(item.into()),
        }
    }

    /// A band that awards nothing.
    pub fn nothing(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            item: None,
        }
    }

    fn covers(&self, roll: u32) -> bool {
        (self.min..=self.max).contains(&roll)
    }
}

/// Result of a single dig that did not turn up the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootOutcome {
    Nothing,
    Found { item: String },
}

/// A die of `sides` faces split into bands of outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    pub sides: u32,
    pub entries: Vec<LootEntry>,
}

impl Default for LootTable {
    /// The d20 table: a quarter each for nothing, a torch and repellent, then gems.
    fn default() -> Self {
        Self {
            sides: 20,
            entries: vec![
                LootEntry::nothing(1, 5),
                LootEntry::item(6, 10, item_names::TORCH),
                LootEntry::item(11, 15, item_names::MONSTER_REPELLENT),
                LootEntry::item(16, 17, item_names::RUBY),
                LootEntry::item(18, 19, item_names::EMERALD),
                LootEntry::item(20, 20, item_names::DIAMOND),
            ],
        }
    }
}

impl LootTable {
    /// Check that every face `1..=sides` belongs to exactly one band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sides == 0 {
            return Err(ConfigError::ZeroSidedDie);
        }

        for entry in &self.entries {
            if entry.min == 0 || entry.min > entry.max || entry.max > self.sides {
                return Err(ConfigError::LootBandOutOfRange {
                    min: entry.min,
                    max: entry.max,
                    sides: self.sides,
                });
            }
        }

        for roll in 1..=self.sides {
            match self.entries.iter().filter(|e| e.covers(roll)).count() {
                0 => return Err(ConfigError::LootGap { roll }),
                1 => {}
                _ => return Err(ConfigError::LootOverlap { roll }),
            }
        }

        Ok(())
    }

    /// What a given die result yields. Pure: the inventory is not touched.
    pub fn outcome_for_roll(&self, roll: u32) -> LootOutcome {
        self.entries
            .iter()
            .find(|entry| entry.covers(roll))
            .and_then(|entry| entry.item.clone())
            .map_or(LootOutcome::Nothing, |item| LootOutcome::Found { item })
    }

    /// Resolve a die result, adding any find to the inventory.
    pub fn resolve_roll(&self, roll: u32, inventory: &mut Inventory) -> LootOutcome {
        let outcome = self.outcome_for_roll(roll);
        if let LootOutcome::Found { item } = &outcome {
            inventory.add(item.as_str(), 1);
        }
        outcome
    }

    /// Roll the die once.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(1..=self.sides)
    }

    /// Roll the die and resolve the result against the inventory.
    pub fn roll_loot<R: Rng + ?Sized>(
        &self,
        inventory: &mut Inventory,
        rng: &mut R,
    ) -> LootOutcome {
        let roll = self.draw(rng);
        self.resolve_roll(roll, inventory)
    }
}
