//! Game mechanics: well-known item names and the metal detector's proximity tiers.

use serde::{Deserialize, Serialize};

/// Item names the rules refer to directly. Loot may add any other name.
pub mod item_names {
    pub const MAP: &str = "map";
    pub const METAL_DETECTOR: &str = "metal detector";
    pub const MONSTER_REPELLENT: &str = "monster repellent";
    pub const SHOVEL: &str = "shovel";
    pub const TORCH: &str = "torch";
    pub const KEY: &str = "key";
    pub const RUBY: &str = "ruby";
    pub const EMERALD: &str = "emerald";
    pub const DIAMOND: &str = "diamond";
}

/// How loudly the metal detector reacts to the buried key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximitySignal {
    /// Standing on the key.
    Wild,
    /// One step away.
    RapidBeeping,
    /// Two steps away.
    SlowBeeping,
    /// Three or more steps away, or the key is already dug up.
    Silent,
}

impl ProximitySignal {
    /// Map a Manhattan distance to the key onto a signal tier.
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => ProximitySignal::Wild,
            1 => ProximitySignal::RapidBeeping,
            2 => ProximitySignal::SlowBeeping,
            _ => ProximitySignal::Silent,
        }
    }
}
