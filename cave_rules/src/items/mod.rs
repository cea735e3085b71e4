//! Items: the player's backpack and the loot table rolled when digging.

mod inventory;
mod loot;

pub use inventory::*;
pub use loot::*;
