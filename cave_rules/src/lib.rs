//! # Cave Rules
//!
//! The rules crate for Cave Escape - the grid, inventory, loot table, pursuing monster and
//! the configuration that seeds a round. This crate is the single source of truth for game
//! state and knows nothing about turns, sessions or presentation.

pub mod adversary;
pub mod config;
pub mod grid;
pub mod items;
pub mod mechanics;
pub mod vocabulary;
pub mod world_state;

pub use adversary::*;
pub use config::*;
pub use grid::*;
pub use items::*;
pub use mechanics::*;
pub use vocabulary::*;
pub use world_state::*;
