//! # Cave Engine
//!
//! Turn resolution for Cave Escape. This crate sits on top of `cave_rules`: it turns a
//! typed command into a canonical action, applies it to the round, lets the monster react
//! and reports everything that happened as a list of display-agnostic events.
//!
//! ## Core Components
//!
//! - **actions**: the closed set of canonical actions and their resolution from words
//! - **turn**: the turn engine that applies one action and the monster's reply
//! - **session**: the play / play-again / terminated lifecycle around the engine
//! - **events**: output events for the presentation layer
//!
//! ## Design Philosophy
//!
//! - **Owned State**: a session owns its round outright; nothing is global or shared
//! - **Event-Driven**: the engine never prints, it returns events for a caller to format
//! - **Deterministic**: all randomness comes from an injected, seedable generator

pub mod actions;
pub mod events;
pub mod session;
pub mod turn;

pub use actions::*;
pub use events::*;
pub use session::*;
pub use turn::*;
