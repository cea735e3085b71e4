//! Session lifecycle - rounds, the play-again prompt and shutdown.
//!
//! A session moves through three modes:
//! - `Playing`: every input is an action handed to the [`TurnEngine`]
//! - `AwaitingReplayConfirmation`: after a capture or an escape, only yes/no/quit count
//! - `Terminated`: the player quit; further input only reports that the game is over
//!
//! Quit words are honoured in every mode.

use cave_rules::{
    CommandCategory, CommandTable, ConfigError, GameConfig, GameState, Inventory, PursuitAgent,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::actions::Action;
use crate::events::OutputEvent;
use crate::turn::TurnEngine;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Playing,
    AwaitingReplayConfirmation,
    Terminated,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionMode::Playing => "playing",
            SessionMode::AwaitingReplayConfirmation => "awaiting replay confirmation",
            SessionMode::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Everything a single round mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub state: GameState,
    pub inventory: Inventory,
    pub agent: PursuitAgent,
}

impl Round {
    /// Lay out a fresh round from a validated configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            state: GameState::from_config(config),
            inventory: config.starting_inventory(),
            agent: PursuitAgent::new(config.monster_start),
        }
    }
}

/// The result of handing one line of input to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStep {
    /// Events produced by this input, in order.
    pub events: Vec<OutputEvent>,
    /// Mode after the input was handled.
    pub mode: SessionMode,
    /// A new round started and the display history was reset.
    pub history_cleared: bool,
}

/// One player's run of rounds, driven a line of input at a time.
#[derive(Debug)]
pub struct Session<R = ChaCha8Rng> {
    id: SessionId,
    config: GameConfig,
    commands: CommandTable,
    engine: TurnEngine,
    mode: SessionMode,
    round: Round,
    round_number: u32,
    history: Vec<OutputEvent>,
    rng: R,
}

impl Session<ChaCha8Rng> {
    /// Create a session whose loot rolls and hints replay exactly for a given seed.
    pub fn with_seed(
        config: GameConfig,
        commands: CommandTable,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(config, commands, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Create a session and open its first round.
    ///
    /// Both the configuration and the vocabulary are validated up front; the history starts
    /// with the welcome text.
    pub fn new(config: GameConfig, commands: CommandTable, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        commands.validate()?;

        let session = Self {
            id: SessionId::new(),
            engine: TurnEngine::new(&config),
            round: Round::from_config(&config),
            round_number: 1,
            mode: SessionMode::Playing,
            history: vec![OutputEvent::Welcome],
            config,
            commands,
            rng,
        };
        info!(session = %session.id, "session started");
        Ok(session)
    }

    /// Handle one line of input.
    ///
    /// Blank input is ignored. Anything else is echoed back first, then handled according to
    /// the current mode.
    pub fn handle_input(&mut self, raw: &str) -> SessionStep {
        let input = raw.trim();
        if input.is_empty() {
            return SessionStep {
                events: Vec::new(),
                mode: self.mode,
                history_cleared: false,
            };
        }

        let span = info_span!("input", session = %self.id, round = self.round_number);
        let _enter = span.enter();

        let mut events = vec![OutputEvent::CommandEcho {
            input: input.to_string(),
        }];
        let mut history_cleared = false;

        if self.mode == SessionMode::Terminated {
            events.push(OutputEvent::SessionOver);
        } else if self.commands.is_quit(input) {
            self.terminate(&mut events);
        } else {
            match self.mode {
                SessionMode::Playing => self.play(input, &mut events),
                SessionMode::AwaitingReplayConfirmation => {
                    history_cleared = self.confirm(input, &mut events);
                }
                SessionMode::Terminated => {}
            }
        }

        if history_cleared {
            self.history = vec![OutputEvent::Welcome];
        } else {
            self.history.extend(events.iter().cloned());
        }

        SessionStep {
            events,
            mode: self.mode,
            history_cleared,
        }
    }

    fn play(&mut self, input: &str, events: &mut Vec<OutputEvent>) {
        let action = Action::resolve(input, &self.commands);
        let outcome = self.engine.apply(
            &action,
            &mut self.round.state,
            &mut self.round.inventory,
            &mut self.round.agent,
            &mut self.rng,
        );
        let round_over = outcome.is_terminal();
        if round_over {
            info!(ended = ?outcome.session_event, "round over");
        }
        events.extend(outcome.events);

        if round_over {
            self.transition(SessionMode::AwaitingReplayConfirmation);
            events.push(OutputEvent::ReplayPrompt);
        }
    }

    /// Returns true if a new round was started. Quit words never reach this point.
    fn confirm(&mut self, input: &str, events: &mut Vec<OutputEvent>) -> bool {
        match self.commands.resolve_confirmation(input) {
            Some(CommandCategory::Yes) => {
                self.round = Round::from_config(&self.config);
                self.round_number += 1;
                info!(round = self.round_number, "new round");
                self.transition(SessionMode::Playing);
                events.push(OutputEvent::Welcome);
                true
            }
            Some(CommandCategory::No) => {
                self.terminate(events);
                false
            }
            _ => {
                events.push(OutputEvent::AnswerRequired);
                events.push(OutputEvent::ReplayPrompt);
                false
            }
        }
    }

    fn terminate(&mut self, events: &mut Vec<OutputEvent>) {
        events.push(OutputEvent::Farewell);
        self.transition(SessionMode::Terminated);
    }

    fn transition(&mut self, mode: SessionMode) {
        debug!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The round in progress (or just finished, while awaiting the replay answer).
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// 1 for the first round, counting up with every replay.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Everything shown since the current round started.
    pub fn history(&self) -> &[OutputEvent] {
        &self.history
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.mode == SessionMode::Terminated
    }
}
