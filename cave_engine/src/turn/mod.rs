//! Turn Engine - applies one canonical action and the monster's reply.
//!
//! A turn runs in two phases:
//! 1. **Action**: the player's action mutates the state and inventory
//! 2. **Reaction**: unless the action was purely informational (or ended the round), the
//!    monster takes one step toward the player and the engine checks for a catch

mod outcome;

pub use outcome::*;

use cave_rules::{
    item_names, AdversaryStep, Direction, GameConfig, GameState, Inventory, LootOutcome,
    LootTable, ProximitySignal, PursuitAgent,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::actions::Action;
use crate::events::{torch_legend, OutputEvent};

/// The rules of a turn, fixed for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    loot: LootTable,
    hints: Vec<String>,
    repellent_turns: u32,
}

impl TurnEngine {
    /// Create an engine from a validated configuration.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            loot: config.loot.clone(),
            hints: config.hints.clone(),
            repellent_turns: config.repellent_turns,
        }
    }

    /// Apply `action` and, if it costs time, the monster's turn.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        action: &Action,
        state: &mut GameState,
        inventory: &mut Inventory,
        agent: &mut PursuitAgent,
        rng: &mut R,
    ) -> TurnOutcome {
        debug!(?action, player = %state.player_position, "applying action");
        let mut outcome = TurnOutcome::new(action.advances_monster());

        match action {
            Action::Move(direction) => walk(*direction, state, &mut outcome),
            Action::Dig => self.dig(state, inventory, rng, &mut outcome),
            Action::Light => light_torch(state, inventory, agent, &mut outcome),
            Action::Sweep => sweep(state, inventory, &mut outcome),
            Action::Repel => self.repel(inventory, agent, &mut outcome),
            Action::Unlock => unlock(state, inventory, &mut outcome),
            Action::ShowInventory => list_inventory(inventory, &mut outcome),
            Action::Hint => self.hint(rng, &mut outcome),
            Action::Cheat => {
                outcome.push(OutputEvent::GridRendered {
                    view: state.render(agent.position, true),
                });
                list_inventory(inventory, &mut outcome);
            }
            Action::Unknown(input) => outcome.push(OutputEvent::Unknown {
                input: input.clone(),
            }),
        }

        if outcome.adversary_should_move {
            monster_turn(state, agent, &mut outcome);
        }

        outcome
    }

    fn dig<R: Rng + ?Sized>(
        &self,
        state: &mut GameState,
        inventory: &mut Inventory,
        rng: &mut R,
        outcome: &mut TurnOutcome,
    ) {
        let here = state.player_position;
        if !state.mark_searched(here) {
            outcome.push(OutputEvent::AlreadyDug);
            return;
        }

        if state.take_key_at(here) {
            inventory.add(item_names::KEY, 1);
            info!(position = %here, "key found");
            outcome.push(OutputEvent::KeyFound);
            return;
        }

        match self.loot.roll_loot(inventory, rng) {
            LootOutcome::Found { item } => {
                debug!(%item, position = %here, "loot found");
                outcome.push(OutputEvent::LootFound { item });
            }
            LootOutcome::Nothing => outcome.push(OutputEvent::NothingFound),
        }
    }

    fn repel(
        &self,
        inventory: &mut Inventory,
        agent: &mut PursuitAgent,
        outcome: &mut TurnOutcome,
    ) {
        if !inventory.consume(item_names::MONSTER_REPELLENT) {
            outcome.push(OutputEvent::NoRepellent);
            return;
        }

        agent.suppress(self.repellent_turns);
        debug!(turns = self.repellent_turns, "monster repelled");
        outcome.push(OutputEvent::RepellentUsed);
    }

    fn hint<R: Rng + ?Sized>(&self, rng: &mut R, outcome: &mut TurnOutcome) {
        if let Some(text) = self.hints.choose(rng) {
            outcome.push(OutputEvent::Hint { text: text.clone() });
        }
    }
}

fn walk(direction: Direction, state: &mut GameState, outcome: &mut TurnOutcome) {
    match state.move_player(direction) {
        Ok(_) => outcome.push(OutputEvent::Moved { direction }),
        Err(blocked) => outcome.push(OutputEvent::Blocked {
            direction: blocked.direction,
        }),
    }
}

fn light_torch(
    state: &GameState,
    inventory: &mut Inventory,
    agent: &PursuitAgent,
    outcome: &mut TurnOutcome,
) {
    if !inventory.consume(item_names::TORCH) {
        outcome.push(OutputEvent::NoTorches);
        return;
    }

    outcome.push(OutputEvent::TorchLit);
    outcome.push(OutputEvent::GridRendered {
        view: state.render(agent.position, false),
    });
    outcome.push(OutputEvent::Legend {
        cells: torch_legend(),
    });
    outcome.push(OutputEvent::TorchBurnedOut {
        remaining: inventory.count(item_names::TORCH),
    });
}

fn sweep(state: &GameState, inventory: &Inventory, outcome: &mut TurnOutcome) {
    if !inventory.has(item_names::METAL_DETECTOR) {
        outcome.push(OutputEvent::NoDetector);
        return;
    }

    let signal = state
        .distance_to_key()
        .map_or(ProximitySignal::Silent, ProximitySignal::from_distance);
    outcome.push(OutputEvent::DetectorSignal { signal });
}

fn unlock(state: &GameState, inventory: &mut Inventory, outcome: &mut TurnOutcome) {
    if !state.at_exit() {
        outcome.push(OutputEvent::NothingToUnlock);
        return;
    }

    if !inventory.consume(item_names::KEY) {
        outcome.push(OutputEvent::DoorLocked);
        return;
    }

    info!(position = %state.exit_position, "player escaped");
    outcome.push(OutputEvent::Escaped);
    outcome.finish(SessionEvent::Escaped);
}

fn list_inventory(inventory: &Inventory, outcome: &mut TurnOutcome) {
    if inventory.is_empty() {
        outcome.push(OutputEvent::InventoryEmpty);
        return;
    }

    outcome.push(OutputEvent::InventoryHeader);
    for stack in inventory.held() {
        outcome.push(OutputEvent::InventoryItem {
            item: stack.item.clone(),
            quantity: stack.quantity,
        });
    }
}

fn monster_turn(state: &GameState, agent: &mut PursuitAgent, outcome: &mut TurnOutcome) {
    match agent.move_toward(state.player_position) {
        AdversaryStep::Suppressed { turns_remaining } => {
            debug!(turns_remaining, "monster held off");
            outcome.push(OutputEvent::MonsterHeldOff { turns_remaining });
        }
        AdversaryStep::Advanced { from, to } => debug!(%from, %to, "monster advanced"),
        AdversaryStep::Holding => {}
    }

    if agent.is_caught(state.player_position) {
        info!(position = %state.player_position, "player captured");
        outcome.push(OutputEvent::Captured);
        outcome.finish(SessionEvent::Captured);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_rules::{GridBounds, ItemStack, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        engine: TurnEngine,
        state: GameState,
        inventory: Inventory,
        agent: PursuitAgent,
        rng: ChaCha8Rng,
    }

    impl Fixture {
        fn new(config: GameConfig) -> Self {
            Self {
                engine: TurnEngine::new(&config),
                state: GameState::from_config(&config),
                inventory: config.starting_inventory(),
                agent: PursuitAgent::new(config.monster_start),
                rng: ChaCha8Rng::seed_from_u64(7),
            }
        }

        fn standard() -> Self {
            Self::new(GameConfig::default())
        }

        fn apply(&mut self, action: Action) -> TurnOutcome {
            self.engine.apply(
                &action,
                &mut self.state,
                &mut self.inventory,
                &mut self.agent,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_move_then_monster_steps() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Move(Direction::East));

        assert_eq!(
            outcome.events,
            vec![OutputEvent::Moved {
                direction: Direction::East
            }]
        );
        assert!(outcome.adversary_should_move);
        assert_eq!(fx.state.player_position, Position::new(1, 0));
        assert_eq!(fx.agent.position, Position::new(3, 0));
    }

    #[test]
    fn test_blocked_move_still_costs_a_turn() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Move(Direction::North));

        assert_eq!(
            outcome.events,
            vec![OutputEvent::Blocked {
                direction: Direction::North
            }]
        );
        assert_eq!(fx.state.player_position, Position::new(0, 0));
        assert_eq!(fx.agent.position, Position::new(3, 0));
    }

    #[test]
    fn test_dig_twice() {
        let mut fx = Fixture::standard();
        let first = fx.apply(Action::Dig);
        assert!(matches!(
            first.events[0],
            OutputEvent::LootFound { .. } | OutputEvent::NothingFound
        ));

        let second = fx.apply(Action::Dig);
        assert_eq!(second.events, vec![OutputEvent::AlreadyDug]);
        assert!(second.adversary_should_move);
        assert_eq!(fx.state.searched_positions().count(), 1);
        assert_eq!(fx.agent.position, Position::new(2, 0));
    }

    #[test]
    fn test_dig_loot_lands_in_inventory() {
        let mut fx = Fixture::standard();
        let before: u32 = fx.inventory.iter().map(|s| s.quantity).sum();
        let outcome = fx.apply(Action::Dig);
        let after: u32 = fx.inventory.iter().map(|s| s.quantity).sum();

        match &outcome.events[0] {
            OutputEvent::LootFound { .. } => assert_eq!(after, before + 1),
            OutputEvent::NothingFound => assert_eq!(after, before),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_dig_up_key() {
        let config = GameConfig {
            player_start: Position::new(2, 2),
            ..Default::default()
        };
        let mut fx = Fixture::new(config);
        let outcome = fx.apply(Action::Dig);

        assert_eq!(outcome.events[0], OutputEvent::KeyFound);
        assert_eq!(fx.state.key_position, None);
        assert_eq!(fx.inventory.count("key"), 1);
    }

    #[test]
    fn test_light_torch() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Light);

        assert_eq!(outcome.events[0], OutputEvent::TorchLit);
        match &outcome.events[1] {
            OutputEvent::GridRendered { view } => {
                assert_eq!(view.cell(Position::new(0, 0)), Some(cave_rules::Cell::Player));
                assert_eq!(view.cell(Position::new(4, 0)), Some(cave_rules::Cell::Monster));
                // The key stays hidden by torchlight.
                assert_eq!(
                    view.cell(Position::new(2, 2)),
                    Some(cave_rules::Cell::Unexplored)
                );
            }
            other => panic!("expected grid, got {other:?}"),
        }
        assert!(matches!(outcome.events[2], OutputEvent::Legend { .. }));
        assert_eq!(outcome.events[3], OutputEvent::TorchBurnedOut { remaining: 2 });
        assert!(outcome.adversary_should_move);
    }

    #[test]
    fn test_no_torches() {
        let config = GameConfig {
            starting_inventory: vec![ItemStack::new("torch", 0)],
            ..Default::default()
        };
        let mut fx = Fixture::new(config);
        let outcome = fx.apply(Action::Light);

        assert_eq!(outcome.events, vec![OutputEvent::NoTorches]);
        assert!(outcome.adversary_should_move);
        assert_eq!(fx.agent.position, Position::new(3, 0));
    }

    #[test]
    fn test_sweep_tiers() {
        let mut fx = Fixture::standard();
        let cases = [
            (Position::new(0, 0), ProximitySignal::Silent),
            (Position::new(1, 1), ProximitySignal::SlowBeeping),
            (Position::new(2, 1), ProximitySignal::RapidBeeping),
            (Position::new(2, 2), ProximitySignal::Wild),
        ];

        for (position, expected) in cases {
            fx.state.player_position = position;
            fx.agent = PursuitAgent::new(Position::new(4, 4));
            let outcome = fx.apply(Action::Sweep);
            assert_eq!(
                outcome.events[0],
                OutputEvent::DetectorSignal { signal: expected },
                "at {position}"
            );
        }
        assert_eq!(fx.inventory.count("metal detector"), 1);
    }

    #[test]
    fn test_sweep_after_key_collected_is_silent() {
        let mut fx = Fixture::standard();
        fx.state.key_position = None;
        let outcome = fx.apply(Action::Sweep);
        assert_eq!(
            outcome.events[0],
            OutputEvent::DetectorSignal {
                signal: ProximitySignal::Silent
            }
        );
    }

    #[test]
    fn test_sweep_without_detector() {
        let config = GameConfig {
            starting_inventory: Vec::new(),
            ..Default::default()
        };
        let mut fx = Fixture::new(config);
        let outcome = fx.apply(Action::Sweep);
        assert_eq!(outcome.events[0], OutputEvent::NoDetector);
    }

    #[test]
    fn test_repel_suppresses_monster() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Repel);

        assert_eq!(
            outcome.events,
            vec![
                OutputEvent::RepellentUsed,
                OutputEvent::MonsterHeldOff { turns_remaining: 2 },
            ]
        );
        assert_eq!(fx.inventory.count("monster repellent"), 0);
        assert_eq!(fx.agent.position, Position::new(4, 0));

        fx.apply(Action::Move(Direction::South));
        fx.apply(Action::Move(Direction::South));
        assert_eq!(fx.agent.position, Position::new(4, 0));
        assert_eq!(fx.agent.suppression_turns_remaining, 0);

        fx.apply(Action::Move(Direction::North));
        assert_eq!(fx.agent.position, Position::new(3, 0));

        let empty = fx.apply(Action::Repel);
        assert_eq!(empty.events[0], OutputEvent::NoRepellent);
    }

    #[test]
    fn test_unlock_rules() {
        let mut fx = Fixture::standard();
        let away = fx.apply(Action::Unlock);
        assert_eq!(away.events[0], OutputEvent::NothingToUnlock);
        assert!(away.session_event.is_none());

        fx.state.player_position = fx.state.exit_position;
        fx.agent = PursuitAgent::new(Position::new(0, 0));
        let locked = fx.apply(Action::Unlock);
        assert_eq!(locked.events[0], OutputEvent::DoorLocked);
        assert!(locked.session_event.is_none());
        assert_eq!(fx.state.key_position, Some(Position::new(2, 2)));

        fx.inventory.add("key", 1);
        let agent_before = fx.agent.clone();
        let escaped = fx.apply(Action::Unlock);
        assert_eq!(escaped.events, vec![OutputEvent::Escaped]);
        assert_eq!(escaped.session_event, Some(SessionEvent::Escaped));
        assert!(escaped.is_terminal());
        assert!(!escaped.adversary_should_move);
        assert_eq!(fx.inventory.count("key"), 0);
        assert_eq!(fx.agent, agent_before);
    }

    #[test]
    fn test_unlock_with_key_away_from_exit() {
        let mut fx = Fixture::standard();
        fx.inventory.add(item_names::KEY, 1);
        let state_before = fx.state.clone();

        let outcome = fx.apply(Action::Unlock);
        assert_eq!(outcome.events[0], OutputEvent::NothingToUnlock);
        assert!(outcome.session_event.is_none());
        assert!(!outcome.is_terminal());
        assert_eq!(fx.inventory.count(item_names::KEY), 1);
        assert_eq!(fx.state, state_before);
    }

    #[test]
    fn test_informational_actions_freeze_monster() {
        let mut fx = Fixture::standard();
        for action in [
            Action::ShowInventory,
            Action::Hint,
            Action::Cheat,
            Action::Unknown("dance".to_string()),
        ] {
            let outcome = fx.apply(action);
            assert!(!outcome.adversary_should_move);
        }
        assert_eq!(fx.agent.position, Position::new(4, 0));
    }

    #[test]
    fn test_show_inventory() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::ShowInventory);

        assert_eq!(outcome.events[0], OutputEvent::InventoryHeader);
        assert_eq!(outcome.events.len(), 6);
        assert_eq!(
            outcome.events[5],
            OutputEvent::InventoryItem {
                item: "torch".to_string(),
                quantity: 3
            }
        );

        let mut empty = Fixture::new(GameConfig {
            starting_inventory: Vec::new(),
            ..Default::default()
        });
        assert_eq!(
            empty.apply(Action::ShowInventory).events,
            vec![OutputEvent::InventoryEmpty]
        );
    }

    #[test]
    fn test_hint_comes_from_pool() {
        let mut fx = Fixture::standard();
        let pool = GameConfig::default().hints;
        for _ in 0..10 {
            match &fx.apply(Action::Hint).events[0] {
                OutputEvent::Hint { text } => assert!(pool.contains(text)),
                other => panic!("expected hint, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_cheat_reveals_key() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Cheat);
        match &outcome.events[0] {
            OutputEvent::GridRendered { view } => {
                assert_eq!(view.cell(Position::new(2, 2)), Some(cave_rules::Cell::Key));
            }
            other => panic!("expected grid, got {other:?}"),
        }
        assert_eq!(outcome.events[1], OutputEvent::InventoryHeader);
    }

    #[test]
    fn test_unknown_echoes_token() {
        let mut fx = Fixture::standard();
        let outcome = fx.apply(Action::Unknown("xyz".to_string()));
        assert_eq!(
            outcome.events,
            vec![OutputEvent::Unknown {
                input: "xyz".to_string()
            }]
        );
    }

    #[test]
    fn test_capture() {
        let config = GameConfig {
            grid: GridBounds::new(3, 1),
            player_start: Position::new(0, 0),
            monster_start: Position::new(2, 0),
            exit_position: Position::new(2, 0),
            key_position: Position::new(1, 0),
            ..Default::default()
        };
        let mut fx = Fixture::new(config);

        let outcome = fx.apply(Action::Move(Direction::East));
        assert_eq!(
            outcome.events,
            vec![
                OutputEvent::Moved {
                    direction: Direction::East
                },
                OutputEvent::Captured,
            ]
        );
        assert_eq!(outcome.session_event, Some(SessionEvent::Captured));
    }
}
