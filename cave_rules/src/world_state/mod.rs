//! World state - where the player, key and exit are, and which cells have been dug.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::grid::{step, Blocked, Direction, GridBounds, Position};

/// What a single cell shows on a rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Unexplored,
    Dug,
    Player,
    Monster,
    Exit,
    /// Only drawn when the key's location is deliberately revealed.
    Key,
}

impl Cell {
    /// Two-column glyph used by the default text map.
    pub fn glyph(&self) -> &'static str {
        match self {
            Cell::Unexplored => "⬚ ",
            Cell::Dug => "⛝ ",
            Cell::Player => "♙ ",
            Cell::Monster => "♞ ",
            Cell::Exit => "⬕ ",
            Cell::Key => "⚿ ",
        }
    }

    /// Legend text for the cell.
    pub fn description(&self) -> &'static str {
        match self {
            Cell::Unexplored => "Unexplored cave.",
            Cell::Dug => "Spots where you've already dug.",
            Cell::Player => "You are here.",
            Cell::Monster => "The MONSTER.",
            Cell::Exit => "The exit.",
            Cell::Key => "The key.",
        }
    }
}

/// A snapshot of the grid, row by row from the top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub rows: Vec<Vec<Cell>>,
}

impl GridView {
    /// The cell at a position, if it is on the map.
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }
}

impl std::fmt::Display for GridView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                f.write_str(cell.glyph())?;
            }
        }
        Ok(())
    }
}

/// The player's side of a round: position, key, exit and the dig record.
///
/// The monster's position and repellent timer belong to its [`crate::PursuitAgent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub bounds: GridBounds,
    pub player_position: Position,
    /// `None` once the key has been dug up.
    pub key_position: Option<Position>,
    pub exit_position: Position,
    searched_positions: BTreeSet<Position>,
}

impl GameState {
    /// Lay out a fresh round. The configuration is expected to be validated.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            bounds: config.grid,
            player_position: config.player_start,
            key_position: Some(config.key_position),
            exit_position: config.exit_position,
            searched_positions: BTreeSet::new(),
        }
    }

    /// Walk the player one cell. The position is untouched when blocked.
    pub fn move_player(&mut self, direction: Direction) -> Result<Position, Blocked> {
        let next = step(self.player_position, direction, self.bounds)?;
        self.player_position = next;
        Ok(next)
    }

    /// Check whether a cell has been dug.
    pub fn is_searched(&self, position: Position) -> bool {
        self.searched_positions.contains(&position)
    }

    /// Record a dig. Returns false if the cell had already been dug.
    pub fn mark_searched(&mut self, position: Position) -> bool {
        self.searched_positions.insert(position)
    }

    /// Every dug cell, in position order.
    pub fn searched_positions(&self) -> impl Iterator<Item = &Position> {
        self.searched_positions.iter()
    }

    /// Pick up the key if it is buried at `position`.
    pub fn take_key_at(&mut self, position: Position) -> bool {
        if self.key_position == Some(position) {
            self.key_position = None;
            true
        } else {
            false
        }
    }

    /// Check whether the player is standing on the exit.
    pub fn at_exit(&self) -> bool {
        self.player_position == self.exit_position
    }

    /// Distance from the player to the buried key, if it is still buried.
    pub fn distance_to_key(&self) -> Option<u32> {
        self.key_position
            .map(|key| self.player_position.manhattan_distance(key))
    }

    /// Draw the map. Later layers win: dug cells, player, monster, exit, then the key.
    pub fn render(&self, monster: Position, reveal_key: bool) -> GridView {
        let mut rows =
            vec![vec![Cell::Unexplored; self.bounds.width as usize]; self.bounds.height as usize];
        let mut paint = |position: Position, cell: Cell| {
            if self.bounds.contains(position) {
                rows[position.y as usize][position.x as usize] = cell;
            }
        };

        for position in &self.searched_positions {
            paint(*position, Cell::Dug);
        }
        paint(self.player_position, Cell::Player);
        paint(monster, Cell::Monster);
        paint(self.exit_position, Cell::Exit);
        if reveal_key {
            if let Some(key) = self.key_position {
                paint(key, Cell::Key);
            }
        }

        GridView { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::from_config(&GameConfig::default())
    }

    #[test]
    fn test_from_config() {
        let state = state();
        assert_eq!(state.player_position, Position::new(0, 0));
        assert_eq!(state.key_position, Some(Position::new(2, 2)));
        assert_eq!(state.exit_position, Position::new(4, 4));
        assert_eq!(state.searched_positions().count(), 0);
    }

    #[test]
    fn test_move_player_blocked_keeps_position() {
        let mut state = state();
        assert!(state.move_player(Direction::North).is_err());
        assert_eq!(state.player_position, Position::new(0, 0));

        assert_eq!(state.move_player(Direction::East), Ok(Position::new(1, 0)));
        assert_eq!(state.player_position, Position::new(1, 0));
    }

    #[test]
    fn test_mark_searched_once() {
        let mut state = state();
        let here = Position::new(1, 1);
        assert!(state.mark_searched(here));
        assert!(!state.mark_searched(here));
        assert!(state.is_searched(here));
        assert_eq!(state.searched_positions().count(), 1);
    }

    #[test]
    fn test_take_key() {
        let mut state = state();
        assert!(!state.take_key_at(Position::new(0, 0)));
        assert_eq!(state.distance_to_key(), Some(4));

        assert!(state.take_key_at(Position::new(2, 2)));
        assert_eq!(state.key_position, None);
        assert_eq!(state.distance_to_key(), None);
        assert!(!state.take_key_at(Position::new(2, 2)));
    }

    #[test]
    fn test_render_layers() {
        let mut state = state();
        state.mark_searched(Position::new(1, 0));
        state.mark_searched(Position::new(0, 0));

        let view = state.render(Position::new(4, 0), false);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.cell(Position::new(0, 0)), Some(Cell::Player));
        assert_eq!(view.cell(Position::new(1, 0)), Some(Cell::Dug));
        assert_eq!(view.cell(Position::new(4, 0)), Some(Cell::Monster));
        assert_eq!(view.cell(Position::new(4, 4)), Some(Cell::Exit));
        assert_eq!(view.cell(Position::new(2, 2)), Some(Cell::Unexplored));
        assert_eq!(view.cell(Position::new(5, 0)), None);

        let revealed = state.render(Position::new(4, 0), true);
        assert_eq!(revealed.cell(Position::new(2, 2)), Some(Cell::Key));
    }

    #[test]
    fn test_render_text() {
        let config = GameConfig {
            grid: GridBounds::new(2, 2),
            player_start: Position::new(0, 0),
            monster_start: Position::new(1, 0),
            exit_position: Position::new(1, 1),
            key_position: Position::new(0, 1),
            ..Default::default()
        };
        let state = GameState::from_config(&config);
        let text = state.render(config.monster_start, true).to_string();
        assert_eq!(text, "♙ ♞ \n⚿ ⬕ ");
    }

    proptest! {
        #[test]
        fn searched_positions_never_duplicate(digs in proptest::collection::vec((0i32..5, 0i32..5), 0..40)) {
            let mut state = state();
            for (x, y) in &digs {
                state.mark_searched(Position::new(*x, *y));
            }

            let listed: Vec<_> = state.searched_positions().copied().collect();
            let mut unique = listed.clone();
            unique.dedup();
            prop_assert_eq!(&listed, &unique);

            let distinct: BTreeSet<_> = digs.iter().map(|(x, y)| Position::new(*x, *y)).collect();
            prop_assert_eq!(listed.len(), distinct.len());
        }
    }
}
