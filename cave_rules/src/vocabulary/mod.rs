//! Command vocabulary: the synonym table mapping typed words to command categories.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::config::ConfigError;

/// The closed set of things a player can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandCategory {
    Up,
    Down,
    Left,
    Right,
    Dig,
    Torch,
    Sweep,
    Repel,
    Unlock,
    Inventory,
    Help,
    Cheat,
    Quit,
    Yes,
    No,
}

impl CommandCategory {
    /// Every category, in declaration order.
    pub const ALL: [CommandCategory; 15] = [
        CommandCategory::Up,
        CommandCategory::Down,
        CommandCategory::Left,
        CommandCategory::Right,
        CommandCategory::Dig,
        CommandCategory::Torch,
        CommandCategory::Sweep,
        CommandCategory::Repel,
        CommandCategory::Unlock,
        CommandCategory::Inventory,
        CommandCategory::Help,
        CommandCategory::Cheat,
        CommandCategory::Quit,
        CommandCategory::Yes,
        CommandCategory::No,
    ];

    /// Lowercase name, as used for table keys.
    pub fn name(&self) -> &'static str {
        match self {
            CommandCategory::Up => "up",
            CommandCategory::Down => "down",
            CommandCategory::Left => "left",
            CommandCategory::Right => "right",
            CommandCategory::Dig => "dig",
            CommandCategory::Torch => "torch",
            CommandCategory::Sweep => "sweep",
            CommandCategory::Repel => "repel",
            CommandCategory::Unlock => "unlock",
            CommandCategory::Inventory => "inventory",
            CommandCategory::Help => "help",
            CommandCategory::Cheat => "cheat",
            CommandCategory::Quit => "quit",
            CommandCategory::Yes => "yes",
            CommandCategory::No => "no",
        }
    }

    /// Yes/no answers only mean something at the play-again prompt.
    pub fn is_confirmation(&self) -> bool {
        matches!(self, CommandCategory::Yes | CommandCategory::No)
    }

    /// Whether this category is consulted while a round is being played.
    ///
    /// Quit is live in both scopes.
    fn in_play_scope(&self) -> bool {
        !self.is_confirmation()
    }

    fn in_confirmation_scope(&self) -> bool {
        self.is_confirmation() || *self == CommandCategory::Quit
    }
}

impl std::fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive synonym table.
///
/// Words are matched in two scopes: while playing (everything except yes/no) and at the
/// play-again prompt (yes, no and quit). The same word may appear once in each scope, so
/// `"n"` can mean both "north" and "no".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandTable {
    words: BTreeMap<CommandCategory, Vec<String>>,
}

impl Default for CommandTable {
    fn default() -> Self {
        let entries: [(CommandCategory, &[&str]); 15] = [
            (CommandCategory::Up, &["n", "north", "up", "go north", "go up", "move north"]),
            (CommandCategory::Down, &["s", "south", "down", "go south", "go down", "move south"]),
            (CommandCategory::Left, &["w", "west", "left", "go west", "go left", "move west"]),
            (CommandCategory::Right, &["e", "east", "right", "go east", "go right", "move east"]),
            (CommandCategory::Dig, &["dig", "search", "use shovel"]),
            (CommandCategory::Torch, &["torch", "light", "light torch", "use torch", "map"]),
            (CommandCategory::Sweep, &["sweep", "detect", "scan", "use metal detector"]),
            (CommandCategory::Repel, &["repel", "spray", "repellent", "use repellent"]),
            (CommandCategory::Unlock, &["unlock", "open", "open door", "use key"]),
            (CommandCategory::Inventory, &["i", "inv", "inventory", "backpack"]),
            (CommandCategory::Help, &["h", "help", "hint", "?"]),
            (CommandCategory::Cheat, &["cheat", "xyzzy"]),
            (CommandCategory::Quit, &["q", "quit", "exit game"]),
            (CommandCategory::Yes, &["y", "yes"]),
            (CommandCategory::No, &["n", "no"]),
        ];

        let mut table = Self::empty();
        for (category, words) in entries {
            table.insert(category, words.iter().copied());
        }
        table
    }
}

impl CommandTable {
    /// A table with no words at all.
    pub fn empty() -> Self {
        Self {
            words: BTreeMap::new(),
        }
    }

    /// Add synonyms for a category. Words are trimmed and lowercased.
    pub fn insert<S: AsRef<str>>(
        &mut self,
        category: CommandCategory,
        words: impl IntoIterator<Item = S>,
    ) {
        let entry = self.words.entry(category).or_default();
        for word in words {
            let word = normalize(word.as_ref());
            if !word.is_empty() && !entry.contains(&word) {
                entry.push(word);
            }
        }
    }

    /// Builder-style [`CommandTable::insert`].
    pub fn with_words<S: AsRef<str>>(
        mut self,
        category: CommandCategory,
        words: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insert(category, words);
        self
    }

    /// Parse and validate a TOML table of `category = ["word", ...]` entries.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<CommandCategory, Vec<String>> = toml::from_str(source)?;
        let mut table = Self::empty();
        for (category, words) in raw {
            table.insert(category, words);
        }
        table.validate()?;
        Ok(table)
    }

    /// Read, parse and validate a TOML vocabulary file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Words registered for a category.
    pub fn words(&self, category: CommandCategory) -> &[String] {
        self.words.get(&category).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Check that the prompt can be answered and that no word is ambiguous within a scope.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in [CommandCategory::Yes, CommandCategory::No, CommandCategory::Quit] {
            if self.words(category).is_empty() {
                return Err(ConfigError::MissingCommand { category });
            }
        }

        check_scope(self, CommandCategory::in_play_scope)?;
        check_scope(self, CommandCategory::in_confirmation_scope)
    }

    /// Resolve a word typed during play. Yes/no words are not considered.
    pub fn resolve_play(&self, token: &str) -> Option<CommandCategory> {
        self.lookup(token, CommandCategory::in_play_scope)
    }

    /// Resolve a word typed at the play-again prompt: yes, no or quit.
    pub fn resolve_confirmation(&self, token: &str) -> Option<CommandCategory> {
        self.lookup(token, CommandCategory::in_confirmation_scope)
    }

    /// Check whether a word means "quit".
    pub fn is_quit(&self, token: &str) -> bool {
        let token = normalize(token);
        self.words(CommandCategory::Quit).contains(&token)
    }

    fn lookup(
        &self,
        token: &str,
        scope: fn(&CommandCategory) -> bool,
    ) -> Option<CommandCategory> {
        let token = normalize(token);
        self.words
            .iter()
            .filter(|(category, _)| scope(category))
            .find(|(_, words)| words.contains(&token))
            .map(|(category, _)| *category)
    }
}

fn check_scope(
    table: &CommandTable,
    scope: fn(&CommandCategory) -> bool,
) -> Result<(), ConfigError> {
    let mut owners: HashMap<&str, CommandCategory> = HashMap::new();
    for (category, words) in table.words.iter().filter(|(c, _)| scope(c)) {
        for word in words {
            if let Some(first) = owners.insert(word.as_str(), *category) {
                return Err(ConfigError::ConflictingCommand {
                    literal: word.clone(),
                    first,
                    second: *category,
                });
            }
        }
    }
    Ok(())
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
