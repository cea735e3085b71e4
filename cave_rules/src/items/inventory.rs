//! The player's backpack.

use serde::{Deserialize, Serialize};

/// A named item and how many of it are held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    pub quantity: u32,
}

impl ItemStack {
    /// Create a stack of `quantity` copies of `item`.
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// Item name -> count, listed in the order items were first added.
///
/// There is no fixed schema: loot can introduce new item names at any time. Stacks that
/// drop to zero stay in place so they keep their listing position if refilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<ItemStack>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from stacks, merging repeated item names.
    pub fn from_stacks<'a>(stacks: impl IntoIterator<Item = &'a ItemStack>) -> Self {
        let mut inventory = Self::new();
        for stack in stacks {
            inventory.add(stack.item.as_str(), stack.quantity);
        }
        inventory
    }

    /// How many of `item` are held (zero if never seen).
    pub fn count(&self, item: &str) -> u32 {
        self.items
            .iter()
            .find(|stack| stack.item == item)
            .map(|stack| stack.quantity)
            .unwrap_or(0)
    }

    /// Check whether at least one `item` is held.
    pub fn has(&self, item: &str) -> bool {
        self.count(item) > 0
    }

    /// Add `quantity` of `item`, creating the stack if needed.
    pub fn add(&mut self, item: impl Into<String>, quantity: u32) {
        let item = item.into();
        match self.items.iter_mut().find(|stack| stack.item == item) {
            Some(stack) => stack.quantity = stack.quantity.saturating_add(quantity),
            None => self.items.push(ItemStack { item, quantity }),
        }
    }

    /// Use up one `item`. Does nothing if none are held.
    ///
    /// Returns whether an item was actually consumed.
    pub fn consume(&mut self, item: &str) -> bool {
        match self.items.iter_mut().find(|stack| stack.item == item) {
            Some(stack) if stack.quantity > 0 => {
                stack.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Stacks with a non-zero count, in listing order.
    pub fn held(&self) -> impl Iterator<Item = &ItemStack> {
        self.items.iter().filter(|stack| stack.quantity > 0)
    }

    /// Every stack ever added, including emptied ones.
    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.items.iter()
    }

    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held().next().is_none()
    }
}
