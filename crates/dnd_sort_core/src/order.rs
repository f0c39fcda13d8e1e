//! The ordered child list of a sortable container.
//!
//! Indices reported to callers only count [`Slot::Item`] entries; fixed siblings and the
//! placeholder are skipped.

use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<K> {
    /// A draggable item.
    Item(K),
    /// A sibling that renders in the list but never takes part in reordering.
    Fixed(K),
    /// The drop-slot marker of an active drag.
    Placeholder,
}

impl<K> Slot<K> {
    pub fn as_item(&self) -> Option<&K> {
        match self {
            Slot::Item(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveOrder<K> {
    slots: Vec<Slot<K>>,
}

impl<K> Default for LiveOrder<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: Clone + PartialEq + Debug> LiveOrder<K> {
    pub fn new(slots: impl IntoIterator<Item = Slot<K>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    /// A list where every entry is draggable.
    pub fn from_items(items: impl IntoIterator<Item = K>) -> Self {
        Self::new(items.into_iter().map(Slot::Item))
    }

    pub fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Draggable items in their current order.
    pub fn items(&self) -> impl Iterator<Item = &K> + '_ {
        self.slots.iter().filter_map(Slot::as_item)
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    pub fn contains_item(&self, key: &K) -> bool {
        self.items().any(|k| k == key)
    }

    pub fn first_item(&self) -> Option<&K> {
        self.items().next()
    }

    pub fn last_item(&self) -> Option<&K> {
        self.items().last()
    }

    /// Position of `key` among draggable items.
    pub fn item_index(&self, key: &K) -> Option<usize> {
        self.items().position(|k| k == key)
    }

    pub fn placeholder_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_placeholder()).count()
    }

    fn slot_of(&self, key: &K) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.as_item().is_some_and(|k| k == key))
    }

    fn placeholder_slot(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_placeholder)
    }

    fn take_item(&mut self, key: &K) -> Option<Slot<K>> {
        let ix = self.slot_of(key)?;
        Some(self.slots.remove(ix))
    }

    /// Move `moved` so it sits directly before `anchor`.
    pub fn insert_before(&mut self, moved: &K, anchor: &K) -> bool {
        if moved == anchor || !self.contains_item(anchor) {
            return false;
        }
        let Some(slot) = self.take_item(moved) else {
            return false;
        };
        // Anchor is present, checked above.
        let anchor_ix = self.slot_of(anchor).unwrap_or(self.slots.len());
        self.slots.insert(anchor_ix, slot);
        true
    }

    /// Move `moved` before whatever follows `anchor`, or to the very end if nothing does.
    pub fn insert_after(&mut self, moved: &K, anchor: &K) -> bool {
        if moved == anchor || !self.contains_item(anchor) {
            return false;
        }
        let Some(slot) = self.take_item(moved) else {
            return false;
        };
        let anchor_ix = self.slot_of(anchor).unwrap_or(self.slots.len());
        self.slots.insert(anchor_ix + 1, slot);
        true
    }

    /// Move `moved` in front of the first draggable item.
    pub fn move_to_front(&mut self, moved: &K) -> bool {
        let Some(first) = self.first_item().cloned() else {
            return false;
        };
        if first == *moved {
            return false;
        }
        self.insert_before(moved, &first)
    }

    /// Append `moved` after every other child.
    pub fn move_to_end(&mut self, moved: &K) -> bool {
        let last = self.slots.iter().rev().find(|slot| !slot.is_placeholder());
        if last.and_then(Slot::as_item) == Some(moved) {
            return false;
        }
        let Some(slot) = self.take_item(moved) else {
            return false;
        };
        self.slots.push(slot);
        true
    }

    /// Ensure exactly one placeholder sits right after `key`.
    ///
    /// Returns `true` when the placeholder had to move.
    pub fn place_placeholder_after(&mut self, key: &K) -> bool {
        let Some(ix) = self.slot_of(key) else {
            return false;
        };
        if self.slots.get(ix + 1).is_some_and(Slot::is_placeholder) && self.placeholder_count() == 1
        {
            return false;
        }
        self.slots.retain(|slot| !slot.is_placeholder());
        let ix = self.slot_of(key).unwrap_or(self.slots.len());
        self.slots.insert(ix + 1, Slot::Placeholder);
        true
    }

    pub fn remove_placeholder(&mut self) -> bool {
        let had = self.placeholder_slot().is_some();
        self.slots.retain(|slot| !slot.is_placeholder());
        had
    }

    /// Whether the placeholder directly follows `key`.
    pub fn is_placeholder_after(&self, key: &K) -> bool {
        self.slot_of(key)
            .and_then(|ix| self.slots.get(ix + 1))
            .is_some_and(Slot::is_placeholder)
    }
}

/// Move `items[from]` to position `to`, shifting the rest.
pub fn move_index<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}
