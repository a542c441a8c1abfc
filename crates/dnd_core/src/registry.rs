use std::collections::{HashMap, HashSet};

use crate::geometry::{Measure, Rect};
use crate::item::{Item, ItemId};

/// Authoritative order of one drop area's items plus the measurement handles
/// of the items that are currently mounted.
///
/// The registry is the only mutator of its item list. Items may be present
/// without a handle (not mounted yet); measuring them yields `None`.
pub struct ItemRegistry<T> {
    items: Vec<Item<T>>,
    handles: HashMap<ItemId, Box<dyn Measure>>,
}

impl<T> Default for ItemRegistry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            handles: HashMap::new(),
        }
    }
}

impl<T> ItemRegistry<T> {
    /// Build a registry from an initial list. Later duplicates of an id are dropped.
    pub fn new(items: impl Into<Vec<Item<T>>>) -> Self {
        let mut registry = Self::default();
        registry.replace_items(items);
        registry
    }

    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().map(|item| &item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item<T>> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Store the measurement handle for `id`, replacing any previous one (remount).
    pub fn register(&mut self, id: impl Into<ItemId>, handle: impl Measure + 'static) {
        self.handles.insert(id.into(), Box::new(handle));
    }

    /// Drop the measurement handle for `id`. Returns whether a handle was removed.
    pub fn unregister(&mut self, id: &ItemId) -> bool {
        self.handles.remove(id).is_some()
    }

    pub fn is_registered(&self, id: &ItemId) -> bool {
        self.handles.contains_key(id)
    }

    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == *id)
    }

    pub fn measure(&self, id: &ItemId) -> Option<Rect> {
        self.handles.get(id).and_then(|handle| handle.measure())
    }

    /// Move the item at `from` so that it ends up at `to`.
    ///
    /// Returns `false` (and leaves the list untouched) when either index is out of bounds.
    pub fn move_committed(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        true
    }

    /// Insert `item` at `index` (clamped to the list length).
    ///
    /// An item whose id is already present is handed back untouched.
    pub fn insert(&mut self, index: usize, item: Item<T>) -> Result<usize, Item<T>> {
        if self.contains(&item.id) {
            return Err(item);
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(index)
    }

    /// Remove the item with `id`, together with its measurement handle.
    pub fn remove(&mut self, id: &ItemId) -> Option<(usize, Item<T>)> {
        let index = self.index_of(id)?;
        self.handles.remove(id);
        Some((index, self.items.remove(index)))
    }

    /// Replace the whole list. Returns the number of duplicate ids that were dropped.
    pub fn replace_items(&mut self, items: impl Into<Vec<Item<T>>>) -> usize {
        let items = items.into();
        let total = items.len();
        let mut seen = HashSet::with_capacity(total);
        self.items = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        let dropped = total - self.items.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} duplicate item id(s) from drop area list");
        }
        dropped
    }
}
