//! Keyed storage of item stacks.

use std::collections::HashMap;

use pokego_wire::ItemId;

use crate::item::Item;

/// Map from item kind to its stack.
///
/// Keys always equal the record's own `item_id`: records are only ever
/// inserted under `item.item_id()`.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: HashMap<ItemId, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Insert or replace the record for `item.item_id()`.
    /// Returns the record it replaced, if any.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.item_id(), item)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// The stored record, or a zero-count placeholder that is NOT inserted.
    pub fn get_or_default(&self, id: ItemId) -> Item {
        self.items
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Item::empty(id))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of distinct kinds stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of counts over all stored records.
    pub fn total_count(&self) -> i64 {
        self.items.values().map(|i| i64::from(i.count())).sum()
    }

    /// Apply a server-confirmed count for `id`.
    ///
    /// A count of zero or below deletes the record and returns it. Kinds that
    /// are not stored are left absent.
    pub fn apply_confirmed_count(&mut self, id: ItemId, new_count: i32) -> Option<Item> {
        if new_count <= 0 {
            return self.items.remove(&id).map(|mut item| {
                item.set_count(0);
                item
            });
        }

        if let Some(item) = self.items.get_mut(&id) {
            item.set_count(new_count);
        }
        None
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Item;
    type IntoIter = std::collections::hash_map::Values<'a, ItemId, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

// ============================================================================
// Tests
// ============================================================================
