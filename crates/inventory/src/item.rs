//! Item stack record and item classification.

use pokego_wire::{ItemData, ItemId};

use crate::InventoryError;

// ============================================================================
// Item Category
// ============================================================================

/// Coarse grouping of item kinds, derived from protocol id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Ball,
    Potion,
    Revive,
    XpBoost,
    Incense,
    Berry,
    Incubator,
    Upgrade,
    Other,
}

impl ItemCategory {
    /// Classify an item kind.
    pub fn of(id: ItemId) -> Self {
        match i32::from(id) {
            1..=99 => Self::Ball,
            101..=199 => Self::Potion,
            201..=299 => Self::Revive,
            301 => Self::XpBoost,
            401..=499 => Self::Incense,
            701..=799 => Self::Berry,
            901..=999 => Self::Incubator,
            1001..=1099 => Self::Upgrade,
            _ => Self::Other,
        }
    }
}

// ============================================================================
// Item
// ============================================================================

/// One item kind and how many of it the player holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    item_id: ItemId,
    count: i32,
    unseen: bool,
}

impl Item {
    /// Create a record with the given count.
    pub fn new(item_id: ItemId, count: i32) -> Self {
        Self {
            item_id,
            count,
            unseen: false,
        }
    }

    /// Zero-count placeholder for a kind the player does not hold.
    pub fn empty(item_id: ItemId) -> Self {
        Self::new(item_id, 0)
    }

    /// Build a record from server item data.
    ///
    /// Fails if the raw id is unknown or the unknown sentinel.
    pub fn from_data(data: &ItemData) -> Result<Self, InventoryError> {
        let item_id = ItemId::try_from(data.item_id)
            .ok()
            .filter(|id| !id.is_unrecognized())
            .ok_or(InventoryError::UnrecognizedItem(data.item_id))?;

        Ok(Self {
            item_id,
            count: data.count,
            unseen: data.unseen,
        })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn set_count(&mut self, count: i32) {
        self.count = count;
    }

    pub fn is_unseen(&self) -> bool {
        self.unseen
    }

    pub fn category(&self) -> ItemCategory {
        ItemCategory::of(self.item_id)
    }

    pub fn is_incense(&self) -> bool {
        self.category() == ItemCategory::Incense
    }

    pub fn is_potion(&self) -> bool {
        self.category() == ItemCategory::Potion
    }

    pub fn is_revive(&self) -> bool {
        self.category() == ItemCategory::Revive
    }

    /// Convert back to wire form.
    pub fn to_data(&self) -> ItemData {
        ItemData {
            item_id: self.item_id.into(),
            count: self.count,
            unseen: self.unseen,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
