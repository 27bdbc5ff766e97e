//! Pokego Inventory Core
//!
//! Local, I/O-free view of a player's item stacks. The client crate layers the
//! remote operations on top of this; nothing in here talks to the server.
//!
//! # Constraints
//!
//! - Every key in an [`ItemStore`] equals the `ItemId` of its record.
//! - A record whose count is confirmed at zero or below is removed, never kept.
//! - Lookups never insert.

#![deny(unsafe_code)]

pub mod item;
pub mod store;

pub use item::{Item, ItemCategory};
pub use pokego_wire::ItemId;
pub use store::ItemStore;

use thiserror::Error;

/// Errors raised while building local records from wire data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Wire value does not name a known item, or names the unknown sentinel.
    #[error("unrecognized item id {0}")]
    UnrecognizedItem(i32),
}
