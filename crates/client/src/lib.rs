//! Pokego Client Item Bag
//!
//! The item bag is the client's single source of truth for the player's item
//! stacks. It owns:
//! - The local item store (`pokego_inventory::ItemStore`)
//! - Item remote calls: recycle, use incense, use lucky egg
//! - Inventory sync from server deltas
//!
//! # Architecture
//!
//! All network I/O goes through an injected [`RequestHandler`]. The bag builds
//! typed requests, lets the handler perform the round trip, decodes the
//! response and applies local changes only after the server confirms them.
//! Failures are never retried or swallowed here.
//!
//! Mutating operations take `&mut self`: a bag is used by one caller at a time.

#![deny(unsafe_code)]

pub mod error;
pub mod session;
pub mod validation;

use pokego_inventory::{Item, ItemCategory, ItemStore};
use pokego_wire::{
    GetInventoryMessage, GetInventoryResponse, InventoryDelta, ItemId,
    RecycleInventoryItemMessage, RecycleInventoryItemResponse, RecycleResult, RequestType,
    TimestampMs, UseIncenseMessage, UseIncenseResponse, UseItemXpBoostMessage,
    UseItemXpBoostResponse,
};
use prost::Message;
use tracing::{debug, info, warn};

pub use error::{ClientError, TransportError};
pub use session::{RequestHandler, ServerRequest};

// ============================================================================
// Parameters
// ============================================================================

/// Default item storage capacity of a fresh account.
pub const DEFAULT_MAX_ITEM_STORAGE: u32 = 350;

/// Bag configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Item capacity used for space accounting.
    pub max_item_storage: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_item_storage: DEFAULT_MAX_ITEM_STORAGE,
        }
    }
}

// ============================================================================
// Item Bag
// ============================================================================

/// The player's item stacks plus the item-affecting remote operations.
pub struct ItemBag<H> {
    handler: H,
    config: ClientConfig,
    store: ItemStore,
    /// Server timestamp of the last applied inventory delta (0 = never synced).
    last_inventory_update_ms: TimestampMs,
}

impl<H: RequestHandler> ItemBag<H> {
    /// Create an empty bag that sends requests through `handler`.
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, ClientConfig::default())
    }

    pub fn with_config(handler: H, config: ClientConfig) -> Self {
        Self {
            handler,
            config,
            store: ItemStore::new(),
            last_inventory_update_ms: 0,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Tear the bag down and hand back its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    // ------------------------------------------------------------------------
    // Local state
    // ------------------------------------------------------------------------

    /// Drop every record. The next [`refresh`](Self::refresh) is a full sync.
    pub fn reset(&mut self) {
        self.store.clear();
        self.last_inventory_update_ms = 0;
    }

    /// Insert or replace the record for `item.item_id()`.
    pub fn add_item(&mut self, item: Item) {
        self.store.insert(item);
    }

    /// The stored record for `id`, or a zero-count record when none is stored.
    ///
    /// The zero-count record is NOT inserted: reading never changes what the
    /// bag holds.
    pub fn get_item(&self, id: ItemId) -> Result<Item, ClientError> {
        validation::check_recognized(id, "get")?;
        Ok(self.store.get_or_default(id))
    }

    /// [`get_item`](Self::get_item) for a raw wire value.
    pub fn get_item_raw(&self, raw: i32) -> Result<Item, ClientError> {
        let id = validation::recognized_item_id(raw)?;
        Ok(self.store.get_or_default(id))
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.store.contains(id)
    }

    /// All stored records, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.store.iter()
    }

    /// Sum of counts over all stored records.
    pub fn items_count(&self) -> i64 {
        self.store.total_count()
    }

    /// Remove and return the record for `id`. Local only.
    pub fn delete_local(&mut self, id: ItemId) -> Option<Item> {
        self.store.remove(id)
    }

    pub fn space_used(&self) -> i64 {
        self.items_count()
    }

    pub fn space_remaining(&self) -> i64 {
        (i64::from(self.config.max_item_storage) - self.space_used()).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.space_remaining() == 0
    }

    /// Apply an inventory delta: every recognized item stack replaces the
    /// stored one, and a stack reported at zero or below is removed. Returns
    /// the number of stacks applied.
    pub fn apply_inventory_delta(&mut self, delta: &InventoryDelta) -> usize {
        let mut applied = 0;
        for entry in &delta.inventory_items {
            let Some(data) = entry
                .inventory_item_data
                .as_ref()
                .and_then(|d| d.item.as_ref())
            else {
                continue;
            };

            match Item::from_data(data) {
                Ok(item) if item.count() <= 0 => {
                    self.store.remove(item.item_id());
                    applied += 1;
                }
                Ok(item) => {
                    self.store.insert(item);
                    applied += 1;
                }
                Err(e) => warn!(error = %e, "skipping inventory item"),
            }
        }
        debug!(applied, timestamp_ms = delta.new_timestamp_ms, "inventory delta applied");
        applied
    }

    // ------------------------------------------------------------------------
    // Remote operations
    // ------------------------------------------------------------------------

    /// Discard `quantity` units of `id` on the server.
    ///
    /// On `Success` the local count becomes the server's confirmed count, and
    /// the record is deleted once that count reaches zero. Any other result
    /// leaves the bag untouched. The server's result is returned either way.
    pub fn discard(&mut self, id: ItemId, quantity: i32) -> Result<RecycleResult, ClientError> {
        let held = self.get_item(id)?.count();
        validation::check_discard(id, quantity, held)?;

        let response: RecycleInventoryItemResponse = self.round_trip(
            RequestType::RecycleInventoryItem,
            &RecycleInventoryItemMessage {
                item_id: id.into(),
                count: quantity,
            },
        )?;

        let result = response.result();
        if result == RecycleResult::Success {
            if self
                .store
                .apply_confirmed_count(id, response.new_count)
                .is_some()
            {
                debug!(item = ?id, "last unit recycled, record removed");
            }
            info!(item = ?id, quantity, new_count = response.new_count, "recycled items");
        } else {
            warn!(item = ?id, quantity, ?result, "recycle not applied");
        }

        Ok(result)
    }

    /// Use an item by kind. Incense kinds start an incense; every other kind
    /// is accepted and ignored.
    pub fn use_item(&mut self, id: ItemId) -> Result<(), ClientError> {
        validation::check_recognized(id, "use")?;

        match ItemCategory::of(id) {
            ItemCategory::Incense => self.use_incense(id).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Activate an incense of the given kind. The server is authoritative on
    /// whether one is already active; the bag itself does not change.
    pub fn use_incense(&mut self, incense: ItemId) -> Result<UseIncenseResponse, ClientError> {
        let response: UseIncenseResponse = self.round_trip(
            RequestType::UseIncense,
            &UseIncenseMessage {
                incense_type: incense.into(),
            },
        )?;

        info!(item = ?incense, result = ?response.result(), "use incense result");
        Ok(response)
    }

    pub fn use_ordinary_incense(&mut self) -> Result<UseIncenseResponse, ClientError> {
        self.use_incense(ItemId::ItemIncenseOrdinary)
    }

    /// Activate a lucky egg and hand back the server's answer.
    pub fn use_lucky_egg(&mut self) -> Result<UseItemXpBoostResponse, ClientError> {
        let response: UseItemXpBoostResponse = self.round_trip(
            RequestType::UseItemXpBoost,
            &UseItemXpBoostMessage {
                item_id: ItemId::ItemLuckyEgg.into(),
            },
        )?;

        info!(result = ?response.result(), "use lucky egg result");
        Ok(response)
    }

    /// Pull inventory changes since the last sync and apply them.
    ///
    /// The first sync (and the first after [`reset`](Self::reset)) replaces
    /// the whole bag.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let response: GetInventoryResponse = self.round_trip(
            RequestType::GetInventory,
            &GetInventoryMessage {
                last_timestamp_ms: self.last_inventory_update_ms,
            },
        )?;

        if !response.success {
            warn!("inventory request not successful");
            return Err(ClientError::RemoteRejected {
                request_type: RequestType::GetInventory,
                reason: "inventory request not successful".to_string(),
            });
        }

        if self.last_inventory_update_ms == 0 {
            self.store.clear();
        }

        if let Some(delta) = response.inventory_delta {
            self.apply_inventory_delta(&delta);
            self.last_inventory_update_ms = delta.new_timestamp_ms;
        }
        Ok(())
    }

    /// Timestamp of the last applied inventory delta.
    pub fn last_inventory_update_ms(&self) -> TimestampMs {
        self.last_inventory_update_ms
    }

    fn round_trip<M: Message + Default>(
        &self,
        request_type: RequestType,
        message: &impl Message,
    ) -> Result<M, ClientError> {
        let mut request = ServerRequest::new(request_type, message);
        debug!(?request_type, "sending request");
        self.handler.send(&mut request)?;
        request.decode_response()
    }
}

// ============================================================================
// Tests
// ============================================================================
