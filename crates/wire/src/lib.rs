//! Pokego Wire Protocol Types
//!
//! This crate defines the Protobuf message types exchanged between the client
//! and the game server for inventory operations. Every other crate in the
//! workspace takes its item and request enumerations from here; they are never
//! redefined locally.
//!
//! # Message Categories
//!
//! - **Envelope**: `Request` wraps a `RequestType` and the encoded message
//! - **Item operations**: recycle, use incense, use XP boost
//! - **Inventory sync**: `GetInventoryMessage` / `GetInventoryResponse`
//! - **Replay**: `Exchange` / `ExchangeLog` for recorded traffic

#![deny(unsafe_code)]

use prost::Message;

/// Millisecond timestamp as carried on the wire.
pub type TimestampMs = i64;

// ============================================================================
// Enumerations
// ============================================================================

/// Item kinds known to the protocol.
///
/// `ItemUnknown` is the protocol default and doubles as the "unrecognized"
/// sentinel: no real item stack is ever keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ItemId {
    ItemUnknown = 0,
    ItemPokeBall = 1,
    ItemGreatBall = 2,
    ItemUltraBall = 3,
    ItemMasterBall = 4,
    ItemPotion = 101,
    ItemSuperPotion = 102,
    ItemHyperPotion = 103,
    ItemMaxPotion = 104,
    ItemRevive = 201,
    ItemMaxRevive = 202,
    ItemLuckyEgg = 301,
    ItemIncenseOrdinary = 401,
    ItemIncenseSpicy = 402,
    ItemIncenseCool = 403,
    ItemIncenseFloral = 404,
    ItemTroyDisk = 501,
    ItemXAttack = 602,
    ItemXDefense = 603,
    ItemXMiracle = 604,
    ItemRazzBerry = 701,
    ItemBlukBerry = 702,
    ItemNanabBerry = 703,
    ItemWeparBerry = 704,
    ItemPinapBerry = 705,
    ItemSpecialCamera = 801,
    ItemIncubatorBasicUnlimited = 901,
    ItemIncubatorBasic = 902,
    ItemPokemonStorageUpgrade = 1001,
    ItemItemStorageUpgrade = 1002,
}

impl ItemId {
    /// Whether this is the unrecognized sentinel.
    pub fn is_unrecognized(self) -> bool {
        self == Self::ItemUnknown
    }
}

/// Remote procedure selector carried in the request envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RequestType {
    MethodUnset = 0,
    GetInventory = 4,
    RecycleInventoryItem = 137,
    UseItemXpBoost = 139,
    UseIncense = 141,
}

/// Outcome of a recycle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum RecycleResult {
    Unset = 0,
    Success = 1,
    ErrorNotEnoughCopies = 2,
    ErrorCannotRecycleIncubators = 3,
}

/// Outcome of a use-incense request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum UseIncenseResult {
    Unknown = 0,
    Success = 1,
    IncenseAlreadyActive = 2,
    NoneInInventory = 3,
    LocationUnset = 4,
}

/// Outcome of a use-XP-boost request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum XpBoostResult {
    Unset = 0,
    Success = 1,
    ErrorInvalidItemType = 2,
    ErrorXpBoostAlreadyActive = 3,
    ErrorNoItemsRemaining = 4,
    ErrorLocationUnset = 5,
}

// ============================================================================
// Envelope
// ============================================================================

/// A single request as placed on the wire by the transport.
#[derive(Clone, PartialEq, Message)]
pub struct Request {
    #[prost(enumeration = "RequestType", tag = "1")]
    pub request_type: i32,

    /// Encoded request-specific message.
    #[prost(bytes = "vec", tag = "2")]
    pub request_message: Vec<u8>,
}

// ============================================================================
// Item Data
// ============================================================================

/// One item stack as reported by the server.
#[derive(Clone, PartialEq, Message)]
pub struct ItemData {
    #[prost(enumeration = "ItemId", tag = "1")]
    pub item_id: i32,

    #[prost(int32, tag = "2")]
    pub count: i32,

    /// Acquired since the player last opened the bag.
    #[prost(bool, tag = "3")]
    pub unseen: bool,
}

/// An item currently in effect (incense, lucky egg).
#[derive(Clone, PartialEq, Message)]
pub struct AppliedItem {
    #[prost(enumeration = "ItemId", tag = "1")]
    pub item_id: i32,

    #[prost(int64, tag = "2")]
    pub expire_ms: TimestampMs,

    #[prost(int64, tag = "3")]
    pub applied_ms: TimestampMs,
}

#[derive(Clone, PartialEq, Message)]
pub struct AppliedItems {
    #[prost(message, repeated, tag = "1")]
    pub item: Vec<AppliedItem>,
}

// ============================================================================
// Recycle
// ============================================================================

/// Discard `count` units of `item_id`.
#[derive(Clone, PartialEq, Message)]
pub struct RecycleInventoryItemMessage {
    #[prost(enumeration = "ItemId", tag = "1")]
    pub item_id: i32,

    #[prost(int32, tag = "2")]
    pub count: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct RecycleInventoryItemResponse {
    #[prost(enumeration = "RecycleResult", tag = "1")]
    pub result: i32,

    /// Server-side count after the recycle.
    #[prost(int32, tag = "2")]
    pub new_count: i32,
}

// ============================================================================
// Incense
// ============================================================================

#[derive(Clone, PartialEq, Message)]
pub struct UseIncenseMessage {
    #[prost(enumeration = "ItemId", tag = "1")]
    pub incense_type: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct UseIncenseResponse {
    #[prost(enumeration = "UseIncenseResult", tag = "1")]
    pub result: i32,

    #[prost(message, optional, tag = "2")]
    pub applied_incense: Option<AppliedItem>,
}

// ============================================================================
// XP Boost
// ============================================================================

#[derive(Clone, PartialEq, Message)]
pub struct UseItemXpBoostMessage {
    #[prost(enumeration = "ItemId", tag = "1")]
    pub item_id: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct UseItemXpBoostResponse {
    #[prost(enumeration = "XpBoostResult", tag = "1")]
    pub result: i32,

    #[prost(message, optional, tag = "2")]
    pub applied_items: Option<AppliedItems>,
}

// ============================================================================
// Inventory Sync
// ============================================================================

/// Ask for every inventory change since `last_timestamp_ms` (0 = full dump).
#[derive(Clone, PartialEq, Message)]
pub struct GetInventoryMessage {
    #[prost(int64, tag = "1")]
    pub last_timestamp_ms: TimestampMs,
}

#[derive(Clone, PartialEq, Message)]
pub struct GetInventoryResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,

    #[prost(message, optional, tag = "2")]
    pub inventory_delta: Option<InventoryDelta>,
}

#[derive(Clone, PartialEq, Message)]
pub struct InventoryDelta {
    #[prost(int64, tag = "1")]
    pub original_timestamp_ms: TimestampMs,

    #[prost(int64, tag = "2")]
    pub new_timestamp_ms: TimestampMs,

    #[prost(message, repeated, tag = "3")]
    pub inventory_items: Vec<InventoryItem>,
}

#[derive(Clone, PartialEq, Message)]
pub struct InventoryItem {
    #[prost(int64, tag = "1")]
    pub modified_timestamp_ms: TimestampMs,

    #[prost(message, optional, tag = "2")]
    pub inventory_item_data: Option<InventoryItemData>,
}

/// Inventory entry payload. Only item stacks are modelled; other entry kinds
/// (pokemon, candy, player stats) arrive with `item` unset.
#[derive(Clone, PartialEq, Message)]
pub struct InventoryItemData {
    #[prost(message, optional, tag = "1")]
    pub item: Option<ItemData>,
}

// ============================================================================
// Replay Artifact Types
// ============================================================================

/// One recorded request/response round trip.
#[derive(Clone, PartialEq, Message)]
pub struct Exchange {
    #[prost(enumeration = "RequestType", tag = "1")]
    pub request_type: i32,

    #[prost(bytes = "vec", tag = "2")]
    pub request_message: Vec<u8>,

    #[prost(bytes = "vec", tag = "3")]
    pub response: Vec<u8>,
}

/// Recorded session traffic.
#[derive(Clone, PartialEq, Message)]
pub struct ExchangeLog {
    /// Schema version (starts at 1).
    #[prost(uint32, tag = "1")]
    pub log_format_version: u32,

    /// Client build that produced the log.
    #[prost(string, tag = "2")]
    pub client_version: String,

    /// Exchanges in send order.
    #[prost(message, repeated, tag = "3")]
    pub exchanges: Vec<Exchange>,

    /// Lowercase hex SHA-256 over the exchanges.
    #[prost(string, tag = "4")]
    pub digest: String,
}

// ============================================================================
// Conversion Helpers
// ============================================================================

impl Request {
    /// Build an envelope from a typed message.
    pub fn new(request_type: RequestType, message: &impl Message) -> Self {
        Self {
            request_type: request_type.into(),
            request_message: message.encode_to_vec(),
        }
    }
}

impl ItemData {
    pub fn new(item_id: ItemId, count: i32) -> Self {
        Self {
            item_id: item_id.into(),
            count,
            unseen: false,
        }
    }
}

impl From<ItemData> for InventoryItem {
    fn from(item: ItemData) -> Self {
        Self {
            modified_timestamp_ms: 0,
            inventory_item_data: Some(InventoryItemData { item: Some(item) }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
