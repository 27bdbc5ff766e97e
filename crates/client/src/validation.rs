//! Precondition checks for bag operations.
//!
//! Every check runs before any request is built, so a failure here leaves
//! both the bag and the server untouched.
//! - Unrecognized item kind: reject
//! - Discard quantity negative: reject (zero is forwarded to the server)
//! - Discard quantity above held count: reject

use pokego_wire::ItemId;

use crate::error::ClientError;

/// Reject the unrecognized sentinel.
pub fn check_recognized(id: ItemId, action: &str) -> Result<(), ClientError> {
    if id.is_unrecognized() {
        return Err(ClientError::invalid_argument(format!(
            "cannot {action} item for unrecognized item id"
        )));
    }
    Ok(())
}

/// Map a raw wire value to a recognized item kind.
pub fn recognized_item_id(raw: i32) -> Result<ItemId, ClientError> {
    let id = ItemId::try_from(raw)
        .map_err(|_| ClientError::invalid_argument(format!("unknown item id {raw}")))?;
    check_recognized(id, "get")?;
    Ok(id)
}

/// Validate a discard of `quantity` units when `held` are held locally.
///
/// A zero quantity passes; the server decides what recycling nothing means.
pub fn check_discard(id: ItemId, quantity: i32, held: i32) -> Result<(), ClientError> {
    if quantity < 0 {
        return Err(ClientError::invalid_argument(format!(
            "discard quantity must not be negative, got {quantity}"
        )));
    }
    if quantity > held {
        return Err(ClientError::invalid_argument(format!(
            "cannot remove {quantity} of {id:?}: only {held} held"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_rejected() {
        let err = check_recognized(ItemId::ItemUnknown, "use").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(check_recognized(ItemId::ItemPotion, "use").is_ok());
    }

    #[test]
    fn test_raw_ids() {
        assert_eq!(recognized_item_id(1).unwrap(), ItemId::ItemPokeBall);
        assert!(recognized_item_id(0).unwrap_err().is_invalid_argument());
        assert!(recognized_item_id(-5).unwrap_err().is_invalid_argument());
        assert!(recognized_item_id(12345).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_discard_bounds() {
        assert!(check_discard(ItemId::ItemPotion, 5, 5).is_ok());
        assert!(check_discard(ItemId::ItemPotion, 1, 5).is_ok());
        assert!(check_discard(ItemId::ItemPotion, 6, 5).is_err());
        assert!(check_discard(ItemId::ItemPotion, 0, 5).is_ok());
        assert!(check_discard(ItemId::ItemPotion, 0, 0).is_ok());
        assert!(check_discard(ItemId::ItemPotion, -1, 5).is_err());
        assert!(check_discard(ItemId::ItemPotion, 1, 0).is_err());
    }
}
