//! Error types for client operations.

use pokego_inventory::InventoryError;
use pokego_wire::RequestType;
use thiserror::Error;

/// Failure reported by a [`RequestHandler`](crate::session::RequestHandler).
///
/// Opaque to the bag: it is propagated unchanged and never retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Session could not be (re)authenticated.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// Network failure or server-side error status.
    #[error("remote server error: {0}")]
    RemoteServer(String),

    /// Handler returned without attaching a response.
    #[error("no response received for {0:?}")]
    MissingResponse(RequestType),
}

/// Error type for every [`ItemBag`](crate::ItemBag) operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Caller input violated a precondition. Raised before any side effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Response bytes could not be decoded into the expected message.
    #[error("malformed server response: {0}")]
    RemoteProtocol(#[from] prost::DecodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Server answered but reported failure where no result code is surfaced.
    #[error("{request_type:?} rejected by server: {reason}")]
    RemoteRejected {
        request_type: RequestType,
        reason: String,
    },
}

impl ClientError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_remote_protocol(&self) -> bool {
        matches!(self, Self::RemoteProtocol(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<InventoryError> for ClientError {
    fn from(e: InventoryError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}
