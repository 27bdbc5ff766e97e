//! Pokego Exchange Replay
//!
//! This crate records and replays the request/response traffic of a session.
//!
//! # Architecture
//!
//! - `RecordingHandler`: wraps a live handler and captures every exchange
//! - `ReplayHandler`: serves a recorded log back, in order, checking that the
//!   client sends the same requests it sent when the log was captured
//! - `verify_log`: format version and SHA-256 integrity check
//!
//! Both handlers implement [`RequestHandler`], so an `ItemBag` can run against
//! captured server traffic with no network.

#![deny(unsafe_code)]

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use pokego_client::{RequestHandler, ServerRequest, TransportError};
use pokego_wire::{Exchange, ExchangeLog, RequestType};
use prost::Message;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

/// Current exchange log schema version.
pub const LOG_FORMAT_VERSION: u32 = 1;

// ============================================================================
// Recording
// ============================================================================

/// Configuration for exchange recording.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub client_version: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Forwards requests to `inner` and keeps a copy of every completed exchange.
///
/// Failed round trips are forwarded to the caller and not recorded. A round
/// trip the inner handler reports as complete but which carries no response
/// counts as failed.
pub struct RecordingHandler<H> {
    inner: H,
    config: ReplayConfig,
    exchanges: RefCell<Vec<Exchange>>,
}

impl<H: RequestHandler> RecordingHandler<H> {
    pub fn new(inner: H, config: ReplayConfig) -> Self {
        Self {
            inner,
            config,
            exchanges: RefCell::new(Vec::new()),
        }
    }

    /// Number of exchanges recorded so far.
    pub fn recorded(&self) -> usize {
        self.exchanges.borrow().len()
    }

    /// Finish recording and produce the log.
    pub fn finalize(self) -> ExchangeLog {
        let exchanges = self.exchanges.into_inner();
        let digest = exchange_digest(&exchanges);

        ExchangeLog {
            log_format_version: LOG_FORMAT_VERSION,
            client_version: self.config.client_version,
            exchanges,
            digest,
        }
    }
}

impl<H: RequestHandler> RequestHandler for RecordingHandler<H> {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        self.inner.send(request)?;

        let Some(response) = request.response() else {
            warn!(request_type = ?request.request_type(), "handler returned without a response");
            return Err(TransportError::MissingResponse(request.request_type()));
        };

        let exchange = Exchange {
            request_type: request.request_type().into(),
            request_message: request.message_bytes().to_vec(),
            response: response.to_vec(),
        };
        debug!(request_type = ?request.request_type(), "exchange recorded");
        self.exchanges.borrow_mut().push(exchange);
        Ok(())
    }
}

/// Lowercase hex SHA-256 over the length-delimited encoding of each exchange.
pub fn exchange_digest(exchanges: &[Exchange]) -> String {
    let mut hasher = Sha256::new();
    for exchange in exchanges {
        hasher.update(exchange.encode_length_delimited_to_vec());
    }
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// Replay
// ============================================================================

/// Serves responses from a recorded log.
///
/// Requests must arrive in recorded order with identical payloads; anything
/// else fails as a transport error so the caller sees it like a dead server.
pub struct ReplayHandler {
    exchanges: Vec<Exchange>,
    cursor: Cell<usize>,
}

impl ReplayHandler {
    pub fn from_log(log: ExchangeLog) -> Self {
        Self {
            exchanges: log.exchanges,
            cursor: Cell::new(0),
        }
    }

    /// Exchanges not yet served.
    pub fn remaining(&self) -> usize {
        self.exchanges.len() - self.cursor.get()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl RequestHandler for ReplayHandler {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        let index = self.cursor.get();
        let Some(expected) = self.exchanges.get(index) else {
            return Err(TransportError::RemoteServer(format!(
                "replay exhausted after {index} exchanges"
            )));
        };

        let expected_type = expected.request_type();
        if expected_type != request.request_type()
            || expected.request_message != request.message_bytes()
        {
            warn!(index, expected = ?expected_type, actual = ?request.request_type(), "replay diverged");
            return Err(TransportError::RemoteServer(format!(
                "replay diverged at exchange {index}: expected {expected_type:?}, got {:?}",
                request.request_type()
            )));
        }

        request.set_response(expected.response.clone());
        self.cursor.set(index + 1);
        Ok(())
    }
}

// ============================================================================
// Verification
// ============================================================================

/// Exchange log verification error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("unsupported log format version {found} (expected {expected})", expected = LOG_FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error("exchange {index} has no request type")]
    MissingRequestType { index: usize },

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

/// Verify a log is readable by this build and has not been altered.
pub fn verify_log(log: &ExchangeLog) -> Result<(), VerifyError> {
    if log.log_format_version != LOG_FORMAT_VERSION {
        return Err(VerifyError::UnsupportedVersion {
            found: log.log_format_version,
        });
    }

    if let Some(index) = log
        .exchanges
        .iter()
        .position(|e| e.request_type() == RequestType::MethodUnset)
    {
        return Err(VerifyError::MissingRequestType { index });
    }

    let actual = exchange_digest(&log.exchanges);
    if actual != log.digest {
        return Err(VerifyError::DigestMismatch {
            expected: log.digest.clone(),
            actual,
        });
    }

    Ok(())
}

// ============================================================================
// Log I/O
// ============================================================================

/// Write an exchange log to a file. Refuses to overwrite.
pub fn write_log(log: &ExchangeLog, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // create_new checks and creates in one step.
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("Exchange log already exists at {}", path.display()),
                )
            } else {
                e
            }
        })?;
    file.write_all(&log.encode_to_vec())?;
    file.sync_all()?;

    Ok(())
}

/// Read an exchange log from a file.
pub fn read_log(path: &Path) -> io::Result<ExchangeLog> {
    let data = fs::read(path)?;
    ExchangeLog::decode(data.as_slice()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to decode exchange log: {e}"),
        )
    })
}

// ============================================================================
// Tests
// ============================================================================
