//! Session transport seam.
//!
//! The bag never talks to the network directly. It builds a [`ServerRequest`]
//! and hands it to a [`RequestHandler`], which performs the round trip
//! (authentication, signing, retry) and attaches the raw response bytes.

use std::rc::Rc;
use std::sync::Arc;

use pokego_wire::{Request, RequestType};
use prost::Message;

use crate::error::{ClientError, TransportError};

/// A typed request paired with the raw response the transport attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRequest {
    request: Request,
    response: Option<Vec<u8>>,
}

impl ServerRequest {
    /// Create a request for `request_type` carrying `message`.
    pub fn new(request_type: RequestType, message: &impl Message) -> Self {
        Self {
            request: Request::new(request_type, message),
            response: None,
        }
    }

    pub fn request_type(&self) -> RequestType {
        self.request.request_type()
    }

    /// The envelope as it goes on the wire.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Encoded request-specific message.
    pub fn message_bytes(&self) -> &[u8] {
        &self.request.request_message
    }

    /// Attach the raw response. Called by the transport.
    pub fn set_response(&mut self, data: Vec<u8>) {
        self.response = Some(data);
    }

    /// Raw response bytes, if the transport attached any.
    pub fn response(&self) -> Option<&[u8]> {
        self.response.as_deref()
    }

    /// Decode the attached response as `M`.
    pub fn decode_response<M: Message + Default>(&self) -> Result<M, ClientError> {
        let data = self
            .response()
            .ok_or(TransportError::MissingResponse(self.request_type()))?;
        Ok(M::decode(data)?)
    }
}

/// Performs request round trips on behalf of a session.
///
/// On `Ok(())` the handler MUST have attached a response to `request`.
#[cfg_attr(test, mockall::automock)]
pub trait RequestHandler {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError>;
}

impl<H: RequestHandler + ?Sized> RequestHandler for &H {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }
}

impl<H: RequestHandler + ?Sized> RequestHandler for Box<H> {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }
}

impl<H: RequestHandler + ?Sized> RequestHandler for Rc<H> {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }
}

impl<H: RequestHandler + ?Sized> RequestHandler for Arc<H> {
    fn send(&self, request: &mut ServerRequest) -> Result<(), TransportError> {
        (**self).send(request)
    }
}
