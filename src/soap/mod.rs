//! Transport seam for the SOAP collaborator.
//!
//! This crate does not speak SOAP itself. Envelope construction, WSDL
//! handling and the network live behind [`SoapTransport`], which receives the
//! request object for one remote operation and hands back the decoded
//! response object. [`SoapConnector`] builds a transport from a service
//! description URL.
//!
//! Collaborators that only offer a callback-style surface can be plugged in
//! through the adapters in [`callback`].

pub mod callback;

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use callback::{CallbackConnector, CallbackTransport, Completion, ConnectCompletion};

/// A connected SOAP client able to invoke remote operations by name.
///
/// Implementations handle their own connection reuse; the caller never locks
/// around a transport and may issue calls from several tasks at once.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Invokes `operation` with `request` and returns the decoded response,
    /// e.g. `{"AuthenticateResult": {"Token": "..."}}`.
    async fn call(&self, operation: &str, request: Value) -> Result<Value, TransportError>;
}

/// Asynchronously constructs a transport from a service description.
#[async_trait]
pub trait SoapConnector: Send + Sync {
    async fn connect(&self, service_url: &str) -> Result<Arc<dyn SoapTransport>, TransportError>;
}
