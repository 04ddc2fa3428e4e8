//! Adapters from callback-style SOAP collaborators to async transports.
//!
//! The collaborator is handed a [`Completion`] together with each request and
//! calls [`Completion::complete`] exactly once, from any thread, when the
//! remote call finishes. The awaiting side is woken through a oneshot channel.

use crate::error::TransportError;
use crate::soap::{SoapConnector, SoapTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// Single-use completion handle passed to a callback-style collaborator.
pub struct Completion<T = Value> {
    sender: oneshot::Sender<Result<T, TransportError>>,
}

/// Completion handle for asynchronous transport construction.
pub type ConnectCompletion = Completion<Arc<dyn SoapTransport>>;

impl<T> Completion<T> {
    fn channel() -> (Self, oneshot::Receiver<Result<T, TransportError>>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Reports the outcome of the call. Consumes the handle.
    pub fn complete(self, outcome: Result<T, TransportError>) {
        if self.sender.send(outcome).is_err() {
            debug!("Completion delivered after the caller stopped waiting");
        }
    }
}

async fn settle<T>(
    receiver: oneshot::Receiver<Result<T, TransportError>>,
) -> Result<T, TransportError> {
    receiver
        .await
        .map_err(|_| TransportError::new("Callback dropped without completing"))?
}

/// Transport backed by a closure of the form `(operation, request, completion)`.
pub struct CallbackTransport<F> {
    invoke: F,
}

impl<F> CallbackTransport<F> {
    pub fn new(invoke: F) -> Self
    where
        F: Fn(&str, Value, Completion) + Send + Sync,
    {
        Self { invoke }
    }
}

#[async_trait]
impl<F> SoapTransport for CallbackTransport<F>
where
    F: Fn(&str, Value, Completion) + Send + Sync,
{
    async fn call(&self, operation: &str, request: Value) -> Result<Value, TransportError> {
        let (completion, receiver) = Completion::channel();
        (self.invoke)(operation, request, completion);
        settle(receiver).await
    }
}

/// Connector backed by a closure of the form `(service_url, completion)`.
pub struct CallbackConnector<F> {
    connect: F,
}

impl<F> CallbackConnector<F> {
    pub fn new(connect: F) -> Self
    where
        F: Fn(&str, ConnectCompletion) + Send + Sync,
    {
        Self { connect }
    }
}

#[async_trait]
impl<F> SoapConnector for CallbackConnector<F>
where
    F: Fn(&str, ConnectCompletion) + Send + Sync,
{
    async fn connect(&self, service_url: &str) -> Result<Arc<dyn SoapTransport>, TransportError> {
        let (completion, receiver) = Completion::channel();
        (self.connect)(service_url, completion);
        settle(receiver).await
    }
}
