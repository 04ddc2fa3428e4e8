//! Shared fixtures for the client integration tests.
//!
//! `ScriptedTransport` answers each operation with a canned outcome and records
//! every request it receives, so tests can check both what the client sent and
//! how it settled the response.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use sswebservice_client::{SoapConnector, SoapTransport, TransportError};

static INIT: Once = Once::new();

/// Sets up logging for tests
pub fn setup_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(Value),
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, operation: &str, response: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(operation.to_string(), Reply::Respond(response));
        self
    }

    pub fn fail(&self, operation: &str, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(operation.to_string(), Reply::Fail(message.to_string()));
        self
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self, operation: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|(name, _)| name == operation)
            .map(|(_, request)| request)
    }
}

#[async_trait]
impl SoapTransport for ScriptedTransport {
    async fn call(&self, operation: &str, request: Value) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), request));
        let reply = self.replies.lock().unwrap().get(operation).cloned();
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new(format!(
                "No scripted reply for {}",
                operation
            ))),
        }
    }
}

/// Connector handing out one shared transport, or failing construction.
pub struct ScriptedConnector {
    pub transport: Option<Arc<ScriptedTransport>>,
    pub requested_urls: Mutex<Vec<String>>,
}

impl ScriptedConnector {
    pub fn serving(transport: Arc<ScriptedTransport>) -> Self {
        Self {
            transport: Some(transport),
            requested_urls: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            transport: None,
            requested_urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SoapConnector for ScriptedConnector {
    async fn connect(&self, service_url: &str) -> Result<Arc<dyn SoapTransport>, TransportError> {
        self.requested_urls
            .lock()
            .unwrap()
            .push(service_url.to_string());
        match &self.transport {
            Some(transport) => {
                let transport: Arc<dyn SoapTransport> = transport.clone();
                Ok(transport)
            }
            None => Err(TransportError::new(format!(
                "getaddrinfo ENOTFOUND {}",
                service_url
            ))),
        }
    }
}
