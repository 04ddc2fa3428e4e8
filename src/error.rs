//! Error types for the Secret Server client.
//!
//! Two disjoint channels reach callers: [`ClientError::Transport`] when the call
//! could not be completed at all, and [`ClientError::Service`] when the service
//! answered but rejected the request with its own error messages.

use std::error::Error as StdError;

/// Opaque failure reported by the SOAP transport collaborator.
///
/// The underlying error, if any, is exposed through [`StdError::source`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying error (connection refused, malformed response, ...).
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Service error: {}", .0.join("; "))]
    Service(Vec<String>),

    #[error("Response field missing: {0}")]
    MissingField(String),

    #[error("Malformed {operation} response: {reason}")]
    Malformed { operation: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The messages the service rejected the request with, if this is a
    /// domain-level rejection.
    pub fn service_errors(&self) -> Option<&[String]> {
        match self {
            ClientError::Service(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
