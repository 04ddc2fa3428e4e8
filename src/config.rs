//! Options accepted by [`crate::create`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Client options.
///
/// No option is currently recognized. Anything supplied is kept so callers can
/// pass configuration written for newer versions without it being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    #[serde(flatten)]
    pub unrecognized: Map<String, Value>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option by name.
    pub fn with_option(mut self, key: &str, value: Value) -> Self {
        self.unrecognized.insert(key.to_string(), value);
        self
    }

    /// Logs and discards whatever is not understood.
    pub(crate) fn apply(&self) {
        for key in self.unrecognized.keys() {
            debug!("Ignoring unrecognized client option '{}'", key);
        }
    }
}
