//! Normalization of the error lists embedded in result envelopes.
//!
//! Secret Server reports business-rule failures inside an otherwise successful
//! SOAP response. Depending on how the transport maps `ArrayOfString` into an
//! object, the `Errors` field arrives as nothing, a list of strings, or a
//! `{ "string": ... }` wrapper. All of them end up as a plain `Vec<String>`.

use serde_json::{Map, Value};
use tracing::warn;

/// Name of the error-list field on every result envelope.
pub const ERRORS_FIELD: &str = "Errors";

/// Converts a raw error field into an ordered list of messages.
///
/// Never fails. Shapes that are not recognized yield an empty list and a
/// warning, since they could hide real error data.
pub fn normalize(errors: Option<&Value>) -> Vec<String> {
    match errors {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => strings_of(items),
        Some(Value::Object(wrapper)) => match wrapper.get("string") {
            Some(Value::String(message)) => vec![message.clone()],
            Some(Value::Array(items)) => strings_of(items),
            Some(Value::Null) | None if wrapper.is_empty() => Vec::new(),
            _ => {
                let shown = Value::Object(wrapper.clone());
                warn!("Unrecognized error wrapper, treating as no errors: {}", shown);
                Vec::new()
            }
        },
        Some(other) => {
            warn!("Unrecognized error field shape, treating as no errors: {}", other);
            Vec::new()
        }
    }
}

/// Reads `property` from a result envelope and normalizes it.
pub fn envelope_errors(envelope: &Map<String, Value>, property: &str) -> Vec<String> {
    normalize(envelope.get(property))
}

fn strings_of(items: &[Value]) -> Vec<String> {
    let messages: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str().map(str::to_string))
        .collect();
    if messages.len() != items.len() {
        warn!(
            "Dropped {} non-string entries from error list",
            items.len() - messages.len()
        );
    }
    messages
}
