//! The adapter applied to every remote operation.
//!
//! Each operation is described once by an [`OperationDescriptor`]: the remote
//! name, the field of the response holding the result envelope, and which part
//! of that envelope callers actually want. [`invoke`] runs one call through the
//! transport and settles it into exactly one of: the payload, the transport
//! failure, or the service's error messages.

use crate::error::ClientError;
use crate::normalize::{envelope_errors, ERRORS_FIELD};
use crate::soap::SoapTransport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Part of the result envelope handed back on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// A single sub-field, e.g. `Token`.
    Field(&'static str),
    /// A list nested in a wrapper, e.g. `SecretSummaries.SecretSummary`.
    List {
        container: &'static str,
        item: &'static str,
    },
    /// The envelope itself, minus the named field.
    Whole { strip: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub result_field: &'static str,
    pub payload: Payload,
}

pub const AUTHENTICATE: OperationDescriptor = OperationDescriptor {
    name: "Authenticate",
    result_field: "AuthenticateResult",
    payload: Payload::Field("Token"),
};

pub const WHO_AM_I: OperationDescriptor = OperationDescriptor {
    name: "WhoAmI",
    result_field: "WhoAmIResult",
    payload: Payload::Whole {
        strip: ERRORS_FIELD,
    },
};

pub const VERSION_GET: OperationDescriptor = OperationDescriptor {
    name: "VersionGet",
    result_field: "VersionGetResult",
    payload: Payload::Field("Version"),
};

pub const GET_SECRET: OperationDescriptor = OperationDescriptor {
    name: "GetSecret",
    result_field: "GetSecretResult",
    payload: Payload::Field("Secret"),
};

pub const SEARCH_SECRETS: OperationDescriptor = OperationDescriptor {
    name: "SearchSecrets",
    result_field: "SearchSecretsResult",
    payload: Payload::List {
        container: "SecretSummaries",
        item: "SecretSummary",
    },
};

pub const GET_SECRET_TEMPLATES: OperationDescriptor = OperationDescriptor {
    name: "GetSecretTemplates",
    result_field: "GetSecretTemplatesResult",
    payload: Payload::List {
        container: "SecretTemplates",
        item: "SecretTemplate",
    },
};

impl OperationDescriptor {
    fn malformed(&self, reason: impl Into<String>) -> ClientError {
        ClientError::Malformed {
            operation: self.name.to_string(),
            reason: reason.into(),
        }
    }

    fn missing(&self, field: &str) -> ClientError {
        ClientError::MissingField(format!("{}.{}", self.result_field, field))
    }

    /// Pulls the result envelope out of the raw response.
    fn envelope(&self, response: Value) -> Result<Map<String, Value>, ClientError> {
        let Value::Object(mut response) = response else {
            return Err(self.malformed("response is not an object"));
        };
        match response.remove(self.result_field) {
            Some(Value::Object(envelope)) => Ok(envelope),
            None | Some(Value::Null) => {
                Err(ClientError::MissingField(self.result_field.to_string()))
            }
            Some(_) => Err(self.malformed(format!("{} is not an object", self.result_field))),
        }
    }

    fn extract(&self, mut envelope: Map<String, Value>) -> Result<Value, ClientError> {
        match self.payload {
            Payload::Field(field) => match envelope.remove(field) {
                Some(Value::Null) | None => Err(self.missing(field)),
                Some(value) => Ok(value),
            },
            Payload::List { container, item } => {
                let wrapper = envelope.remove(container).unwrap_or(Value::Null);
                wrapped_items(wrapper, item)
                    .map(Value::Array)
                    .ok_or_else(|| self.malformed(format!("{} is not a list", container)))
            }
            Payload::Whole { strip } => {
                envelope.remove(strip);
                Ok(Value::Object(envelope))
            }
        }
    }
}

/// Flattens a list that may have been collapsed by XML mapping: `null` is
/// empty, a lone value is a one-element list.
fn sequence_items(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        single => vec![single],
    }
}

/// Unwraps an `ArrayOfX` wrapper such as `{ "SecretSummary": [..] }`.
///
/// Only the `item` key is read, so attributes carried next to it are ignored.
/// `null`, `{}` and a wrapper without `item` are empty; an already flattened
/// array is taken as is. Scalars yield `None`.
pub(crate) fn wrapped_items(wrapper: Value, item: &str) -> Option<Vec<Value>> {
    match wrapper {
        Value::Null => Some(Vec::new()),
        Value::Object(mut wrapper) => Some(sequence_items(
            wrapper.remove(item).unwrap_or(Value::Null),
        )),
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Runs one remote operation and settles its outcome.
///
/// A transport failure is returned as is and the response is never looked at.
/// A non-empty error list in the envelope becomes [`ClientError::Service`].
/// Otherwise the declared payload is deserialized into `T`.
pub async fn invoke<T, R>(
    transport: &dyn SoapTransport,
    operation: &OperationDescriptor,
    request: &R,
) -> Result<T, ClientError>
where
    T: DeserializeOwned,
    R: Serialize + ?Sized,
{
    let request = serde_json::to_value(request)?;
    debug!("Invoking {}", operation.name);

    let response = transport
        .call(operation.name, request)
        .await
        .map_err(|e| {
            debug!("{} failed in transport: {}", operation.name, e);
            ClientError::Transport(e)
        })?;

    let envelope = operation.envelope(response)?;
    let errors = envelope_errors(&envelope, ERRORS_FIELD);
    if !errors.is_empty() {
        warn!(
            "{} rejected by service with {} error(s): {}",
            operation.name,
            errors.len(),
            errors.join("; ")
        );
        return Err(ClientError::Service(errors));
    }

    let payload = operation.extract(envelope)?;
    serde_json::from_value(payload).map_err(|e| operation.malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::init_logging;
    use crate::soap::CallbackTransport;
    use serde_json::json;

    fn answering(response: Value) -> impl SoapTransport {
        CallbackTransport::new(move |_, _, done| done.complete(Ok(response.clone())))
    }

    #[test]
    fn test_sequence_items_shapes() {
        assert!(sequence_items(Value::Null).is_empty());
        assert_eq!(sequence_items(json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(sequence_items(json!({ "a": 1 })), vec![json!({ "a": 1 })]);
    }

    #[tokio::test]
    async fn test_field_payload_is_unwrapped() {
        let transport = answering(json!({
            "VersionGetResult": { "Version": "10.9.000033", "Errors": null }
        }));
        let version: String = invoke(&transport, &VERSION_GET, &json!({})).await.unwrap();
        assert_eq!(version, "10.9.000033");
    }

    #[tokio::test]
    async fn test_service_errors_reject() {
        init_logging();
        let transport = answering(json!({
            "GetSecretResult": { "Errors": ["Access Denied", "Secret is checked out"] }
        }));
        let err = invoke::<Value, _>(&transport, &GET_SECRET, &json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err.service_errors(),
            Some(&["Access Denied".to_string(), "Secret is checked out".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_transport_failure_skips_envelope() {
        let transport = CallbackTransport::new(|_, _, done| {
            done.complete(Err(TransportError::new("socket hang up")))
        });
        let err = invoke::<String, _>(&transport, &AUTHENTICATE, &json!({}))
            .await
            .unwrap_err();
        match err {
            ClientError::Transport(e) => assert_eq!(e.message(), "socket hang up"),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_whole_payload_strips_errors() {
        let transport = answering(json!({
            "WhoAmIResult": { "UserId": 2, "UserName": "alice", "Errors": [] }
        }));
        let user: Value = invoke(&transport, &WHO_AM_I, &json!({})).await.unwrap();
        assert_eq!(user, json!({ "UserId": 2, "UserName": "alice" }));
    }

    #[tokio::test]
    async fn test_list_payload_leniency() {
        let single = answering(json!({
            "SearchSecretsResult": { "SecretSummaries": { "SecretSummary": { "SecretId": 1 } } }
        }));
        let items: Vec<Value> = invoke(&single, &SEARCH_SECRETS, &json!({})).await.unwrap();
        assert_eq!(items, vec![json!({ "SecretId": 1 })]);

        let empty = answering(json!({ "SearchSecretsResult": { "SecretSummaries": null } }));
        let items: Vec<Value> = invoke(&empty, &SEARCH_SECRETS, &json!({})).await.unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_wrapped_items_reads_only_item_key() {
        assert_eq!(wrapped_items(json!({}), "SecretSummary"), Some(vec![]));
        assert_eq!(wrapped_items(Value::Null, "SecretSummary"), Some(vec![]));
        assert_eq!(
            wrapped_items(json!({ "SecretSummary": null }), "SecretSummary"),
            Some(vec![])
        );
        assert_eq!(
            wrapped_items(
                json!({ "@type": "ArrayOfSecretSummary", "SecretSummary": { "SecretId": 4 } }),
                "SecretSummary"
            ),
            Some(vec![json!({ "SecretId": 4 })])
        );
        assert_eq!(
            wrapped_items(json!([{ "SecretId": 1 }]), "SecretSummary"),
            Some(vec![json!({ "SecretId": 1 })])
        );
        assert_eq!(wrapped_items(json!("none"), "SecretSummary"), None);
    }

    #[tokio::test]
    async fn test_empty_list_wrapper_is_empty() {
        let transport = answering(json!({ "SearchSecretsResult": { "SecretSummaries": {} } }));
        let items: Vec<Value> = invoke(&transport, &SEARCH_SECRETS, &json!({})).await.unwrap();
        assert!(items.is_empty());

        let transport = answering(json!({ "SearchSecretsResult": { "SecretSummaries": 3 } }));
        let err = invoke::<Vec<Value>, _>(&transport, &SEARCH_SECRETS, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_missing_payload_and_envelope() {
        let transport = answering(json!({ "AuthenticateResult": { "Errors": null } }));
        let err = invoke::<String, _>(&transport, &AUTHENTICATE, &json!({}))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClientError::MissingField(ref f) if f == "AuthenticateResult.Token")
        );

        let transport = answering(json!({}));
        let err = invoke::<String, _>(&transport, &AUTHENTICATE, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingField(ref f) if f == "AuthenticateResult"));
    }

    #[tokio::test]
    async fn test_wrong_payload_type_is_malformed() {
        let transport = answering(json!({ "AuthenticateResult": { "Token": 17 } }));
        let err = invoke::<String, _>(&transport, &AUTHENTICATE, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Malformed { ref operation, .. } if operation == "Authenticate"
        ));
    }
}
