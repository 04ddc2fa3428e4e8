//! sswebservice-client - Secret Server web service client
//!
//! Async access to the Thycotic/Delinea Secret Server SOAP web service:
//! authentication, identity lookup, version, loading and searching secrets,
//! and listing secret templates.
//!
//! ## Architecture
//!
//! - `soap` module - transport seam. The SOAP protocol itself (WSDL, envelopes,
//!   HTTP) is provided by a collaborator implementing `SoapTransport`, either
//!   natively async or through the callback adapters.
//! - `operation` module - the single adapter every remote operation goes
//!   through: build the request, call the transport, normalize the embedded
//!   error list, unwrap the payload.
//! - `normalize` module - error-list normalization.
//! - `client` module - the `Client` and the `create` factory.
//!
//! Callers distinguish the two failure channels through `ClientError`:
//! `Transport` when the call could not be completed, `Service` when the server
//! rejected the request with its own messages.

pub mod client;
pub mod config;
pub mod error;
pub mod interface;
pub mod model;
pub mod normalize;
pub mod operation;
pub mod soap;

pub use client::{create, Client};
pub use config::ClientOptions;
pub use error::{ClientError, TransportError};
pub use interface::SecretServerApi;
pub use model::{
    CodeResponse, DomainCredentials, OrganizationCredentials, SearchSecretsRequest, Secret,
    SecretField, SecretGetRequest, SecretItem, SecretSummary, SecretTemplate, UserInfo,
    LOCAL_DOMAIN,
};
pub use soap::{SoapConnector, SoapTransport};

/// Initialize logging for tests
#[cfg(test)]
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
