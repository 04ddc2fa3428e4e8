//! Client for the Secret Server web service.
//!
//! The client owns a shared handle to a connected SOAP transport and runs each
//! operation through [`crate::operation::invoke`]. Calls are independent of each
//! other; the only state carried between them is the token the caller passes in.

use crate::config::ClientOptions;
use crate::error::ClientError;
use crate::interface::SecretServerApi;
use crate::model::{
    AuthenticateRequest, DomainCredentials, OrganizationCredentials, SearchSecretsRequest, Secret,
    SecretGetRequest, SecretSummary, SecretTemplate, TokenRequest, UserInfo, VersionGetRequest,
};
use crate::operation::{
    invoke, AUTHENTICATE, GET_SECRET, GET_SECRET_TEMPLATES, SEARCH_SECRETS, VERSION_GET, WHO_AM_I,
};
use crate::soap::{SoapConnector, SoapTransport};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client bound to one transport instance. Cloning shares the transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn SoapTransport>,
}

impl Client {
    /// Wraps an already connected transport.
    pub fn new(transport: Arc<dyn SoapTransport>) -> Self {
        Self { transport }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

/// Builds a client for the service described at `service_url`, e.g.
/// `https://host/SecretServer/webservices/SSWebservice.asmx?WSDL`.
///
/// Fails with [`ClientError::Transport`] if the connector cannot construct
/// the transport. `options` is accepted for forward compatibility.
pub async fn create<C>(
    connector: &C,
    service_url: &str,
    options: ClientOptions,
) -> Result<Client, ClientError>
where
    C: SoapConnector + ?Sized,
{
    options.apply();
    debug!("Connecting to Secret Server at {}", service_url);

    let transport = connector.connect(service_url).await.map_err(|e| {
        warn!("Failed to create SOAP client for {}: {}", service_url, e);
        ClientError::Transport(e)
    })?;

    info!("Secret Server client ready for {}", service_url);
    Ok(Client::new(transport))
}

#[async_trait]
impl SecretServerApi for Client {
    async fn authenticate(&self, credentials: DomainCredentials) -> Result<String, ClientError> {
        let request = AuthenticateRequest::from(credentials);
        invoke(self.transport.as_ref(), &AUTHENTICATE, &request).await
    }

    async fn authenticate_hosted(
        &self,
        credentials: OrganizationCredentials,
    ) -> Result<String, ClientError> {
        let request = AuthenticateRequest::from(credentials);
        invoke(self.transport.as_ref(), &AUTHENTICATE, &request).await
    }

    async fn who_am_i(&self, token: &str) -> Result<UserInfo, ClientError> {
        invoke(self.transport.as_ref(), &WHO_AM_I, &TokenRequest::new(token)).await
    }

    async fn version_get(&self) -> Result<String, ClientError> {
        invoke(self.transport.as_ref(), &VERSION_GET, &VersionGetRequest {}).await
    }

    async fn secret_get(&self, request: SecretGetRequest) -> Result<Secret, ClientError> {
        invoke(self.transport.as_ref(), &GET_SECRET, &request).await
    }

    async fn search_secrets(
        &self,
        request: SearchSecretsRequest,
    ) -> Result<Vec<SecretSummary>, ClientError> {
        invoke(self.transport.as_ref(), &SEARCH_SECRETS, &request).await
    }

    async fn get_secret_templates(&self, token: &str) -> Result<Vec<SecretTemplate>, ClientError> {
        invoke(
            self.transport.as_ref(),
            &GET_SECRET_TEMPLATES,
            &TokenRequest::new(token),
        )
        .await
    }
}
