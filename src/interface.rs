use crate::error::ClientError;
use crate::model::{
    DomainCredentials, OrganizationCredentials, SearchSecretsRequest, Secret, SecretGetRequest,
    SecretSummary, SecretTemplate, UserInfo,
};
use async_trait::async_trait;

/// Operations offered by the Secret Server web service.
///
/// Every method settles in one of three ways: the unwrapped result,
/// [`ClientError::Transport`] when the call could not be made, or
/// [`ClientError::Service`] carrying the messages the server rejected the
/// request with.
#[async_trait]
pub trait SecretServerApi: Send + Sync {
    /// Authenticates with local or Active Directory credentials and returns the
    /// session token.
    async fn authenticate(&self, credentials: DomainCredentials) -> Result<String, ClientError>;

    /// Authenticates to Secret Server Online and returns the session token.
    async fn authenticate_hosted(
        &self,
        credentials: OrganizationCredentials,
    ) -> Result<String, ClientError>;

    /// Returns information about the user `token` was issued to.
    async fn who_am_i(&self, token: &str) -> Result<UserInfo, ClientError>;

    /// Returns the Secret Server version. Needs no token.
    async fn version_get(&self) -> Result<String, ClientError>;

    /// Loads a secret with its field values.
    async fn secret_get(&self, request: SecretGetRequest) -> Result<Secret, ClientError>;

    /// Same as [`SecretServerApi::secret_get`]; the service itself uses both
    /// spellings.
    async fn get_secret(&self, request: SecretGetRequest) -> Result<Secret, ClientError> {
        self.secret_get(request).await
    }

    /// Searches secrets by name. Field values are not included; load them with
    /// [`SecretServerApi::secret_get`].
    async fn search_secrets(
        &self,
        request: SearchSecretsRequest,
    ) -> Result<Vec<SecretSummary>, ClientError>;

    /// Lists all secret templates.
    async fn get_secret_templates(&self, token: &str) -> Result<Vec<SecretTemplate>, ClientError>;
}
