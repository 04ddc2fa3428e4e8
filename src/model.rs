//! Request and response types for the Secret Server web service.
//!
//! Requests serialize with the camelCase parameter names the service declares.
//! Every declared parameter is always sent, defaults included: leaving one out
//! changes how the service behaves.
//!
//! Responses keep the PascalCase names of the service and retain anything not
//! modelled here in `extra`.

use crate::operation::wrapped_items;
use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Domain sentinel the service uses for local (non-AD) accounts.
pub const LOCAL_DOMAIN: &str = "(Local)";

/// Credentials for an on-premises Secret Server account.
#[derive(Debug, Clone)]
pub struct DomainCredentials {
    pub username: String,
    pub password: String,
    /// Defaults to [`LOCAL_DOMAIN`].
    pub domain: Option<String>,
}

impl DomainCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            domain: None,
        }
    }

    /// Authenticate against an Active Directory domain instead of local accounts.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }
}

/// Credentials for a Secret Server Online (hosted) organization.
#[derive(Debug, Clone)]
pub struct OrganizationCredentials {
    pub username: String,
    pub password: String,
    pub organization_code: String,
}

impl OrganizationCredentials {
    pub fn new(username: &str, password: &str, organization_code: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            organization_code: organization_code.to_string(),
        }
    }
}

/// Parameters of the `Authenticate` operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthenticateRequest {
    pub username: String,
    pub password: String,
    pub organization: String,
    pub domain: String,
}

impl From<DomainCredentials> for AuthenticateRequest {
    fn from(credentials: DomainCredentials) -> Self {
        Self {
            username: credentials.username,
            password: credentials.password,
            organization: String::new(),
            domain: credentials
                .domain
                .unwrap_or_else(|| LOCAL_DOMAIN.to_string()),
        }
    }
}

impl From<OrganizationCredentials> for AuthenticateRequest {
    fn from(credentials: OrganizationCredentials) -> Self {
        Self {
            username: credentials.username,
            password: credentials.password,
            organization: credentials.organization_code,
            domain: String::new(),
        }
    }
}

/// Parameters of operations that only take the authentication token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRequest {
    pub token: String,
}

impl TokenRequest {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

/// `VersionGet` takes no parameters and needs no token.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VersionGetRequest {}

/// Answer to a secret that requires a comment, ticket number or similar
/// before it can be viewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResponse {
    pub error_code: String,
    pub comment: String,
    pub additional_comment: String,
}

impl CodeResponse {
    pub fn new(error_code: &str, comment: &str) -> Self {
        Self {
            error_code: error_code.to_string(),
            comment: comment.to_string(),
            additional_comment: String::new(),
        }
    }

    pub fn with_additional_comment(mut self, additional_comment: &str) -> Self {
        self.additional_comment = additional_comment.to_string();
        self
    }
}

/// Parameters of the `GetSecret` operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretGetRequest {
    pub token: String,
    pub secret_id: i64,
    /// Defaults to `false`.
    pub load_settings_and_permissions: bool,
    /// Defaults to empty.
    pub code_responses: Vec<CodeResponse>,
}

impl SecretGetRequest {
    pub fn new(token: &str, secret_id: i64) -> Self {
        Self {
            token: token.to_string(),
            secret_id,
            load_settings_and_permissions: false,
            code_responses: Vec::new(),
        }
    }

    /// Also load the settings and permissions associated with the secret.
    pub fn load_settings_and_permissions(mut self, load: bool) -> Self {
        self.load_settings_and_permissions = load;
        self
    }

    pub fn code_response(mut self, response: CodeResponse) -> Self {
        self.code_responses.push(response);
        self
    }
}

/// Parameters of the `SearchSecrets` operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSecretsRequest {
    pub token: String,
    pub search_term: String,
    /// Defaults to `false`.
    pub include_deleted: bool,
    /// Defaults to `false`.
    pub include_restricted: bool,
}

impl SearchSecretsRequest {
    pub fn new(token: &str, search_term: &str) -> Self {
        Self {
            token: token.to_string(),
            search_term: search_term.to_string(),
            include_deleted: false,
            include_restricted: false,
        }
    }

    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }

    pub fn include_restricted(mut self, include: bool) -> Self {
        self.include_restricted = include;
        self
    }
}

/// The user a token was issued to, as returned by `WhoAmI`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub known_as: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub domain_id: Option<i64>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A secret with its field values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Secret {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub secret_type_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub folder_id: Option<i64>,
    #[serde(default, deserialize_with = "wrapped_list")]
    pub items: Vec<SecretItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Secret {
    /// Looks up an item by its field name, e.g. `"Password"`.
    pub fn item(&self, field_name: &str) -> Option<&SecretItem> {
        self.items
            .iter()
            .find(|item| item.field_name.as_deref() == Some(field_name))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub field_id: Option<i64>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search hit; load the full secret with its id to read field values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretSummary {
    #[serde(default, deserialize_with = "lenient_id")]
    pub secret_id: Option<i64>,
    #[serde(default)]
    pub secret_name: Option<String>,
    #[serde(default)]
    pub secret_type_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub secret_type_id: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretTemplate {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "wrapped_list")]
    pub fields: Vec<SecretField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretField {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// XML mapping may hand numbers over as strings.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("id out of range: {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid id: {}", s))),
        Some(other) => Err(D::Error::custom(format!("invalid id: {}", other))),
    }
}

/// Element of an `ArrayOfX` list; names the key the items sit under.
trait ListItem {
    const WRAPPER_KEY: &'static str;
}

impl ListItem for SecretItem {
    const WRAPPER_KEY: &'static str = "SecretItem";
}

impl ListItem for SecretField {
    const WRAPPER_KEY: &'static str = "SecretField";
}

// `{ "SecretItem": [..] }` -> `[..]`, same rules as operation payload lists.
fn wrapped_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + ListItem,
{
    let wrapper = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    wrapped_items(wrapper, T::WRAPPER_KEY)
        .ok_or_else(|| D::Error::custom(format!("expected a list of {}", T::WRAPPER_KEY)))?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
        .collect()
}
