//! The session-holding REST client.
//!
//! A [`SalesforceClient`] is constructed unauthenticated and transitions to
//! the authenticated state through [`SalesforceClient::authenticate`]. Every
//! data operation requires that transition to have happened and otherwise
//! fails fast with `NotAuthenticated` before any network call is made.

use serde::de::DeserializeOwned;
use tracing::instrument;

use forcelink_auth::{PasswordCredentials, PasswordFlow};
use forcelink_client::{
    ClientConfig, Error, ErrorKind, HttpClient, Result, DEFAULT_API_VERSION,
};

mod crud;
mod describe;
mod query;

/// An authenticated session: the access token plus the per-tenant instance
/// URL returned by the token exchange.
///
/// Held exclusively by the client; the token is redacted in Debug output.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    instance_url: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

impl Session {
    /// The per-tenant base URL for API calls.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// CRM REST API client.
///
/// Orchestrates authentication and exposes query, CRUD, and metadata
/// operations. All operations run sequentially and block their caller until
/// the remote exchange completes; nothing is retried.
///
/// The session is mutable state under a single-writer assumption: sharing
/// one client across threads without external synchronization is
/// unsupported.
///
/// # Example
///
/// ```rust,ignore
/// use forcelink_auth::PasswordCredentials;
/// use forcelink_rest::{FieldMap, SalesforceClient};
///
/// let mut client = SalesforceClient::new(PasswordCredentials::from_env()?)?;
/// client.authenticate().await?;
///
/// let id = client
///     .create("Account", FieldMap::new().field("Name", "Acme Corp"))
///     .await?;
/// client.delete("Account", &id).await?;
/// ```
#[derive(Debug)]
pub struct SalesforceClient {
    http: HttpClient,
    flow: PasswordFlow,
    api_version: String,
    session: Option<Session>,
}

impl SalesforceClient {
    /// Create an unauthenticated client with default HTTP configuration.
    pub fn new(credentials: PasswordCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create an unauthenticated client with custom HTTP configuration.
    pub fn with_config(credentials: PasswordCredentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            flow: PasswordFlow::new(credentials),
            api_version: DEFAULT_API_VERSION.to_string(),
            session: None,
        })
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns true once `authenticate` has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Get the current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Perform the token exchange and store the session.
    ///
    /// On failure the client stays unauthenticated and the typed
    /// authentication error propagates; the session is never implicitly
    /// refreshed afterwards.
    #[instrument(skip(self))]
    pub async fn authenticate(&mut self) -> Result<()> {
        let token = self.flow.authenticate().await?;
        self.session = Some(Session {
            access_token: token.access_token,
            instance_url: token.instance_url.trim_end_matches('/').to_string(),
        });
        Ok(())
    }

    /// The session, or the fail-fast precondition violation.
    pub(crate) fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or_else(|| {
            Error::new(ErrorKind::NotAuthenticated(
                "no session; call authenticate() first".to_string(),
            ))
        })
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url(session, "sobjects/Account")` ->
    /// `https://na1.example.com/services/data/v62.0/sobjects/Account`
    pub(crate) fn rest_url(&self, session: &Session, path: &str) -> String {
        format!(
            "{}/services/data/v{}/{}",
            session.instance_url(),
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Resolve a server-delivered path (e.g. a pagination cursor) against
    /// the instance URL. Full URLs pass through unchanged.
    pub(crate) fn absolute_url(&self, session: &Session, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", session.instance_url(), path.trim_start_matches('/'))
        }
    }

    /// GET with JSON response deserialization.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        url: &str,
    ) -> Result<T> {
        self.http
            .send_json(self.http.get(url).bearer_auth(session.access_token()))
            .await
    }

    /// Reject object type names that cannot be a valid sObject API name
    /// before they reach a URL path.
    pub(crate) fn check_object_type(object_type: &str) -> Result<()> {
        if forcelink_client::soql::is_safe_object_name(object_type) {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::Config(format!(
                "invalid object type name: {object_type}"
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PasswordCredentials {
        PasswordCredentials::new(
            "client_id",
            "client_secret",
            "user@example.com",
            "password",
            "https://login.example.com/services/oauth2/token",
        )
        .unwrap()
    }

    #[test]
    fn test_client_starts_unauthenticated() {
        let client = SalesforceClient::new(credentials()).unwrap();
        assert!(!client.is_authenticated());
        assert!(client.session().is_none());
        assert_eq!(client.api_version(), "62.0");
    }

    #[test]
    fn test_api_version_override() {
        let client = SalesforceClient::new(credentials())
            .unwrap()
            .with_api_version("60.0");
        assert_eq!(client.api_version(), "60.0");
    }

    #[test]
    fn test_require_session_fails_fast() {
        let client = SalesforceClient::new(credentials()).unwrap();
        let err = client.require_session().unwrap_err();
        assert!(err.is_not_authenticated());
    }

    #[test]
    fn test_url_building() {
        let client = SalesforceClient::new(credentials()).unwrap();
        let session = Session {
            access_token: "token".into(),
            instance_url: "https://na1.example.com".into(),
        };

        assert_eq!(
            client.rest_url(&session, "sobjects/Account"),
            "https://na1.example.com/services/data/v62.0/sobjects/Account"
        );
        assert_eq!(
            client.rest_url(&session, "/query?q=SELECT"),
            "https://na1.example.com/services/data/v62.0/query?q=SELECT"
        );
        assert_eq!(
            client.absolute_url(&session, "/services/data/v62.0/query/01gxx-2000"),
            "https://na1.example.com/services/data/v62.0/query/01gxx-2000"
        );
        assert_eq!(
            client.absolute_url(&session, "https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session {
            access_token: "super_secret_token".into(),
            instance_url: "https://na1.example.com".into(),
        };
        let debug_output = format!("{:?}", session);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }

    #[test]
    fn test_check_object_type() {
        assert!(SalesforceClient::check_object_type("Account").is_ok());
        assert!(SalesforceClient::check_object_type("My_Object__c").is_ok());
        let err = SalesforceClient::check_object_type("Bad'; DROP--").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }
}
