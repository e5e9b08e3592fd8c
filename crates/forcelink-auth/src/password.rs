//! Password-grant token exchange.
//!
//! One synchronous exchange: credentials in, access token plus instance URL
//! out. Authentication failures are not transient, so there is no retry; a
//! rejected exchange maps the token response's `error` code through a static
//! lookup table into the typed taxonomy.

use serde::Deserialize;
use tracing::instrument;

use forcelink_client::{Error, ErrorKind, Result};

use crate::credentials::PasswordCredentials;

/// Token error codes with a dedicated kind.
///
/// Dispatch is by exact code string. Deployments that do not distinguish a
/// bad password from a bad username report both as `invalid_grant` and
/// degrade to `AuthenticationFailure`. Codes absent from the table map to
/// `Generic` carrying the raw description verbatim.
static TOKEN_ERROR_TABLE: &[(&str, fn(String) -> ErrorKind)] = &[
    ("invalid_grant", ErrorKind::AuthenticationFailure),
    ("invalid_password", ErrorKind::InvalidPassword),
    ("invalid_client_id", ErrorKind::InvalidClient),
    ("invalid_client", ErrorKind::InvalidClient),
];

/// Password-grant authentication flow.
#[derive(Clone)]
pub struct PasswordFlow {
    credentials: PasswordCredentials,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for PasswordFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordFlow")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl PasswordFlow {
    /// Create a new password flow for the given credentials.
    pub fn new(credentials: PasswordCredentials) -> Self {
        Self {
            credentials,
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the credentials.
    pub fn credentials(&self) -> &PasswordCredentials {
        &self.credentials
    }

    /// Perform the token exchange.
    ///
    /// Credential values are carried only in the form body and never logged.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> Result<TokenResponse> {
        let params = [
            ("grant_type", "password"),
            ("client_id", &self.credentials.client_id),
            ("client_secret", self.credentials.client_secret()),
            ("username", &self.credentials.username),
            ("password", self.credentials.password()),
        ];

        let body = serde_urlencoded::to_string(params)
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        let response = self
            .http_client
            .post(&self.credentials.token_endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        handle_token_response(response).await
    }
}

/// Check a token response for errors and deserialize it.
async fn handle_token_response(response: reqwest::Response) -> Result<TokenResponse> {
    if !response.status().is_success() {
        let error: TokenErrorResponse = response.json().await?;
        return Err(map_token_error(&error.error, error.error_description));
    }

    let token: TokenResponse = response.json().await?;
    Ok(token)
}

/// Map a token-endpoint error code to its typed kind.
fn map_token_error(error_code: &str, description: String) -> Error {
    let kind = match TOKEN_ERROR_TABLE
        .iter()
        .find(|(code, _)| *code == error_code)
    {
        Some((_, ctor)) => ctor(description),
        None => ErrorKind::Generic {
            error_code: error_code.to_string(),
            message: description,
        },
    };
    Error::new(kind)
}

/// Token response from a successful exchange.
///
/// The access token is redacted in Debug output.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Per-tenant base URL for all subsequent API calls.
    pub instance_url: String,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Identity URL of the authenticated user.
    #[serde(default)]
    pub id: Option<String>,
    /// Issued at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("token_type", &self.token_type)
            .field("id", &self.id)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Token endpoint error response.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: String,
}
