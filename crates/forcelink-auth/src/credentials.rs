//! Credential types for the password-grant flow.
//!
//! All credential types implement custom Debug to redact sensitive data.

use forcelink_client::{Error, ErrorKind, Result};

/// Credentials for the password-grant token exchange.
///
/// Every field is externally supplied; nothing is defaulted. The client
/// secret and password are redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct PasswordCredentials {
    /// Consumer key (client_id) of the connected app.
    pub client_id: String,
    client_secret: String,
    /// Username to authenticate as.
    pub username: String,
    password: String,
    /// Full URL of the token endpoint.
    pub token_endpoint: String,
}

impl std::fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("token_endpoint", &self.token_endpoint)
            .finish()
    }
}

impl PasswordCredentials {
    /// Create new credentials.
    ///
    /// Fails with a configuration error when the token endpoint is not a
    /// valid absolute URL.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        token_endpoint: impl Into<String>,
    ) -> Result<Self> {
        let token_endpoint = token_endpoint.into();
        url::Url::parse(&token_endpoint)?;

        Ok(Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            token_endpoint,
        })
    }

    /// Load credentials from environment variables.
    ///
    /// Reads `FORCELINK_CLIENT_ID`, `FORCELINK_CLIENT_SECRET`,
    /// `FORCELINK_USERNAME`, `FORCELINK_PASSWORD`, and
    /// `FORCELINK_TOKEN_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| {
                Error::new(ErrorKind::Config(format!(
                    "Environment variable not set: {name}"
                )))
            })
        };

        Self::new(
            var("FORCELINK_CLIENT_ID")?,
            var("FORCELINK_CLIENT_SECRET")?,
            var("FORCELINK_USERNAME")?,
            var("FORCELINK_PASSWORD")?,
            var("FORCELINK_TOKEN_ENDPOINT")?,
        )
    }

    /// Get the client secret (for internal use).
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Get the password (for internal use).
    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

/// Build the token endpoint URL for a login host.
///
/// Convenience only; credentials always carry the full endpoint URL.
pub fn token_endpoint(login_url: &str) -> String {
    format!(
        "{}/services/oauth2/token",
        login_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PasswordCredentials {
        PasswordCredentials::new(
            "client_id",
            "client_secret_value",
            "user@example.com",
            "hunter2_password",
            "https://login.example.com/services/oauth2/token",
        )
        .unwrap()
    }

    #[test]
    fn test_debug_redacts_secret_and_password() {
        let debug_output = format!("{:?}", credentials());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("client_id"));
        assert!(!debug_output.contains("client_secret_value"));
        assert!(!debug_output.contains("hunter2_password"));
    }

    #[test]
    fn test_invalid_token_endpoint_rejected() {
        let result = PasswordCredentials::new("id", "secret", "user", "pass", "not a url");
        let err = result.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_from_env_missing_variable() {
        // None of the FORCELINK_* variables are set in the test environment.
        std::env::remove_var("FORCELINK_CLIENT_ID");
        let err = PasswordCredentials::from_env().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("FORCELINK_CLIENT_ID"));
    }

    #[test]
    fn test_token_endpoint_helper() {
        assert_eq!(
            token_endpoint("https://login.example.com/"),
            "https://login.example.com/services/oauth2/token"
        );
        assert_eq!(
            token_endpoint(crate::PRODUCTION_LOGIN_URL),
            "https://login.salesforce.com/services/oauth2/token"
        );
    }
}
