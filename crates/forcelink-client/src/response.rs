//! HTTP response handling with platform-specific extensions.

use serde::de::DeserializeOwned;

use crate::error::{self, Error, Result};

/// Wrapper around an HTTP response with platform-aware helpers.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    /// Create a new Response from a reqwest::Response.
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Returns true if this is a 204 No Content response.
    pub fn is_no_content(&self) -> bool {
        self.status() == 204
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Get API usage limits from response headers.
    ///
    /// The platform reports usage in the `Sforce-Limit-Info` header as
    /// `api-usage=25/15000`.
    pub fn api_usage(&self) -> Option<ApiUsage> {
        let info = self.header("sforce-limit-info")?;

        for part in info.split(',') {
            let part = part.trim();
            if let Some(usage) = part.strip_prefix("api-usage=") {
                let parts: Vec<&str> = usage.split('/').collect();
                if parts.len() == 2 {
                    let used = parts[0].parse().ok()?;
                    let limit = parts[1].parse().ok()?;
                    return Some(ApiUsage { used, limit });
                }
            }
        }

        None
    }
}

/// API usage information from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiUsage {
    /// Number of API calls used.
    pub used: u64,
    /// Total API call limit.
    pub limit: u64,
}

impl ApiUsage {
    /// Get the remaining API calls.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}

/// Extension trait for processing platform API responses.
pub trait ResponseExt {
    /// Check for a platform error and convert it to the typed taxonomy.
    fn check_platform_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_platform_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Parse a non-2xx response body into a typed error.
///
/// The platform delivers error bodies as `[{errorCode, message, fields}]`;
/// the first element drives the mapper. A bare object is accepted as a
/// fallback, and bodies that parse as neither go through the status map.
pub fn parse_error_response(status: u16, body: &str) -> Error {
    if let Ok(errors) = serde_json::from_str::<Vec<ApiErrorBody>>(body) {
        if let Some(err) = errors.into_iter().next() {
            return error::map_remote_error(
                status,
                &err.error_code,
                &sanitize_error_message(&err.message),
                err.fields.unwrap_or_default(),
            );
        }
    }

    if let Ok(err) = serde_json::from_str::<ApiErrorBody>(body) {
        return error::map_remote_error(
            status,
            &err.error_code,
            &sanitize_error_message(&err.message),
            err.fields.unwrap_or_default(),
        );
    }

    error::map_status_fallback(status, sanitize_error_message(body))
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Removes anything that looks like an access token or session id, and
/// truncates messages longer than 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    // Platform access tokens start with the org id prefix "00D" followed by
    // "!" and a long opaque suffix.
    let token_pattern = regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").unwrap();
    let mut sanitized = token_pattern
        .replace_all(message, "[REDACTED_TOKEN]")
        .to_string();

    let session_pattern = regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").unwrap();
    sanitized = session_pattern
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        sanitized.truncate(MAX_LENGTH);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Platform API error body element.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_error_array_format() {
        let body = r#"[{"errorCode":"INVALID_FIELD","message":"No such column 'Foo' on entity 'Account'","fields":["Foo"]}]"#;
        let err = parse_error_response(400, body);
        assert!(
            matches!(err.kind, ErrorKind::InvalidField { ref fields, .. } if fields == &["Foo"])
        );
    }

    #[test]
    fn test_parse_error_single_object_fallback() {
        let body = r#"{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}"#;
        let err = parse_error_response(404, body);
        assert!(matches!(err.kind, ErrorKind::NotFound(_)));
    }

    #[test]
    fn test_parse_error_unrecognized_code() {
        let body = r#"[{"errorCode":"MALFORMED_QUERY","message":"unexpected token: 'FORM'"}]"#;
        let err = parse_error_response(400, body);
        match err.kind {
            ErrorKind::Generic {
                ref error_code,
                ref message,
            } => {
                assert_eq!(error_code, "MALFORMED_QUERY");
                assert_eq!(message, "unexpected token: 'FORM'");
            }
            other => panic!("expected Generic, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_unusable_body() {
        let err = parse_error_response(404, "<html>gone</html>");
        assert!(matches!(err.kind, ErrorKind::NotFound(_)));

        let err = parse_error_response(502, "bad gateway");
        assert!(matches!(err.kind, ErrorKind::Http { status: 502, .. }));
    }

    #[test]
    fn test_parse_error_empty_array_falls_back() {
        let err = parse_error_response(400, "[]");
        assert!(matches!(err.kind, ErrorKind::Http { status: 400, .. }));
    }

    #[test]
    fn test_api_usage() {
        let usage = ApiUsage {
            used: 100,
            limit: 1000,
        };
        assert_eq!(usage.remaining(), 900);

        let usage = ApiUsage {
            used: 1000,
            limit: 1000,
        };
        assert_eq!(usage.remaining(), 0);
    }

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(
            sanitized.contains("[REDACTED_TOKEN]"),
            "Should redact token: {sanitized}"
        );
        assert!(!sanitized.contains("AQcAQH3k9s7LKbp"));
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("sid=[REDACTED]"));
        assert!(!sanitized.contains("abc123def456"));
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long_msg = "x".repeat(600);
        let sanitized = sanitize_error_message(&long_msg);
        assert!(sanitized.len() < 600);
        assert!(sanitized.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }
}
