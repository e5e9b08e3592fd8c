//! Error types and the remote error-code mapper.
//!
//! Every non-2xx response from the platform maps to exactly one [`ErrorKind`]
//! plus a human-readable message. Remote-reported failures are dispatched
//! through a static lookup table keyed by the platform's error-code string
//! (see [`map_remote_error`]); codes without a table entry become
//! [`ErrorKind::Generic`] with the message passed through verbatim.

/// Result type alias for forcelink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for forcelink operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error was reported by the remote platform
    /// (as opposed to a client-side or transport failure).
    pub fn is_remote(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::AuthenticationFailure(_)
                | ErrorKind::InvalidPassword(_)
                | ErrorKind::InvalidClient(_)
                | ErrorKind::InvalidField { .. }
                | ErrorKind::InvalidFieldForInsertUpdate { .. }
                | ErrorKind::NotFound(_)
                | ErrorKind::EntityIsDeleted(_)
                | ErrorKind::Generic { .. }
        )
    }

    /// Returns true if this is an authentication-phase error
    /// (token exchange rejected the credentials).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::AuthenticationFailure(_)
                | ErrorKind::InvalidPassword(_)
                | ErrorKind::InvalidClient(_)
        )
    }

    /// Returns true if this is the fail-fast precondition violation raised
    /// when a data operation is attempted without a session.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAuthenticated(_))
    }
}

/// The kind of error that occurred.
///
/// The first eight variants form the closed taxonomy of remote-reported
/// failures; the rest are client-side or transport conditions and never
/// originate from a platform error body.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The token exchange rejected the username.
    #[error("Authentication failure: {0}")]
    AuthenticationFailure(String),

    /// The token exchange rejected the password.
    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    /// The token exchange rejected the client id or secret.
    #[error("Invalid client: {0}")]
    InvalidClient(String),

    /// A create referenced a column unknown to the object type.
    #[error("Invalid field: {message}")]
    InvalidField { message: String, fields: Vec<String> },

    /// An update referenced a write-protected or unknown field.
    #[error("Invalid field for insert/update: {message}")]
    InvalidFieldForInsertUpdate { message: String, fields: Vec<String> },

    /// The addressed record or object type does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The addressed record is already deleted.
    ///
    /// The platform reports malformed record ids on delete under the same
    /// error code as already-deleted rows, so both causes surface here.
    #[error("Entity is deleted: {0}")]
    EntityIsDeleted(String),

    /// Remote-reported error with no dedicated kind; the message is the
    /// platform's verbatim.
    #[error("{error_code}: {message}")]
    Generic { error_code: String, message: String },

    /// A data operation was attempted without an authenticated session.
    /// Raised before any network call is made.
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Record mapping failed: the wire value's JSON type does not match the
    /// registered property. A caller-side shape mismatch, never a platform
    /// condition.
    #[error("Mapping error on field '{field}': {detail}")]
    Mapping { field: String, detail: String },

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-2xx response whose body carried no parseable platform error.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Constructor signature shared by every table row: remote message plus the
/// `fields` array from the error body.
type RemoteCtor = fn(String, Vec<String>) -> ErrorKind;

/// Remote error codes with a dedicated kind.
///
/// Adding support for a new platform code means adding a row here; call
/// sites go through [`map_remote_error`] and never match on code strings.
/// `MALFORMED_ID` maps to `EntityIsDeleted` because the platform does not
/// distinguish malformed ids from deleted rows on delete.
static REMOTE_CODE_TABLE: &[(&str, RemoteCtor)] = &[
    ("INVALID_FIELD", |message, fields| ErrorKind::InvalidField {
        message,
        fields,
    }),
    ("INVALID_FIELD_FOR_INSERT_UPDATE", |message, fields| {
        ErrorKind::InvalidFieldForInsertUpdate { message, fields }
    }),
    ("NOT_FOUND", |message, _| ErrorKind::NotFound(message)),
    ("ENTITY_IS_DELETED", |message, _| {
        ErrorKind::EntityIsDeleted(message)
    }),
    ("MALFORMED_ID", |message, _| {
        ErrorKind::EntityIsDeleted(message)
    }),
];

/// Map a remote-reported error to its typed kind.
///
/// Pure: `(status, error code, message, fields)` in, [`Error`] out. Codes
/// absent from the table map to [`ErrorKind::Generic`] carrying the raw
/// message verbatim.
pub fn map_remote_error(
    _status: u16,
    error_code: &str,
    message: &str,
    fields: Vec<String>,
) -> Error {
    let kind = match REMOTE_CODE_TABLE
        .iter()
        .find(|(code, _)| *code == error_code)
    {
        Some((_, ctor)) => ctor(message.to_string(), fields),
        None => ErrorKind::Generic {
            error_code: error_code.to_string(),
            message: message.to_string(),
        },
    };
    Error::new(kind)
}

/// Map a non-2xx response whose body carried no platform error payload.
pub fn map_status_fallback(status: u16, message: String) -> Error {
    let kind = match status {
        404 => ErrorKind::NotFound(message),
        _ => ErrorKind::Http { status, message },
    };
    Error::new(kind)
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Connection(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
