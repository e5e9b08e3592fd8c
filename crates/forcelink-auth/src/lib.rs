//! # forcelink-auth
//!
//! Authentication for the forcelink CRM API crates: the password-grant
//! token exchange and credentials management.
//!
//! ## Security
//!
//! - Secrets and passwords are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Authentication failures are never retried (they are not transient)
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::{PasswordCredentials, PasswordFlow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_client::Error> {
//!     let credentials = PasswordCredentials::from_env()?;
//!     let flow = PasswordFlow::new(credentials);
//!     let token = flow.authenticate().await?;
//!     println!("instance: {}", token.instance_url);
//!     Ok(())
//! }
//! ```

mod credentials;
mod password;

pub use credentials::{token_endpoint, PasswordCredentials};
pub use password::{PasswordFlow, TokenResponse};

// Re-export the shared error types for convenience.
pub use forcelink_client::{Error, ErrorKind, Result};

/// Default login URL for production tenants.
pub const PRODUCTION_LOGIN_URL: &str = "https://login.salesforce.com";

/// Default login URL for sandbox tenants.
pub const SANDBOX_LOGIN_URL: &str = "https://test.salesforce.com";
