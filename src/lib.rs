//! # forcelink
//!
//! A Salesforce-style CRM REST API client library for Rust.
//!
//! This library provides typed access to the platform's REST API with
//! password-grant authentication, SOQL querying with pagination, record
//! CRUD, and metadata retrieval.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, passwords) are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages are sanitized before surfacing
//!
//! ## Crates
//!
//! - **forcelink-client** - Core HTTP infrastructure, error taxonomy, SOQL utilities
//! - **forcelink-auth** - Password-grant token exchange and credentials
//! - **forcelink-rest** - Session-holding client: query, CRUD, metadata
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use forcelink::auth::PasswordCredentials;
//! use forcelink::rest::{FieldMap, SalesforceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = PasswordCredentials::from_env()?;
//!     let mut client = SalesforceClient::new(credentials)?;
//!     client.authenticate().await?;
//!
//!     let id = client
//!         .create("Account", FieldMap::new().field("Name", "Acme Corp"))
//!         .await?;
//!     println!("created {id}");
//!
//!     client.delete("Account", &id).await?;
//!     Ok(())
//! }
//! ```

// Re-export the member crates for convenient access.
#[cfg(feature = "auth")]
pub use forcelink_auth as auth;
#[cfg(feature = "client")]
pub use forcelink_client as client;
#[cfg(feature = "rest")]
pub use forcelink_rest as rest;
