//! # forcelink-rest
//!
//! CRM REST API client: session management, SOQL query with pagination,
//! record CRUD, and metadata retrieval.
//!
//! ## Record mapping
//!
//! Records move across the wire through an explicit capability rather than
//! blanket serde derives: a shape implements [`SObjectRecord`] and registers
//! each mapped member with a paired getter and setter. Unregistered members
//! never travel: they come back at their `Default` on read and are omitted
//! on write. Ad-hoc payloads use [`FieldMap`] directly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use forcelink_auth::PasswordCredentials;
//! use forcelink_rest::{FieldMap, Properties, SObjectRecord, SalesforceClient};
//!
//! #[derive(Debug, Default, Clone)]
//! struct Account {
//!     id: String,
//!     name: String,
//! }
//!
//! impl SObjectRecord for Account {
//!     fn properties() -> Properties<Self> {
//!         Properties::new()
//!             .text("Id", |a| Some(a.id.clone()), |a, v| a.id = v)
//!             .text("Name", |a| Some(a.name.clone()), |a, v| a.name = v)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_client::Error> {
//!     let mut client = SalesforceClient::new(PasswordCredentials::from_env()?)?;
//!     client.authenticate().await?;
//!
//!     let accounts = client
//!         .query::<Account>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!     for account in &accounts.records {
//!         println!("{}: {}", account.id, account.name);
//!     }
//!
//!     let id = client
//!         .create("Account", FieldMap::new().field("Name", "New Account"))
//!         .await?;
//!     client.delete("Account", &id).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod mapper;
mod query;
mod sobject;

// Main client
pub use client::{SalesforceClient, Session};

// Record mapping
pub use mapper::{
    from_json, to_field_map, FieldMap, IntoFieldMap, Properties, Property, SObjectRecord,
};

// Query types
pub use query::QueryResult;

// sObject wire types
pub use sobject::{ApiError, CreateResult};

// Re-export shared infrastructure types that users need at the call site.
pub use forcelink_auth::{PasswordCredentials, PasswordFlow, TokenResponse};
pub use forcelink_client::{ClientConfig, ClientConfigBuilder, Error, ErrorKind, Result};
