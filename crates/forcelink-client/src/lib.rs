//! # forcelink-client
//!
//! Core HTTP client infrastructure for the forcelink CRM API crates.
//!
//! This crate provides the foundational pieces shared by the auth and REST
//! layers:
//! - A pooled HTTP client with request/response tracing
//! - The complete error taxonomy and the data-driven remote error-code mapper
//! - Request building and response handling
//! - SOQL escaping and literal-formatting utilities
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │              (forcelink-auth, forcelink-rest)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HttpClient                            │
//! │  - Raw HTTP with pooling, timeouts, tracing                 │
//! │  - Non-2xx bodies routed through the error mapper           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security
//!
//! - Error messages are sanitized (tokens and session ids redacted)
//! - Tracing spans never carry credential parameters

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod soql;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{map_remote_error, map_status_fallback, Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{parse_error_response, ApiUsage, Response, ResponseExt};

/// Default platform API version.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("forcelink/", env!("CARGO_PKG_VERSION"));
