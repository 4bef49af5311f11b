//! # forcelink
//!
//! Salesforce web API client library for Rust.
//!
//! The library is a small workspace of crates sharing one authenticated-call
//! pipeline: a token-holding session, transparent OAuth refresh when the
//! session expires, and a typed failure taxonomy, used by both the REST data
//! API and the SOAP Metadata API.
//!
//! This crate re-exports the member crates behind feature gates:
//!
//! - `client`: transport, response interpretation, error taxonomy
//! - `auth`: session, credentials, token refresh
//! - `rest`: REST data API client (CRUD, query, describe, ...)
//! - `soap`: SOAP Metadata API client
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use forcelink::auth::{ClientCredentials, Session, TokenManager};
//! use forcelink::rest::RestClient;
//!
//! # async fn run() -> forcelink::client::Result<()> {
//! let session = Arc::new(
//!     Session::new("na1.salesforce.com")
//!         .with_access_token("00Dxx!access")
//!         .with_refresh_token("refresh"),
//! );
//! let tokens = TokenManager::new(session, ClientCredentials::new("id", "secret"));
//! let client = RestClient::new(tokens)?;
//!
//! let account = client.get("Account", "001xx000003DGb2AAG", None).await?;
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "client")]
pub use forcelink_client as client;

#[cfg(feature = "auth")]
pub use forcelink_auth as auth;

#[cfg(feature = "rest")]
pub use forcelink_rest as rest;

#[cfg(feature = "soap")]
pub use forcelink_soap as soap;
