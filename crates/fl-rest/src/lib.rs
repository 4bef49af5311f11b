//! # forcelink-rest
//!
//! Salesforce REST API client with transparent token refresh.
//!
//! The heart of this crate is [`RestClient::call`]: it checks the session's
//! authentication precondition, builds the versioned request URL, executes
//! it over the shared transport, interprets the response per the negotiated
//! format, and, when the outcome classifies as an expired session,
//! performs exactly one refresh-and-retry cycle before surfacing the result.
//! Everything else in the crate is a thin wrapper that builds a
//! [`CallDescriptor`] for one REST resource.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use forcelink_rest::{CallDescriptor, ClientCredentials, RestClient, Session, TokenManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), forcelink_rest::Error> {
//!     let session = Arc::new(
//!         Session::new("na1.salesforce.com")
//!             .with_access_token("00Dxx!access")
//!             .with_refresh_token("refresh"),
//!     );
//!     let tokens = TokenManager::new(session, ClientCredentials::new("id", "secret"));
//!     let client = RestClient::new(tokens)?;
//!
//!     // Typed wrappers
//!     let account = client.get("Account", "001xx000003DgAAAS", None).await?;
//!
//!     // Or raw descriptors
//!     let limits = client.call(CallDescriptor::get("limits")).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod descriptor;
pub mod validate;

pub use client::RestClient;
pub use descriptor::CallDescriptor;

// Re-export the shared pipeline types callers pattern-match on.
pub use forcelink_client::{
    classify, ClientConfig, ClientConfigBuilder, Document, Error, ErrorKind, HttpMethod, Outcome,
    ResponseFormat, Result, XmlElement, DEFAULT_API_VERSION,
};

// Re-export the session/token layer.
pub use forcelink_auth::{
    ClientCredentials, Session, TokenManager, TokenResponse, TokenUpdater,
};
