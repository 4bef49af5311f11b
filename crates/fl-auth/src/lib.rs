//! # forcelink-auth
//!
//! Session and token lifecycle for the Salesforce web APIs.
//!
//! This crate owns the mutable piece of the authenticated-call pipeline: the
//! [`Session`] holding the active access token, and the [`TokenManager`]
//! that performs the OAuth 2.0 refresh-token grant when a call fails with an
//! expired session. A successful refresh atomically swaps the session's
//! token and notifies a configurable [`TokenUpdater`] sink so the embedding
//! application can persist the new token material.
//!
//! Refreshes are serialized per session: two callers hitting session expiry
//! at the same time cannot race each other's refresh-and-swap.

mod credentials;
mod error;
mod manager;
mod oauth;
mod session;

pub use credentials::ClientCredentials;
pub use error::{Error, ErrorKind, Result};
pub use manager::{TokenManager, TokenUpdater};
pub use oauth::TokenResponse;
pub use session::Session;

/// Production OAuth token endpoint.
pub const PRODUCTION_TOKEN_URL: &str = "https://login.salesforce.com/services/oauth2/token";

/// Sandbox OAuth token endpoint.
pub const SANDBOX_TOKEN_URL: &str = "https://test.salesforce.com/services/oauth2/token";
