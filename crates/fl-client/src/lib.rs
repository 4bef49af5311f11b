//! # forcelink-client
//!
//! Core HTTP infrastructure for the Salesforce web APIs.
//!
//! This crate provides the pieces of the authenticated-call pipeline that are
//! shared between the REST and SOAP channels:
//!
//! - **Transport**: a single raw HTTP exchange ([`HttpTransport`]); no
//!   payload interpretation happens at this layer
//! - **Response interpretation**: [`interpret`] classifies a raw response
//!   into an [`Outcome`] using per-method success-status tables
//! - **Error taxonomy**: [`classify`] maps `(status, errorCode)` pairs to
//!   typed [`ErrorKind`]s; the single source of truth for retry eligibility
//! - **Document model**: [`Document`] holds a decoded JSON or XML payload
//!   so callers work against one shape regardless of response format
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │              (forcelink-rest, forcelink-soap)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │          interpret() / classify()  (this crate)             │
//! │  - per-method success tables, error-entry extraction        │
//! │  - (status, errorCode) -> typed ErrorKind                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 HttpTransport  (this crate)                 │
//! │  - raw status/body/header exchange over reqwest             │
//! │  - network faults propagate unreclassified                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod document;
mod error;
mod interpret;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use document::{Document, XmlElement};
pub use error::{classify, Error, ErrorKind, Result, INVALID_SESSION_CODE, NOT_FOUND_CODE};
pub use interpret::{interpret, success_statuses, HttpMethod, Outcome, ResponseFormat};
pub use transport::{HttpTransport, RawResponse};

/// Default Salesforce API version used when none is specified.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Default User-Agent header value.
pub const USER_AGENT: &str = concat!("forcelink/", env!("CARGO_PKG_VERSION"));
