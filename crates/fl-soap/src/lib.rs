//! Salesforce Metadata API client over SOAP.
//!
//! The Metadata API speaks SOAP rather than REST, but the call discipline is
//! the same as the REST side: every operation requires an access token, an
//! expired session is refreshed once and the call retried once, and the
//! failure taxonomy is typed.
//!
//! ```text
//! MetadataClient::create(object)
//!        |
//!        v
//!   build envelope (SessionHeader + operation body)
//!        |
//!        v
//!   POST /services/Soap/m/{version}/{org_id}
//!        |
//!        v
//!   parse envelope --> fault? --sf:INVALID_SESSION_ID--> refresh + retry once
//!        |                 \
//!        v                  `--> Error::SoapFault
//!   operation result
//! ```
//!
//! Salesforce reports SOAP faults with an HTTP 500 status, so the response
//! body is inspected for a fault before the status code is considered.

mod client;
mod envelope;
mod error;
mod fault;
mod login;
mod metadata;
mod objects;

pub use client::MetadataClient;
pub use error::{Error, ErrorKind, Result};
pub use fault::Fault;
pub use login::Login;
pub use metadata::{MetadataComponent, SaveError, SaveResult};
pub use objects::{CustomField, CustomObject, FieldPermission, MetadataXml, PermissionSet};

/// Metadata API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "62.0";

/// XML namespace of the Metadata API.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";
