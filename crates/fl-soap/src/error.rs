//! Error types for forcelink-soap.

use crate::metadata::SaveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("An access token is required for this endpoint")]
    AuthenticationMissing,
    #[error("SOAP fault {fault_code}: {fault_string}")]
    SoapFault {
        fault_code: String,
        fault_string: String,
    },
    #[error("Metadata operation failed: {message}")]
    OperationFailed {
        message: String,
        errors: Vec<SaveError>,
    },
    #[error("Remote call failed with status {status}")]
    RemoteCallFailure { status: u16, body: String },
    #[error("Client error: {0}")]
    Client(String),
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("{0}")]
    Other(String),
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<forcelink_auth::Error> for Error {
    fn from(err: forcelink_auth::Error) -> Self {
        Error {
            kind: ErrorKind::Auth(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
