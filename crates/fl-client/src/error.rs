//! Error types for forcelink-client.
//!
//! The remote-call taxonomy follows the Salesforce REST error codes:
//! <https://developer.salesforce.com/docs/atlas.en-us.api_rest.meta/api_rest/errorcodes.htm>

/// Result type alias for forcelink-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error code Salesforce returns for an expired or invalid session.
pub const INVALID_SESSION_CODE: &str = "INVALID_SESSION_ID";

/// Error code Salesforce returns for a missing resource.
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

/// Error type for forcelink-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error belongs to the invalid-call family
    /// (any classified 4xx, including the narrower invalid-session and
    /// not-found kinds).
    pub fn is_invalid_call(&self) -> bool {
        self.kind.is_invalid_call()
    }

    /// Returns true if this is an expired/invalid session error.
    pub fn is_invalid_session(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidSession { .. })
    }

    /// Returns true if this is a resource-missing error.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// The HTTP status code carried by the error, if any.
    ///
    /// `AuthenticationMissing` carries none: it is raised before any
    /// network exchange takes place.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::InvalidSession { status, .. }
            | ErrorKind::NotFound { status, .. }
            | ErrorKind::InvalidCall { status, .. }
            | ErrorKind::RemoteCallFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The Salesforce error code carried by the error, if any.
    pub fn error_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::InvalidSession { error_code, .. }
            | ErrorKind::NotFound { error_code, .. }
            | ErrorKind::InvalidCall { error_code, .. } => Some(error_code),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// No access token is configured on the session. Raised before any
    /// network call is attempted.
    #[error("An access token is required for this endpoint")]
    AuthenticationMissing,

    /// Expired or invalid session (401 + INVALID_SESSION_ID). The call
    /// orchestrator retries this exactly once after a token refresh.
    #[error("Invalid session ({status}): {message}")]
    InvalidSession {
        status: u16,
        error_code: String,
        message: String,
    },

    /// Resource missing (404 + NOT_FOUND).
    #[error("Not found ({status}): {message}")]
    NotFound {
        status: u16,
        error_code: String,
        message: String,
    },

    /// Any other 4xx error response from Salesforce.
    #[error("Invalid call ({status}): {error_code} - {message}")]
    InvalidCall {
        status: u16,
        error_code: String,
        message: String,
    },

    /// 5xx or unrecognized status. Never retried by this layer; carries the
    /// raw body for diagnostics.
    #[error("Remote call failed with status {status}")]
    RemoteCallFailure { status: u16, body: String },

    /// Request timeout at the transport level. Propagated unreclassified.
    #[error("Request timeout")]
    Timeout,

    /// Network-level connection failure. Propagated unreclassified.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-Salesforce HTTP failure (protocol errors, body read failures).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON decoding failure.
    #[error("JSON error: {0}")]
    Json(String),

    /// XML decoding failure.
    #[error("XML error: {0}")]
    Xml(String),

    /// Token refresh exchange failure surfaced through a call.
    #[error("Auth error: {0}")]
    Auth(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this kind belongs to the invalid-call family.
    pub fn is_invalid_call(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidSession { .. }
                | ErrorKind::NotFound { .. }
                | ErrorKind::InvalidCall { .. }
        )
    }
}

/// Map a `(status_code, error_code)` pair from a 4xx error response to its
/// typed error kind.
///
/// Pure lookup: 401 + `INVALID_SESSION_ID` narrows to [`ErrorKind::InvalidSession`],
/// 404 + `NOT_FOUND` narrows to [`ErrorKind::NotFound`], anything else keeps
/// the generic [`ErrorKind::InvalidCall`] carrying the original status, code,
/// and message. Retry decisions are made against this mapping, never against
/// ad-hoc status checks.
pub fn classify(status: u16, error_code: &str, message: &str) -> ErrorKind {
    if status == 401 && error_code == INVALID_SESSION_CODE {
        ErrorKind::InvalidSession {
            status,
            error_code: error_code.to_string(),
            message: message.to_string(),
        }
    } else if status == 404 && error_code == NOT_FOUND_CODE {
        ErrorKind::NotFound {
            status,
            error_code: error_code.to_string(),
            message: message.to_string(),
        }
    } else {
        ErrorKind::InvalidCall {
            status,
            error_code: error_code.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Http(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_invalid_session() {
        let kind = classify(401, "INVALID_SESSION_ID", "Session expired or invalid");
        assert!(matches!(kind, ErrorKind::InvalidSession { .. }));
        assert!(kind.is_invalid_call());
    }

    #[test]
    fn test_classify_not_found() {
        let kind = classify(404, "NOT_FOUND", "The requested resource does not exist");
        assert!(matches!(kind, ErrorKind::NotFound { .. }));
        assert!(kind.is_invalid_call());
    }

    #[test]
    fn test_classify_generic_4xx() {
        let kind = classify(400, "INVALID_FIELD", "No such column");
        match kind {
            ErrorKind::InvalidCall {
                status,
                ref error_code,
                ref message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(error_code, "INVALID_FIELD");
                assert_eq!(message, "No such column");
            }
            other => panic!("expected InvalidCall, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_requires_matching_status() {
        // The session-expired code on a non-401 status stays generic, and
        // a 401 with a different code stays generic too.
        let kind = classify(400, "INVALID_SESSION_ID", "odd");
        assert!(matches!(kind, ErrorKind::InvalidCall { .. }));

        let kind = classify(401, "INVALID_AUTH_HEADER", "bad header");
        assert!(matches!(kind, ErrorKind::InvalidCall { .. }));

        let kind = classify(404, "INVALID_FIELD", "missing");
        assert!(matches!(kind, ErrorKind::InvalidCall { .. }));
    }

    #[test]
    fn test_classify_is_pure() {
        for _ in 0..3 {
            let kind = classify(401, "INVALID_SESSION_ID", "expired");
            assert!(matches!(kind, ErrorKind::InvalidSession { .. }));
        }
    }

    #[test]
    fn test_error_predicates_and_accessors() {
        let err = Error::new(classify(401, "INVALID_SESSION_ID", "expired"));
        assert!(err.is_invalid_session());
        assert!(err.is_invalid_call());
        assert!(!err.is_not_found());
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.error_code(), Some("INVALID_SESSION_ID"));

        let err = Error::new(classify(404, "NOT_FOUND", "missing"));
        assert!(err.is_not_found());
        assert!(err.is_invalid_call());

        let err = Error::new(ErrorKind::AuthenticationMissing);
        assert!(!err.is_invalid_call());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.error_code(), None);

        let err = Error::new(ErrorKind::RemoteCallFailure {
            status: 500,
            body: "<html>boom</html>".to_string(),
        });
        assert!(!err.is_invalid_call());
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_authentication_missing_message() {
        let err = Error::new(ErrorKind::AuthenticationMissing);
        assert_eq!(
            err.to_string(),
            "An access token is required for this endpoint"
        );
    }

    #[test]
    fn test_transport_kinds_are_not_invalid_call() {
        assert!(!ErrorKind::Timeout.is_invalid_call());
        assert!(!ErrorKind::Connection("reset".into()).is_invalid_call());
        assert!(!ErrorKind::Http("bad chunk".into()).is_invalid_call());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }
}
