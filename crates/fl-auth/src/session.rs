//! The active Salesforce session.

use std::sync::RwLock;

use tokio::sync::Mutex;

/// State for one authenticated Salesforce session.
///
/// Created at client construction and shared (via `Arc`) between the REST
/// and SOAP channels. The access token is the only mutable field: it is
/// swapped in place by a successful refresh and never mutated otherwise.
/// The `refresh_gate` serializes refresh-and-swap cycles so that two
/// concurrent session-expired outcomes cannot overwrite each other's token
/// with a stale one.
///
/// Tokens are redacted in Debug output.
pub struct Session {
    domain: String,
    access_token: RwLock<Option<String>>,
    refresh_token: Option<String>,
    user_id: Option<String>,
    pub(crate) refresh_gate: Mutex<()>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("domain", &self.domain)
            .field(
                "access_token",
                &self.access_token().map(|_| "[REDACTED]"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an unauthenticated session for the given instance domain
    /// (e.g. `na1.salesforce.com`).
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            access_token: RwLock::new(None),
            refresh_token: None,
            user_id: None,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Set the initial access token.
    pub fn with_access_token(self, token: impl Into<String>) -> Self {
        self.set_access_token(token.into());
        self
    }

    /// Set the refresh token, enabling transparent token refresh.
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Set the user id used as the default for user-scoped endpoints.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// The instance domain this session talks to.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The base URL for the instance.
    ///
    /// A bare domain gets the `https://` scheme; a domain that already
    /// carries a scheme is used as-is (useful against test servers).
    pub fn base_url(&self) -> String {
        if self.domain.starts_with("http://") || self.domain.starts_with("https://") {
            self.domain.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.domain.trim_end_matches('/'))
        }
    }

    /// The current access token, if one is held.
    pub fn access_token(&self) -> Option<String> {
        let guard = match self.access_token.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }

    /// Returns true if an access token is currently held.
    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Swap in a new access token (after a successful refresh).
    pub fn set_access_token(&self, token: String) {
        let mut guard = match self.access_token.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(token);
    }

    /// The refresh token, if one is held.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// The default user id, if configured.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
