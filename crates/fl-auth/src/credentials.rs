//! Connected-app client credentials.

/// Client credentials for a Salesforce connected app.
///
/// Immutable; used only to authenticate refresh-token exchanges. The secret
/// is redacted in Debug output to prevent accidental exposure in logs.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientCredentials {
    /// Create new client credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Get the client id (consumer key).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the client secret (for internal use by the token exchange).
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}
