//! OAuth 2.0 token exchange types.

use serde::{Deserialize, Serialize};

/// Token response from the OAuth token endpoint.
///
/// Sensitive fields are redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token, if the server rotated it.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Instance URL for the org.
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Identity URL of the authenticated user.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued-at timestamp.
    #[serde(default)]
    pub issued_at: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

/// OAuth error response from the token endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_deserialize() {
        let json = serde_json::json!({
            "access_token": "00Dxx!AR8AQ",
            "instance_url": "https://na1.salesforce.com",
            "id": "https://login.salesforce.com/id/00Dxx/005xx",
            "token_type": "Bearer",
            "issued_at": "1278448384422",
            "signature": "SSSbLO/gBhmmyNUvN18ODBDFYHzakxOMgqYtu+hDPsc="
        });

        let token: TokenResponse = serde_json::from_value(json).unwrap();
        assert_eq!(token.access_token, "00Dxx!AR8AQ");
        assert_eq!(
            token.instance_url.as_deref(),
            Some("https://na1.salesforce.com")
        );
        assert!(token.refresh_token.is_none());
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let token = TokenResponse {
            access_token: "super_secret_access".to_string(),
            refresh_token: Some("super_secret_refresh".to_string()),
            instance_url: Some("https://na1.salesforce.com".to_string()),
            id: None,
            token_type: Some("Bearer".to_string()),
            scope: None,
            signature: Some("sig_value".to_string()),
            issued_at: None,
        };

        let debug_output = format!("{:?}", token);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access"));
        assert!(!debug_output.contains("super_secret_refresh"));
        assert!(!debug_output.contains("sig_value"));
    }
}
