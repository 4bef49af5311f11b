//! Token refresh management.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::credentials::ClientCredentials;
use crate::error::{Error, ErrorKind, Result};
use crate::oauth::{OAuthErrorResponse, TokenResponse};
use crate::session::Session;
use crate::PRODUCTION_TOKEN_URL;

/// Callback invoked with the new token material after every successful
/// refresh, so the embedding application can persist it.
pub type TokenUpdater = Arc<dyn Fn(&TokenResponse) + Send + Sync>;

/// Performs the OAuth 2.0 refresh-token grant for a [`Session`].
///
/// A refresh exchanges the session's refresh token plus the client
/// credentials at the token endpoint, swaps the new access token into the
/// session, and fires the updater sink. Refreshes are serialized through the
/// session's refresh gate: the lock is held across the whole
/// exchange-and-swap so overlapping refreshes cannot install a stale token.
#[derive(Clone)]
pub struct TokenManager {
    session: Arc<Session>,
    credentials: ClientCredentials,
    updater: Option<TokenUpdater>,
    token_url: String,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("session", &self.session)
            .field("credentials", &self.credentials)
            .field("token_url", &self.token_url)
            .field("updater", &self.updater.as_ref().map(|_| "<fn>"))
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a token manager for the given session and credentials.
    pub fn new(session: Arc<Session>, credentials: ClientCredentials) -> Self {
        Self {
            session,
            credentials,
            updater: None,
            token_url: PRODUCTION_TOKEN_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set the token-updater sink.
    pub fn with_updater(mut self, updater: TokenUpdater) -> Self {
        self.updater = Some(updater);
        self
    }

    /// Override the token endpoint (sandbox orgs, test servers).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// The session this manager refreshes.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Refresh the session's access token.
    ///
    /// Returns `Ok(None)` without touching the network when the session
    /// holds no refresh token; the caller must treat that as "cannot
    /// retry". On success the new access token has already been swapped
    /// into the session and the updater sink has been invoked exactly once.
    ///
    /// The refresh token and client secret are never logged.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<String>> {
        let Some(refresh_token) = self.session.refresh_token().map(str::to_string) else {
            debug!("no refresh token held, cannot refresh");
            return Ok(None);
        };

        // Held across the exchange and the swap: a second caller that lost
        // the race performs its own (harmless) exchange only after the
        // winner's token is installed.
        let _gate = self.session.refresh_gate.lock().await;

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
        ];
        let body = serde_urlencoded::to_string(params)?;

        let response = self
            .http_client
            .post(&self.token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let token = self.handle_token_response(response).await?;

        self.session.set_access_token(token.access_token.clone());
        debug!("access token refreshed");

        if let Some(ref updater) = self.updater {
            updater(&token);
        }

        Ok(Some(token.access_token))
    }

    /// Handle a token response, checking for an OAuth error body.
    async fn handle_token_response(&self, response: reqwest::Response) -> Result<TokenResponse> {
        if !response.status().is_success() {
            let error: OAuthErrorResponse = response.json().await?;
            return Err(Error::new(ErrorKind::OAuth {
                error: error.error,
                description: error.error_description,
            }));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn manager_for(server: &MockServer, session: Arc<Session>) -> TokenManager {
        TokenManager::new(session, ClientCredentials::new("client_id", "client_secret"))
            .with_token_url(format!("{}/services/oauth2/token", server.uri()))
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_is_none() {
        let mock_server = MockServer::start().await;

        // No mock mounted: a request would 404 and fail the exchange, so a
        // clean Ok(None) also proves no network call happened.
        let session = Arc::new(Session::new("na1.salesforce.com").with_access_token("stale"));
        let manager = manager_for(&mock_server, session.clone());

        let result = manager.refresh().await.unwrap();
        assert!(result.is_none());
        assert_eq!(session.access_token().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_refresh_swaps_token_and_fires_updater_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh123"))
            .and(body_string_contains("client_id=client_id"))
            .and(body_string_contains("client_secret=client_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx!new_token",
                "instance_url": "https://na1.salesforce.com",
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = Arc::new(
            Session::new("na1.salesforce.com")
                .with_access_token("stale")
                .with_refresh_token("refresh123"),
        );

        let updates = Arc::new(AtomicU32::new(0));
        let updates_clone = updates.clone();
        let manager = manager_for(&mock_server, session.clone()).with_updater(Arc::new(
            move |token: &TokenResponse| {
                assert_eq!(token.access_token, "00Dxx!new_token");
                updates_clone.fetch_add(1, Ordering::SeqCst);
            },
        ));

        let new_token = manager.refresh().await.unwrap();
        assert_eq!(new_token.as_deref(), Some("00Dxx!new_token"));
        assert_eq!(session.access_token().as_deref(), Some("00Dxx!new_token"));
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_refresh_is_an_oauth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "expired access/refresh token"
            })))
            .mount(&mock_server)
            .await;

        let session = Arc::new(
            Session::new("na1.salesforce.com")
                .with_access_token("stale")
                .with_refresh_token("revoked"),
        );
        let manager = manager_for(&mock_server, session.clone());

        let err = manager.refresh().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OAuth { ref error, .. } if error == "invalid_grant"));
        // A failed exchange never swaps the token.
        assert_eq!(session.access_token().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_are_serialized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx!fresh",
                "token_type": "Bearer"
            })))
            .mount(&mock_server)
            .await;

        let session = Arc::new(
            Session::new("na1.salesforce.com")
                .with_access_token("stale")
                .with_refresh_token("refresh123"),
        );
        let manager = manager_for(&mock_server, session.clone());

        let (a, b) = tokio::join!(manager.refresh(), manager.refresh());
        assert_eq!(a.unwrap().as_deref(), Some("00Dxx!fresh"));
        assert_eq!(b.unwrap().as_deref(), Some("00Dxx!fresh"));
        assert_eq!(session.access_token().as_deref(), Some("00Dxx!fresh"));
    }
}
