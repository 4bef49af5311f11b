//! The REST call orchestrator.

use std::sync::Arc;

use forcelink_auth::{Session, TokenManager};
use forcelink_client::{
    classify, interpret, ClientConfig, Document, Error, ErrorKind, HttpTransport, Outcome,
    ResponseFormat, Result, DEFAULT_API_VERSION,
};
use tracing::{debug, instrument};

use crate::descriptor::CallDescriptor;

mod app;
mod describe;
mod layout;
mod password;
mod query;
mod quick_actions;
mod replication;
mod sobject;

/// Salesforce REST API client.
///
/// Wraps a shared [`Session`] and [`TokenManager`] and routes every request
/// through the authenticated-call pipeline: precondition check, transport
/// exchange, response interpretation, error classification, and, on an
/// expired session, exactly one refresh-and-retry cycle.
#[derive(Debug, Clone)]
pub struct RestClient {
    transport: HttpTransport,
    session: Arc<Session>,
    tokens: TokenManager,
    format: ResponseFormat,
    api_version: String,
}

impl RestClient {
    /// Create a REST client around the given token manager (and the session
    /// it owns), with default transport configuration.
    pub fn new(tokens: TokenManager) -> Result<Self> {
        Self::with_config(tokens, ClientConfig::default())
    }

    /// Create a REST client with custom transport configuration.
    pub fn with_config(tokens: TokenManager, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        let session = tokens.session().clone();
        Ok(Self {
            transport,
            session,
            tokens,
            format: ResponseFormat::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g. "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the response wire format (JSON by default).
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The API version in use.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The response format in use.
    pub fn response_format(&self) -> ResponseFormat {
        self.format
    }

    /// Build the full URL for a descriptor.
    pub(crate) fn build_url(&self, descriptor: &CallDescriptor) -> String {
        let mut parts = vec!["services/data".to_string()];
        if descriptor.versioned {
            parts.push(format!("v{}", self.api_version));
        }
        let path = descriptor.path.trim_matches('/');
        if !path.is_empty() {
            parts.push(path.to_string());
        }

        let mut url = format!("{}/{}", self.session.base_url(), parts.join("/"));

        if !descriptor.params.is_empty() {
            let query = descriptor
                .params
                .iter()
                .map(|(name, value)| {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    /// Execute an authenticated call.
    ///
    /// Fails immediately with [`ErrorKind::AuthenticationMissing`] when the
    /// session holds no access token; the network is never touched. When
    /// the first attempt classifies as an expired session and a refresh
    /// yields a new token, the call is retried exactly once with that token
    /// and the second attempt's result is surfaced unconditionally; when no
    /// refresh is possible, the original error is raised.
    #[instrument(skip(self, descriptor), fields(path = %descriptor.path, method = %descriptor.method))]
    pub async fn call(&self, descriptor: CallDescriptor) -> Result<Document> {
        let Some(token) = self.session.access_token() else {
            return Err(Error::new(ErrorKind::AuthenticationMissing));
        };

        let url = self.build_url(&descriptor);

        match self.attempt(&descriptor, &url, &token).await {
            Err(err) if err.is_invalid_session() => {
                debug!("session expired, attempting token refresh");
                let refreshed = self
                    .tokens
                    .refresh()
                    .await
                    .map_err(|e| Error::with_source(ErrorKind::Auth(e.to_string()), e))?;
                match refreshed {
                    // Retry with the just-refreshed token, never the stale one.
                    Some(fresh) => self.attempt(&descriptor, &url, &fresh).await,
                    None => Err(err),
                }
            }
            result => result,
        }
    }

    /// One transport exchange plus interpretation and classification.
    async fn attempt(
        &self,
        descriptor: &CallDescriptor,
        url: &str,
        token: &str,
    ) -> Result<Document> {
        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Accept".to_string(), self.format.accept().to_string()),
        ];
        headers.extend(descriptor.headers.iter().cloned());

        let response = self
            .transport
            .execute(descriptor.method, url, descriptor.body.clone(), &headers)
            .await?;

        match interpret(response.status, &response.body, descriptor.method, self.format)? {
            Outcome::Success(document) => Ok(document),
            Outcome::ClientError {
                status,
                error_code,
                message,
            } => Err(Error::new(classify(status, &error_code, &message))),
            Outcome::ServerError { status, body } => {
                Err(Error::new(ErrorKind::RemoteCallFailure { status, body }))
            }
        }
    }

    /// List summary information about each Salesforce version available on
    /// the instance, including the version, label, and root URL.
    pub async fn versions(&self) -> Result<Document> {
        self.call(CallDescriptor::get("").unversioned()).await
    }
}
