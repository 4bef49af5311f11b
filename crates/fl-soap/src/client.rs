//! Metadata API client.

use std::sync::Arc;

use forcelink_auth::{Session, TokenManager};
use forcelink_client::{ClientConfig, HttpMethod, HttpTransport, XmlElement};
use tracing::{debug, instrument};

use crate::envelope;
use crate::error::{Error, ErrorKind, Result};
use crate::fault;
use crate::DEFAULT_API_VERSION;

/// Salesforce Metadata API client.
///
/// Shares the [`Session`] and [`TokenManager`] with the REST side; a refresh
/// triggered by either channel installs the new token for both.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    transport: HttpTransport,
    session: Arc<Session>,
    tokens: TokenManager,
    api_version: String,
}

impl MetadataClient {
    /// Create a Metadata API client around the given token manager.
    pub fn new(tokens: TokenManager) -> forcelink_client::Result<Self> {
        Self::with_config(tokens, ClientConfig::default())
    }

    /// Create a Metadata API client with custom transport configuration.
    pub fn with_config(
        tokens: TokenManager,
        config: ClientConfig,
    ) -> forcelink_client::Result<Self> {
        let transport = HttpTransport::new(config)?;
        let session = tokens.session().clone();
        Ok(Self {
            transport,
            session,
            tokens,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g. "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
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

    /// The Metadata API endpoint. The trailing path segment is the org id,
    /// which Salesforce encodes as the part of the access token before the
    /// first `!`.
    fn endpoint(&self, access_token: &str) -> String {
        let org_id = access_token.split('!').next().unwrap_or(access_token);
        format!(
            "{}/services/Soap/m/{}/{}",
            self.session.base_url(),
            self.api_version,
            org_id
        )
    }

    /// Execute a metadata operation and return the parsed response body
    /// element for the given response tag.
    ///
    /// The response envelope is checked for a fault before the HTTP status
    /// is considered (faults arrive with status 500). An
    /// `sf:INVALID_SESSION_ID` fault triggers one token refresh and one
    /// retry with the fresh token; any other fault is raised typed. A ≥400
    /// status without a fault envelope is a remote-call failure.
    #[instrument(skip(self, operation_body), fields(action = %soap_action))]
    pub(crate) async fn call(
        &self,
        soap_action: &str,
        operation_body: &str,
        response_tag: &str,
    ) -> Result<XmlElement> {
        let Some(token) = self.session.access_token() else {
            return Err(Error::new(ErrorKind::AuthenticationMissing));
        };

        match self
            .attempt(soap_action, operation_body, response_tag, &token)
            .await
        {
            Err(err)
                if matches!(
                    &err.kind,
                    ErrorKind::SoapFault { fault_code, .. }
                        if fault_code == fault::INVALID_SESSION_FAULT
                ) =>
            {
                debug!("session expired, attempting token refresh");
                match self.tokens.refresh().await? {
                    Some(fresh) => {
                        self.attempt(soap_action, operation_body, response_tag, &fresh)
                            .await
                    }
                    None => Err(err),
                }
            }
            result => result,
        }
    }

    async fn attempt(
        &self,
        soap_action: &str,
        operation_body: &str,
        response_tag: &str,
        token: &str,
    ) -> Result<XmlElement> {
        let url = self.endpoint(token);
        let body = envelope::build(token, operation_body);
        let headers = vec![
            (
                "Content-Type".to_string(),
                "text/xml;charset=UTF-8".to_string(),
            ),
            ("SOAPAction".to_string(), soap_action.to_string()),
        ];

        let response = self
            .transport
            .execute(HttpMethod::Post, &url, Some(body), &headers)
            .await?;

        // Fault first: Salesforce wraps faults in an HTTP 500.
        if let Ok(root) = XmlElement::parse(&response.body) {
            if let Some(fault) = fault::find_fault(&root) {
                return Err(Error::new(ErrorKind::SoapFault {
                    fault_code: fault.fault_code,
                    fault_string: fault.fault_string,
                }));
            }
            if response.status < 400 {
                return root.find(response_tag).cloned().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidResponse(format!(
                        "missing {response_tag} element in response envelope"
                    )))
                });
            }
        }

        Err(Error::new(ErrorKind::RemoteCallFailure {
            status: response.status,
            body: response.body,
        }))
    }
}
