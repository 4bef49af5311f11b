//! Session bootstrap via the SOAP login service.

use forcelink_auth::Session;
use forcelink_client::{HttpMethod, HttpTransport, XmlElement};
use tracing::instrument;

use crate::client::MetadataClient;
use crate::envelope::escape;
use crate::error::{Error, ErrorKind, Result};
use crate::fault;
use crate::DEFAULT_API_VERSION;

/// The outcome of a successful SOAP login: the session id to use as an
/// access token and the host of the instance that owns the session.
#[derive(Clone, PartialEq)]
pub struct Login {
    pub session_id: String,
    pub server_host: String,
}

impl std::fmt::Debug for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Login")
            .field("session_id", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .finish()
    }
}

impl Login {
    /// Build a [`Session`] on the instance host, holding the session id as
    /// its access token. No refresh token is available through this flow:
    /// an expired session must log in again.
    pub fn into_session(self) -> Session {
        Session::new(self.server_host).with_access_token(self.session_id)
    }
}

/// The host portion of a server URL, port included.
fn server_host(server_url: &str) -> Option<&str> {
    let rest = server_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(server_url);
    rest.split('/').next().filter(|host| !host.is_empty())
}

fn login_url(domain: &str) -> String {
    let base = if domain.contains("://") {
        domain.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", domain.trim_end_matches('/'))
    };
    format!("{base}/services/Soap/u/{DEFAULT_API_VERSION}")
}

impl MetadataClient {
    /// Authenticate with username, password, and security token against the
    /// SOAP login service on `domain` (normally `login.salesforce.com`, or
    /// `test.salesforce.com` for sandboxes).
    ///
    /// The security token is appended to the password as Salesforce
    /// requires. An invalid credential set comes back as a SOAP fault and
    /// is raised typed.
    #[instrument(skip(password, security_token))]
    pub async fn login(
        domain: &str,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> Result<Login> {
        let transport = HttpTransport::default_transport()?;
        let body = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:urn="urn:partner.soap.sforce.com">
  <soapenv:Body>
    <urn:login>
      <urn:username>{username}</urn:username>
      <urn:password>{password}{token}</urn:password>
    </urn:login>
  </soapenv:Body>
</soapenv:Envelope>"#,
            username = escape(username),
            password = escape(password),
            token = escape(security_token),
        );
        let headers = vec![
            (
                "Content-Type".to_string(),
                "text/xml;charset=UTF-8".to_string(),
            ),
            ("SOAPAction".to_string(), "login".to_string()),
        ];

        let response = transport
            .execute(HttpMethod::Post, &login_url(domain), Some(body), &headers)
            .await?;

        if let Ok(root) = XmlElement::parse(&response.body) {
            if let Some(fault) = fault::find_fault(&root) {
                return Err(Error::new(ErrorKind::SoapFault {
                    fault_code: fault.fault_code,
                    fault_string: fault.fault_string,
                }));
            }
            if response.status < 400 {
                let result = root.find("loginResponse").and_then(|r| r.find("result"));
                let session_id = result.and_then(|r| r.child_text("sessionId"));
                let host = result
                    .and_then(|r| r.child_text("serverUrl"))
                    .and_then(server_host);
                if let (Some(session_id), Some(host)) = (session_id, host) {
                    return Ok(Login {
                        session_id: session_id.to_string(),
                        server_host: host.to_string(),
                    });
                }
                return Err(Error::new(ErrorKind::InvalidResponse(
                    "missing sessionId or serverUrl in login response".to_string(),
                )));
            }
        }

        Err(Error::new(ErrorKind::RemoteCallFailure {
            status: response.status,
            body: response.body,
        }))
    }
}
