//! Call descriptors.

use forcelink_client::{HttpMethod, Result};
use serde::Serialize;

/// Description of one REST call: path, method, query parameters, body, and
/// extra headers. Constructed per invocation and consumed by
/// [`crate::RestClient::call`].
#[derive(Debug, Clone)]
pub struct CallDescriptor {
    pub(crate) path: String,
    pub(crate) method: HttpMethod,
    pub(crate) params: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) versioned: bool,
}

impl CallDescriptor {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            params: Vec::new(),
            body: None,
            headers: Vec::new(),
            versioned: true,
        }
    }

    /// A GET call.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// A POST call.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// A PATCH call.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// A DELETE call.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Set a raw request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON request body and the matching Content-Type header.
    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        self.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(self)
    }

    /// Add an extra request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Skip the versioned `/services/data/v{version}` prefix. Used by the
    /// API-discovery endpoint.
    pub fn unversioned(mut self) -> Self {
        self.versioned = false;
        self
    }

    /// The HTTP method of this call.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The resource path of this call.
    pub fn path(&self) -> &str {
        &self.path
    }
}
