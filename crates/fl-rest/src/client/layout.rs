//! Layout describes.

use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// Approval layouts for an object.
    pub async fn approval_layouts(&self, object_name: &str) -> Result<Document> {
        self.call(CallDescriptor::get(format!(
            "sobjects/{object_name}/describe/approvalLayouts"
        )))
        .await
    }

    /// Compact layouts for an object.
    pub async fn compact_layouts(&self, object_name: &str) -> Result<Document> {
        self.call(CallDescriptor::get(format!(
            "sobjects/{object_name}/describe/compactLayouts"
        )))
        .await
    }

    /// Page layouts and descriptions for an object, or the global publisher
    /// layouts when no object is given.
    pub async fn layouts(&self, object_name: Option<&str>) -> Result<Document> {
        let object_name = object_name.unwrap_or("global");
        self.call(CallDescriptor::get(format!(
            "sobjects/{object_name}/describe/layouts"
        )))
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use forcelink_auth::{ClientCredentials, Session, TokenManager};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client(server: &MockServer) -> RestClient {
        let session = Arc::new(Session::new(server.uri()).with_access_token("token"));
        let tokens = TokenManager::new(session, ClientCredentials::new("id", "secret"));
        RestClient::new(tokens).unwrap()
    }

    #[tokio::test]
    async fn test_layouts_defaults_to_global() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/global/describe/layouts"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"layouts":[]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).await.layouts(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_compact_layouts_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/describe/compactLayouts",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"compactLayouts":[]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .await
            .compact_layouts("Account")
            .await
            .unwrap();
    }
}
