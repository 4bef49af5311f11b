//! Organization and object discovery.

use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// List the resources available at this API version, with their URIs.
    pub async fn resources(&self) -> Result<Document> {
        self.call(CallDescriptor::get("")).await
    }

    /// Report the organization's API limits.
    pub async fn limits(&self) -> Result<Document> {
        self.call(CallDescriptor::get("limits")).await
    }

    /// List the objects available in the organization and their metadata.
    pub async fn objects(&self) -> Result<Document> {
        self.call(CallDescriptor::get("sobjects")).await
    }

    /// Describe a single object. With `full_description` the complete
    /// describe at all levels is returned; otherwise only the summary
    /// `objectDescribe` section.
    pub async fn object(&self, object_name: &str, full_description: bool) -> Result<Document> {
        let mut path = format!("sobjects/{object_name}");
        if full_description {
            path.push_str("/describe");
        }
        let document = self.call(CallDescriptor::get(path)).await?;
        if full_description {
            return Ok(document);
        }
        Ok(document
            .get("objectDescribe")
            .map(|describe| Document::Json(describe.clone()))
            .unwrap_or(document))
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
    async fn test_resources_hits_version_root() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"sobjects":"/services/data/v62.0/sobjects","query":"/services/data/v62.0/query"}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let resources = client(&mock_server).await.resources().await.unwrap();
        assert!(resources.get("sobjects").is_some());
    }

    #[tokio::test]
    async fn test_object_summary_drills_into_object_describe() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"objectDescribe":{"name":"Account","createable":true},"recentItems":[]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let describe = client(&mock_server).await.object("Account", false).await.unwrap();
        assert_eq!(describe.get("name"), Some(&serde_json::json!("Account")));
        assert!(describe.get("recentItems").is_none());
    }

    #[tokio::test]
    async fn test_object_full_description_uses_describe_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/describe"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"name":"Account","fields":[{"name":"Id"}]}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let describe = client(&mock_server).await.object("Account", true).await.unwrap();
        assert_eq!(describe.get("name"), Some(&serde_json::json!("Account")));
    }
}
