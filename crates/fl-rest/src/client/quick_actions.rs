//! Publisher quick actions.

use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// List publisher actions. With an object name, that object's actions
    /// plus the global actions; otherwise the global actions alone.
    pub async fn quick_actions(&self, object_name: Option<&str>) -> Result<Document> {
        let path = match object_name {
            Some(name) => format!("sobjects/{name}/quickActions"),
            None => "quickActions".to_string(),
        };
        self.call(CallDescriptor::get(path)).await
    }

    /// A single action on an object, optionally with its full describe.
    pub async fn quick_action(
        &self,
        object_name: &str,
        action_name: &str,
        full_description: bool,
    ) -> Result<Document> {
        let mut path = format!("sobjects/{object_name}/quickActions/{action_name}");
        if full_description {
            path.push_str("/describe");
        }
        self.call(CallDescriptor::get(path)).await
    }

    /// An action's default values, evaluated in the context of a record
    /// when an id is given.
    pub async fn quick_action_default_values(
        &self,
        object_name: &str,
        action_name: &str,
        object_id: Option<&str>,
    ) -> Result<Document> {
        let mut path = format!("sobjects/{object_name}/quickActions/{action_name}/defaultValues");
        if let Some(object_id) = object_id {
            path.push('/');
            path.push_str(object_id);
        }
        self.call(CallDescriptor::get(path)).await
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
    async fn test_global_quick_actions_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/quickActions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).await.quick_actions(None).await.unwrap();
    }

    #[tokio::test]
    async fn test_default_values_with_record_context() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/services/data/v62.0/sobjects/Account/quickActions/LogACall/defaultValues/001",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Subject":"Call"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let defaults = client(&mock_server)
            .await
            .quick_action_default_values("Account", "LogACall", Some("001"))
            .await
            .unwrap();
        assert_eq!(defaults.get("Subject"), Some(&serde_json::json!("Call")));
    }
}
