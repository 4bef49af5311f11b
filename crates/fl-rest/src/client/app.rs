//! Application navigation metadata.

use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// Items in the app drop-down menu, or the mobile navigation menu when
    /// `salesforce1` is set.
    pub async fn app_menu(&self, salesforce1: bool) -> Result<Document> {
        let menu = if salesforce1 { "Salesforce1" } else { "AppSwitcher" };
        self.call(CallDescriptor::get(format!("appMenu/{menu}"))).await
    }

    /// A Flexible Page's regions, components and associated quick actions.
    pub async fn flexi_page(&self, flexi_page_id: &str) -> Result<Document> {
        self.call(CallDescriptor::get(format!("flexiPage/{flexi_page_id}")))
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
    async fn test_app_menu_selects_menu_by_flag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/appMenu/Salesforce1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"appMenuItems":[]}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server).await.app_menu(true).await.unwrap();
    }
}
