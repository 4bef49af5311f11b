//! Data replication: deleted/updated record windows and recent items.

use chrono::{DateTime, TimeZone, Utc};
use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

/// Window timestamps are sent in UTC with an explicit offset, the form the
/// replication endpoints require.
fn format_datetime<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    value
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S+00:00")
        .to_string()
}

impl RestClient {
    /// List the records of a type deleted within the given window.
    pub async fn get_deleted<Tz: TimeZone>(
        &self,
        object_name: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Document> {
        self.call(
            CallDescriptor::get(format!("sobjects/{object_name}/deleted"))
                .param("start", format_datetime(start))
                .param("end", format_datetime(end)),
        )
        .await
    }

    /// List the records of a type added or changed within the given window.
    pub async fn get_updated<Tz: TimeZone>(
        &self,
        object_name: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<Document> {
        self.call(
            CallDescriptor::get(format!("sobjects/{object_name}/updated"))
                .param("start", format_datetime(start))
                .param("end", format_datetime(end)),
        )
        .await
    }

    /// List the items most recently viewed or referenced by the current
    /// user, optionally capped at `limit` entries.
    pub async fn get_recently_viewed(&self, limit: Option<u32>) -> Result<Document> {
        let mut descriptor = CallDescriptor::get("recent");
        if let Some(limit) = limit {
            descriptor = descriptor.param("limit", limit.to_string());
        }
        self.call(descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::FixedOffset;
    use forcelink_auth::{ClientCredentials, Session, TokenManager};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn client(server: &MockServer) -> RestClient {
        let session = Arc::new(Session::new(server.uri()).with_access_token("token"));
        let tokens = TokenManager::new(session, ClientCredentials::new("id", "secret"));
        RestClient::new(tokens).unwrap()
    }

    #[test]
    fn test_format_datetime_normalizes_to_utc() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2026, 3, 14, 12, 30, 0).unwrap();
        assert_eq!(format_datetime(&local), "2026-03-14T10:30:00+00:00");
    }

    #[tokio::test]
    async fn test_get_deleted_sends_window_params() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/deleted"))
            .and(query_param("start", "2026-03-01T00:00:00+00:00"))
            .and(query_param("end", "2026-03-02T00:00:00+00:00"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"deletedRecords":[],"earliestDateAvailable":"2026-01-01T00:00:00.000+0000","latestDateCovered":"2026-03-02T00:00:00.000+0000"}"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let start = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
        let window = client(&mock_server)
            .await
            .get_deleted("Account", &start, &end)
            .await
            .unwrap();
        assert!(window.get("deletedRecords").is_some());
    }

    #[tokio::test]
    async fn test_recently_viewed_omits_limit_when_unset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        client(&mock_server)
            .await
            .get_recently_viewed(None)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].url.query().is_none());
    }
}
