//! SOQL queries and SOSL search.

use forcelink_client::{Document, Result};

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// Execute a SOQL query. With `include_all`, deleted, merged and
    /// archived records are included (the `queryAll` resource).
    pub async fn query(&self, soql: &str, include_all: bool) -> Result<Document> {
        let path = if include_all { "queryAll" } else { "query" };
        self.call(CallDescriptor::get(path).param("q", soql)).await
    }

    /// Execute a SOSL search.
    pub async fn search(&self, sosl: &str) -> Result<Document> {
        self.call(CallDescriptor::get("search").param("q", sosl))
            .await
    }

    /// The ordered list of objects in the user's default global search
    /// scope, most-used first.
    pub async fn search_scope_order(&self) -> Result<Document> {
        self.call(CallDescriptor::get("search/scopeOrder")).await
    }

    /// Search-result layout information for the named objects: the columns
    /// shown on the results page, row count, and label.
    pub async fn search_result_layouts(&self, object_names: &[&str]) -> Result<Document> {
        self.call(CallDescriptor::get("searchlayout").param("q", object_names.join(",")))
            .await
    }
}
