//! Record CRUD, by record id and by external id.

use forcelink_client::{Document, Result};
use serde::Serialize;

use crate::client::RestClient;
use crate::descriptor::CallDescriptor;

impl RestClient {
    /// Retrieve a record by id, optionally restricted to the given fields.
    pub async fn get(
        &self,
        object_name: &str,
        object_id: &str,
        fields: Option<&[&str]>,
    ) -> Result<Document> {
        let mut descriptor = CallDescriptor::get(format!("sobjects/{object_name}/{object_id}"));
        if let Some(fields) = fields {
            descriptor = descriptor.param("fields", fields.join(","));
        }
        self.call(descriptor).await
    }

    /// Retrieve the blob content of a record's binary field.
    pub async fn get_blob(
        &self,
        object_name: &str,
        object_id: &str,
        blob_field: &str,
    ) -> Result<Document> {
        self.call(CallDescriptor::get(format!(
            "sobjects/{object_name}/{object_id}/{blob_field}"
        )))
        .await
    }

    /// Create a new record of the given type.
    pub async fn create<T: Serialize>(&self, object_name: &str, data: &T) -> Result<Document> {
        let descriptor = CallDescriptor::post(format!("sobjects/{object_name}")).json_body(data)?;
        self.call(descriptor).await
    }

    /// Update an existing record's fields by id.
    pub async fn update<T: Serialize>(
        &self,
        object_name: &str,
        object_id: &str,
        data: &T,
    ) -> Result<Document> {
        let descriptor = CallDescriptor::patch(format!("sobjects/{object_name}/{object_id}"))
            .json_body(data)?;
        self.call(descriptor).await
    }

    /// Delete a record by id.
    pub async fn delete(&self, object_name: &str, object_id: &str) -> Result<Document> {
        self.call(CallDescriptor::delete(format!(
            "sobjects/{object_name}/{object_id}"
        )))
        .await
    }

    /// Retrieve a record by the value of an external-id field.
    pub async fn get_external(
        &self,
        object_name: &str,
        external_id_field: &str,
        external_id: &str,
        fields: Option<&[&str]>,
    ) -> Result<Document> {
        let mut descriptor = CallDescriptor::get(format!(
            "sobjects/{object_name}/{external_id_field}/{external_id}"
        ));
        if let Some(fields) = fields {
            descriptor = descriptor.param("fields", fields.join(","));
        }
        self.call(descriptor).await
    }

    /// Create or update a record keyed by an external-id field.
    ///
    /// When the external id is not unique, Salesforce answers 300 with the
    /// list of matching records; that is a successful outcome for this call
    /// and the list is returned as the document.
    pub async fn upsert_external<T: Serialize>(
        &self,
        object_name: &str,
        external_id_field: &str,
        external_id: &str,
        data: &T,
    ) -> Result<Document> {
        let descriptor = CallDescriptor::patch(format!(
            "sobjects/{object_name}/{external_id_field}/{external_id}"
        ))
        .json_body(data)?;
        self.call(descriptor).await
    }

    /// Delete a record keyed by an external-id field.
    pub async fn delete_external(
        &self,
        object_name: &str,
        external_id_field: &str,
        external_id: &str,
    ) -> Result<Document> {
        self.call(CallDescriptor::delete(format!(
            "sobjects/{object_name}/{external_id_field}/{external_id}"
        )))
        .await
    }
}
