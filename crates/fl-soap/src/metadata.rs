//! Metadata CRUD operations and their result types.

use forcelink_client::XmlElement;

use crate::client::MetadataClient;
use crate::envelope::escape;
use crate::error::{Error, ErrorKind, Result};
use crate::objects::MetadataXml;

/// The outcome of a save-style metadata operation (create/update/delete/
/// rename) for a single component.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveResult {
    pub full_name: String,
    pub success: bool,
    pub errors: Vec<SaveError>,
}

/// One error entry inside a failed [`SaveResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveError {
    pub status_code: String,
    pub message: String,
}

impl SaveResult {
    fn from_element(element: &XmlElement) -> Self {
        let errors = element
            .children_named("errors")
            .map(|error| SaveError {
                status_code: error
                    .child_text("statusCode")
                    .unwrap_or_default()
                    .to_string(),
                message: error.child_text("message").unwrap_or_default().to_string(),
            })
            .collect();
        Self {
            full_name: element
                .child_text("fullName")
                .unwrap_or_default()
                .to_string(),
            success: element.child_text("success") == Some("true"),
            errors,
        }
    }
}

/// A component returned by `listMetadata`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataComponent {
    pub full_name: String,
    pub id: Option<String>,
    pub file_name: Option<String>,
    pub created_by_name: Option<String>,
    pub created_date: Option<String>,
    pub last_modified_by_name: Option<String>,
    pub last_modified_date: Option<String>,
    pub namespace_prefix: Option<String>,
}

impl MetadataComponent {
    fn from_element(element: &XmlElement) -> Option<Self> {
        let owned = |name: &str| element.child_text(name).map(str::to_string);
        Some(Self {
            full_name: element.child_text("fullName")?.to_string(),
            id: owned("id"),
            file_name: owned("fileName"),
            created_by_name: owned("createdByName"),
            created_date: owned("createdDate"),
            last_modified_by_name: owned("lastModifiedByName"),
            last_modified_date: owned("lastModifiedDate"),
            namespace_prefix: owned("namespacePrefix"),
        })
    }
}

fn save_results(response: &XmlElement) -> Vec<SaveResult> {
    response
        .children_named("result")
        .map(SaveResult::from_element)
        .collect()
}

impl MetadataClient {
    /// Create several metadata components in one call.
    pub async fn create_many(&self, objects: &[&dyn MetadataXml]) -> Result<Vec<SaveResult>> {
        let body = format!(
            "<tns:createMetadata>{}</tns:createMetadata>",
            objects
                .iter()
                .map(|object| object.to_xml("metadata"))
                .collect::<String>()
        );
        let response = self
            .call("createMetadata", &body, "createMetadataResponse")
            .await?;
        Ok(save_results(&response))
    }

    /// Create one metadata component, returning its full name. A
    /// `success=false` result raises an operation-failed error aggregating
    /// every `statusCode: message` pair.
    pub async fn create(&self, object: &dyn MetadataXml) -> Result<String> {
        let results = self.create_many(&[object]).await?;
        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| Error::new(ErrorKind::InvalidResponse("empty save result".into())))?;
        if !result.success {
            let message = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.status_code, e.message))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::new(ErrorKind::OperationFailed {
                message,
                errors: result.errors,
            }));
        }
        Ok(result.full_name)
    }

    /// Read several components of one type; returns the raw record elements.
    pub async fn read_many(
        &self,
        metadata_type: &str,
        full_names: &[&str],
    ) -> Result<Vec<XmlElement>> {
        let names = full_names
            .iter()
            .map(|name| format!("<tns:fullNames>{}</tns:fullNames>", escape(name)))
            .collect::<String>();
        let body = format!(
            "<tns:readMetadata><tns:type>{}</tns:type>{}</tns:readMetadata>",
            escape(metadata_type),
            names
        );
        let response = self
            .call("readMetadata", &body, "readMetadataResponse")
            .await?;
        Ok(response
            .children_named("result")
            .flat_map(|result| result.children_named("records"))
            .cloned()
            .collect())
    }

    /// Read one component of one type.
    pub async fn read(&self, metadata_type: &str, full_name: &str) -> Result<Option<XmlElement>> {
        Ok(self
            .read_many(metadata_type, &[full_name])
            .await?
            .into_iter()
            .next())
    }

    /// Update several metadata components.
    pub async fn update_many(&self, objects: &[&dyn MetadataXml]) -> Result<Vec<SaveResult>> {
        let body = format!(
            "<tns:updateMetadata>{}</tns:updateMetadata>",
            objects
                .iter()
                .map(|object| object.to_xml("metadata"))
                .collect::<String>()
        );
        let response = self
            .call("updateMetadata", &body, "updateMetadataResponse")
            .await?;
        Ok(save_results(&response))
    }

    /// Update one metadata component.
    pub async fn update(&self, object: &dyn MetadataXml) -> Result<Vec<SaveResult>> {
        self.update_many(&[object]).await
    }

    /// Delete several components of one type by full name.
    pub async fn delete_many(
        &self,
        metadata_type: &str,
        full_names: &[&str],
    ) -> Result<Vec<SaveResult>> {
        let names = full_names
            .iter()
            .map(|name| format!("<tns:fullNames>{}</tns:fullNames>", escape(name)))
            .collect::<String>();
        let body = format!(
            "<tns:deleteMetadata><tns:type>{}</tns:type>{}</tns:deleteMetadata>",
            escape(metadata_type),
            names
        );
        let response = self
            .call("deleteMetadata", &body, "deleteMetadataResponse")
            .await?;
        Ok(save_results(&response))
    }

    /// Delete one component of one type by full name.
    pub async fn delete(&self, metadata_type: &str, full_name: &str) -> Result<Vec<SaveResult>> {
        self.delete_many(metadata_type, &[full_name]).await
    }

    /// Rename a component.
    pub async fn rename(
        &self,
        metadata_type: &str,
        old_full_name: &str,
        new_full_name: &str,
    ) -> Result<Vec<SaveResult>> {
        let body = format!(
            "<tns:renameMetadata><tns:type>{}</tns:type><tns:oldFullName>{}</tns:oldFullName><tns:newFullName>{}</tns:newFullName></tns:renameMetadata>",
            escape(metadata_type),
            escape(old_full_name),
            escape(new_full_name)
        );
        let response = self
            .call("renameMetadata", &body, "renameMetadataResponse")
            .await?;
        Ok(save_results(&response))
    }

    /// List the components of a metadata type at the client's API version.
    pub async fn list(&self, metadata_type: &str) -> Result<Vec<MetadataComponent>> {
        let body = format!(
            "<tns:listMetadata><tns:queries><tns:type>{}</tns:type></tns:queries><tns:asOfVersion>{}</tns:asOfVersion></tns:listMetadata>",
            escape(metadata_type),
            self.api_version()
        );
        let response = self
            .call("listMetadata", &body, "listMetadataResponse")
            .await?;
        Ok(response
            .children_named("result")
            .filter_map(MetadataComponent::from_element)
            .collect())
    }
}
