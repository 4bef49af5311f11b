//! Typed metadata components.
//!
//! Each builder produces the metadata XML fragment for one component,
//! tagged with the `xsi:type` the Metadata API dispatches on.

use crate::envelope::escape;

/// A metadata component that can serialize itself into an operation body.
pub trait MetadataXml {
    /// The component's `xsi:type` name, e.g. `CustomObject`.
    fn type_name(&self) -> &'static str;

    /// The inner elements of the component, without the wrapping tag.
    fn fields_xml(&self) -> String;

    /// Serialize as `<tns:{tag} xsi:type="tns:{type}">...</tns:{tag}>`.
    fn to_xml(&self, tag: &str) -> String {
        format!(
            r#"<tns:{tag} xsi:type="tns:{ty}">{fields}</tns:{tag}>"#,
            tag = tag,
            ty = self.type_name(),
            fields = self.fields_xml()
        )
    }
}

/// Custom component API names carry a `__c` suffix.
fn ensure_custom_suffix(name: &str) -> String {
    if name.ends_with("__c") {
        name.to_string()
    } else {
        format!("{name}__c")
    }
}

/// A custom object definition with its required name field.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomObject {
    pub full_name: String,
    pub label: String,
    pub plural_label: String,
    pub name_field: String,
    pub name_field_label: String,
    pub name_field_type: String,
    pub deployment_status: String,
    pub sharing_model: String,
}

impl CustomObject {
    /// Build a custom object with the fields Salesforce requires for
    /// creation. The object and name-field API names get the `__c` suffix
    /// when missing.
    pub fn new(
        object_name: impl Into<String>,
        label: impl Into<String>,
        plural_label: impl Into<String>,
        name_field: impl Into<String>,
        name_field_label: impl Into<String>,
    ) -> Self {
        Self {
            full_name: ensure_custom_suffix(&object_name.into()),
            label: label.into(),
            plural_label: plural_label.into(),
            name_field: ensure_custom_suffix(&name_field.into()),
            name_field_label: name_field_label.into(),
            name_field_type: "Text".to_string(),
            deployment_status: "Deployed".to_string(),
            sharing_model: "ReadWrite".to_string(),
        }
    }

    pub fn with_name_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.name_field_type = field_type.into();
        self
    }

    pub fn with_deployment_status(mut self, status: impl Into<String>) -> Self {
        self.deployment_status = status.into();
        self
    }

    pub fn with_sharing_model(mut self, model: impl Into<String>) -> Self {
        self.sharing_model = model.into();
        self
    }
}

impl MetadataXml for CustomObject {
    fn type_name(&self) -> &'static str {
        "CustomObject"
    }

    fn fields_xml(&self) -> String {
        format!(
            "<tns:fullName>{}</tns:fullName>\
             <tns:label>{}</tns:label>\
             <tns:pluralLabel>{}</tns:pluralLabel>\
             <tns:deploymentStatus>{}</tns:deploymentStatus>\
             <tns:sharingModel>{}</tns:sharingModel>\
             <tns:nameField>\
               <tns:fullName>{}</tns:fullName>\
               <tns:type>{}</tns:type>\
               <tns:label>{}</tns:label>\
             </tns:nameField>",
            escape(&self.full_name),
            escape(&self.label),
            escape(&self.plural_label),
            escape(&self.deployment_status),
            escape(&self.sharing_model),
            escape(&self.name_field),
            escape(&self.name_field_type),
            escape(&self.name_field_label),
        )
    }
}

/// A custom field on an object.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomField {
    pub full_name: String,
    pub label: String,
    pub field_type: String,
    pub length: Option<u32>,
    pub external_id: bool,
}

impl CustomField {
    /// Build a Text field of length 255. The field API name gets the `__c`
    /// suffix when missing; the full name is `Object.Field__c`.
    pub fn new(
        object_name: impl Into<String>,
        field_name: impl Into<String>,
        field_label: impl Into<String>,
    ) -> Self {
        let field_name = ensure_custom_suffix(&field_name.into());
        Self {
            full_name: format!("{}.{}", object_name.into(), field_name),
            label: field_label.into(),
            field_type: "Text".to_string(),
            length: Some(255),
            external_id: false,
        }
    }

    /// Change the field type. Length only applies to Text fields and is
    /// dropped for other types.
    pub fn with_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = field_type.into();
        if self.field_type != "Text" {
            self.length = None;
        }
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn as_external_id(mut self) -> Self {
        self.external_id = true;
        self
    }
}

impl MetadataXml for CustomField {
    fn type_name(&self) -> &'static str {
        "CustomField"
    }

    fn fields_xml(&self) -> String {
        let length = self
            .length
            .filter(|_| self.field_type == "Text")
            .map(|length| format!("<tns:length>{length}</tns:length>"))
            .unwrap_or_default();
        format!(
            "<tns:fullName>{}</tns:fullName>\
             <tns:label>{}</tns:label>\
             <tns:type>{}</tns:type>\
             {}\
             <tns:externalId>{}</tns:externalId>",
            escape(&self.full_name),
            escape(&self.label),
            escape(&self.field_type),
            length,
            self.external_id,
        )
    }
}

/// One field-level permission entry inside a [`PermissionSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPermission {
    pub field: String,
    pub editable: bool,
    pub readable: bool,
}

/// A permission set granting field-level access.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionSet {
    pub full_name: String,
    pub label: String,
    pub field_permissions: Vec<FieldPermission>,
}

impl PermissionSet {
    pub fn new(full_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            label: label.into(),
            field_permissions: Vec::new(),
        }
    }

    /// Grant access to `Object.Field`.
    pub fn with_field_permission(
        mut self,
        object_name: &str,
        field_name: &str,
        editable: bool,
        readable: bool,
    ) -> Self {
        self.field_permissions.push(FieldPermission {
            field: format!("{object_name}.{field_name}"),
            editable,
            readable,
        });
        self
    }
}

impl MetadataXml for PermissionSet {
    fn type_name(&self) -> &'static str {
        "PermissionSet"
    }

    fn fields_xml(&self) -> String {
        let permissions = self
            .field_permissions
            .iter()
            .map(|permission| {
                format!(
                    "<tns:fieldPermissions>\
                       <tns:field>{}</tns:field>\
                       <tns:editable>{}</tns:editable>\
                       <tns:readable>{}</tns:readable>\
                     </tns:fieldPermissions>",
                    escape(&permission.field),
                    permission.editable,
                    permission.readable,
                )
            })
            .collect::<String>();
        format!(
            "<tns:fullName>{}</tns:fullName><tns:label>{}</tns:label>{}",
            escape(&self.full_name),
            escape(&self.label),
            permissions,
        )
    }
}
