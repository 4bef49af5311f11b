//! Client-side record validation against describe metadata.
//!
//! Pure helpers operating on JSON describe documents as returned by the
//! describe endpoints. Not a full reimplementation of server-side rules;
//! they catch the common rejections (non-writable fields, restricted
//! picklists, missing required fields, unknown field names) before a call
//! is spent.

use std::collections::BTreeMap;

use serde_json::Value;

fn flag(field: &Value, name: &str) -> bool {
    field.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Validate one field value against its field-describe entry. Returns the
/// list of violated rules, empty when the value passes.
pub fn validate_field(value: Option<&Value>, field: &Value, new_record: bool) -> Vec<String> {
    let mut errors = Vec::new();
    let present = value.is_some_and(|v| !v.is_null());

    if new_record {
        if !flag(field, "createable") && present {
            errors.push("Cannot create this field".to_string());
        }
    } else if !flag(field, "updateable") && present {
        errors.push("Cannot update this field".to_string());
    }

    if present && flag(field, "restrictedPicklist") {
        let allowed: Vec<&Value> = field
            .get("picklistValues")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| flag(entry, "active"))
                    .filter_map(|entry| entry.get("value"))
                    .collect()
            })
            .unwrap_or_default();
        if let Some(value) = value {
            if !allowed.contains(&value) {
                errors.push("Bad value for restricted picklist field".to_string());
            }
        }
    }

    let field_type = field.get("type").and_then(Value::as_str).unwrap_or("");
    if new_record
        && !present
        && !flag(field, "nillable")
        && !flag(field, "defaultedOnCreate")
        && field_type != "boolean"
    {
        errors.push("This field is required".to_string());
    }

    errors
}

/// Validate a record's data against an object's full describe. Returns
/// `(is_valid, errors)` with errors keyed by field name; unknown field
/// names in the data are themselves errors.
pub fn validate_object(
    data: &Value,
    object_description: &Value,
    new_record: bool,
) -> (bool, BTreeMap<String, Vec<String>>) {
    let mut errors = BTreeMap::new();

    let fields = object_description
        .get("fields")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut known = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(name) = field.get("name").and_then(Value::as_str) else {
            continue;
        };
        known.push(name);
        let field_errors = validate_field(data.get(name), field, new_record);
        if !field_errors.is_empty() {
            errors.insert(name.to_string(), field_errors);
        }
    }

    if let Some(map) = data.as_object() {
        for name in map.keys() {
            if !known.contains(&name.as_str()) {
                errors.insert(name.clone(), vec!["Field name not found".to_string()]);
            }
        }
    }

    (errors.is_empty(), errors)
}
