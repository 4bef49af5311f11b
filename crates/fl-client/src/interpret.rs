//! Response interpretation.
//!
//! Salesforce signals success with different status codes per HTTP method:
//! notably, 300 Multiple Choices is a *success* for GET and PATCH on
//! external-id paths (upsert with a non-unique key returns the list of
//! matching records) and must not be classified as an error.

use crate::document::{Document, XmlElement};
use crate::error::{Error, ErrorKind, Result};

/// HTTP methods used by the Salesforce REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Response wire format, negotiated via the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// The `Accept` header value for this format.
    pub fn accept(self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "application/xml",
        }
    }
}

/// The classified result of a single HTTP round-trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Status was in the method's success set; carries the decoded body.
    Success(Document),
    /// A 4xx response with the first error entry extracted.
    ClientError {
        status: u16,
        error_code: String,
        message: String,
    },
    /// 5xx or any unexpected status; carries the raw body text.
    ServerError { status: u16, body: String },
}

/// Success status codes per HTTP method.
pub fn success_statuses(method: HttpMethod) -> &'static [u16] {
    match method {
        HttpMethod::Get => &[200, 300],
        HttpMethod::Post => &[201, 204],
        HttpMethod::Patch => &[201, 204, 300],
        HttpMethod::Delete => &[200, 204],
    }
}

/// Classify a raw response into an [`Outcome`].
///
/// A status in the method's success set decodes the body (empty body →
/// [`Document::Null`]) and yields `Success`. A 4xx extracts the first error
/// entry's code and message; a malformed or absent error body on a 4xx is a
/// defect in the remote service and propagates as a decoding error rather
/// than being swallowed. Anything else yields `ServerError` with the raw
/// body text.
pub fn interpret(
    status: u16,
    body: &str,
    method: HttpMethod,
    format: ResponseFormat,
) -> Result<Outcome> {
    if success_statuses(method).contains(&status) {
        return Ok(Outcome::Success(decode(body, format)?));
    }

    if (400..500).contains(&status) {
        let (error_code, message) = extract_error(body, format)?;
        return Ok(Outcome::ClientError {
            status,
            error_code,
            message,
        });
    }

    Ok(Outcome::ServerError {
        status,
        body: body.to_string(),
    })
}

/// Decode a body per format; an empty body decodes to the null document.
fn decode(body: &str, format: ResponseFormat) -> Result<Document> {
    if body.is_empty() {
        return Ok(Document::Null);
    }

    match format {
        ResponseFormat::Json => Ok(Document::Json(serde_json::from_str(body)?)),
        ResponseFormat::Xml => Ok(Document::Xml(XmlElement::parse(body)?)),
    }
}

/// Extract the first error entry's `(code, message)` from a 4xx body.
///
/// JSON errors arrive as an array of `{errorCode, message}` objects; XML
/// errors as a document whose first child element holds the code and message
/// as its first two text nodes, in that order.
fn extract_error(body: &str, format: ResponseFormat) -> Result<(String, String)> {
    match format {
        ResponseFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(body)?;
            let entry = value.get(0).ok_or_else(|| {
                Error::new(ErrorKind::Json(
                    "error response is not a non-empty array".to_string(),
                ))
            })?;
            let error_code = entry
                .get("errorCode")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    Error::new(ErrorKind::Json(
                        "error entry is missing errorCode".to_string(),
                    ))
                })?;
            let message = entry
                .get("message")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    Error::new(ErrorKind::Json("error entry is missing message".to_string()))
                })?;
            Ok((error_code.to_string(), message.to_string()))
        }
        ResponseFormat::Xml => {
            let root = XmlElement::parse(body)?;
            let entry = root.children.first().ok_or_else(|| {
                Error::new(ErrorKind::Xml("error response has no entries".to_string()))
            })?;
            match entry.children.as_slice() {
                [code, message, ..] => Ok((code.text.clone(), message.text.clone())),
                _ => Err(Error::new(ErrorKind::Xml(
                    "error entry is missing code/message nodes".to_string(),
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_tables_per_method() {
        assert_eq!(success_statuses(HttpMethod::Get), &[200, 300]);
        assert_eq!(success_statuses(HttpMethod::Post), &[201, 204]);
        assert_eq!(success_statuses(HttpMethod::Patch), &[201, 204, 300]);
        assert_eq!(success_statuses(HttpMethod::Delete), &[200, 204]);
    }

    #[test]
    fn test_get_200_json_decodes_body() {
        let outcome = interpret(
            200,
            r#"{"Id":"001","Name":"Acme"}"#,
            HttpMethod::Get,
            ResponseFormat::Json,
        )
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Success(Document::Json(
                serde_json::json!({"Id": "001", "Name": "Acme"})
            ))
        );
    }

    #[test]
    fn test_empty_body_decodes_to_null() {
        let outcome = interpret(204, "", HttpMethod::Patch, ResponseFormat::Json).unwrap();
        assert_eq!(outcome, Outcome::Success(Document::Null));

        let outcome = interpret(204, "", HttpMethod::Delete, ResponseFormat::Xml).unwrap();
        assert_eq!(outcome, Outcome::Success(Document::Null));
    }

    #[test]
    fn test_patch_300_multiple_matches_is_success() {
        // Upsert on a non-unique external id returns 300 with the list of
        // matching record URLs. This is a success for idempotent-key
        // operations.
        let body = r#"["/services/data/v62.0/sobjects/Account/001A","/services/data/v62.0/sobjects/Account/001B"]"#;
        let outcome = interpret(300, body, HttpMethod::Patch, ResponseFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::Success(Document::Json(_))));
    }

    #[test]
    fn test_300_is_not_success_for_post_or_delete() {
        let body = r#"[{"errorCode":"X","message":"y"}]"#;
        // 300 is outside both POST's success set and the 4xx range, so it
        // falls through to ServerError.
        let outcome = interpret(300, body, HttpMethod::Post, ResponseFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::ServerError { status: 300, .. }));
    }

    #[test]
    fn test_4xx_extracts_first_json_error_entry() {
        let body = r#"[{"errorCode":"INVALID_SESSION_ID","message":"Session expired or invalid"},{"errorCode":"OTHER","message":"second"}]"#;
        let outcome = interpret(401, body, HttpMethod::Patch, ResponseFormat::Json).unwrap();

        assert_eq!(
            outcome,
            Outcome::ClientError {
                status: 401,
                error_code: "INVALID_SESSION_ID".to_string(),
                message: "Session expired or invalid".to_string(),
            }
        );
    }

    #[test]
    fn test_4xx_extracts_xml_error_entry() {
        let body = r#"<Errors><Error><errorCode>NOT_FOUND</errorCode><message>The requested resource does not exist</message></Error></Errors>"#;
        let outcome = interpret(404, body, HttpMethod::Delete, ResponseFormat::Xml).unwrap();

        assert_eq!(
            outcome,
            Outcome::ClientError {
                status: 404,
                error_code: "NOT_FOUND".to_string(),
                message: "The requested resource does not exist".to_string(),
            }
        );
    }

    #[test]
    fn test_4xx_with_malformed_error_body_propagates_decode_failure() {
        // A 4xx without a parseable error entry is a remote-service defect;
        // it must not be silently swallowed.
        assert!(interpret(400, "", HttpMethod::Get, ResponseFormat::Json).is_err());
        assert!(interpret(400, "not json", HttpMethod::Get, ResponseFormat::Json).is_err());
        assert!(interpret(400, "{}", HttpMethod::Get, ResponseFormat::Json).is_err());
        assert!(
            interpret(400, r#"[{"message":"no code"}]"#, HttpMethod::Get, ResponseFormat::Json)
                .is_err()
        );
        assert!(interpret(400, "<Errors/>", HttpMethod::Get, ResponseFormat::Xml).is_err());
    }

    #[test]
    fn test_5xx_is_server_error_with_raw_body() {
        // Body is carried raw; a non-JSON 5xx body must not fail decoding.
        let outcome = interpret(
            503,
            "<html>Service Unavailable</html>",
            HttpMethod::Get,
            ResponseFormat::Json,
        )
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::ServerError {
                status: 503,
                body: "<html>Service Unavailable</html>".to_string(),
            }
        );
    }

    #[test]
    fn test_status_outside_success_set_for_method() {
        // 200 is a success for GET and DELETE but unexpected for POST.
        let outcome = interpret(200, "{}", HttpMethod::Post, ResponseFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::ServerError { status: 200, .. }));

        let outcome = interpret(200, "{}", HttpMethod::Delete, ResponseFormat::Json).unwrap();
        assert!(matches!(outcome, Outcome::Success(_)));
    }

    #[test]
    fn test_xml_success_decodes_document() {
        let body = "<Account><Id>001</Id><Name>Acme</Name></Account>";
        let outcome = interpret(200, body, HttpMethod::Get, ResponseFormat::Xml).unwrap();

        match outcome {
            Outcome::Success(Document::Xml(root)) => {
                assert_eq!(root.child_text("Name"), Some("Acme"));
            }
            other => panic!("expected XML success, got {other:?}"),
        }
    }

    #[test]
    fn test_accept_header_values() {
        assert_eq!(ResponseFormat::Json.accept(), "application/json");
        assert_eq!(ResponseFormat::Xml.accept(), "application/xml");
    }
}
