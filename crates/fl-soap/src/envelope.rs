//! SOAP envelope construction.

use crate::METADATA_NAMESPACE;

/// Escape a string for use as XML text or attribute content.
pub(crate) fn escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}

/// Wrap an operation body in a SOAP envelope carrying the session header.
pub(crate) fn build(session_id: &str, operation_body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:tns="{ns}">
  <soapenv:Header>
    <tns:SessionHeader>
      <tns:sessionId>{session_id}</tns:sessionId>
    </tns:SessionHeader>
  </soapenv:Header>
  <soapenv:Body>
    {operation_body}
  </soapenv:Body>
</soapenv:Envelope>"#,
        ns = METADATA_NAMESPACE,
        session_id = escape(session_id),
        operation_body = operation_body,
    )
}
