//! Decoded response payloads.
//!
//! Salesforce serves the same resources as JSON or XML depending on content
//! negotiation. [`Document`] is the single decoded shape the rest of the
//! library works against, so callers never branch on the wire format
//! themselves.

use crate::error::{Error, ErrorKind, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// A decoded response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Empty body (e.g. 204 No Content).
    Null,
    /// Decoded JSON document.
    Json(serde_json::Value),
    /// Decoded XML document.
    Xml(XmlElement),
}

impl Document {
    /// Returns true if this is the null document.
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    /// Borrow the JSON value, if this is a JSON document.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Document::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the document and return the JSON value, if JSON.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Document::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the XML root element, if this is an XML document.
    pub fn as_xml(&self) -> Option<&XmlElement> {
        match self {
            Document::Xml(element) => Some(element),
            _ => None,
        }
    }

    /// Look up a key on a JSON object document.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.as_json().and_then(|value| value.get(key))
    }
}

/// A parsed XML element: local name, concatenated text content, and child
/// elements in document order. Namespace prefixes are stripped, matching how
/// Salesforce response elements are addressed by local name.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Local element name (namespace prefix stripped).
    pub name: String,
    /// Concatenated text and CDATA content.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn empty(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Parse an XML document and return its root element.
    pub fn parse(input: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    stack.push(XmlElement::empty(name));
                }
                Ok(Event::Empty(start)) => {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    let element = XmlElement::empty(name);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Text(text)) => {
                    if let Some(element) = stack.last_mut() {
                        let unescaped = text.unescape().map_err(Error::from)?;
                        element.text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(cdata)) => {
                    if let Some(element) = stack.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack.pop().ok_or_else(|| {
                        Error::new(ErrorKind::Xml("unbalanced closing tag".to_string()))
                    })?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Ok(Event::Eof) => {
                    return Err(Error::new(ErrorKind::Xml(
                        "unexpected end of document".to_string(),
                    )));
                }
                Ok(_) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Find the first child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All child elements with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Text content of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_str())
    }

    /// Search the whole subtree (depth-first) for an element with the given
    /// local name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}
