//! SOAP fault inspection.

use forcelink_client::XmlElement;

/// The fault code Salesforce uses for an expired or invalid session.
pub const INVALID_SESSION_FAULT: &str = "sf:INVALID_SESSION_ID";

/// A SOAP fault extracted from a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub fault_code: String,
    pub fault_string: String,
}

impl Fault {
    /// Whether this fault reports an expired or invalid session.
    pub fn is_invalid_session(&self) -> bool {
        self.fault_code == INVALID_SESSION_FAULT
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.fault_code, self.fault_string)
    }
}

/// Find a fault in a parsed response envelope. The lookup is structural
/// (a `Fault` element with `faultcode`/`faultstring` children) rather than
/// textual, so fault-shaped strings inside legitimate payloads cannot
/// trigger it.
pub(crate) fn find_fault(root: &XmlElement) -> Option<Fault> {
    let fault = root.find("Fault")?;
    let fault_code = fault.child_text("faultcode")?.to_string();
    let fault_string = fault
        .child_text("faultstring")
        .unwrap_or("Unknown error")
        .to_string();
    Some(Fault {
        fault_code,
        fault_string,
    })
}
