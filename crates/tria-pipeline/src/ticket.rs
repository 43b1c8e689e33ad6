use serde_json::Value;

use crate::TriageError;

/// Session identifier used when the inbound payload carries no ticket id.
pub const PLACEHOLDER_SESSION_ID: &str = "test-session";

#[derive(Debug, Clone, PartialEq)]
/// The inbound support request. Immutable after parsing.
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub customer_email: Option<String>,
}

impl Ticket {
    /// Subject and body joined with a blank line; the text every downstream
    /// stage operates on.
    pub fn description(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

/// Extracts the ticket from the raw invocation payload. The payload is either
/// the ticket object itself or an envelope whose `body` field is a
/// JSON-encoded string of it.
pub fn parse_ticket(event: &Value) -> Result<Ticket, TriageError> {
    let decoded;
    let payload = match event.get("body") {
        Some(Value::String(raw)) => {
            decoded = serde_json::from_str::<Value>(raw)
                .map_err(|_| TriageError::Validation)?;
            &decoded
        }
        _ => event,
    };

    let id = payload
        .get("ticketId")
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .unwrap_or(PLACEHOLDER_SESSION_ID)
        .to_string();
    let subject = string_field(payload, "ticketSubject");
    let body = string_field(payload, "ticketBody");
    let customer_email = payload
        .get("customerEmail")
        .and_then(Value::as_str)
        .map(str::to_string);

    if subject.is_empty() || body.is_empty() {
        return Err(TriageError::Validation);
    }

    Ok(Ticket {
        id,
        subject,
        body,
        customer_email,
    })
}

fn string_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
