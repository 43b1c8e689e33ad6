use serde_json::{json, Value};
use tria_agents::TicketCategory;

use crate::MISSING_FIELDS_MESSAGE;

/// Message returned with fallback outcomes.
pub const FALLBACK_MESSAGE: &str = "Low confidence score. Manual review needed.";

#[derive(Debug, Clone, PartialEq)]
/// The two non-error results of a triage run. Both map to a 200.
pub enum TriageOutcome {
    Success {
        ticket_id: String,
        customer_email: Option<String>,
        category: TicketCategory,
        confidence: f64,
        language: String,
        reply: String,
    },
    /// Classifier confidence too low to act on automatically. A first-class
    /// outcome, not an error.
    Fallback {
        classification: String,
        confidence: f64,
    },
}

impl TriageOutcome {
    pub fn to_body(&self) -> Value {
        match self {
            Self::Success {
                ticket_id,
                customer_email,
                category,
                confidence,
                language,
                reply,
            } => json!({
                "status": "success",
                "ticketId": ticket_id,
                "customerEmail": customer_email,
                "category": category.as_str(),
                "confidence": confidence,
                "language": language,
                "agent_used": category.as_str(),
                "reply": reply,
            }),
            Self::Fallback {
                classification,
                confidence,
            } => json!({
                "status": "fallback",
                "message": FALLBACK_MESSAGE,
                "classification": classification,
                "confidence": confidence,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Transport-neutral result of one handled invocation, produced by the
/// pipeline's top-level boundary.
pub enum TriageResponse {
    /// 200-equivalent: success or fallback body.
    Completed(TriageOutcome),
    /// 400-equivalent: the exact plain-text validation message.
    InvalidRequest(&'static str),
    /// 500-equivalent: `{"error": message}`.
    Failed { message: String },
}

impl TriageResponse {
    pub fn invalid_request() -> Self {
        Self::InvalidRequest(MISSING_FIELDS_MESSAGE)
    }
}
