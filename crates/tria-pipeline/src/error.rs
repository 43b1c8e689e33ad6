use thiserror::Error;

/// Exact client-error body for tickets missing required fields.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing 'ticketSubject' or 'ticketBody' in input";

#[derive(Debug, Error)]
/// Enumerates supported `TriageError` values.
pub enum TriageError {
    /// Required ticket fields missing or empty. Surfaced as a 400; never
    /// forwarded to the dead-letter queue.
    #[error("Missing 'ticketSubject' or 'ticketBody' in input")]
    Validation,
    /// Required configuration absent when a path that needs it is reached.
    #[error("{0}")]
    Configuration(String),
    /// The classifier returned a confidence that cannot be read as a number.
    #[error("invalid classification confidence: {0}")]
    Classification(String),
    /// Any failure from detection, translation, agent invocation, or the
    /// notification publish. Not distinguished by subtype.
    #[error("{0}")]
    Upstream(String),
}

impl From<tria_lang::LangError> for TriageError {
    fn from(error: tria_lang::LangError) -> Self {
        Self::Upstream(error.to_string())
    }
}

impl From<tria_agents::AgentError> for TriageError {
    fn from(error: tria_agents::AgentError) -> Self {
        Self::Upstream(error.to_string())
    }
}

impl From<tria_notify::NotifyError> for TriageError {
    fn from(error: tria_notify::NotifyError) -> Self {
        Self::Upstream(error.to_string())
    }
}
