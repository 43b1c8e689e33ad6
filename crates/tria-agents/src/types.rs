use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates supported `AgentError` values.
pub enum AgentError {
    #[error("missing agent identifier")]
    MissingAgentId,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("agent runtime returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq)]
/// One agent invocation: which agent, under which session, with what input.
pub struct AgentInvocation {
    pub agent_id: String,
    pub alias_id: String,
    pub session_id: String,
    pub input_text: String,
}

/// Decoded agent output. Agents are asked for JSON but are free to ignore
/// that; non-JSON output is an expected shape, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    Structured(Map<String, Value>),
    Raw(String),
}

impl AgentOutput {
    /// Decodes concatenated agent output: a JSON object passes through,
    /// anything else is wrapped as raw text.
    pub fn decode(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Self::Structured(map),
            _ => Self::Raw(text),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Structured(map) => map.get(key),
            Self::Raw(_) => None,
        }
    }

    /// Text of a string-valued field, with `raw_response` resolving to the
    /// raw text when the output was not JSON.
    pub fn field_str(&self, key: &str) -> Option<&str> {
        match self {
            Self::Structured(map) => map.get(key).and_then(Value::as_str),
            Self::Raw(text) if key == "raw_response" => Some(text.as_str()),
            Self::Raw(_) => None,
        }
    }
}

#[async_trait]
/// Trait contract for agent invocation behavior.
pub trait AgentClient: Send + Sync {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentOutput, AgentError>;
}
