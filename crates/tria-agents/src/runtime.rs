use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::json;
use tracing::info;

use crate::{AgentClient, AgentError, AgentInvocation, AgentOutput};

#[derive(Debug, Clone)]
/// Configuration for the agent runtime HTTP client.
pub struct AgentRuntimeConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// HTTP client for the conversational-agent runtime. One invocation maps to
/// one POST whose response body is a finite stream of byte chunks.
pub struct AgentRuntimeClient {
    client: reqwest::Client,
    config: AgentRuntimeConfig,
}

impl AgentRuntimeClient {
    pub fn new(config: AgentRuntimeConfig) -> Result<Self, AgentError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn invoke_url(&self, agent_id: &str, alias_id: &str) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/agents/{agent_id}/aliases/{alias_id}/invoke")
    }
}

#[async_trait]
impl AgentClient for AgentRuntimeClient {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentOutput, AgentError> {
        if invocation.agent_id.trim().is_empty() || invocation.alias_id.trim().is_empty() {
            return Err(AgentError::MissingAgentId);
        }

        info!(agent_id = %invocation.agent_id, "invoking agent");

        let url = self.invoke_url(&invocation.agent_id, &invocation.alias_id);
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "sessionId": invocation.session_id,
                "inputText": invocation.input_text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(AgentError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        // The completion arrives as byte chunks; accumulate them in arrival
        // order into one UTF-8 string before decoding.
        let mut stream = response.bytes_stream();
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            buffer.extend_from_slice(chunk.as_ref());
        }
        let text = String::from_utf8(buffer).map_err(|error| {
            AgentError::InvalidResponse(format!("invalid UTF-8 in agent completion: {error}"))
        })?;

        info!(agent_id = %invocation.agent_id, "agent raw output: {text}");
        Ok(AgentOutput::decode(text))
    }
}
