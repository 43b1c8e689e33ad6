use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{error, info, warn};
use tria_agents::{AgentClient, AgentInvocation, AgentRegistry, TicketCategory};
use tria_lang::{LanguageDetector, Translator, WORKING_LANGUAGE};
use tria_notify::{DeadLetterSink, TopicPublisher};

use crate::{
    classification_prompt, compose_notification, extract_reply, parse_ticket, verdict_from_output,
    Ticket, TriageError, TriageOutcome, TriageResponse,
};

/// The classification-and-routing pipeline. Collaborators are injected at
/// construction and shared immutably across sequential invocations; every
/// external call completes before the next begins.
pub struct TriagePipeline {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    agents: Arc<dyn AgentClient>,
    registry: AgentRegistry,
    publisher: Option<Arc<dyn TopicPublisher>>,
    dead_letter: Option<Arc<dyn DeadLetterSink>>,
}

impl TriagePipeline {
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        agents: Arc<dyn AgentClient>,
        registry: AgentRegistry,
        publisher: Option<Arc<dyn TopicPublisher>>,
        dead_letter: Option<Arc<dyn DeadLetterSink>>,
    ) -> Self {
        Self {
            detector,
            translator,
            agents,
            registry,
            publisher,
            dead_letter,
        }
    }

    /// Handles one invocation end to end, including the top-level failure
    /// boundary. Validation failures return immediately and are never
    /// dead-lettered; every other error is logged, forwarded once to the
    /// dead-letter queue when configured, and reported as a failure.
    pub async fn handle(&self, event: &Value) -> TriageResponse {
        info!("received event: {event}");

        let ticket = match parse_ticket(event) {
            Ok(ticket) => ticket,
            Err(TriageError::Validation) => return TriageResponse::invalid_request(),
            Err(error) => return self.fail(event, error).await,
        };

        match self.run(&ticket).await {
            Ok(outcome) => TriageResponse::Completed(outcome),
            Err(error) => self.fail(event, error).await,
        }
    }

    /// The sequential decision path for one parsed ticket.
    async fn run(&self, ticket: &Ticket) -> Result<TriageOutcome, TriageError> {
        let description = ticket.description();
        info!("original ticket description: {description}");

        let detected = self.detector.detect_dominant_language(&description).await?;
        let language = detected.language_code;

        let normalized = if language != WORKING_LANGUAGE {
            info!("translating ticket from {language} to {WORKING_LANGUAGE}");
            self.translator
                .translate(&description, &language, WORKING_LANGUAGE)
                .await?
        } else {
            description
        };

        let main = self.registry.main_agent();
        let classification_output = self
            .agents
            .invoke(AgentInvocation {
                agent_id: main.agent_id.clone(),
                alias_id: main.alias_id.clone(),
                session_id: ticket.id.clone(),
                input_text: classification_prompt(&normalized),
            })
            .await?;

        let verdict = verdict_from_output(&classification_output)?;
        if !verdict.is_confident() {
            warn!(
                classification = %verdict.raw_label,
                confidence = verdict.confidence,
                "low confidence classification, returning fallback"
            );
            return Ok(TriageOutcome::Fallback {
                classification: verdict.raw_label,
                confidence: verdict.confidence,
            });
        }
        // is_confident() guarantees the category is present past the gate.
        let category = verdict
            .category
            .ok_or_else(|| TriageError::Classification("category missing past gate".to_string()))?;

        info!(category = category.as_str(), "invoking specialist agent");
        let target = self.registry.specialist(category);
        let specialist_output = self
            .agents
            .invoke(AgentInvocation {
                agent_id: target.agent_id.clone(),
                alias_id: target.alias_id.clone(),
                session_id: ticket.id.clone(),
                input_text: normalized,
            })
            .await?;

        let reply = extract_reply(&specialist_output);

        if category == TicketCategory::Custom {
            let publisher = self.publisher.as_ref().ok_or_else(|| {
                TriageError::Configuration(
                    "notification topic ARN is not configured".to_string(),
                )
            })?;
            info!("sending customer notification");
            let request = compose_notification(
                &ticket.subject,
                &reply,
                ticket.customer_email.as_deref(),
            );
            publisher.publish(request).await?;
        }

        Ok(TriageOutcome::Success {
            ticket_id: ticket.id.clone(),
            customer_email: ticket.customer_email.clone(),
            category,
            confidence: verdict.confidence,
            language,
            reply,
        })
    }

    /// The failure sink: log, best-effort forward `{error, originalEvent}`
    /// exactly once, and report the primary error. A secondary failure from
    /// the forward is logged and never replaces the primary one.
    async fn fail(&self, event: &Value, error: TriageError) -> TriageResponse {
        let message = error.to_string();
        error!("unhandled triage failure: {message}");

        if let Some(sink) = self.dead_letter.as_ref() {
            let payload = json!({
                "error": message,
                "originalEvent": event,
            });
            if let Err(forward_error) = sink.enqueue(payload).await {
                error!("failed to push to dead-letter queue: {forward_error}");
            }
        }

        TriageResponse::Failed { message }
    }
}
