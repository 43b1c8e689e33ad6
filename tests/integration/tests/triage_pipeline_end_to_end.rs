use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex as AsyncMutex;
use tria_agents::{
    AgentClient, AgentError, AgentInvocation, AgentOutput, AgentRegistry, AgentTarget,
};
use tria_lang::{DetectedLanguage, LangError, LanguageDetector, Translator};
use tria_notify::{DeadLetterSink, NotifyError, PublishRequest, TopicPublisher};
use tria_pipeline::{TriageOutcome, TriagePipeline, TriageResponse};

struct RecordingDetector {
    language: Option<&'static str>,
    calls: AsyncMutex<Vec<String>>,
}

impl RecordingDetector {
    fn new(language: Option<&'static str>) -> Self {
        Self {
            language,
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl LanguageDetector for RecordingDetector {
    async fn detect_dominant_language(&self, text: &str) -> Result<DetectedLanguage, LangError> {
        self.calls.lock().await.push(text.to_string());
        match self.language {
            Some(code) => Ok(DetectedLanguage {
                language_code: code.to_string(),
                score: 0.99,
            }),
            None => Err(LangError::InvalidResponse(
                "detection service exploded".to_string(),
            )),
        }
    }
}

struct RecordingTranslator {
    calls: AsyncMutex<Vec<(String, String, String)>>,
}

impl RecordingTranslator {
    fn new() -> Self {
        Self {
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl Translator for RecordingTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language_code: &str,
        target_language_code: &str,
    ) -> Result<String, LangError> {
        self.calls.lock().await.push((
            text.to_string(),
            source_language_code.to_string(),
            target_language_code.to_string(),
        ));
        Ok(format!("[{source_language_code}->{target_language_code}] {text}"))
    }
}

struct ScriptedAgent {
    outputs: AsyncMutex<VecDeque<AgentOutput>>,
    invocations: AsyncMutex<Vec<AgentInvocation>>,
}

impl ScriptedAgent {
    fn new(outputs: Vec<&str>) -> Self {
        Self {
            outputs: AsyncMutex::new(
                outputs
                    .into_iter()
                    .map(|raw| AgentOutput::decode(raw.to_string()))
                    .collect(),
            ),
            invocations: AsyncMutex::new(Vec::new()),
        }
    }

    async fn invocation_count(&self) -> usize {
        self.invocations.lock().await.len()
    }

    async fn invocation(&self, index: usize) -> AgentInvocation {
        self.invocations.lock().await[index].clone()
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    async fn invoke(&self, invocation: AgentInvocation) -> Result<AgentOutput, AgentError> {
        self.invocations.lock().await.push(invocation);
        self.outputs.lock().await.pop_front().ok_or_else(|| {
            AgentError::InvalidResponse("scripted output queue exhausted".to_string())
        })
    }
}

struct RecordingPublisher {
    requests: AsyncMutex<Vec<PublishRequest>>,
}

impl RecordingPublisher {
    fn new() -> Self {
        Self {
            requests: AsyncMutex::new(Vec::new()),
        }
    }

    async fn publish_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn request(&self, index: usize) -> PublishRequest {
        self.requests.lock().await[index].clone()
    }
}

#[async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, request: PublishRequest) -> Result<String, NotifyError> {
        self.requests.lock().await.push(request);
        Ok("m-1".to_string())
    }
}

struct RecordingDeadLetter {
    fail: bool,
    bodies: AsyncMutex<Vec<Value>>,
}

impl RecordingDeadLetter {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            bodies: AsyncMutex::new(Vec::new()),
        }
    }

    async fn enqueue_count(&self) -> usize {
        self.bodies.lock().await.len()
    }

    async fn body(&self, index: usize) -> Value {
        self.bodies.lock().await[index].clone()
    }
}

#[async_trait]
impl DeadLetterSink for RecordingDeadLetter {
    async fn enqueue(&self, message_body: Value) -> Result<(), NotifyError> {
        self.bodies.lock().await.push(message_body);
        if self.fail {
            return Err(NotifyError::InvalidResponse(
                "queue rejected the message".to_string(),
            ));
        }
        Ok(())
    }
}

fn registry() -> AgentRegistry {
    AgentRegistry::new(
        AgentTarget::new("MAIN", "AM"),
        AgentTarget::new("COST", "AC"),
        AgentTarget::new("SECU", "AS"),
        AgentTarget::new("ALRM", "AA"),
        AgentTarget::new("CUST", "AX"),
    )
}

struct Harness {
    detector: Arc<RecordingDetector>,
    translator: Arc<RecordingTranslator>,
    agent: Arc<ScriptedAgent>,
    publisher: Arc<RecordingPublisher>,
    dead_letter: Arc<RecordingDeadLetter>,
    pipeline: TriagePipeline,
}

fn harness(language: Option<&'static str>, outputs: Vec<&str>) -> Harness {
    harness_with(language, outputs, true, false)
}

fn harness_with(
    language: Option<&'static str>,
    outputs: Vec<&str>,
    with_publisher: bool,
    dead_letter_fails: bool,
) -> Harness {
    let detector = Arc::new(RecordingDetector::new(language));
    let translator = Arc::new(RecordingTranslator::new());
    let agent = Arc::new(ScriptedAgent::new(outputs));
    let publisher = Arc::new(RecordingPublisher::new());
    let dead_letter = Arc::new(RecordingDeadLetter::new(dead_letter_fails));

    let publisher_handle: Option<Arc<dyn TopicPublisher>> = if with_publisher {
        Some(Arc::clone(&publisher) as Arc<dyn TopicPublisher>)
    } else {
        None
    };

    let pipeline = TriagePipeline::new(
        Arc::clone(&detector) as Arc<dyn LanguageDetector>,
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::clone(&agent) as Arc<dyn AgentClient>,
        registry(),
        publisher_handle,
        Some(Arc::clone(&dead_letter) as Arc<dyn DeadLetterSink>),
    );

    Harness {
        detector,
        translator,
        agent,
        publisher,
        dead_letter,
        pipeline,
    }
}

fn billing_event() -> Value {
    json!({
        "ticketId": "t1",
        "ticketSubject": "Bill too high",
        "ticketBody": "My AWS bill doubled",
    })
}

#[tokio::test]
async fn confident_english_ticket_flows_to_the_specialist() {
    let harness = harness(
        Some("en"),
        vec![
            r#"{"category":"cost_optimization","confidence":0.92}"#,
            r#"{"reply":"We will review your billing."}"#,
        ],
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    let TriageResponse::Completed(TriageOutcome::Success {
        ticket_id,
        category,
        confidence,
        language,
        reply,
        ..
    }) = response
    else {
        panic!("expected a success outcome, got {response:?}");
    };
    assert_eq!(ticket_id, "t1");
    assert_eq!(category.as_str(), "cost_optimization");
    assert!((confidence - 0.92).abs() < f64::EPSILON);
    assert_eq!(language, "en");
    assert_eq!(reply, "We will review your billing.");

    // English input: no translation, and the normalized text is the exact
    // subject+body join.
    assert_eq!(harness.translator.call_count().await, 0);
    assert_eq!(harness.agent.invocation_count().await, 2);
    let main = harness.agent.invocation(0).await;
    assert_eq!(main.agent_id, "MAIN");
    assert_eq!(main.session_id, "t1");
    assert!(main.input_text.contains("Bill too high\n\nMy AWS bill doubled"));
    let specialist = harness.agent.invocation(1).await;
    assert_eq!(specialist.agent_id, "COST");
    assert_eq!(specialist.session_id, "t1");
    assert_eq!(specialist.input_text, "Bill too high\n\nMy AWS bill doubled");

    assert_eq!(harness.publisher.publish_count().await, 0);
    assert_eq!(harness.dead_letter.enqueue_count().await, 0);
}

#[tokio::test]
async fn low_confidence_short_circuits_before_dispatch() {
    let harness = harness(
        Some("en"),
        vec![r#"{"category":"security","confidence":0.4}"#],
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    assert_eq!(
        response,
        TriageResponse::Completed(TriageOutcome::Fallback {
            classification: "security".to_string(),
            confidence: 0.4,
        })
    );
    // Only the main agent ran; no specialist, no notification.
    assert_eq!(harness.agent.invocation_count().await, 1);
    assert_eq!(harness.publisher.publish_count().await, 0);
}

#[tokio::test]
async fn boundary_confidence_proceeds_to_dispatch() {
    let harness = harness(
        Some("en"),
        vec![
            r#"{"category":"alarm","confidence":0.7}"#,
            r#"{"message":"Alarm acknowledged."}"#,
        ],
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    let TriageResponse::Completed(TriageOutcome::Success { reply, .. }) = response else {
        panic!("expected a success outcome, got {response:?}");
    };
    assert_eq!(reply, "Alarm acknowledged.");
    assert_eq!(harness.agent.invocation(1).await.agent_id, "ALRM");
}

#[tokio::test]
async fn unknown_category_label_falls_back_instead_of_dispatching() {
    let harness = harness(
        Some("en"),
        vec![r#"{"category":"billing","confidence":0.99}"#],
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    assert_eq!(
        response,
        TriageResponse::Completed(TriageOutcome::Fallback {
            classification: "billing".to_string(),
            confidence: 0.99,
        })
    );
    assert_eq!(harness.agent.invocation_count().await, 1);
}

#[tokio::test]
async fn missing_fields_never_touch_an_external_service() {
    let harness = harness(Some("en"), vec![]);

    let response = harness
        .pipeline
        .handle(&json!({ "ticketSubject": "only a subject" }))
        .await;

    assert_eq!(
        response,
        TriageResponse::InvalidRequest("Missing 'ticketSubject' or 'ticketBody' in input")
    );
    assert_eq!(harness.detector.call_count().await, 0);
    assert_eq!(harness.agent.invocation_count().await, 0);
    assert_eq!(harness.dead_letter.enqueue_count().await, 0);
}

#[tokio::test]
async fn foreign_language_ticket_is_translated_before_classification() {
    let harness = harness(
        Some("es"),
        vec![
            r#"{"category":"security","confidence":0.9}"#,
            r#"{"reply":"Revisaremos su cuenta."}"#,
        ],
    );

    let event = json!({
        "ticketId": "t2",
        "ticketSubject": "Acceso extraño",
        "ticketBody": "Alguien entró en mi cuenta",
    });
    let response = harness.pipeline.handle(&event).await;

    let TriageResponse::Completed(TriageOutcome::Success { language, .. }) = response else {
        panic!("expected a success outcome, got {response:?}");
    };
    assert_eq!(language, "es");

    assert_eq!(harness.translator.call_count().await, 1);
    let specialist = harness.agent.invocation(1).await;
    assert!(specialist.input_text.starts_with("[es->en] "));
}

#[tokio::test]
async fn custom_category_publishes_exactly_one_notification() {
    let harness = harness(
        Some("en"),
        vec![
            r#"{"category":"custom","confidence":0.95}"#,
            r#"{"reply":"Your request is scheduled.\\nExpect an update soon."}"#,
        ],
    );

    let event = json!({
        "ticketId": "t3",
        "ticketSubject": "Special request",
        "ticketBody": "Please whitelist our new region",
        "customerEmail": "jo@example.com",
    });
    let response = harness.pipeline.handle(&event).await;

    let TriageResponse::Completed(TriageOutcome::Success { reply, .. }) = response else {
        panic!("expected a success outcome, got {response:?}");
    };
    assert_eq!(reply, "Your request is scheduled.\nExpect an update soon.");

    assert_eq!(harness.publisher.publish_count().await, 1);
    let request = harness.publisher.request(0).await;
    assert_eq!(request.subject, "Re: Special request");
    assert!(request.message.contains("Your request is scheduled.\nExpect an update soon."));
    assert_eq!(
        request.attributes.get("customerEmail").map(String::as_str),
        Some("jo@example.com")
    );
}

#[tokio::test]
async fn custom_category_without_a_topic_is_a_configuration_failure() {
    let harness = harness_with(
        Some("en"),
        vec![
            r#"{"category":"custom","confidence":0.95}"#,
            r#"{"reply":"ok"}"#,
        ],
        false,
        false,
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    let TriageResponse::Failed { message } = response else {
        panic!("expected a failure, got {response:?}");
    };
    assert!(message.contains("notification topic ARN is not configured"));
    // Configuration failures go through the dead-letter sink like any other
    // non-validation error.
    assert_eq!(harness.dead_letter.enqueue_count().await, 1);
}

#[tokio::test]
async fn upstream_failure_forwards_the_original_event_exactly_once() {
    let harness = harness(None, vec![]);

    let event = billing_event();
    let response = harness.pipeline.handle(&event).await;

    let TriageResponse::Failed { message } = response else {
        panic!("expected a failure, got {response:?}");
    };
    assert!(message.contains("detection service exploded"));

    assert_eq!(harness.dead_letter.enqueue_count().await, 1);
    let body = harness.dead_letter.body(0).await;
    assert_eq!(body["originalEvent"], event);
    assert!(body["error"]
        .as_str()
        .expect("error should be a string")
        .contains("detection service exploded"));
}

#[tokio::test]
async fn dead_letter_failure_never_masks_the_primary_error() {
    let harness = harness_with(None, vec![], true, true);

    let response = harness.pipeline.handle(&billing_event()).await;

    let TriageResponse::Failed { message } = response else {
        panic!("expected a failure, got {response:?}");
    };
    assert!(message.contains("detection service exploded"));
    assert_eq!(harness.dead_letter.enqueue_count().await, 1);
}

#[tokio::test]
async fn non_json_specialist_output_becomes_the_reply() {
    let harness = harness(
        Some("en"),
        vec![
            r#"{"category":"security","confidence":0.88}"#,
            "We rotated your credentials already.",
        ],
    );

    let response = harness.pipeline.handle(&billing_event()).await;

    let TriageResponse::Completed(TriageOutcome::Success { reply, .. }) = response else {
        panic!("expected a success outcome, got {response:?}");
    };
    assert_eq!(reply, "We rotated your credentials already.");
}
