use serde_json::Value;
use tria_agents::{AgentOutput, TicketCategory};

use crate::TriageError;

/// Verdicts below this confidence fall back to manual review. Policy
/// constant; boundary value itself proceeds.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Builds the fixed-template instruction prompt for the routing agent.
pub fn classification_prompt(ticket_description: &str) -> String {
    format!(
        r#"
You are a support ticket classifier. Your task is to analyze the customer's issue and return a JSON response with two fields:
- category: one of ['cost_optimization', 'security', 'alarm', 'custom']
- confidence: a float between 0 and 1 representing your confidence level.

Example Output:
{{"category": "cost_optimization", "confidence": 0.9}}

Customer Ticket:
"{ticket_description}""#
    )
}

#[derive(Debug, Clone, PartialEq)]
/// The routing agent's verdict. `raw_label` keeps the classifier's literal
/// (lower-cased) category string for the fallback response.
pub struct ClassificationVerdict {
    pub category: Option<TicketCategory>,
    pub confidence: f64,
    pub raw_label: String,
}

impl ClassificationVerdict {
    /// The confidence gate: sole enforcement point keeping weak verdicts
    /// away from the specialist dispatcher.
    pub fn is_confident(&self) -> bool {
        self.category.is_some() && self.confidence >= CONFIDENCE_THRESHOLD
    }
}

/// Reads the verdict out of the main agent's output. Missing category is an
/// empty label; missing confidence is 0.0; a confidence that is neither a
/// number nor a numeric string is a type error.
pub fn verdict_from_output(output: &AgentOutput) -> Result<ClassificationVerdict, TriageError> {
    let raw_label = output
        .field_str("category")
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let category = TicketCategory::parse(&raw_label);

    let confidence = match output.field("confidence") {
        None => 0.0,
        Some(Value::Number(number)) => number.as_f64().ok_or_else(|| {
            TriageError::Classification(format!("confidence {number} is not representable"))
        })?,
        Some(Value::String(text)) => text.trim().parse::<f64>().map_err(|_| {
            TriageError::Classification(format!("confidence '{text}' is not a number"))
        })?,
        Some(other) => {
            return Err(TriageError::Classification(format!(
                "confidence has unexpected type: {other}"
            )));
        }
    };

    Ok(ClassificationVerdict {
        category,
        confidence,
        raw_label,
    })
}
