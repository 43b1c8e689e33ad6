use tria_agents::AgentOutput;

/// Substituted when the specialist's output carries no usable reply field.
pub const GENERIC_ACKNOWLEDGMENT: &str =
    "Thank you for reaching out. We will assist you shortly.";

/// Extracts the human-readable reply from a specialist's output: `reply`,
/// then `message`, then `raw_response`, then the generic acknowledgment.
/// Empty strings do not count as present. Literal backslash-n sequences are
/// repaired into real newlines.
pub fn extract_reply(output: &AgentOutput) -> String {
    let text = non_empty(output.field_str("reply"))
        .or_else(|| non_empty(output.field_str("message")))
        .or_else(|| non_empty(output.field_str("raw_response")))
        .unwrap_or(GENERIC_ACKNOWLEDGMENT);

    text.replace("\\n", "\n")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
