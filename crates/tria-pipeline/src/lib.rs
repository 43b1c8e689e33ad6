//! Core library surface for the tria decision pipeline crate.
mod classifier;
mod error;
mod notification;
mod outcome;
mod pipeline;
mod reply;
mod ticket;

pub use classifier::{
    classification_prompt, verdict_from_output, ClassificationVerdict, CONFIDENCE_THRESHOLD,
};
pub use error::{TriageError, MISSING_FIELDS_MESSAGE};
pub use notification::compose_notification;
pub use outcome::{TriageOutcome, TriageResponse, FALLBACK_MESSAGE};
pub use pipeline::TriagePipeline;
pub use reply::{extract_reply, GENERIC_ACKNOWLEDGMENT};
pub use ticket::{parse_ticket, Ticket, PLACEHOLDER_SESSION_ID};
