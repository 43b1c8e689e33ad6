//! Core library surface for the tria outbound notification crate.
mod deadletter;
mod publisher;
mod types;

pub use deadletter::{DeadLetterHttpQueue, DeadLetterHttpQueueConfig};
pub use publisher::{TopicHttpPublisher, TopicHttpPublisherConfig};
pub use types::{DeadLetterSink, NotifyError, PublishRequest, TopicPublisher};
