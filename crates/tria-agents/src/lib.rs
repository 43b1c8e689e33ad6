//! Core library surface for the tria agent runtime crate.
mod registry;
mod runtime;
mod types;

pub use registry::{AgentRegistry, AgentTarget, TicketCategory};
pub use runtime::{AgentRuntimeClient, AgentRuntimeConfig};
pub use types::{AgentClient, AgentError, AgentInvocation, AgentOutput};
