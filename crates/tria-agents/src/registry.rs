use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Enumerates supported `TicketCategory` values.
pub enum TicketCategory {
    CostOptimization,
    Security,
    Alarm,
    Custom,
}

impl TicketCategory {
    /// Parses a classifier label. Labels outside the four known categories
    /// yield `None` so they can never reach a specialist lookup.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "cost_optimization" => Some(Self::CostOptimization),
            "security" => Some(Self::Security),
            "alarm" => Some(Self::Alarm),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CostOptimization => "cost_optimization",
            Self::Security => "security",
            Self::Alarm => "alarm",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Agent runtime address: agent identifier plus alias identifier.
pub struct AgentTarget {
    pub agent_id: String,
    pub alias_id: String,
}

impl AgentTarget {
    pub fn new(agent_id: impl Into<String>, alias_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            alias_id: alias_id.into(),
        }
    }
}

/// Static mapping of the five logical agents. Read-only after construction;
/// the specialist lookup is an exhaustive match, so every accepted category
/// resolves to a target by construction.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    main: AgentTarget,
    cost_optimization: AgentTarget,
    security: AgentTarget,
    alarm: AgentTarget,
    custom: AgentTarget,
}

impl AgentRegistry {
    pub fn new(
        main: AgentTarget,
        cost_optimization: AgentTarget,
        security: AgentTarget,
        alarm: AgentTarget,
        custom: AgentTarget,
    ) -> Self {
        Self {
            main,
            cost_optimization,
            security,
            alarm,
            custom,
        }
    }

    pub fn main_agent(&self) -> &AgentTarget {
        &self.main
    }

    pub fn specialist(&self, category: TicketCategory) -> &AgentTarget {
        match category {
            TicketCategory::CostOptimization => &self.cost_optimization,
            TicketCategory::Security => &self.security,
            TicketCategory::Alarm => &self.alarm,
            TicketCategory::Custom => &self.custom,
        }
    }
}
