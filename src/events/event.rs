use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Component names that emit events.
pub mod agents {
    pub const ORCHESTRATOR: &str = "Orchestrator";
    pub const PLATFORM_CULTURE: &str = "PlatformCulture";
    pub const CFO: &str = "CFO";
    pub const VISUAL_ENGINEER: &str = "VisualEngineer";
}

/// Event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Info,
    Action,
    Success,
    Error,
    Finance,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Info => "INFO",
            EventType::Action => "ACTION",
            EventType::Success => "SUCCESS",
            EventType::Error => "ERROR",
            EventType::Finance => "FINANCE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable campaign log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// RFC 3339 timestamp with millisecond precision (UTC)
    pub timestamp: String,
    pub agent: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Event {
    /// Create a new event stamped with the current time.
    pub fn new(agent: impl Into<String>, event_type: EventType, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            agent: agent.into(),
            event_type,
            message: message.into(),
            metadata: None,
        }
    }

    /// Attach structured metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// `HH:MM:SS` part of the timestamp, for console rendering.
    pub fn clock_time(&self) -> &str {
        self.timestamp
            .split_once('T')
            .and_then(|(_, time)| time.split('.').next())
            .unwrap_or(&self.timestamp)
    }
}
