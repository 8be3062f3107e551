use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_MAX_EVENTS;
use crate::workflow::Persona;

/// Copy placed on generated overlays unless configured otherwise.
pub const DEFAULT_OVERLAY_COPY: &str = "Join the Manifestation Quantum Jump";

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Persona active when the orchestrator is created
    pub default_persona: Persona,
    /// Text rendered by the ad overlay step
    pub overlay_copy: String,
    /// Events kept in the log; older ones are dropped
    pub max_events: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_persona: Persona::Ruby,
            overlay_copy: DEFAULT_OVERLAY_COPY.to_string(),
            max_events: DEFAULT_MAX_EVENTS,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_persona(mut self, persona: Persona) -> Self {
        self.default_persona = persona;
        self
    }

    pub fn with_overlay_copy(mut self, copy: impl Into<String>) -> Self {
        self.overlay_copy = copy.into();
        self
    }

    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = max_events;
        self
    }
}
