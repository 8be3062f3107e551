use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::budget::{FinancialMetrics, HealthReport};
use crate::events::Event;
use crate::policy::Platform;
use crate::workflow::Persona;

/// Stage of the current campaign invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStep {
    #[default]
    Init,
    Planning,
    Generating,
    Complete,
    /// Generation failed after all retries.
    Failed,
}

impl CampaignStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStep::Init => "INIT",
            CampaignStep::Planning => "PLANNING",
            CampaignStep::Generating => "GENERATING",
            CampaignStep::Complete => "COMPLETE",
            CampaignStep::Failed => "FAILED",
        }
    }

    /// Whether the invocation has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CampaignStep::Complete | CampaignStep::Failed)
    }
}

impl fmt::Display for CampaignStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the orchestrator's campaign, mutated in place by each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunState {
    pub id: String,
    pub active_persona: Persona,
    pub campaign_goal: String,
    pub platform: Platform,
    pub step: CampaignStep,
    /// Generation cost charged during the current invocation
    pub budget_used: f64,
}

impl RunState {
    pub fn new(persona: Persona) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            active_persona: persona,
            campaign_goal: "Idle".to_string(),
            platform: Platform::Instagram,
            step: CampaignStep::Init,
            budget_used: 0.0,
        }
    }
}

/// Read-only view polled by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub run_state: RunState,
    /// Newest first
    pub events: Vec<Event>,
    pub metrics: FinancialMetrics,
    pub health: HealthReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_state() {
        let state = RunState::new(Persona::Streamer);
        assert_eq!(state.step, CampaignStep::Init);
        assert_eq!(state.campaign_goal, "Idle");
        assert_eq!(state.platform, Platform::Instagram);
        assert_eq!(state.active_persona, Persona::Streamer);
        assert_eq!(state.budget_used, 0.0);
        assert!(Uuid::parse_str(&state.id).is_ok());
    }

    #[test]
    fn test_step_serialization() {
        assert_eq!(serde_json::to_value(CampaignStep::Generating).unwrap(), "GENERATING");
        let value = serde_json::to_value(RunState::new(Persona::Ruby)).unwrap();
        assert_eq!(value["step"], "INIT");
        assert_eq!(value["activePersona"], "Ruby");
    }

    #[test]
    fn test_terminal_steps() {
        assert!(CampaignStep::Complete.is_terminal());
        assert!(CampaignStep::Failed.is_terminal());
        assert!(!CampaignStep::Generating.is_terminal());
    }
}
