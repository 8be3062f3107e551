//! Campaign orchestrator: sequences planning, generation and completion for a
//! campaign and feeds the resulting costs back into the ledger.

mod config;
mod runner;
mod state;

pub use self::config::{OrchestratorConfig, DEFAULT_OVERLAY_COPY};
pub use runner::{CampaignOutcome, CampaignRequest, Orchestrator};
pub use state::{CampaignStep, DashboardSnapshot, RunState};
