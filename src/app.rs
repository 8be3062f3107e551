//! Wiring of the shared services from configuration.

use std::sync::Arc;

use crate::api::AppState;
use crate::budget::SharedBudgetTracker;
use crate::commands::{CommandService, InMemoryRunCardStore};
use crate::config::GenesisConfig;
use crate::mcp::GenesisMcpServer;
use crate::memory::MemoryStore;
use crate::orchestrator::Orchestrator;

/// One ledger, one memory and one orchestrator shared by every surface.
#[derive(Clone)]
pub struct Genesis {
    pub orchestrator: Arc<Orchestrator>,
    pub commands: Arc<CommandService>,
    pub tools: GenesisMcpServer,
    pub budget: SharedBudgetTracker,
    pub memory: MemoryStore,
}

impl Genesis {
    pub fn from_config(config: &GenesisConfig) -> Self {
        let budget = SharedBudgetTracker::new(config.budget.clone());
        let memory = MemoryStore::seeded(config.memory.clone());
        let orchestrator = Arc::new(Orchestrator::new(
            config.orchestrator.clone(),
            budget.clone(),
            config.generation.clone(),
        ));
        let commands = Arc::new(CommandService::new(
            orchestrator.clone(),
            Arc::new(InMemoryRunCardStore::new()),
            config.artifacts.store(),
            memory.clone(),
        ));
        let tools = GenesisMcpServer::new(memory.clone(), budget.clone());

        Self {
            orchestrator,
            commands,
            tools,
            budget,
            memory,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            orchestrator: self.orchestrator.clone(),
            commands: self.commands.clone(),
            tools: self.tools.clone(),
        }
    }
}
