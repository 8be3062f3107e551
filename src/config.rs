//! Layered configuration.
//!
//! Sources, lowest precedence first: built-in defaults, `genesis.toml` in the
//! working directory (or an explicit `--config` file), then environment
//! variables of the form `GENESIS__<SECTION>__<KEY>`.

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifacts::ArtifactConfig;
use crate::budget::BudgetConfig;
use crate::error::{GenesisError, GenesisResult};
use crate::generation::GenerationPolicy;
use crate::memory::MemoryConfig;
use crate::orchestrator::OrchestratorConfig;

const DEFAULT_CONFIG_FILE: &str = "genesis";
const ENV_PREFIX: &str = "GENESIS";
const ENV_SEPARATOR: &str = "__";

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    pub budget: BudgetConfig,
    pub generation: GenerationPolicy,
    pub orchestrator: OrchestratorConfig,
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    pub memory: MemoryConfig,
}

impl GenesisConfig {
    /// Load configuration. An explicit path must exist; the default
    /// `genesis.toml` is optional.
    pub fn load(path: Option<&Path>) -> GenesisResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: GenesisConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;

        tracing::debug!(?path, "Loaded configuration");
        Ok(config)
    }

    /// Reject values the ledger cannot account with.
    pub fn validate(&self) -> GenesisResult<()> {
        self.budget
            .validate()
            .map_err(|(key, value)| GenesisError::InvalidConfig {
                key: format!("budget.{key}"),
                reason: format!("must be a finite non-negative number, got {value}"),
            })
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
