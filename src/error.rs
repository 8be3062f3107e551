//! Crate-wide error type.

use thiserror::Error;

use crate::artifacts::ArtifactError;

/// Errors surfaced by the orchestrator, command surface and tool server.
#[derive(Error, Debug)]
pub enum GenesisError {
    /// Platform name not recognised.
    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    /// Persona name not recognised.
    #[error("Invalid persona: {0}")]
    InvalidPersona(String),

    /// Output style not recognised.
    #[error("Invalid output style: {0}")]
    InvalidOutputStyle(String),

    /// Button custom id could not be parsed.
    #[error("Invalid custom id: {0}")]
    InvalidCustomId(String),

    /// Run card lookup failed.
    #[error("Run {0} not found (maybe restarted)")]
    RunNotFound(String),

    /// Tool name not recognised by the tool server.
    #[error("Tool {0} not found")]
    ToolNotFound(String),

    /// Tool arguments did not match the tool's schema.
    #[error("Invalid arguments for tool {tool}: {reason}")]
    InvalidToolArguments { tool: String, reason: String },

    /// Generation collaborator failed after all attempts.
    #[error("Generation failed after {attempts} attempt(s): {reason}")]
    Generation { attempts: u32, reason: String },

    /// Artifact persistence failed.
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration loaded but holds an unusable value.
    #[error("Invalid config value {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenesisError {
    /// Whether the error was caused by caller input rather than a collaborator.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            GenesisError::InvalidPlatform(_)
                | GenesisError::InvalidPersona(_)
                | GenesisError::InvalidOutputStyle(_)
                | GenesisError::InvalidCustomId(_)
                | GenesisError::InvalidToolArguments { .. }
        )
    }

    /// Whether the error is a failed lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GenesisError::RunNotFound(_) | GenesisError::ToolNotFound(_)
        )
    }
}

/// Result type used across the crate.
pub type GenesisResult<T> = Result<T, GenesisError>;
