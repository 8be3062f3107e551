//! Run artifact storage.
//!
//! Copy packs and saved workflows are written under
//! `<workspace>/artifacts/<run_id>/`. The workspace defaults to `/workspace`
//! and can be overridden through configuration or `WORKSPACE_DIR`.

mod store;

pub use store::{ArtifactError, ArtifactResult, ArtifactStore};

/// Artifact settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Root under which the `artifacts/` directory is created
    pub workspace_dir: std::path::PathBuf,
}

/// Fallback workspace when neither configuration nor `WORKSPACE_DIR` set one.
pub const DEFAULT_WORKSPACE_DIR: &str = "/workspace";

impl Default for ArtifactConfig {
    fn default() -> Self {
        let workspace_dir = std::env::var_os("WORKSPACE_DIR")
            .filter(|value| !value.is_empty())
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_WORKSPACE_DIR));
        Self { workspace_dir }
    }
}

impl ArtifactConfig {
    pub fn with_workspace_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.workspace_dir = dir.into();
        self
    }

    /// Store rooted at the configured workspace.
    pub fn store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.workspace_dir)
    }
}
