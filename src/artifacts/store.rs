use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

const ARTIFACTS_DIR_NAME: &str = "artifacts";

/// Errors that can occur while writing run artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Run id or file name that would escape the run directory.
    #[error("Invalid run ID")]
    InvalidRunId,
}

/// Result type for artifact operations.
pub type ArtifactResult<T> = Result<T, ArtifactError>;

/// Per-run artifact directory on the local filesystem.
///
/// Files land in `<workspace>/artifacts/<run_id>/<name>` and are written via a
/// temp file plus rename so readers never observe a partial file.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: workspace_dir.into().join(ARTIFACTS_DIR_NAME),
        }
    }

    /// Write a text artifact and return its path.
    pub fn write_text(&self, run_id: &str, name: &str, content: &str) -> ArtifactResult<PathBuf> {
        let path = self.artifact_path(run_id, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &path)?;

        tracing::debug!(run_id, path = %path.display(), "Wrote artifact");
        Ok(path)
    }

    /// Write a value as pretty-printed JSON and return its path.
    pub fn write_json<T: Serialize>(&self, run_id: &str, name: &str, value: &T) -> ArtifactResult<PathBuf> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_text(run_id, name, &json)
    }

    /// Directory holding a run's artifacts.
    pub fn run_dir(&self, run_id: &str) -> ArtifactResult<PathBuf> {
        validate_component(run_id)?;
        Ok(self.root_dir.join(run_id))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn artifact_path(&self, run_id: &str, name: &str) -> ArtifactResult<PathBuf> {
        validate_component(name)?;
        Ok(self.run_dir(run_id)?.join(name))
    }
}

fn validate_component(value: &str) -> ArtifactResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(ArtifactError::InvalidRunId);
    }
    Ok(())
}
