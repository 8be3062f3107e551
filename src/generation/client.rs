//! Generation service collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::workflow::{Persona, Workflow};

/// A workflow submitted for generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub persona: Persona,
    pub prompt: String,
    pub workflow: Workflow,
}

/// Result of a completed generation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub job_id: String,
    /// Asset identifiers produced by the job
    pub assets: Vec<String>,
}

/// Errors reported by a generation service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Request did not finish within the policy timeout.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    /// Service could not be reached or refused the job.
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
}

/// External image/video generation service.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Submit a workflow and wait for its assets.
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationOutput, GenerationError>;
}

/// Stand-in for the generation service: waits for a fixed latency and
/// reports a single placeholder asset.
#[derive(Debug, Clone)]
pub struct SimulatedGenerationClient {
    latency: Duration,
}

impl SimulatedGenerationClient {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGenerationClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

#[async_trait]
impl GenerationClient for SimulatedGenerationClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<GenerationOutput, GenerationError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let job_id = format!("sim-{}", Uuid::new_v4());
        let asset = format!(
            "{}/{}.png",
            job_id,
            request.workflow.metadata.engine.trim_end_matches(".safetensors")
        );
        Ok(GenerationOutput {
            job_id,
            assets: vec![asset],
        })
    }
}
