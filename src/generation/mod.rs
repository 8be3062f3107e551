//! Generation collaborator and the timeout/retry policy wrapped around it.
//!
//! The orchestrator never calls a [`GenerationClient`] directly; it goes
//! through [`submit_with_retry`], which bounds every attempt with the policy
//! timeout and retries with a linear backoff.

mod client;
mod policy;

pub use client::{
    GenerationClient, GenerationError, GenerationOutput, GenerationRequest,
    SimulatedGenerationClient,
};
pub use policy::GenerationPolicy;

use crate::error::{GenesisError, GenesisResult};

/// Submit a request, retrying failed or timed-out attempts.
pub async fn submit_with_retry(
    client: &dyn GenerationClient,
    request: &GenerationRequest,
    policy: &GenerationPolicy,
) -> GenesisResult<GenerationOutput> {
    let attempts = policy.attempts();
    let timeout = policy.request_timeout();
    let mut last_error = None;

    for attempt in 1..=attempts {
        let result = match tokio::time::timeout(timeout, client.submit(request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(timeout)),
        };

        match result {
            Ok(output) => {
                if attempt > 1 {
                    tracing::info!(attempt, job_id = %output.job_id, "Generation succeeded after retry");
                }
                return Ok(output);
            }
            Err(err) => {
                tracing::warn!(attempt, attempts, error = %err, "Generation attempt failed");
                last_error = Some(err);
            }
        }

        if attempt < attempts {
            tokio::time::sleep(policy.backoff_after(attempt)).await;
        }
    }

    let reason = last_error
        .map(|err| err.to_string())
        .unwrap_or_else(|| "no attempt was made".to_string());
    tracing::error!(attempts, %reason, "Generation failed");
    Err(GenesisError::Generation { attempts, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::workflow::{Persona, VisualEngineer};

    struct FlakyClient {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl GenerationClient for FlakyClient {
        async fn submit(&self, _request: &GenerationRequest) -> Result<GenerationOutput, GenerationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(GenerationError::Unavailable(format!("call {call} refused")))
            } else {
                Ok(GenerationOutput {
                    job_id: format!("job-{call}"),
                    assets: Vec::new(),
                })
            }
        }
    }

    struct HangingClient;

    #[async_trait]
    impl GenerationClient for HangingClient {
        async fn submit(&self, _request: &GenerationRequest) -> Result<GenerationOutput, GenerationError> {
            std::future::pending().await
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            persona: Persona::Ruby,
            prompt: "prompt".to_string(),
            workflow: VisualEngineer::new().construct_workflow(Persona::Ruby, "prompt"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let client = FlakyClient {
            failures: 2,
            calls: AtomicU32::new(0),
        };
        let policy = GenerationPolicy::new().with_max_attempts(3);

        let output = submit_with_retry(&client, &request(), &policy).await.unwrap();

        assert_eq!(output.job_id, "job-3");
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let client = FlakyClient {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        };
        let policy = GenerationPolicy::new().with_max_attempts(2);

        let err = submit_with_retry(&client, &request(), &policy)
            .await
            .unwrap_err();

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        match err {
            GenesisError::Generation { attempts, reason } => {
                assert_eq!(attempts, 2);
                assert!(reason.contains("call 2 refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_request_times_out() {
        let policy = GenerationPolicy::new()
            .with_max_attempts(1)
            .with_request_timeout(Duration::from_secs(2));

        let err = submit_with_retry(&HangingClient, &request(), &policy)
            .await
            .unwrap_err();

        match err {
            GenesisError::Generation { attempts, reason } => {
                assert_eq!(attempts, 1);
                assert!(reason.contains("timed out"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
