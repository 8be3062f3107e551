//! Campaign state machine.
//!
//! A run walks `INIT -> PLANNING -> GENERATING -> COMPLETE` in one call and
//! emits an event at every transition. Runs are serialized by `run_guard`;
//! the run state, event log and ledger each sit behind their own short-lived
//! locks so the dashboard can poll while a run waits on generation.

use serde::Serialize;
use serde_json::json;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;

use super::config::OrchestratorConfig;
use super::state::{CampaignStep, DashboardSnapshot, RunState};
use crate::budget::{CostKind, HealthReport, SharedBudgetTracker};
use crate::error::GenesisResult;
use crate::events::{agents, Event, EventLog, EventType};
use crate::generation::{
    submit_with_retry, GenerationClient, GenerationOutput, GenerationPolicy, GenerationRequest,
    SimulatedGenerationClient,
};
use crate::policy::{Platform, PlatformConstraints, PlatformPolicy};
use crate::workflow::{AdOverlay, Persona, VisualEngineer, Workflow};

/// Parameters of one campaign invocation.
#[derive(Debug, Clone)]
pub struct CampaignRequest {
    pub goal: String,
    pub platform: Platform,
    /// Persona to activate before running; keeps the current one when `None`
    pub persona: Option<Persona>,
}

impl CampaignRequest {
    pub fn new(goal: impl Into<String>, platform: Platform) -> Self {
        Self {
            goal: goal.into(),
            platform,
            persona: None,
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignOutcome {
    pub persona: Persona,
    pub platform: Platform,
    pub constraints: PlatformConstraints,
    pub workflow: Workflow,
    pub overlay: AdOverlay,
    pub generation: GenerationOutput,
    /// Full event log after the run, newest first
    pub events: Vec<Event>,
}

/// Campaign orchestrator owning the run state, event log and ledger handle.
pub struct Orchestrator {
    state: RwLock<RunState>,
    run_guard: Mutex<()>,
    events: EventLog,
    budget: SharedBudgetTracker,
    policy: PlatformPolicy,
    engineer: VisualEngineer,
    generator: Arc<dyn GenerationClient>,
    generation: GenerationPolicy,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create an orchestrator backed by the simulated generation service.
    pub fn new(
        config: OrchestratorConfig,
        budget: SharedBudgetTracker,
        generation: GenerationPolicy,
    ) -> Self {
        let generator = Arc::new(SimulatedGenerationClient::new(
            generation.simulated_latency(),
        ));
        Self {
            state: RwLock::new(RunState::new(config.default_persona)),
            run_guard: Mutex::new(()),
            events: EventLog::with_capacity(config.max_events),
            budget,
            policy: PlatformPolicy::new(),
            engineer: VisualEngineer::new(),
            generator,
            generation,
            config,
        }
    }

    /// Replace the generation collaborator.
    pub fn with_generator(mut self, generator: Arc<dyn GenerationClient>) -> Self {
        self.generator = generator;
        self
    }

    /// Run a campaign for the active persona and return the event log.
    pub async fn start_campaign(
        &self,
        goal: impl Into<String>,
        platform: Platform,
    ) -> GenesisResult<Vec<Event>> {
        let outcome = self
            .run_campaign(CampaignRequest::new(goal, platform))
            .await?;
        Ok(outcome.events)
    }

    /// Run a campaign and return everything it produced.
    pub async fn run_campaign(&self, request: CampaignRequest) -> GenesisResult<CampaignOutcome> {
        let _guard = self.run_guard.lock().await;
        let CampaignRequest {
            goal,
            platform,
            persona,
        } = request;

        let (run_id, persona) = self.update_state(|state| {
            if let Some(persona) = persona {
                state.active_persona = persona;
            }
            state.campaign_goal = goal.clone();
            state.platform = platform;
            state.step = CampaignStep::Planning;
            state.budget_used = 0.0;
            (state.id.clone(), state.active_persona)
        });
        let _cancel = CancelGuard { orchestrator: self };
        tracing::info!(%run_id, %platform, %persona, "Starting campaign");

        self.emit(
            agents::ORCHESTRATOR,
            EventType::Info,
            format!("Starting campaign: \"{goal}\" for {platform}"),
        );
        self.budget
            .record_human_time(self.budget.config().setup_minutes);

        self.emit(
            agents::PLATFORM_CULTURE,
            EventType::Action,
            format!("Analyzing constraints for {platform}"),
        );
        let constraints = self.policy.constraints(platform);
        self.emit(
            agents::PLATFORM_CULTURE,
            EventType::Success,
            format!(
                "Constraints loaded: {}",
                constraints.safe_zones.to_json_string()
            ),
        );

        // Advisory only: the workflow below is the same either way.
        let health = self.budget.health_report();
        if !health.status.is_healthy() {
            self.events.push(
                Event::new(
                    agents::CFO,
                    EventType::Action,
                    "Budget tight. Switching Visual Engineer to minimalist mode.",
                )
                .with_metadata(json!({
                    "effectiveHourlyRate": health.metrics.effective_hourly_rate,
                    "recommendation": health.recommendation,
                })),
            );
        }

        self.set_step(CampaignStep::Generating);
        self.emit(
            agents::VISUAL_ENGINEER,
            EventType::Action,
            format!("Constructing ComfyUI workflow for persona: {persona}"),
        );

        let workflow = self.engineer.construct_workflow(persona, &goal);
        let generation_request = GenerationRequest {
            persona,
            prompt: goal.clone(),
            workflow: workflow.clone(),
        };
        let generation =
            match submit_with_retry(self.generator.as_ref(), &generation_request, &self.generation)
                .await
            {
                Ok(output) => output,
                Err(err) => {
                    self.emit(
                        agents::VISUAL_ENGINEER,
                        EventType::Error,
                        format!("Generation failed: {err}"),
                    );
                    self.set_step(CampaignStep::Failed);
                    return Err(err);
                }
            };

        let cost = workflow.metadata.estimated_cost;
        self.budget.record_cost(CostKind::Gpu, cost);
        self.update_state(|state| state.budget_used += cost);
        self.events.push(
            Event::new(
                agents::VISUAL_ENGINEER,
                EventType::Success,
                format!(
                    "Workflow built using {}. Cost: ${}",
                    workflow.metadata.engine, cost
                ),
            )
            .with_metadata(json!({
                "jobId": generation.job_id,
                "assets": generation.assets,
            })),
        );

        let overlay = self
            .engineer
            .generate_ad_overlay(&constraints, &self.config.overlay_copy);
        self.emit(
            agents::VISUAL_ENGINEER,
            EventType::Info,
            "Generated overlay respecting safe zones.",
        );

        self.set_step(CampaignStep::Complete);
        self.emit(
            agents::ORCHESTRATOR,
            EventType::Success,
            "Campaign assets ready for deployment.",
        );
        tracing::info!(%run_id, cost, "Campaign complete");

        Ok(CampaignOutcome {
            persona,
            platform,
            constraints,
            workflow,
            overlay,
            generation,
            events: self.events.snapshot(),
        })
    }

    /// Select the persona used by subsequent runs.
    pub fn set_persona(&self, persona: Persona) -> RunState {
        self.update_state(|state| {
            state.active_persona = persona;
            state.clone()
        })
    }

    /// Record a booked call and log it as a finance event.
    pub fn record_conversion(&self) -> HealthReport {
        self.budget.record_conversion();
        let report = self.budget.health_report();
        self.emit(
            agents::CFO,
            EventType::Finance,
            format!(
                "Booked call logged. Revenue estimate: ${:.2}",
                report.metrics.revenue_est
            ),
        );
        report
    }

    /// Copy of the current run state.
    pub fn run_state(&self) -> RunState {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Copy of the event log, newest first.
    pub fn events(&self) -> Vec<Event> {
        self.events.snapshot()
    }

    pub fn health_report(&self) -> HealthReport {
        self.budget.health_report()
    }

    /// Everything the dashboard polls, in one read.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let health = self.budget.health_report();
        DashboardSnapshot {
            run_state: self.run_state(),
            events: self.events.snapshot(),
            metrics: health.metrics.clone(),
            health,
        }
    }

    pub fn budget(&self) -> &SharedBudgetTracker {
        &self.budget
    }

    pub fn policy(&self) -> &PlatformPolicy {
        &self.policy
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    fn emit(&self, agent: &str, event_type: EventType, message: impl Into<String>) -> Event {
        self.events.push(Event::new(agent, event_type, message))
    }

    fn set_step(&self, step: CampaignStep) {
        self.update_state(|state| state.step = step);
    }

    fn update_state<T>(&self, f: impl FnOnce(&mut RunState) -> T) -> T {
        match self.state.write() {
            Ok(mut state) => f(&mut state),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

/// Fails the run if its future is dropped before reaching a terminal step.
struct CancelGuard<'a> {
    orchestrator: &'a Orchestrator,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        let cancelled = self.orchestrator.update_state(|state| {
            if state.step.is_terminal() {
                return false;
            }
            state.step = CampaignStep::Failed;
            true
        });
        if cancelled {
            tracing::warn!("Campaign dropped before completion");
            self.orchestrator
                .emit(agents::ORCHESTRATOR, EventType::Error, "Campaign cancelled");
        }
    }
}
