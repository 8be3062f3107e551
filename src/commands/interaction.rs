use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::gen_command::GenOptions;
use super::render::MessagePayload;
use super::run_card::{Artifact, CopyPack, RunBudgetStatus, RunCard, GOAL_BOOKED_CALLS};
use super::store::RunCardStore;
use crate::artifacts::ArtifactStore;
use crate::error::{GenesisError, GenesisResult};
use crate::memory::MemoryStore;
use crate::orchestrator::{CampaignRequest, Orchestrator};

const COMMAND_NAMESPACE: &str = "gen";
const COPY_PACK_FILE: &str = "copy_pack.txt";
const WORKFLOW_FILE: &str = "workflow.json";

/// Parsed button id: `gen:<action>:<run_id>[:<arg>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomId {
    pub action: String,
    pub run_id: String,
    pub arg: Option<String>,
}

impl CustomId {
    /// Parse a custom id. Returns `Ok(None)` for ids outside the `gen`
    /// namespace.
    pub fn parse(raw: &str) -> GenesisResult<Option<Self>> {
        let mut parts = raw.splitn(4, ':');
        if parts.next() != Some(COMMAND_NAMESPACE) {
            return Ok(None);
        }

        let action = parts.next().filter(|part| !part.is_empty());
        let run_id = parts.next().filter(|part| !part.is_empty());
        match (action, run_id) {
            (Some(action), Some(run_id)) => Ok(Some(Self {
                action: action.to_string(),
                run_id: run_id.to_string(),
                arg: parts.next().map(str::to_string),
            })),
            _ => Err(GenesisError::InvalidCustomId(raw.to_string())),
        }
    }
}

/// What the chat surface should do in response to a button press.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum InteractionReply {
    /// Private reply visible only to the presser
    Ephemeral(String),
    /// Replace the original card message
    Update(MessagePayload),
    /// Not addressed to this surface
    Ignored,
}

/// Handles `/gen` and its run-card buttons.
pub struct CommandService {
    orchestrator: Arc<Orchestrator>,
    runs: Arc<dyn RunCardStore>,
    artifacts: ArtifactStore,
    memory: MemoryStore,
    /// Serializes read-modify-write of a single card
    card_locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CommandService {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        runs: Arc<dyn RunCardStore>,
        artifacts: ArtifactStore,
        memory: MemoryStore,
    ) -> Self {
        Self {
            orchestrator,
            runs,
            artifacts,
            memory,
            card_locks: StdMutex::new(HashMap::new()),
        }
    }

    /// Run a booked-calls campaign and return its card message.
    pub async fn handle_gen(&self, options: GenOptions) -> GenesisResult<MessagePayload> {
        let run_id = Uuid::new_v4().to_string();
        tracing::info!(%run_id, persona = %options.persona, platform = %options.platform, "Handling /gen");

        let outcome = self
            .orchestrator
            .run_campaign(
                CampaignRequest::new(GOAL_BOOKED_CALLS, options.platform).with_persona(options.persona),
            )
            .await?;

        let copy_pack = CopyPack::booked_calls();
        let copy_path = self.artifacts.write_text(
            &run_id,
            COPY_PACK_FILE,
            &copy_pack.to_text(options.persona, options.platform, options.style),
        )?;

        let card = RunCard {
            run_id,
            persona: options.persona,
            platform: options.platform,
            goal: GOAL_BOOKED_CALLS.to_string(),
            budget_status: RunBudgetStatus::from_report(&self.orchestrator.health_report()),
            output_style: options.style,
            artifacts: vec![Artifact {
                label: "Copy Pack (txt)".to_string(),
                path: copy_path,
            }],
            copy_pack: Some(copy_pack),
            rating: None,
            workflow: Some(outcome.workflow),
        };
        let payload = MessagePayload::with_artifacts(&card);
        self.runs.put(card).await?;
        Ok(payload)
    }

    /// Handle a button press by its custom id.
    pub async fn handle_interaction(&self, custom_id: &str) -> GenesisResult<InteractionReply> {
        let Some(id) = CustomId::parse(custom_id)? else {
            return Ok(InteractionReply::Ignored);
        };
        let lock = self.card_lock(&id.run_id);
        let _held = lock.lock().await;
        let Some(mut card) = self.runs.get(&id.run_id).await? else {
            self.release_card_lock(&id.run_id);
            return Err(GenesisError::RunNotFound(id.run_id.clone()));
        };
        tracing::debug!(run_id = %card.run_id, action = %id.action, "Handling run card action");

        let reply = match id.action.as_str() {
            "variate" => queued("Variate", &id),
            "upscale" => queued("Upscale", &id),
            "save" => {
                let path = self.artifacts.write_json(&card.run_id, WORKFLOW_FILE, &card.workflow)?;
                let message = format!("💾 Workflow saved for run {} to {}.", card.run_id, path.display());
                card.attach(Artifact {
                    label: "Workflow (json)".to_string(),
                    path,
                });
                self.runs.put(card).await?;
                InteractionReply::Ephemeral(message)
            }
            "copypack" => {
                let sections = card.copy_pack.as_ref().map(CopyPack::sections).unwrap_or_default();
                if sections.is_empty() {
                    InteractionReply::Ephemeral("No copy pack yet.".to_string())
                } else {
                    InteractionReply::Ephemeral(sections.join("\n\n"))
                }
            }
            "rate" => self.rate(card, &id, custom_id).await?,
            "cost" => InteractionReply::Ephemeral(self.orchestrator.health_report().format()),
            "style" => {
                card.output_style = card.output_style.toggled();
                let payload = MessagePayload::for_run(&card);
                self.runs.put(card).await?;
                InteractionReply::Update(payload)
            }
            _ => InteractionReply::Ephemeral("Unknown action.".to_string()),
        };
        Ok(reply)
    }

    async fn rate(&self, mut card: RunCard, id: &CustomId, raw: &str) -> GenesisResult<InteractionReply> {
        let rating = id
            .arg
            .as_deref()
            .and_then(|arg| arg.parse::<u8>().ok())
            .filter(|rating| (1..=5).contains(rating))
            .ok_or_else(|| GenesisError::InvalidCustomId(raw.to_string()))?;
        card.rating = Some(rating);

        let content = format!(
            "{} run on {} for {} rated {}/5.",
            card.persona, card.platform, card.goal, rating
        );
        let evidence = json!({ "rating": rating, "runId": card.run_id });
        let remembered = self.memory.write(&content, "performance", Some(evidence)).is_ok();
        self.runs.put(card).await?;

        let suffix = if remembered { "Saved to memory." } else { "Logged." };
        Ok(InteractionReply::Ephemeral(format!("⭐ Rated {rating}/5. {suffix}")))
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    fn card_lock(&self, run_id: &str) -> Arc<Mutex<()>> {
        let mut locks = match self.card_locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(locks.entry(run_id.to_string()).or_default())
    }

    fn release_card_lock(&self, run_id: &str) {
        let mut locks = match self.card_locks.lock() {
            Ok(locks) => locks,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.remove(run_id);
    }
}

fn queued(what: &str, id: &CustomId) -> InteractionReply {
    let message = match &id.arg {
        Some(arg) => format!("✅ {} queued for run {} ({}).", what, id.run_id, arg),
        None => format!("✅ {} queued for run {}.", what, id.run_id),
    };
    InteractionReply::Ephemeral(message)
}
