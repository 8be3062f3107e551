use axum::{
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{error::ApiError, AppState};
use crate::budget::HealthReport;
use crate::commands::{gen_command, CommandDefinition, GenOptions, InteractionReply, MessagePayload};
use crate::events::Event;
use crate::orchestrator::{CampaignRequest, DashboardSnapshot, RunState};
use crate::policy::PlatformConstraints;
use crate::workflow::Persona;

#[derive(Debug, Deserialize)]
pub struct CampaignBody {
    goal: String,
    platform: String,
    #[serde(default)]
    persona: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonaBody {
    persona: String,
}

#[derive(Debug, Deserialize)]
pub struct GenBody {
    persona: String,
    platform: String,
    #[serde(default)]
    style: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostWindowQuery {
    #[serde(default = "default_timezone")]
    timezone: String,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionBody {
    custom_id: String,
}

async fn health() -> ResponseJson<Value> {
    ResponseJson(json!({ "status": "ok" }))
}

async fn snapshot(State(state): State<AppState>) -> ResponseJson<DashboardSnapshot> {
    ResponseJson(state.orchestrator.snapshot())
}

async fn start_campaign(
    State(state): State<AppState>,
    Json(body): Json<CampaignBody>,
) -> Result<ResponseJson<Vec<Event>>, ApiError> {
    let mut request = CampaignRequest::new(body.goal, body.platform.parse()?);
    if let Some(persona) = body.persona {
        request = request.with_persona(persona.parse()?);
    }
    let outcome = state.orchestrator.run_campaign(request).await?;
    Ok(ResponseJson(outcome.events))
}

async fn set_persona(
    State(state): State<AppState>,
    Json(body): Json<PersonaBody>,
) -> Result<ResponseJson<RunState>, ApiError> {
    let persona: Persona = body.persona.parse()?;
    Ok(ResponseJson(state.orchestrator.set_persona(persona)))
}

async fn record_conversion(State(state): State<AppState>) -> ResponseJson<HealthReport> {
    ResponseJson(state.orchestrator.record_conversion())
}

async fn constraints(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> ResponseJson<PlatformConstraints> {
    ResponseJson(state.orchestrator.policy().constraints_for_name(&platform))
}

async fn post_window(
    State(state): State<AppState>,
    Query(query): Query<PostWindowQuery>,
) -> ResponseJson<Value> {
    let window = state.orchestrator.policy().post_window(&query.timezone);
    ResponseJson(json!({ "timezone": query.timezone, "window": window }))
}

async fn call_tool(
    State(state): State<AppState>,
    Path(tool): Path<String>,
    Json(arguments): Json<Value>,
) -> Result<ResponseJson<Value>, ApiError> {
    Ok(ResponseJson(state.tools.dispatch(&tool, arguments)?))
}

async fn gen_definition() -> ResponseJson<CommandDefinition> {
    ResponseJson(gen_command())
}

async fn gen(
    State(state): State<AppState>,
    Json(body): Json<GenBody>,
) -> Result<ResponseJson<MessagePayload>, ApiError> {
    let options = GenOptions::parse(&body.persona, &body.platform, body.style.as_deref())?;
    Ok(ResponseJson(state.commands.handle_gen(options).await?))
}

async fn interaction(
    State(state): State<AppState>,
    Json(body): Json<InteractionBody>,
) -> Result<ResponseJson<InteractionReply>, ApiError> {
    Ok(ResponseJson(
        state.commands.handle_interaction(&body.custom_id).await?,
    ))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/snapshot", get(snapshot))
        .route("/api/campaigns", post(start_campaign))
        .route("/api/persona", put(set_persona))
        .route("/api/conversions", post(record_conversion))
        .route("/api/constraints/{platform}", get(constraints))
        .route("/api/post-window", get(post_window))
        .route("/api/tools/{tool}", post(call_tool))
        .route("/api/commands/gen", get(gen_definition).post(gen))
        .route("/api/commands/interactions", post(interaction))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::artifacts::ArtifactStore;
    use crate::budget::SharedBudgetTracker;
    use crate::commands::{CommandService, InMemoryRunCardStore};
    use crate::generation::GenerationPolicy;
    use crate::mcp::GenesisMcpServer;
    use crate::memory::{MemoryConfig, MemoryStore};
    use crate::orchestrator::{Orchestrator, OrchestratorConfig};

    fn app(workspace: &TempDir) -> Router {
        let budget = SharedBudgetTracker::default();
        let memory = MemoryStore::seeded(MemoryConfig::default());
        let orchestrator = Arc::new(Orchestrator::new(
            OrchestratorConfig::default(),
            budget.clone(),
            GenerationPolicy::new().with_simulated_latency(Duration::ZERO),
        ));
        let commands = Arc::new(CommandService::new(
            orchestrator.clone(),
            Arc::new(InMemoryRunCardStore::new()),
            ArtifactStore::new(workspace.path()),
            memory.clone(),
        ));
        router(AppState {
            orchestrator,
            commands,
            tools: GenesisMcpServer::new(memory, budget),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let workspace = TempDir::new().unwrap();
        let (status, body) = send(&app(&workspace), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_campaign_then_snapshot() {
        let workspace = TempDir::new().unwrap();
        let app = app(&workspace);

        let (status, events) = send(
            &app,
            "POST",
            "/api/campaigns",
            Some(json!({ "goal": "Launch", "platform": "TikTok", "persona": "Streamer" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events[0]["type"], "SUCCESS");
        assert_eq!(events[0]["agent"], "Orchestrator");

        let (status, snapshot) = send(&app, "GET", "/api/snapshot", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["runState"]["step"], "COMPLETE");
        assert_eq!(snapshot["runState"]["activePersona"], "Streamer");
        assert!((snapshot["metrics"]["gpuCost"].as_f64().unwrap() - 0.04).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_campaign_rejects_unknown_platform() {
        let workspace = TempDir::new().unwrap();
        let (status, body) = send(
            &app(&workspace),
            "POST",
            "/api/campaigns",
            Some(json!({ "goal": "Launch", "platform": "MySpace" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidPlatform");
    }

    #[tokio::test]
    async fn test_set_persona() {
        let workspace = TempDir::new().unwrap();
        let (status, state) = send(
            &app(&workspace),
            "PUT",
            "/api/persona",
            Some(json!({ "persona": "ContentManager" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state["activePersona"], "ContentManager");
    }

    #[tokio::test]
    async fn test_conversion_returns_health() {
        let workspace = TempDir::new().unwrap();
        let (status, report) = send(&app(&workspace), "POST", "/api/conversions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["status"], "HEALTHY");
        assert_eq!(report["metrics"]["bookedCalls"], 1);
    }

    #[tokio::test]
    async fn test_constraints_lookup() {
        let workspace = TempDir::new().unwrap();
        let app = app(&workspace);

        let (status, body) = send(&app, "GET", "/api/constraints/TikTok", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], "9:16");
        assert_eq!(body["safeZones"]["bottom"], "20%");

        let (status, body) = send(&app, "GET", "/api/constraints/MySpace", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["format"], "1:1");
        assert_eq!(body["pacing"], "Standard");
    }

    #[tokio::test]
    async fn test_post_window() {
        let workspace = TempDir::new().unwrap();
        let app = app(&workspace);

        let (status, body) = send(&app, "GET", "/api/post-window?timezone=Europe/Berlin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timezone"], "Europe/Berlin");
        assert_eq!(body["window"], "10:00 AM - 1:00 PM EST");

        let (_, body) = send(&app, "GET", "/api/post-window", None).await;
        assert_eq!(body["timezone"], "America/New_York");
    }

    #[tokio::test]
    async fn test_gen_command_definition() {
        let workspace = TempDir::new().unwrap();
        let (status, body) = send(&app(&workspace), "GET", "/api/commands/gen", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "gen");
        assert_eq!(body["options"][0]["name"], "persona");
        assert_eq!(body["options"][0]["required"], true);
        assert_eq!(body["options"][0]["type"], 3);
    }

    #[tokio::test]
    async fn test_tool_dispatch() {
        let workspace = TempDir::new().unwrap();
        let app = app(&workspace);

        let (status, hits) = send(
            &app,
            "POST",
            "/api/tools/read_memory",
            Some(json!({ "query": "tiktok hook", "topK": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits[0]["content"], "TikTok hook rule: Start with motion.");

        let (status, body) = send(&app, "POST", "/api/tools/nope", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Tool nope not found");
    }

    #[tokio::test]
    async fn test_gen_and_button_flow() {
        let workspace = TempDir::new().unwrap();
        let app = app(&workspace);

        let (status, message) = send(
            &app,
            "POST",
            "/api/commands/gen",
            Some(json!({ "persona": "Ruby", "platform": "X", "style": "WIKI" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message["embeds"][0]["title"], "Genesis Run Card");
        let custom_id = message["components"][1]["components"][2]["custom_id"]
            .as_str()
            .unwrap()
            .to_string();

        let (status, reply) = send(
            &app,
            "POST",
            "/api/commands/interactions",
            Some(json!({ "customId": custom_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["type"], "update");
        assert_eq!(
            reply["data"]["components"][1]["components"][2]["label"],
            "Output: NARRATIVE"
        );

        let (status, body) = send(
            &app,
            "POST",
            "/api/commands/interactions",
            Some(json!({ "customId": "gen:cost:missing" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "RunNotFound");
    }
}
