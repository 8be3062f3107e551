//! HTTP polling interface for the dashboard, plus JSON entry points for the
//! command surface and tool server.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::router;

use std::sync::Arc;

use crate::commands::CommandService;
use crate::mcp::GenesisMcpServer;
use crate::orchestrator::Orchestrator;

/// Shared handles for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub commands: Arc<CommandService>,
    pub tools: GenesisMcpServer,
}

/// Bind and serve the API until the task is cancelled.
pub async fn serve(state: AppState, bind: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "Genesis API listening");
    axum::serve(listener, router(state)).await
}
