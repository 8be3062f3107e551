use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::GenesisError;

/// HTTP wrapper around [`GenesisError`].
#[derive(Debug)]
pub struct ApiError(pub GenesisError);

impl From<GenesisError> for ApiError {
    fn from(err: GenesisError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            err if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            err if err.is_not_found() => StatusCode::NOT_FOUND,
            GenesisError::Generation { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match &self.0 {
            GenesisError::InvalidPlatform(_) => "InvalidPlatform",
            GenesisError::InvalidPersona(_) => "InvalidPersona",
            GenesisError::InvalidOutputStyle(_) => "InvalidOutputStyle",
            GenesisError::InvalidCustomId(_) => "InvalidCustomId",
            GenesisError::RunNotFound(_) => "RunNotFound",
            GenesisError::ToolNotFound(_) => "ToolNotFound",
            GenesisError::InvalidToolArguments { .. } => "InvalidToolArguments",
            GenesisError::Generation { .. } => "GenerationError",
            GenesisError::Artifact(_) => "ArtifactError",
            GenesisError::Config(_) | GenesisError::InvalidConfig { .. } => "ConfigError",
            GenesisError::Json(_) => "JsonError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        let body = Json(json!({
            "error": self.error_type(),
            "message": self.0.to_string(),
        }));
        (status_code, body).into_response()
    }
}
