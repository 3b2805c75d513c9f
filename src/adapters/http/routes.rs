//! Route handlers for the design API.

use super::error::ApiError;
use super::state::AppState;
use crate::domain::entities::MISSING_FIELDS_MESSAGE;
use crate::domain::{DesignResponse, DomainError, UseCase, UseCaseInfo};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of `POST /api/generate-design`. Fields are optional so missing ones become a 400.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDesignBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub use_case: Option<String>,
}

/// POST /api/generate-design
pub async fn generate_design(
    State(state): State<AppState>,
    body: Result<Json<GenerateDesignBody>, JsonRejection>,
) -> Result<Json<DesignResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection, "rejected generate-design body");
        DomainError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_string())
    })?;

    let response = state
        .design_service
        .generate_from_raw(body.prompt.as_deref(), body.use_case.as_deref())
        .await?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEnv {
    pub text_backend_configured: bool,
    pub image_backend_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub env: HealthEnv,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        env: HealthEnv {
            text_backend_configured: state.backend_status.text_backend_configured,
            image_backend_configured: state.backend_status.image_backend_configured,
        },
    })
}

/// GET /api/use-cases
pub async fn use_cases() -> Json<Vec<UseCaseInfo>> {
    Json(UseCase::ALL.into_iter().map(UseCaseInfo::from).collect())
}

/// GET /
pub async fn index() -> &'static str {
    "API is running..."
}
