use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub llm_available: bool,
    pub knowledge_base_entries: usize,
    pub version: &'static str,
}

/// `GET /api/health` — liveness plus the LLM availability signal.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        llm_available: ctx.orchestrator.llm_available(),
        knowledge_base_entries: ctx.orchestrator.analyzer().knowledge().len(),
        version: crate::config::APP_VERSION,
    }))
}
