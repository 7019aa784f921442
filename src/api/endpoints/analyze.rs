use axum::extract::State;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{AnalyzeRequest, ApiContext};
use crate::orchestrator::TriageOutcome;

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub history_id: Uuid,
    #[serde(flatten)]
    pub outcome: TriageOutcome,
}

/// `POST /api/analyze` — run one symptom description through the
/// orchestrator and record the outcome in session history.
///
/// The LLM call path blocks on network I/O, so the whole triage runs on the
/// blocking pool.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let orchestrator = ctx.orchestrator.clone();
    let text = req.symptoms.clone();

    let outcome = tokio::task::spawn_blocking(move || orchestrator.triage(&text))
        .await
        .map_err(|e| ApiError::Internal(format!("Triage task failed: {e}")))??;

    let history_id = ctx
        .history
        .lock()
        .map_err(|_| ApiError::Internal("History lock poisoned".into()))?
        .record(&req.symptoms, &outcome);

    tracing::debug!(
        engine = outcome.engine.as_str(),
        conditions = outcome.result.conditions.len(),
        "Analysis complete"
    );

    Ok(Json(AnalyzeResponse {
        history_id,
        outcome,
    }))
}
