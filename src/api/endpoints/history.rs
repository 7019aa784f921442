use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, HistoryQuery};
use crate::history::HistoryEntry;

const DEFAULT_LIMIT: usize = 20;

#[derive(Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

/// `GET /api/history?limit=` — recent analyses, newest first.
pub async fn recent(
    State(ctx): State<ApiContext>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let log = ctx
        .history
        .lock()
        .map_err(|_| ApiError::Internal("History lock poisoned".into()))?;

    let entries = log.recent(limit).into_iter().cloned().collect();
    Ok(Json(HistoryResponse { entries }))
}
