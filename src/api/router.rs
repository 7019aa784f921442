use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::orchestrator::Orchestrator;

/// Build the API router. Routes are nested under `/api/`.
pub fn api_router(orchestrator: Arc<Orchestrator>) -> Router {
    build_router(ApiContext::new(orchestrator))
}

fn build_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/api/health", get(endpoints::health::check))
        .route("/api/analyze", post(endpoints::analyze::analyze))
        .route("/api/history", get(endpoints::history::recent))
        .with_state(ctx)
}
