use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::history::HistoryLog;
use crate::orchestrator::Orchestrator;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub orchestrator: Arc<Orchestrator>,
    pub history: Arc<Mutex<HistoryLog>>,
}

impl ApiContext {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            history: Arc::new(Mutex::new(HistoryLog::new())),
        }
    }
}

/// Body for `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub symptoms: String,
}

/// Query parameters for `GET /api/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}
