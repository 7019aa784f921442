//! In-memory session history.
//!
//! An explicit, caller-owned ordered sequence of past analyses. The engines
//! themselves stay stateless; whoever owns the log (the HTTP layer, a test)
//! decides its lifetime. Nothing here persists across process restarts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analyzer::AnalysisResult;
use crate::orchestrator::{EngineKind, TriageOutcome};

/// Default cap on retained entries.
pub const DEFAULT_CAPACITY: usize = 50;

/// One recorded analysis.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub query: String,
    pub engine: EngineKind,
    pub result: AnalysisResult,
}

/// Bounded, append-only log of past analyses. Oldest entries drop first.
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record one outcome, returning the new entry's id.
    pub fn record(&mut self, query: &str, outcome: &TriageOutcome) -> Uuid {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            query: query.to_string(),
            engine: outcome.engine,
            result: outcome.result.clone(),
        };
        let id = entry.id;
        self.entries.push(entry);
        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
        }
        id
    }

    /// Most recent entries first, at most `limit`.
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, KnowledgeBase};
    use crate::orchestrator::Orchestrator;

    fn outcome_for(text: &str) -> TriageOutcome {
        let orch = Orchestrator::new(Analyzer::new(KnowledgeBase::builtin()), None);
        orch.triage(text).unwrap()
    }

    #[test]
    fn records_and_returns_newest_first() {
        let mut log = HistoryLog::new();
        log.record("fever", &outcome_for("fever"));
        log.record("sore throat", &outcome_for("sore throat"));

        let recent = log.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "sore throat");
        assert_eq!(recent[1].query, "fever");
        assert_eq!(recent[0].engine, EngineKind::Fallback);
    }

    #[test]
    fn recent_respects_limit() {
        let mut log = HistoryLog::new();
        for i in 0..5 {
            log.record(&format!("query {i}"), &outcome_for("fever"));
        }
        assert_eq!(log.recent(2).len(), 2);
        assert_eq!(log.recent(2)[0].query, "query 4");
    }

    #[test]
    fn capacity_drops_oldest_entries() {
        let mut log = HistoryLog::with_capacity(3);
        for i in 0..5 {
            log.record(&format!("query {i}"), &outcome_for("fever"));
        }
        assert_eq!(log.len(), 3);
        let recent = log.recent(10);
        assert_eq!(recent[2].query, "query 2");
    }
}
