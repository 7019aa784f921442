//! HTTP surface: a small axum API over the orchestrator.
//!
//! Routes live under `/api/`. Handlers serialize the engine-agnostic
//! [`TriageOutcome`](crate::orchestrator::TriageOutcome) directly; the API
//! never inspects which engine produced a result.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
