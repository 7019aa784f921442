//! Deterministic rule-based symptom analyzer.
//!
//! The fallback engine: a pure function from free text to a ranked list of
//! candidate conditions, driven by a declarative knowledge base instead of
//! per-condition branching. Always available, instantaneous, and
//! deterministic — the reliability floor under the LLM path.

pub mod engine;
pub mod knowledge;
pub mod types;

pub use engine::{Analyzer, NO_MATCH_CONDITION};
pub use knowledge::KnowledgeBase;
pub use types::{
    AnalysisResult, AnalyzerError, KnowledgeBaseError, RankedCondition, ScoringConfig,
    SymptomEntry, Urgency, DISCLAIMER,
};
