use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed educational-use disclaimer attached to every analysis result.
pub const DISCLAIMER: &str = "This is for educational purposes only and not a medical \
     diagnosis. Consult a qualified healthcare professional for medical advice.";

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Coarse triage label attached to a candidate condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

// ---------------------------------------------------------------------------
// Knowledge base record
// ---------------------------------------------------------------------------

/// One knowledge-base record: lexical triggers mapped to a candidate
/// condition with its prior weight, triage label, and recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    /// Unique condition identifier within the knowledge base.
    pub condition_name: String,
    /// Case-insensitive trigger words or phrases. Must be non-empty.
    pub keywords: Vec<String>,
    /// Prior weight in [0,1] applied when all keywords are present.
    pub base_confidence: f64,
    pub urgency: Urgency,
    /// Ordered recommendation strings surfaced when this entry ranks.
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Analysis result
// ---------------------------------------------------------------------------

/// A candidate condition with its aggregated confidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCondition {
    pub condition_name: String,
    /// Relative likelihood weight in [0,1] — not a calibrated probability.
    pub confidence: f64,
    pub urgency: Urgency,
}

/// Structured outcome of one analysis. Immutable value object, built fresh
/// per request by either the deterministic engine or the LLM mapping path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// At most `ScoringConfig::max_conditions` entries, sorted descending by
    /// confidence; ties keep knowledge-base declaration order.
    pub conditions: Vec<RankedCondition>,
    /// De-duplicated union of the ranked conditions' next steps, first
    /// occurrence wins, relative order preserved.
    pub next_steps: Vec<String>,
    /// Always [`DISCLAIMER`].
    pub disclaimer: String,
}

// ---------------------------------------------------------------------------
// Scoring configuration
// ---------------------------------------------------------------------------

/// Tunable scoring constants. The exact weighting is configuration, not a
/// hard invariant of the engine.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// How many ranked conditions to keep.
    pub max_conditions: usize,
    /// Candidates must score strictly above this keyword-match ratio.
    pub min_match_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_conditions: 3,
            min_match_ratio: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the deterministic analyzer.
#[derive(Debug, Error, PartialEq)]
pub enum AnalyzerError {
    /// Input was empty or whitespace-only. Surfaced to the caller, never
    /// retried — a deterministic empty-input failure cannot change.
    #[error("Symptom description is empty")]
    EmptyInput,
}

/// Errors from knowledge-base loading and validation.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("Knowledge base has no entries")]
    Empty,
    #[error("Entry '{0}' has no keywords")]
    NoKeywords(String),
    #[error("Entry '{0}' has a blank keyword")]
    BlankKeyword(String),
    #[error("Duplicate condition name '{0}'")]
    DuplicateCondition(String),
    #[error("Entry '{condition}' has base_confidence {value} outside [0,1]")]
    ConfidenceOutOfRange { condition: String, value: f64 },
    #[error("Cannot read knowledge base file {0}: {1}")]
    Load(String, String),
    #[error("Cannot parse knowledge base JSON: {0}")]
    Parse(String),
}
