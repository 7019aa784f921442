use std::cmp::Ordering;

use super::knowledge::KnowledgeBase;
use super::types::{
    AnalysisResult, AnalyzerError, RankedCondition, ScoringConfig, SymptomEntry, DISCLAIMER,
};

/// Condition name returned when no knowledge-base entry matches.
pub const NO_MATCH_CONDITION: &str = "Unspecified — insufficient symptom detail";

const NO_MATCH_NEXT_STEPS: [&str; 2] = [
    "Monitor symptoms",
    "Consult a healthcare professional if symptoms persist or worsen",
];

/// Deterministic rule-based symptom analyzer.
///
/// Pure function from free text to a structured result: no I/O, no shared
/// mutable state. The knowledge base is read-only after construction, so one
/// `Analyzer` may be called concurrently from any number of callers.
pub struct Analyzer {
    knowledge: KnowledgeBase,
    config: ScoringConfig,
}

impl Analyzer {
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self::with_config(knowledge, ScoringConfig::default())
    }

    pub fn with_config(knowledge: KnowledgeBase, config: ScoringConfig) -> Self {
        Self { knowledge, config }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Analyze a free-text symptom description.
    ///
    /// Fails with [`AnalyzerError::EmptyInput`] when the text is empty or
    /// whitespace-only. Every other input succeeds, possibly with the
    /// zero-match default condition.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        let normalized = normalize(text);

        let mut candidates: Vec<(&SymptomEntry, f64)> = Vec::new();
        for entry in self.knowledge.entries() {
            let ratio = match_ratio(&normalized, entry);
            if ratio > self.config.min_match_ratio {
                candidates.push((entry, entry.base_confidence * ratio));
            }
        }

        // Stable sort: equal confidences keep declaration order.
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        candidates.truncate(self.config.max_conditions);

        if candidates.is_empty() {
            return Ok(no_match_result());
        }

        let conditions = candidates
            .iter()
            .map(|(entry, confidence)| RankedCondition {
                condition_name: entry.condition_name.clone(),
                confidence: *confidence,
                urgency: entry.urgency,
            })
            .collect();

        let mut next_steps: Vec<String> = Vec::new();
        for (entry, _) in &candidates {
            for step in &entry.next_steps {
                if !next_steps.contains(step) {
                    next_steps.push(step.clone());
                }
            }
        }

        Ok(AnalysisResult {
            conditions,
            next_steps,
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}

fn no_match_result() -> AnalysisResult {
    AnalysisResult {
        conditions: vec![RankedCondition {
            condition_name: NO_MATCH_CONDITION.into(),
            confidence: 0.0,
            urgency: super::types::Urgency::Low,
        }],
        next_steps: NO_MATCH_NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        disclaimer: DISCLAIMER.to_string(),
    }
}

/// Fraction of the entry's keywords present in the normalized text, in [0,1].
fn match_ratio(normalized_text: &str, entry: &SymptomEntry) -> f64 {
    if entry.keywords.is_empty() {
        return 0.0;
    }
    let hits = entry
        .keywords
        .iter()
        .filter(|keyword| contains_phrase(normalized_text, &normalize(keyword)))
        .count();
    hits as f64 / entry.keywords.len() as f64
}

/// Lowercase, strip punctuation to spaces, collapse runs of whitespace.
/// Keywords pass through the same routine, so matching stays symmetric.
fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole-word phrase search. The haystack is normalized (single spaces), so
/// a match is valid only when bounded by spaces or the string ends.
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    if phrase.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let bounded_left = start == 0 || bytes[start - 1] == b' ';
        let bounded_right = end == haystack.len() || bytes[end] == b' ';
        if bounded_left && bounded_right {
            return true;
        }
        // Advance past the full character at `start`; a byte offset inside a
        // multibyte character would panic on the next slice.
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}
