use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::analyzer::{AnalysisResult, RankedCondition, Urgency, DISCLAIMER};

use super::LlmError;

/// Upper bound on conditions kept from a model response, matching the
/// deterministic engine's default.
const MAX_CONDITIONS: usize = 3;

/// Greedy brace match: first '{' through last '}' across newlines. Models
/// often wrap the JSON in prose or a code fence.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid JSON block pattern"));

/// Lenient mirror of the JSON the prompt asks for. Everything optional:
/// the mapper repairs what it can and defaults the rest.
#[derive(Deserialize)]
struct RawTriageResponse {
    conditions: Option<Vec<RawCondition>>,
    next_steps: Option<Vec<String>>,
    disclaimer: Option<String>,
}

#[derive(Deserialize)]
struct RawCondition {
    name: Option<String>,
    confidence: Option<f64>,
    urgency: Option<String>,
}

/// Map raw model text into the shared [`AnalysisResult`] contract.
///
/// The output honors the same invariants the deterministic engine guarantees:
/// at most 3 conditions sorted descending by confidence, every confidence
/// clamped into [0,1], next steps de-duplicated, and the fixed disclaimer
/// substituted when the model omits its own.
pub fn parse_triage_response(text: &str) -> Result<AnalysisResult, LlmError> {
    let json_str = extract_json_block(text)?;
    let raw: RawTriageResponse =
        serde_json::from_str(json_str).map_err(|e| LlmError::JsonParsing(e.to_string()))?;

    let mut conditions: Vec<RankedCondition> = raw
        .conditions
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| {
            let name = c.name?;
            if name.trim().is_empty() {
                return None;
            }
            Some(RankedCondition {
                condition_name: name,
                confidence: c.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
                urgency: parse_urgency(c.urgency.as_deref()),
            })
        })
        .collect();

    conditions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    conditions.truncate(MAX_CONDITIONS);

    let mut next_steps: Vec<String> = Vec::new();
    for step in raw.next_steps.unwrap_or_default() {
        if !step.trim().is_empty() && !next_steps.contains(&step) {
            next_steps.push(step);
        }
    }

    let disclaimer = match raw.disclaimer {
        Some(d) if !d.trim().is_empty() => d,
        _ => DISCLAIMER.to_string(),
    };

    Ok(AnalysisResult {
        conditions,
        next_steps,
        disclaimer,
    })
}

fn extract_json_block(text: &str) -> Result<&str, LlmError> {
    // Prefer a fenced block when present; otherwise take the widest braces.
    if let Some(fence_start) = text.find("```json") {
        let content_start = fence_start + 7;
        if let Some(fence_len) = text[content_start..].find("```") {
            return Ok(text[content_start..content_start + fence_len].trim());
        }
    }
    JSON_BLOCK
        .find(text)
        .map(|m| m.as_str())
        .ok_or(LlmError::MalformedResponse)
}

fn parse_urgency(raw: Option<&str>) -> Urgency {
    match raw.map(|u| u.trim().to_lowercase()).as_deref() {
        Some("high") => Urgency::High,
        Some("medium") => Urgency::Medium,
        // Unknown labels degrade to Low rather than failing the whole parse.
        _ => Urgency::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "conditions": [
            {"name": "Common cold", "confidence": 0.7, "urgency": "low"},
            {"name": "Influenza", "confidence": 0.5, "urgency": "medium"}
        ],
        "next_steps": ["Rest", "Hydrate", "Rest"],
        "disclaimer": "Educational only."
    }"#;

    #[test]
    fn parses_plain_json() {
        let result = parse_triage_response(SAMPLE).unwrap();
        assert_eq!(result.conditions.len(), 2);
        assert_eq!(result.conditions[0].condition_name, "Common cold");
        assert_eq!(result.conditions[1].urgency, Urgency::Medium);
        assert_eq!(result.next_steps, vec!["Rest", "Hydrate"]);
        assert_eq!(result.disclaimer, "Educational only.");
    }

    #[test]
    fn parses_json_inside_code_fence_and_prose() {
        let wrapped = format!("Here is my assessment:\n```json\n{SAMPLE}\n```\nTake care!");
        let result = parse_triage_response(&wrapped).unwrap();
        assert_eq!(result.conditions.len(), 2);
    }

    #[test]
    fn clamps_confidence_and_truncates_to_three() {
        let text = r#"{
            "conditions": [
                {"name": "A", "confidence": 1.7, "urgency": "high"},
                {"name": "B", "confidence": 0.6, "urgency": "low"},
                {"name": "C", "confidence": -0.2, "urgency": "low"},
                {"name": "D", "confidence": 0.9, "urgency": "medium"}
            ]
        }"#;
        let result = parse_triage_response(text).unwrap();
        assert_eq!(result.conditions.len(), 3);
        assert_eq!(result.conditions[0].condition_name, "A");
        assert_eq!(result.conditions[0].confidence, 1.0);
        assert_eq!(result.conditions[1].condition_name, "D");
        assert_eq!(result.conditions[2].confidence, 0.6);
    }

    #[test]
    fn substitutes_fixed_disclaimer_when_missing() {
        let result = parse_triage_response(r#"{"conditions": []}"#).unwrap();
        assert_eq!(result.disclaimer, DISCLAIMER);
    }

    #[test]
    fn unknown_urgency_degrades_to_low() {
        let text = r#"{"conditions": [{"name": "A", "confidence": 0.4, "urgency": "CRITICAL!!"}]}"#;
        let result = parse_triage_response(text).unwrap();
        assert_eq!(result.conditions[0].urgency, Urgency::Low);
    }

    #[test]
    fn rejects_text_without_json() {
        let result = parse_triage_response("I cannot help with that.");
        assert!(matches!(result, Err(LlmError::MalformedResponse)));
    }

    #[test]
    fn rejects_invalid_json() {
        let result = parse_triage_response("{not json}");
        assert!(matches!(result, Err(LlmError::JsonParsing(_))));
    }
}
