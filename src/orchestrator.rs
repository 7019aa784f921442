//! Engine selection: try the LLM path when configured, fall back to the
//! deterministic analyzer on any failure. Both paths produce the same
//! [`AnalysisResult`] shape, so consumers never branch on the engine.

use serde::{Deserialize, Serialize};

use crate::analyzer::{Analyzer, AnalysisResult, AnalyzerError, KnowledgeBase};
use crate::config::AppConfig;
use crate::llm::{parse_triage_response, prompt, ChatClient, LlmError, OpenAiClient};

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// LLM-backed analysis succeeded.
    Llm,
    /// Deterministic local analyzer (no LLM configured, or LLM call failed).
    Fallback,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Fallback => "fallback",
        }
    }
}

/// Result envelope: the engine-agnostic analysis plus provenance.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutcome {
    pub engine: EngineKind,
    pub result: AnalysisResult,
    /// Set when the LLM path failed and the fallback answered instead.
    pub note: Option<String>,
}

/// Dispatches each request to the LLM engine or the deterministic fallback.
pub struct Orchestrator {
    analyzer: Analyzer,
    llm: Option<Box<dyn ChatClient>>,
}

impl Orchestrator {
    pub fn new(analyzer: Analyzer, llm: Option<Box<dyn ChatClient>>) -> Self {
        Self { analyzer, llm }
    }

    /// Build from environment configuration: knowledge base from the
    /// configured path (or the built-in table), LLM client only when an API
    /// key is present.
    pub fn from_config(config: &AppConfig) -> Result<Self, crate::analyzer::KnowledgeBaseError> {
        let knowledge = match &config.knowledge_base_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading knowledge base");
                KnowledgeBase::load(path)?
            }
            None => KnowledgeBase::builtin(),
        };

        let llm: Option<Box<dyn ChatClient>> = match &config.openai_api_key {
            Some(key) => {
                match OpenAiClient::new(key, &config.openai_base_url, &config.model) {
                    Ok(client) => {
                        tracing::info!(model = %config.model, "LLM engine enabled");
                        Some(Box::new(client))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "LLM client unavailable, fallback only");
                        None
                    }
                }
            }
            None => {
                tracing::info!("No API key configured, running in fallback-only mode");
                None
            }
        };

        Ok(Self::new(Analyzer::new(knowledge), llm))
    }

    /// Health signal: whether the LLM engine is configured.
    pub fn llm_available(&self) -> bool {
        self.llm.is_some()
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Analyze one symptom description.
    ///
    /// Empty input fails before either engine runs. LLM failures never
    /// surface to the caller; they degrade to the deterministic result with
    /// a note recording what happened.
    pub fn triage(&self, text: &str) -> Result<TriageOutcome, AnalyzerError> {
        if text.trim().is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }

        if let Some(client) = &self.llm {
            match self.triage_via_llm(client.as_ref(), text) {
                Ok(result) => {
                    return Ok(TriageOutcome {
                        engine: EngineKind::Llm,
                        result,
                        note: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "LLM analysis failed, using fallback");
                    let result = self.analyzer.analyze(text)?;
                    return Ok(TriageOutcome {
                        engine: EngineKind::Fallback,
                        result,
                        note: Some(format!("LLM call failed: {e}")),
                    });
                }
            }
        }

        let result = self.analyzer.analyze(text)?;
        Ok(TriageOutcome {
            engine: EngineKind::Fallback,
            result,
            note: None,
        })
    }

    fn triage_via_llm(
        &self,
        client: &dyn ChatClient,
        text: &str,
    ) -> Result<AnalysisResult, LlmError> {
        let user_prompt = prompt::triage_prompt(text);
        let response = client.complete(prompt::SYSTEM_PROMPT, &user_prompt)?;
        parse_triage_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::NO_MATCH_CONDITION;
    use crate::llm::MockChatClient;

    fn fallback_only() -> Orchestrator {
        Orchestrator::new(Analyzer::new(KnowledgeBase::builtin()), None)
    }

    fn with_mock(mock: MockChatClient) -> Orchestrator {
        Orchestrator::new(Analyzer::new(KnowledgeBase::builtin()), Some(Box::new(mock)))
    }

    #[test]
    fn empty_input_fails_before_any_engine() {
        let orch = with_mock(MockChatClient::replying("ignored"));
        assert!(matches!(orch.triage("   "), Err(AnalyzerError::EmptyInput)));
    }

    #[test]
    fn fallback_only_mode_uses_analyzer() {
        let orch = fallback_only();
        assert!(!orch.llm_available());

        let outcome = orch.triage("sore throat and runny nose").unwrap();
        assert_eq!(outcome.engine, EngineKind::Fallback);
        assert!(outcome.note.is_none());
        assert!(outcome.result.conditions[0]
            .condition_name
            .contains("Common cold"));
    }

    #[test]
    fn llm_success_is_tagged_and_mapped() {
        let orch = with_mock(MockChatClient::replying(
            r#"{"conditions": [{"name": "Strep throat", "confidence": 0.6, "urgency": "medium"}],
                "next_steps": ["See a clinician for a throat swab"]}"#,
        ));
        assert!(orch.llm_available());

        let outcome = orch.triage("sore throat").unwrap();
        assert_eq!(outcome.engine, EngineKind::Llm);
        assert_eq!(outcome.result.conditions[0].condition_name, "Strep throat");
        assert!(!outcome.result.disclaimer.is_empty());
    }

    #[test]
    fn llm_transport_failure_falls_back_with_note() {
        let orch = with_mock(MockChatClient::failing("connection refused"));
        let outcome = orch.triage("sore throat and runny nose").unwrap();
        assert_eq!(outcome.engine, EngineKind::Fallback);
        assert!(outcome.note.as_deref().unwrap().contains("connection refused"));
        assert!(outcome.result.conditions[0]
            .condition_name
            .contains("Common cold"));
    }

    #[test]
    fn llm_garbage_response_falls_back() {
        let orch = with_mock(MockChatClient::replying("I am not able to answer."));
        let outcome = orch.triage("xyzzy").unwrap();
        assert_eq!(outcome.engine, EngineKind::Fallback);
        assert_eq!(outcome.result.conditions[0].condition_name, NO_MATCH_CONDITION);
    }
}
