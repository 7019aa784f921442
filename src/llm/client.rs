use serde::{Deserialize, Serialize};

use super::LlmError;

/// Default chat-completions endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default model for triage requests.
pub const DEFAULT_MODEL: &str = "gpt-4o";

const DEFAULT_TEMPERATURE: f64 = 0.2;
const DEFAULT_MAX_TOKENS: u32 = 700;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Abstraction over a chat-completion backend so the orchestrator can be
/// exercised with a mock in tests.
pub trait ChatClient: Send + Sync {
    /// Run one system+user exchange and return the raw model text.
    fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

/// HTTP client for an OpenAI-compatible chat-completions API.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            client,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Request body for POST {base}/chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from the chat-completions endpoint.
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl ChatClient for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Http(format!("Request timed out after {}s", self.timeout_secs))
                } else {
                    LlmError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| LlmError::JsonParsing(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::MalformedResponse)?;

        Ok(content.trim().to_string())
    }
}

/// Mock chat backend for tests — returns a canned response or a canned error.
pub struct MockChatClient {
    response: Result<String, String>,
}

impl MockChatClient {
    pub fn replying(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
        }
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::Http(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let result = OpenAiClient::new("", DEFAULT_BASE_URL, DEFAULT_MODEL);
        assert!(matches!(result, Err(LlmError::NotConfigured)));
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = OpenAiClient::new("sk-test", "https://api.openai.com/v1/", "gpt-4o").unwrap();
        assert_eq!(client.base_url, "https://api.openai.com/v1");
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn mock_client_round_trips() {
        let mock = MockChatClient::replying("{}");
        assert_eq!(mock.complete("s", "u").unwrap(), "{}");

        let failing = MockChatClient::failing("connection refused");
        assert!(matches!(failing.complete("s", "u"), Err(LlmError::Http(_))));
    }
}
