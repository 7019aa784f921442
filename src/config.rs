use std::net::SocketAddr;
use std::path::PathBuf;

use crate::llm::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application-level constants
pub const APP_NAME: &str = "symcheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
    8750,
);

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{APP_NAME}=debug")
}

/// User-level knowledge-base override: ~/.config/symcheck/knowledge_base.json
/// (platform equivalent). Used only when the file exists.
pub fn user_knowledge_base_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join("knowledge_base.json"))
}

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OPENAI_API_KEY. Empty or unset means the LLM path is disabled and
    /// every request uses the deterministic fallback.
    pub openai_api_key: Option<String>,
    /// SYMCHECK_OPENAI_BASE_URL — OpenAI-compatible endpoint base.
    pub openai_base_url: String,
    /// SYMCHECK_MODEL
    pub model: String,
    /// SYMCHECK_BIND_ADDR
    pub bind_addr: SocketAddr,
    /// SYMCHECK_KNOWLEDGE_BASE — explicit JSON table path. Falls back to the
    /// user config file when present, then to the built-in table.
    pub knowledge_base_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let openai_base_url = std::env::var("SYMCHECK_OPENAI_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("SYMCHECK_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let bind_addr = std::env::var("SYMCHECK_BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BIND_ADDR);

        let knowledge_base_path = std::env::var("SYMCHECK_KNOWLEDGE_BASE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| user_knowledge_base_path().filter(|p| p.exists()));

        Self {
            openai_api_key,
            openai_base_url,
            model,
            bind_addr,
            knowledge_base_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_addr_is_loopback() {
        assert!(DEFAULT_BIND_ADDR.ip().is_loopback());
        assert_eq!(DEFAULT_BIND_ADDR.port(), 8750);
    }

    #[test]
    fn user_kb_path_ends_with_expected_file() {
        if let Some(path) = user_knowledge_base_path() {
            assert!(path.ends_with("symcheck/knowledge_base.json"));
        }
    }

    #[test]
    fn log_filter_names_the_crate() {
        assert!(default_log_filter().contains(APP_NAME));
    }
}
