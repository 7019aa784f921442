pub mod analyzer; // Deterministic rule-based fallback engine
pub mod api; // HTTP surface over the orchestrator
pub mod config;
pub mod history; // Caller-owned session history
pub mod llm; // Chat-completions client + response mapping
pub mod orchestrator; // Engine selection with fallback
pub mod render; // Plain-text result renderer

use tracing_subscriber::EnvFilter;

/// Initialize tracing from RUST_LOG, falling back to the app default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
