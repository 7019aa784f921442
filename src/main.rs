use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use symcheck::analyzer::AnalyzerError;
use symcheck::api::server;
use symcheck::config::{self, AppConfig};
use symcheck::orchestrator::{EngineKind, Orchestrator};
use symcheck::render::render_report;

#[derive(Parser)]
#[command(name = config::APP_NAME, version, about = "Symptom triage with an LLM engine and a deterministic fallback")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve,
    /// Analyze one symptom description and print the report
    Analyze {
        /// Free-text symptom description
        text: String,
    },
}

fn main() -> ExitCode {
    symcheck::init_tracing();
    let cli = Cli::parse();
    let app_config = AppConfig::from_env();

    let orchestrator = match Orchestrator::from_config(&app_config) {
        Ok(orchestrator) => Arc::new(orchestrator),
        Err(e) => {
            eprintln!("Cannot load knowledge base: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Serve => run_serve(&app_config, orchestrator),
        Command::Analyze { text } => run_analyze(&orchestrator, &text),
    }
}

fn run_serve(app_config: &AppConfig, orchestrator: Arc<Orchestrator>) -> ExitCode {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Cannot start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(server::serve(app_config, orchestrator)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_analyze(orchestrator: &Orchestrator, text: &str) -> ExitCode {
    match orchestrator.triage(text) {
        Ok(outcome) => {
            if outcome.engine == EngineKind::Fallback {
                if let Some(note) = &outcome.note {
                    eprintln!("Note: {note} (used local analyzer)");
                }
            }
            println!("{}", render_report(&outcome.result));
            ExitCode::SUCCESS
        }
        Err(AnalyzerError::EmptyInput) => {
            eprintln!("Please describe your symptoms first.");
            ExitCode::FAILURE
        }
    }
}
