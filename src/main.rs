use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sof_agent::agents::backend::{AiBackend, OllamaBackend};
use sof_agent::agents::event_extractor::{EventExtractorAgent, EventExtractorInput};
use sof_agent::agents::Agent;
use sof_agent::api::state::AppState;
use sof_agent::calculate::{compute_laytime_outcome, parse_duration_hours};
use sof_agent::config::{AiConfig, AppConfig};
use sof_agent::document::{self, DocumentKind};
use sof_agent::models::{Currency, ExtractionRecord};

#[derive(Parser)]
#[command(name = "sof-agent")]
#[command(about = "Statement-of-Fact laytime intelligence with AI-powered extraction")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Extract port events from a SoF document and print the record as JSON
    Extract {
        /// Path to a .txt, .docx or .pdf file
        file: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Calculate laytime and demurrage figures from explicit terms
    Laytime {
        /// Laytime consumed: hours (e.g. "80") or a duration ("3 days, 8 hours")
        #[arg(long)]
        used: String,

        /// Allowed laytime in days
        #[arg(long, default_value = "3.0")]
        allowed_days: f64,

        /// Demurrage rate per day
        #[arg(long, default_value = "20000.0")]
        rate: f64,

        /// Currency the rate is quoted in
        #[arg(long, default_value = "USD")]
        rate_currency: Currency,

        /// Currency to display figures in
        #[arg(long, default_value = "USD")]
        display_currency: Currency,
    },

    /// Check AI backend availability
    CheckBackend,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting sof-agent v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let backend = select_backend(&config.ai);
            let state = AppState::new(backend, config.laytime.clone());
            let app = sof_agent::api::build_router(state);

            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Extract { file, pretty } => {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow::anyhow!("Invalid file path: {}", file.display()))?;
            let kind = DocumentKind::from_name(name).map_err(|e| anyhow::anyhow!("{}", e))?;
            let bytes = std::fs::read(&file)?;
            let text = document::extract_text(&bytes, kind).map_err(|e| anyhow::anyhow!("{}", e))?;

            let backend = select_backend(&config.ai);
            let extractor = EventExtractorAgent::new(backend);
            let output = extractor
                .execute(EventExtractorInput { sof_content: text })
                .await
                .map_err(|e| anyhow::anyhow!("Extraction failed: {}", e))?;

            let record = ExtractionRecord {
                vessel_name: output.vessel_name,
                events: output.events,
                laytime: output.laytime,
                events_summary: None,
            };

            let json = if pretty {
                serde_json::to_string_pretty(&record)?
            } else {
                serde_json::to_string(&record)?
            };
            println!("{}", json);
        }
        Commands::Laytime {
            used,
            allowed_days,
            rate,
            rate_currency,
            display_currency,
        } => {
            let used_hours = used
                .parse::<f64>()
                .unwrap_or_else(|_| parse_duration_hours(&used));

            let outcome = compute_laytime_outcome(
                used_hours,
                allowed_days,
                rate,
                rate_currency,
                display_currency,
            );

            println!("Laytime used:   {:.2} h", used_hours);
            println!("Allowed:        {:.2} h", allowed_days * 24.0);
            println!(
                "Time saved:     {} ({:.2} h)",
                outcome.time_saved_display, outcome.time_saved_hours
            );
            println!(
                "Demurrage:      {} ({:.2} h)",
                outcome.demurrage_display, outcome.demurrage_hours
            );
            println!(
                "Demurrage cost: {:.2} {}",
                outcome.demurrage_cost, outcome.display_currency
            );
        }
        Commands::CheckBackend => {
            let backend = select_backend(&config.ai);
            match backend.health_check().await {
                Ok(true) => println!("Backend '{}' is available", backend.name()),
                Ok(false) => println!("Backend '{}' is not responding", backend.name()),
                Err(e) => println!("Backend check failed: {}", e),
            }
        }
    }

    Ok(())
}

/// Select the best available AI backend.
///
/// When the `remote-ai` feature is active and `ANTHROPIC_API_KEY` is set,
/// uses AnthropicBackend. Otherwise falls back to OllamaBackend.
fn select_backend(config: &AiConfig) -> Arc<dyn AiBackend> {
    #[cfg(feature = "remote-ai")]
    {
        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            tracing::info!("Using Anthropic backend (claude-sonnet-4-20250514)");
            return Arc::new(sof_agent::agents::backend::AnthropicBackend::new(
                api_key,
                "claude-sonnet-4-20250514".to_string(),
                config.timeout_seconds,
            ));
        }
    }

    tracing::info!("Using Ollama backend ({})", config.model);
    Arc::new(OllamaBackend::new(
        config.base_url.clone(),
        config.model.clone(),
        config.timeout_seconds,
    ))
}
