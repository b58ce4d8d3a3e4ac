//! Server entrypoint for intake-flow
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config, question source, bank build, rephrase
//! gateway, and the HTTP router. The bank is built once before the
//! listener binds; a failing question source aborts startup.

use anyhow::{Context, Result};
use clap::Parser;
use intake_application::{BuildBankUseCase, FlowLogger, NextQuestionUseCase, NoFlowLogger};
use intake_infrastructure::{
    ConfigLoader, HttpRephraseGateway, JsonlFlowLogger, XlsxQuestionSource,
};
use intake_presentation::{AppState, create_router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "intake-flow", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // .env carries the deployment API key in local setups
    dotenvy::dotenv().ok();

    let mut config =
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("Starting intake-flow");

    // === Dependency Injection ===
    // Build the bank once; the service never starts with a partial bank.
    let source = XlsxQuestionSource::new(config.sheet.path.clone(), config.sheet.skip_rows);
    let bank = BuildBankUseCase::new(Arc::new(source))
        .execute()
        .context("Failed to build question bank")?;
    let bank = Arc::new(bank);

    let gateway =
        HttpRephraseGateway::new(&config.rephrase).context("Failed to build rephrase gateway")?;

    let flow_logger: Arc<dyn FlowLogger> = match &config.logging.flow_log_path {
        Some(path) => match JsonlFlowLogger::new(path) {
            Some(logger) => {
                info!("Flow events logged to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoFlowLogger),
        },
        None => Arc::new(NoFlowLogger),
    };

    let use_case = Arc::new(
        NextQuestionUseCase::new(bank, Arc::new(gateway)).with_flow_logger(flow_logger),
    );

    let app = create_router(AppState { use_case });

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
