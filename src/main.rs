use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chatgate::config::Config;
use chatgate::llm::Dispatcher;
use chatgate::server::{AppState, build_app};

#[derive(Parser)]
#[command(name = "chatgate", version, about)]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, default_value = "chatgate.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .await
        .context("failed to load config")?;

    let dispatcher =
        Dispatcher::from_config(&config.llm).context("failed to resolve chat provider")?;

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
