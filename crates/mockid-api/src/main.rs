//! Mock identity system server.
//!
//! Serves the identity endpoints over an in-memory store. Data is lost on
//! restart. Every flag can also be supplied through its `MOCKID_*`
//! environment variable.

use std::net::IpAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mockid_api::{AppConfig, AppState};

/// In-memory identity backend for authentication integration tests.
#[derive(Parser, Debug)]
#[command(name = "mockid-api", version, about, long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "MOCKID_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to bind.
    #[arg(long, env = "MOCKID_PORT", default_value_t = 8082)]
    port: u16,

    /// Prefix for the identity routes, e.g. `/v1/mock-identity-system`.
    #[arg(long, env = "MOCKID_CONTEXT_PATH", default_value = "")]
    context_path: String,

    /// Reject envelopes whose `requestTime` is further than this many
    /// seconds from the server clock. Unset accepts any well-formed time.
    #[arg(long, env = "MOCKID_REQUEST_TIME_TOLERANCE_SECS")]
    request_time_tolerance_secs: Option<u32>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "MOCKID_LOG_JSON")]
    log_json: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let config = AppConfig {
            host: self.host,
            port: self.port,
            request_time_tolerance: self
                .request_time_tolerance_secs
                .map(|secs| chrono::Duration::seconds(i64::from(secs))),
            ..AppConfig::default()
        };
        config
            .with_context_path(&self.context_path)
            .context("invalid --context-path")
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = cli.into_config()?;
    let addr = config.socket_addr();
    let context_path = config.context_path.clone();
    let app = mockid_api::app(AppState::with_config(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, context_path = %context_path, "mockid-api listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
