//! Headless API server entrypoint.

use clap::Parser;
use minipaste_core::config::{parse_duration, parse_size_limit_mb};
use minipaste_server::{serve_router, AppState, Config};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Flags override the `MINIPASTE_*` environment, which overrides defaults.
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "minipaste-server", version, about = "Single-slot paste server")]
struct ServerArgs {
    /// Address to bind (default: [::1]:8080)
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Homepage to show at / (default: ./index.html)
    #[arg(long, value_name = "PATH")]
    index: Option<PathBuf>,

    /// Retention for the current paste, e.g. 90s, 5m, 1h30m; 0 keeps it forever (default: 5m)
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    retention: Option<Duration>,

    /// Maximum upload size in MB (default: 16)
    #[arg(long = "size-limit", value_name = "MB", value_parser = parse_size_limit_mb)]
    size_limit: Option<u64>,
}

impl ServerArgs {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(index) = self.index {
            config.index_path = index;
        }
        if let Some(retention) = self.retention {
            config.retention = retention;
        }
        if let Some(limit) = self.size_limit {
            config.upload_limit = limit;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minipaste=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();
    let mut config = Config::from_env();
    args.apply(&mut config);

    tracing::info!(
        retention = ?config.retention,
        upload_limit = config.upload_limit,
        index = %config.index_path.display(),
        "starting"
    );
    if config.retention.is_zero() {
        tracing::warn!("Retention is zero - pastes are kept until replaced or deleted");
    }
    if !config.bind.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - anyone who can reach it can read the paste",
            config.bind
        );
    }

    let state = AppState::new(config.clone());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let actual_addr = listener.local_addr().unwrap_or(config.bind);
    tracing::info!("MiniPaste ready at http://{}", actual_addr);

    serve_router(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
