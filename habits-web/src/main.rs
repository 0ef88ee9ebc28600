//! Habit tracker web server.
//!
//! Serves the habit page and applies form submissions. Each request loads
//! the habit file, applies at most one mutation, saves, and redirects.

mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use habits::io::config::{DEFAULT_CONFIG_FILE, load_config};
use tracing::info;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "habits-web")]
#[command(about = "Web UI for the weekly habit tracker")]
struct Args {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Address to bind the server to (overrides `server.bind`)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    port: Option<u16>,

    /// Habit data file (overrides `data_file`)
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("habits_web=info".parse()?)
                .add_directive("habits=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut cfg = load_config(&args.config).context("load config")?;
    if let Some(bind) = args.bind {
        cfg.server.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.server.port = port;
    }
    if let Some(data_file) = args.data_file {
        cfg.data_file = data_file;
    }
    cfg.validate()?;

    let store = cfg.store();
    info!(
        data_file = %store.path().display(),
        corrupt_data = ?cfg.corrupt_data,
        "starting habits-web"
    );

    let state = AppState::new(Arc::new(store))?;
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.bind, cfg.server.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cfg.server.bind, cfg.server.port))?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_overrides() {
        let args = Args::parse_from(["habits-web", "--port", "8080", "--data-file", "x.json"]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.data_file, Some(PathBuf::from("x.json")));
        assert_eq!(args.config, PathBuf::from("habits.toml"));
        assert!(args.bind.is_none());
    }
}
