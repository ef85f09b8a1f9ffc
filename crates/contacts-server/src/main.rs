//! contacts-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) and the
//! environment, opens the SQLite store, and serves the contacts API over
//! HTTP. The store is closed after a graceful shutdown on Ctrl-C / SIGTERM.
//!
//! # OpenAPI export
//!
//! ```
//! cargo run -p contacts-server --bin server -- --print-openapi
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contacts_server::{ServerConfig, expand_tilde};
use contacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Contacts API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Port to listen on; overrides every other source.
  #[arg(short, long)]
  port: Option<u16>,

  /// Print the OpenAPI document as JSON and exit.
  #[arg(long)]
  print_openapi: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Pick up a local `.env` before anything reads the environment.
  dotenvy::dotenv().ok();

  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, cli.port)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  // Helper mode: dump the OpenAPI document and exit.
  if cli.print_openapi {
    let doc = contacts_api::openapi(&server_cfg.servers);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    return Ok(());
  }

  // Open the store; failing here aborts startup.
  let database_url = expand_tilde(&server_cfg.database_url);
  let store = SqliteStore::connect(&database_url)
    .await
    .with_context(|| format!("failed to open store at {database_url:?}"))?;
  tracing::info!(database = %database_url, "store opened");
  let store = Arc::new(store);

  let app = contacts_server::app(store.clone(), &server_cfg);
  let address = server_cfg.bind_address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!(environment = %server_cfg.environment, "Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  store.close().await.context("failed to close store")?;
  tracing::info!("store closed, exiting");

  Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("shutdown signal received");
}
