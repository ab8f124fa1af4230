//! Booklog server
//!
//! Server-rendered book log backed by PostgreSQL, with an in-memory
//! fallback that keeps the application serving while the database is
//! unreachable.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use booklog::config::Config;
use booklog::storage::{Database, Store};
use booklog::{handlers, AppState};

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting booklog v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    info!(
        "Config loaded: port={}, db={}@{}:{}/{}",
        config.server_port, config.db.user, config.db.host, config.db.port, config.db.name
    );

    // The pool connects lazily: a down database at startup is not fatal,
    // the store serves from its in-memory fallback until it recovers.
    let db = Database::connect_lazy(&config.db);
    if let Err(e) = db.migrate().await {
        warn!("Database migration failed, in-memory fallback will serve: {:#}", e);
    }

    let store = Arc::new(Store::new(db));
    let state = AppState { store };

    let app = handlers::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
