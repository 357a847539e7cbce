//! Transaction Ledger Service - Main Application Entry Point
//!
//! A small REST API that validates and stores financial transaction records
//! and lists them back. Records live in a key-value document table reached
//! through the `TableClient` trait.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Store**: PostgreSQL JSONB table via sqlx, or an in-memory table when
//!   no database is configured
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Connect the table client (and create the table if needed)
//! 3. Build HTTP router with routes and middleware
//! 4. Serve until Ctrl+C

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    state::AppState,
    store::{TableClient, memory::InMemoryTable, postgres::PgTableClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    store::validate_table_name(&config.transaction_table)?;
    tracing::info!(table = %config.transaction_table, "Configuration loaded");

    let table = connect_table(&config).await?;

    let app = routes::router(AppState::new(table, config.transaction_table.as_str()));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Pick the table client backing the service.
///
/// With `DATABASE_URL` set, transactions go to PostgreSQL and the table is
/// created on first start. Without it they are kept in memory and lost on
/// restart.
async fn connect_table(config: &Config) -> anyhow::Result<Arc<dyn TableClient>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, storing transactions in memory");
        return Ok(Arc::new(InMemoryTable::new()));
    };

    let pool = db::create_pool(database_url, config.database_max_connections).await?;
    tracing::info!(
        url = config.redacted_database_url().as_deref().unwrap_or("<unparseable>"),
        "Database pool created"
    );

    db::ensure_table(&pool, &config.transaction_table).await?;
    tracing::info!("Table {} ready", config.transaction_table);

    Ok(Arc::new(PgTableClient::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until the process is killed
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::warn!("Received Ctrl+C, shutting down...");
}
