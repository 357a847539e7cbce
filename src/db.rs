//! Database connection pool and table bootstrap.
//!
//! This module provides utilities for:
//! - Creating a PostgreSQL connection pool
//! - Creating the configured document table if it does not exist yet

use sqlx::{Pool, Postgres};

use crate::store::{StoreError, validate_table_name};

/// Type alias for PostgreSQL connection pool.
pub type DbPool = Pool<Postgres>;

/// Create a new PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if:
/// - Database connection string is invalid
/// - Cannot connect to PostgreSQL server
/// - Database authentication fails
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create the document table backing `table` if it is missing.
///
/// The table name comes from configuration rather than a fixed migration,
/// so the DDL is issued at startup instead of through `sqlx::migrate!`.
///
/// # Errors
///
/// - `InvalidTableName`: name is not a plain SQL identifier
/// - `Database`: the DDL statement failed
pub async fn ensure_table(pool: &DbPool, table: &str) -> Result<(), StoreError> {
    validate_table_name(table)?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS "{table}" (
            id TEXT PRIMARY KEY,
            item JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}
