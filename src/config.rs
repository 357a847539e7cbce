//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.
//! The resulting `Config` is built once in `main` and handed to the router;
//! handlers never read the environment themselves.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `TRANSACTION_TABLE` (required): name of the table transactions are stored in
/// - `DATABASE_URL` (optional): PostgreSQL connection string; when absent the
///   service keeps transactions in memory
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub transaction_table: String,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `TRANSACTION_TABLE` is missing
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: transaction_table -> TRANSACTION_TABLE
        envy::from_env::<Config>()
    }

    /// Database URL with any password removed, for logging.
    ///
    /// Returns `None` when no database is configured or the URL cannot be parsed.
    pub fn redacted_database_url(&self) -> Option<String> {
        let mut url = url::Url::parse(self.database_url.as_deref()?).ok()?;
        if url.password().is_some() {
            url.set_password(Some("****")).ok()?;
        }
        Some(url.to_string())
    }
}
