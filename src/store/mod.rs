//! Table client abstraction over the key-value document store.
//!
//! Handlers never talk to a concrete database. They receive an
//! `Arc<dyn TableClient>` through the application state, so the same handler
//! code runs against PostgreSQL in production and an in-memory table in tests.
//!
//! # Item Model
//!
//! Every stored row is a JSON document (`Item`) keyed by its `id` attribute.
//! A scan returns each item restricted to the requested projection.

use serde_json::{Map, Value};

/// In-memory document table
pub mod memory;
/// PostgreSQL-backed document table
pub mod postgres;

/// A single stored document.
pub type Item = Map<String, Value>;

/// Attribute names requested from a scan.
pub type Projection = &'static [&'static str];

/// Name of the attribute every item is keyed by.
pub const KEY_ATTRIBUTE: &str = "id";

/// Errors returned by table client operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Item has no string `id` attribute to key it by.
    #[error("Item is missing a string `id` key")]
    MissingKey,

    /// Table name is not a plain SQL identifier.
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),
}

/// Access to a key-value document store.
///
/// # Operations
///
/// - `put`: insert an item, replacing any item with the same key
/// - `scan`: read every item of a table, keeping only projected attributes
/// - `ping`: verify the store is reachable
///
/// Implementations perform exactly one round-trip per call and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TableClient: Send + Sync {
    /// Write one item to `table`, keyed by its `id` attribute.
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Read all items of `table`, projected onto `projection`.
    ///
    /// Ordering is store-defined. There is no continuation token: the whole
    /// table is returned in one call.
    async fn scan(&self, table: &str, projection: Projection) -> Result<Vec<Item>, StoreError>;

    /// Check connectivity to the store.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Extract the key of an item.
pub fn item_key(item: &Item) -> Result<&str, StoreError> {
    item.get(KEY_ATTRIBUTE)
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingKey)
}

/// Restrict an item to the projected attributes.
///
/// Attributes named in the projection but absent from the item are omitted
/// rather than filled with `null`.
pub fn project(item: &Item, projection: &[&str]) -> Item {
    projection
        .iter()
        .filter_map(|name| item.get(*name).map(|v| (name.to_string(), v.clone())))
        .collect()
}

/// Check that a table name can be used verbatim as a SQL identifier.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*` up to 63 bytes (the PostgreSQL limit).
pub fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= 63 {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}
