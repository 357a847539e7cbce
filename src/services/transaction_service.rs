//! Transaction service - persistence logic for transaction records.
//!
//! This service handles:
//! - Identifier assignment
//! - Writing a record with a single `put`
//! - Listing records with a single projected `scan`
//!
//! Each call performs exactly one store operation and never retries.

use uuid::Uuid;

use crate::{
    models::transaction::{NewTransaction, TRANSACTION_PROJECTION, Transaction},
    store::{Item, StoreError, TableClient},
};

/// Generate a fresh transaction identifier.
///
/// UUID v7 strings are time-ordered and collision-resistant.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Store a validated transaction under a newly generated id.
///
/// # Process
///
/// 1. Generate a unique id
/// 2. Assemble the full record
/// 3. Write it with one `put`, keyed by the id
///
/// # Returns
///
/// The stored record, including its id
///
/// # Errors
///
/// Any `StoreError` from the table client, unchanged.
pub async fn add_transaction(
    table: &dyn TableClient,
    table_name: &str,
    new_transaction: NewTransaction,
) -> Result<Transaction, StoreError> {
    let transaction = new_transaction.with_id(generate_id());

    tracing::info!("Submitting transaction {}", transaction.id);
    table
        .put(table_name, transaction.clone().into_item())
        .await?;

    Ok(transaction)
}

/// List every stored transaction.
///
/// Issues one unbounded scan projected onto the seven transaction attributes.
/// Items come back in store order.
pub async fn list_transactions(
    table: &dyn TableClient,
    table_name: &str,
) -> Result<Vec<Item>, StoreError> {
    tracing::info!("Scanning {} table", table_name);
    let items = table.scan(table_name, TRANSACTION_PROJECTION).await?;
    tracing::info!("Scan succeeded, {} transactions", items.len());

    Ok(items)
}
