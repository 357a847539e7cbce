//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::store::TableClient;

/// Dependencies of the HTTP handlers.
///
/// Cloned per request by Axum; both fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Table client all reads and writes go through
    pub table: Arc<dyn TableClient>,

    /// Name of the table transactions live in
    pub table_name: Arc<str>,
}

impl AppState {
    pub fn new(table: Arc<dyn TableClient>, table_name: impl Into<Arc<str>>) -> Self {
        Self {
            table,
            table_name: table_name.into(),
        }
    }
}
