use dashmap::DashMap;

use super::{Item, Projection, StoreError, TableClient, item_key, project};

/// Document tables held in process memory.
///
/// Used when no database is configured, and as the store behind handler
/// tests. Rows are keyed by `(table, id)`; a put with an existing key replaces
/// the previous item. Scan order is whatever the map yields.
#[derive(Debug, Default)]
pub struct InMemoryTable {
    items: DashMap<(String, String), Item>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TableClient for InMemoryTable {
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let key = item_key(&item)?.to_string();
        self.items.insert((table.to_string(), key), item);
        Ok(())
    }

    async fn scan(&self, table: &str, projection: Projection) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.key().0 == table)
            .map(|entry| project(entry.value(), projection))
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
