use serde_json::Value;

use super::{Item, Projection, StoreError, TableClient, item_key, project, validate_table_name};
use crate::db::DbPool;

/// Document table stored in PostgreSQL.
///
/// # Table Layout
///
/// Each configured table is a plain PostgreSQL table:
/// - `id`: primary key, copied from the item's `id` attribute
/// - `item`: the whole document as JSONB
/// - `created_at`: insertion time
///
/// Table names are interpolated into SQL, so every call checks them with
/// [`validate_table_name`] first.
#[derive(Debug, Clone)]
pub struct PgTableClient {
    pool: DbPool,
}

impl PgTableClient {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TableClient for PgTableClient {
    async fn put(&self, table: &str, item: Item) -> Result<(), StoreError> {
        validate_table_name(table)?;
        let key = item_key(&item)?.to_string();

        // Same-key writes replace the document, like a document-store put
        sqlx::query(&format!(
            r#"
            INSERT INTO "{table}" (id, item)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET item = EXCLUDED.item
            "#
        ))
        .bind(key)
        .bind(Value::Object(item))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn scan(&self, table: &str, projection: Projection) -> Result<Vec<Item>, StoreError> {
        validate_table_name(table)?;

        let documents: Vec<Value> = sqlx::query_scalar(&format!(r#"SELECT item FROM "{table}""#))
            .fetch_all(&self.pool)
            .await?;

        Ok(documents
            .into_iter()
            .filter_map(|document| match document {
                Value::Object(item) => Some(project(&item, projection)),
                other => {
                    tracing::warn!("Skipping non-object document in {}: {}", table, other);
                    None
                }
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
