//! SQLite inventory store implementation

use std::sync::Arc;

use application::{error::ApplicationError, ports::InventoryStore};
use async_trait::async_trait;
use domain::{InventoryItem, ItemId};
use rusqlite::{OptionalExtension, Row, params, types::Type};
use tokio::task;
use tracing::{debug, info, instrument};

use super::connection::ConnectionPool;

/// SQLite-based inventory store
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteInventoryStore {
    /// Create a new SQLite inventory store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Insert or replace stock records in one transaction
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn upsert_all(&self, items: Vec<InventoryItem>) -> Result<usize, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
            let tx = conn
                .transaction()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            for item in &items {
                tx.execute(
                    "INSERT INTO inventory (item_id, name, quantity) VALUES (?1, ?2, ?3)
                     ON CONFLICT(item_id) DO UPDATE SET name = excluded.name, quantity = excluded.quantity",
                    params![item.item_id.as_str(), item.name, item.quantity],
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
            }

            tx.commit()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            info!(count = items.len(), "Inventory records upserted");
            Ok(items.len())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, item_id: &ItemId) -> Result<Option<InventoryItem>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id = item_id.as_str().to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let item = conn
                .query_row(
                    "SELECT item_id, name, quantity FROM inventory WHERE item_id = ?1",
                    [&id],
                    row_to_item,
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(found = item.is_some(), "Inventory lookup");
            Ok(item)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<InventoryItem> {
    let raw_id: String = row.get(0)?;
    let item_id = ItemId::new(raw_id)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    Ok(InventoryItem::new(item_id, row.get::<_, String>(1)?, row.get(2)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DatabaseConfig, persistence::connection::create_pool};

    fn create_test_store() -> SqliteInventoryStore {
        let config = DatabaseConfig::in_memory();
        SqliteInventoryStore::new(Arc::new(create_pool(&config).unwrap()))
    }

    fn id(raw: &str) -> ItemId {
        ItemId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn unknown_item_is_none() {
        let store = create_test_store();
        assert!(store.find_by_id(&id("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_then_find() {
        let store = create_test_store();
        store
            .upsert_all(vec![
                InventoryItem::new(id("widget"), "Widget", 12),
                InventoryItem::new(id("gadget"), "Gadget", 0),
            ])
            .await
            .unwrap();

        let widget = store.find_by_id(&id("widget")).await.unwrap().unwrap();
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.quantity, 12);

        let gadget = store.find_by_id(&id("gadget")).await.unwrap().unwrap();
        assert!(!gadget.is_available());
    }

    #[tokio::test]
    async fn upsert_replaces_existing() {
        let store = create_test_store();
        store
            .upsert_all(vec![InventoryItem::new(id("widget"), "Widget", 12)])
            .await
            .unwrap();
        store
            .upsert_all(vec![InventoryItem::new(id("widget"), "Widget v2", 3)])
            .await
            .unwrap();

        let widget = store.find_by_id(&id("widget")).await.unwrap().unwrap();
        assert_eq!(widget.name, "Widget v2");
        assert_eq!(widget.quantity, 3);
    }
}
