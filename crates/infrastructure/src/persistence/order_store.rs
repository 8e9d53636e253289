//! SQLite order store implementation

use std::sync::Arc;

use application::{error::ApplicationError, ports::OrderStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ItemId, NewOrder, Order, OrderId, OrderStatus, Quantity};
use rusqlite::{OptionalExtension, Row, params, types::Type};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

/// SQLite-based order store
#[derive(Debug, Clone)]
pub struct SqliteOrderStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteOrderStore {
    /// Create a new SQLite order store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    #[instrument(skip(self, order), fields(item_id = %order.item_id))]
    async fn save(&self, order: NewOrder) -> Result<Order, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let order = order.with_id(OrderId::new());

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT INTO orders (id, item_id, quantity, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    order.id.to_string(),
                    order.item_id.as_str(),
                    order.quantity.value(),
                    order.status.as_str(),
                    order.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(order_id = %order.id, "Saved order");
            Ok(order)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.query_row(
                "SELECT id, item_id, quantity, status, created_at FROM orders WHERE id = ?1",
                [&id_str],
                row_to_order,
            )
            .optional()
            .map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, item_id, quantity, status, created_at FROM orders
                     ORDER BY created_at, rowid",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let orders = stmt
                .query_map([], row_to_order)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            Ok(orders)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn conversion_error<E>(column: usize, kind: Type, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(err))
}

fn row_to_order(row: &Row<'_>) -> rusqlite::Result<Order> {
    let id: String = row.get(0)?;
    let item_id: String = row.get(1)?;
    let quantity: i64 = row.get(2)?;
    let status: String = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(Order {
        id: OrderId::parse(&id).map_err(|e| conversion_error(0, Type::Text, e))?,
        item_id: ItemId::new(item_id).map_err(|e| conversion_error(1, Type::Text, e))?,
        quantity: Quantity::new(quantity).map_err(|e| conversion_error(2, Type::Integer, e))?,
        status: status
            .parse::<OrderStatus>()
            .map_err(|e| conversion_error(3, Type::Text, e))?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| conversion_error(4, Type::Text, e))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DatabaseConfig, persistence::connection::create_pool};

    fn create_test_store() -> SqliteOrderStore {
        let config = DatabaseConfig::in_memory();
        SqliteOrderStore::new(Arc::new(create_pool(&config).unwrap()))
    }

    fn draft(item: &str, quantity: i64) -> NewOrder {
        NewOrder::from_request(Some(item), Some(quantity)).unwrap()
    }

    #[tokio::test]
    async fn save_assigns_identity_and_roundtrips() {
        let store = create_test_store();

        let saved = store.save(draft("sku-1", 5)).await.unwrap();
        let found = store.find_by_id(&saved.id).await.unwrap().unwrap();

        assert_eq!(found.id, saved.id);
        assert_eq!(found.item_id.as_str(), "sku-1");
        assert_eq!(found.quantity.value(), 5);
        assert_eq!(found.status, OrderStatus::Pending);
        assert_eq!(found.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn each_save_gets_new_id() {
        let store = create_test_store();
        let a = store.save(draft("sku-1", 1)).await.unwrap();
        let b = store.save(draft("sku-1", 1)).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = create_test_store();
        assert!(store.find_by_id(&OrderId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_all_in_creation_order() {
        let store = create_test_store();
        let first = store.save(draft("a", 1)).await.unwrap();
        let second = store.save(draft("b", 2)).await.unwrap();

        let all = store.find_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }
}
