//! Integration tests for the SQLite stores using file-backed databases
//!
//! A file keeps data visible across all pooled connections, unlike `:memory:`.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use application::ports::{InventoryStore, OrderStore};
use domain::{InventoryItem, ItemId, NewOrder};
use infrastructure::{
    DatabaseConfig, SqliteInventoryStore, SqliteOrderStore, create_pool,
    persistence::ConnectionPool,
};

fn file_pool(dir: &tempfile::TempDir) -> Arc<ConnectionPool> {
    let config = DatabaseConfig {
        max_connections: 4,
        ..DatabaseConfig::at_path(dir.path().join("fulfillment.db").to_string_lossy())
    };
    Arc::new(create_pool(&config).expect("pool"))
}

#[tokio::test]
async fn orders_written_concurrently_are_all_listed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = SqliteOrderStore::new(file_pool(&dir));

    let mut handles = Vec::new();
    for n in 1..=8_i64 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let draft = NewOrder::from_request(Some("sku"), Some(n)).expect("draft");
            store.save(draft).await
        }));
    }
    for handle in handles {
        handle.await.expect("join").expect("save");
    }

    let orders = store.find_all().await.expect("list");
    assert_eq!(orders.len(), 8);
    let mut quantities: Vec<u32> = orders.iter().map(|o| o.quantity.value()).collect();
    quantities.sort_unstable();
    assert_eq!(quantities, (1..=8).collect::<Vec<_>>());
}

#[tokio::test]
async fn data_survives_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");

    let saved = {
        let orders = SqliteOrderStore::new(file_pool(&dir));
        let inventory = SqliteInventoryStore::new(file_pool(&dir));
        inventory
            .upsert_all(vec![InventoryItem::new(
                ItemId::new("widget").expect("id"),
                "Widget",
                4,
            )])
            .await
            .expect("seed");
        orders
            .save(NewOrder::from_request(Some("widget"), Some(2)).expect("draft"))
            .await
            .expect("save")
    };

    let pool = file_pool(&dir);
    let orders = SqliteOrderStore::new(Arc::clone(&pool));
    let inventory = SqliteInventoryStore::new(pool);

    let found = orders.find_by_id(&saved.id).await.expect("find");
    assert_eq!(found, Some(saved));

    let widget = inventory
        .find_by_id(&ItemId::new("widget").expect("id"))
        .await
        .expect("find")
        .expect("stocked");
    assert_eq!(widget.quantity, 4);
}
