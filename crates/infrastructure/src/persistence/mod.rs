//! Persistence module
//!
//! SQLite-based storage for inventory records and orders.

pub mod connection;
pub mod inventory_store;
pub mod migrations;
pub mod order_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use inventory_store::SqliteInventoryStore;
pub use order_store::SqliteOrderStore;
