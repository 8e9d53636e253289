//! SQLite connection pool
//!
//! Every pooled connection is opened with WAL journaling, enforced foreign
//! keys and the configured busy timeout. Migrations run once, on a
//! connection taken right after the pool is built.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use thiserror::Error;
use tracing::{debug, info};

use super::migrations::run_migrations;
use crate::config::DatabaseConfig;

/// Failures while opening or migrating the database
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Pool shared by the SQLite stores
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Open (or create) the configured database and apply migrations
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Opening SQLite database"
    );

    let manager = if config.is_in_memory() {
        SqliteConnectionManager::memory()
    } else {
        ensure_parent_dir(&config.path)?;
        SqliteConnectionManager::file(&config.path)
    };

    let busy_timeout = config.busy_timeout();
    let manager = manager.with_init(move |conn| configure_connection(conn, busy_timeout));

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)?;

    if config.run_migrations {
        run_migrations(&*pool.get()?)?;
    }

    debug!("SQLite pool ready");
    Ok(pool)
}

fn ensure_parent_dir(path: &str) -> Result<(), DatabaseError> {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| DatabaseError::Directory {
                path: parent.display().to_string(),
                source,
            }),
        _ => Ok(()),
    }
}

fn configure_connection(
    conn: &mut Connection,
    busy_timeout: std::time::Duration,
) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_pool_is_migrated() {
        let pool = create_pool(&DatabaseConfig::in_memory()).unwrap();
        let conn = pool.get().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('inventory', 'orders')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn in_memory_connections_share_one_database() {
        let config = DatabaseConfig {
            max_connections: 2,
            ..DatabaseConfig::in_memory()
        };
        let pool = create_pool(&config).unwrap();
        let writer = pool.get().unwrap();
        let reader = pool.get().unwrap();

        writer
            .execute(
                "INSERT INTO inventory (item_id, name, quantity) VALUES ('sku', 'Widget', 4)",
                [],
            )
            .unwrap();
        let quantity: i64 = reader
            .query_row("SELECT quantity FROM inventory WHERE item_id = 'sku'", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert_eq!(quantity, 4);
    }

    #[test]
    fn file_pool_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fulfillment.db");

        let pool = create_pool(&DatabaseConfig::at_path(path.to_string_lossy())).unwrap();

        assert!(path.exists());
        let conn = pool.get().unwrap();
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn skipping_migrations_leaves_schema_empty() {
        let config = DatabaseConfig {
            run_migrations: false,
            ..DatabaseConfig::in_memory()
        };
        let pool = create_pool(&config).unwrap();
        let conn = pool.get().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'orders'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 0);
    }
}
