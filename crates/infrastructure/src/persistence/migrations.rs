//! Database migrations
//!
//! The applied version is kept in `schema_version`. Each step runs in its own
//! transaction together with the version bump, so an interrupted upgrade
//! resumes at the first step that did not commit.

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// One schema step: target version, label, SQL
struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "inventory",
        sql: "CREATE TABLE IF NOT EXISTS inventory (
                  item_id TEXT PRIMARY KEY,
                  name TEXT NOT NULL,
                  quantity INTEGER NOT NULL CHECK(quantity >= 0)
              );",
    },
    Migration {
        version: 2,
        name: "orders",
        sql: "CREATE TABLE IF NOT EXISTS orders (
                  id TEXT PRIMARY KEY,
                  item_id TEXT NOT NULL,
                  quantity INTEGER NOT NULL CHECK(quantity BETWEEN 1 AND 10000),
                  status TEXT NOT NULL,
                  created_at TEXT NOT NULL
              );
              CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders(created_at);",
    },
];

/// Latest version known to this build
pub const SCHEMA_VERSION: i32 = 2;

/// Bring the schema up to [`SCHEMA_VERSION`]
///
/// A database written by a newer build is refused rather than modified.
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current = schema_version(conn)?;

    if current > SCHEMA_VERSION {
        return Err(DatabaseError::Migration(format!(
            "database schema v{current} is newer than supported v{SCHEMA_VERSION}"
        )));
    }
    if current == SCHEMA_VERSION {
        debug!(version = current, "Database schema is up to date");
        return Ok(());
    }

    info!(from = current, to = SCHEMA_VERSION, "Migrating database schema");

    for step in MIGRATIONS.iter().filter(|m| m.version > current) {
        if let Err(e) = apply(conn, step) {
            error!(version = step.version, migration = step.name, error = %e, "Migration failed");
            return Err(e);
        }
        debug!(version = step.version, migration = step.name, "Migration applied");
    }

    Ok(())
}

fn apply(conn: &Connection, step: &Migration) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(step.sql)?;
    tx.execute("DELETE FROM schema_version", [])?;
    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [step.version],
    )?;
    tx.commit()?;
    Ok(())
}

fn schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
        [],
    )?;
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(Result::ok)
            .collect()
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let tables = table_names(&conn);
        assert!(tables.contains(&"inventory".to_string()));
        assert!(tables.contains(&"orders".to_string()));
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn resumes_from_partial_schema() {
        let conn = Connection::open_in_memory().unwrap();
        schema_version(&conn).unwrap();
        apply(&conn, &MIGRATIONS[0]).unwrap();
        assert!(!table_names(&conn).contains(&"orders".to_string()));

        run_migrations(&conn).unwrap();

        assert!(table_names(&conn).contains(&"orders".to_string()));
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        schema_version(&conn).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();

        let err = run_migrations(&conn).unwrap_err();

        assert!(matches!(err, DatabaseError::Migration(_)));
    }

    #[test]
    fn negative_stock_rejected_by_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO inventory (item_id, name, quantity) VALUES ('x', 'X', -1)",
            [],
        );
        assert!(result.is_err());
    }
}
