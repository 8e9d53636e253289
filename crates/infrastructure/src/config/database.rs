//! SQLite settings for the inventory and order roles.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::default_true;

/// Path used to request a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Where and how the role's SQLite database is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file; parent directories are created on startup
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a connection waits on a locked database
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Apply pending schema migrations when the pool is created
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_db_path() -> String {
    "fulfillment.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            busy_timeout_ms: default_busy_timeout_ms(),
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Single-connection in-memory database with migrations applied
    ///
    /// Pooled connections all open the same shared-cache in-memory database,
    /// which lives while the pool holds a connection. Shared cache locks whole
    /// tables and reports contention as `SQLITE_LOCKED` without honoring the
    /// busy timeout, so the pool keeps a single connection.
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    /// A file-backed database at `path`
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Whether the database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// `busy_timeout_ms` as a duration
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
