//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `chaos`: initial fault injection and inventory seed data
//! - `services`: downstream endpoints for the gateway
//! - `telemetry`: OTLP export and log filtering
//!
//! Sources are layered: built-in defaults, then an optional `config.toml`
//! in the working directory, then `FULFILLMENT_*` environment variables
//! with `__` between nested keys (e.g. `FULFILLMENT_SERVER__PORT=8081`).

mod chaos;
mod database;
mod server;
mod services;
mod telemetry;

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

pub use chaos::{ChaosAppConfig, InventorySeedConfig, SeedItem};
pub use database::DatabaseConfig;
pub use server::ServerConfig;
pub use services::DownstreamServicesConfig;
pub use telemetry::TelemetryAppConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FULFILLMENT";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details exposed in API responses
    Development,
    /// Production environment - internal details hidden
    #[default]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Which of the three services this process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Client-facing orchestrator
    #[default]
    Gateway,
    /// Availability lookups with fault injection
    Inventory,
    /// Order persistence
    Order,
}

impl ServiceRole {
    /// Name reported by health checks and used as the trace service name
    pub const fn service_name(&self) -> &'static str {
        match self {
            Self::Gateway => "gateway-service",
            Self::Inventory => "inventory-service",
            Self::Order => "order-service",
        }
    }

    /// Port used when `server.port` is not configured
    pub const fn default_port(&self) -> u16 {
        match self {
            Self::Gateway => 8080,
            Self::Inventory => 8081,
            Self::Order => 8082,
        }
    }

    /// Whether this role owns a database
    pub const fn uses_database(&self) -> bool {
        matches!(self, Self::Inventory | Self::Order)
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gateway => write!(f, "gateway"),
            Self::Inventory => write!(f, "inventory"),
            Self::Order => write!(f, "order"),
        }
    }
}

impl FromStr for ServiceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gateway" => Ok(Self::Gateway),
            "inventory" => Ok(Self::Inventory),
            "order" | "orders" => Ok(Self::Order),
            _ => Err(format!(
                "Invalid role: {s}. Use 'gateway', 'inventory' or 'order'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Service this process runs
    #[serde(default)]
    pub role: ServiceRole,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (inventory and order roles)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Initial chaos settings (inventory role)
    #[serde(default)]
    pub chaos: ChaosAppConfig,

    /// Inventory seed data (inventory role)
    #[serde(default)]
    pub inventory: InventorySeedConfig,

    /// Downstream endpoints (gateway role)
    #[serde(default)]
    pub services: DownstreamServicesConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file plus the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Effective environment, production when unset
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Effective listen port
    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or_else(|| self.role.default_port())
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.port())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn environment_parsing() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Development".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn role_parsing_and_names() {
        assert_eq!("inventory".parse::<ServiceRole>().unwrap(), ServiceRole::Inventory);
        assert_eq!("orders".parse::<ServiceRole>().unwrap(), ServiceRole::Order);
        assert!("billing".parse::<ServiceRole>().is_err());
        assert_eq!(ServiceRole::Gateway.service_name(), "gateway-service");
        assert!(!ServiceRole::Gateway.uses_database());
        assert!(ServiceRole::Order.uses_database());
    }

    #[test]
    fn port_defaults_follow_role() {
        let mut config = AppConfig {
            role: ServiceRole::Inventory,
            ..Default::default()
        };
        assert_eq!(config.port(), 8081);
        config.server.port = Some(9000);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn loads_sections_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fulfillment.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
role = "inventory"
environment = "production"

[chaos]
latency_enabled = true
latency_min_ms = 50
latency_max_ms = 75

[[inventory.items]]
item_id = "widget"
name = "Widget"
quantity = 3

[services]
inventory_url = "http://inventory:8081"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();

        assert_eq!(config.role, ServiceRole::Inventory);
        assert_eq!(config.environment(), Environment::Production);
        assert!(config.chaos.latency_enabled);
        assert_eq!(config.chaos.latency_max_ms, 75);
        assert!((config.chaos.error_rate - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.inventory.items.len(), 1);
        assert_eq!(config.services.inventory_url, "http://inventory:8081");
        assert_eq!(config.services.order_url, "http://localhost:8082");
        assert!(config.database.run_migrations);
    }

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();
        assert_eq!(config.role, ServiceRole::Gateway);
        assert_eq!(config.environment(), Environment::Production);
        assert!(!config.telemetry.enabled);
        assert!(config.telemetry.graceful_fallback);
        assert!(!config.server.json_logs());
    }
}
