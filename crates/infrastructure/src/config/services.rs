//! Downstream service endpoints used by the gateway.

use serde::{Deserialize, Serialize};

/// Where the gateway finds the inventory and order services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownstreamServicesConfig {
    #[serde(default = "default_inventory_url")]
    pub inventory_url: String,

    #[serde(default = "default_order_url")]
    pub order_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_inventory_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_order_url() -> String {
    "http://localhost:8082".to_string()
}

// Long enough to outlast the largest injectable delay.
const fn default_timeout() -> u64 {
    15
}

const fn default_connect_timeout() -> u64 {
    5
}

impl Default for DownstreamServicesConfig {
    fn default() -> Self {
        Self {
            inventory_url: default_inventory_url(),
            order_url: default_order_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}
