//! Initial fault-injection settings and inventory seed data.

use domain::{ChaosConfig, DomainError, InventoryItem, ItemId};
use serde::{Deserialize, Serialize};

/// Chaos settings applied when the inventory service starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaosAppConfig {
    #[serde(default)]
    pub latency_enabled: bool,

    #[serde(default = "default_latency_min")]
    pub latency_min_ms: u64,

    #[serde(default = "default_latency_max")]
    pub latency_max_ms: u64,

    #[serde(default)]
    pub error_enabled: bool,

    #[serde(default = "default_error_rate")]
    pub error_rate: f64,
}

const fn default_latency_min() -> u64 {
    ChaosConfig::DEFAULT_LATENCY_MIN_MS
}

const fn default_latency_max() -> u64 {
    ChaosConfig::DEFAULT_LATENCY_MAX_MS
}

const fn default_error_rate() -> f64 {
    ChaosConfig::DEFAULT_ERROR_RATE
}

impl Default for ChaosAppConfig {
    fn default() -> Self {
        Self {
            latency_enabled: false,
            latency_min_ms: default_latency_min(),
            latency_max_ms: default_latency_max(),
            error_enabled: false,
            error_rate: default_error_rate(),
        }
    }
}

impl ChaosAppConfig {
    /// Convert into a checked domain config
    pub fn to_chaos_config(&self) -> Result<ChaosConfig, DomainError> {
        let config = ChaosConfig {
            latency_enabled: self.latency_enabled,
            latency_min_ms: self.latency_min_ms,
            latency_max_ms: self.latency_max_ms,
            error_enabled: self.error_enabled,
            error_rate: self.error_rate,
        };
        config.validate()?;
        Ok(config)
    }
}

/// One stocked item loaded at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedItem {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
}

/// Items upserted into the inventory store on startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySeedConfig {
    #[serde(default)]
    pub items: Vec<SeedItem>,
}

impl InventorySeedConfig {
    /// Validate and convert every seed entry
    pub fn to_items(&self) -> Result<Vec<InventoryItem>, DomainError> {
        self.items
            .iter()
            .map(|seed| {
                Ok(InventoryItem::new(
                    ItemId::new(seed.item_id.clone())?,
                    seed.name.clone(),
                    seed.quantity,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaos_defaults_match_domain_defaults() {
        let config = ChaosAppConfig::default().to_chaos_config().unwrap();
        assert_eq!(config, ChaosConfig::default());
    }

    #[test]
    fn inverted_startup_range_is_rejected() {
        let app = ChaosAppConfig {
            latency_min_ms: 3000,
            latency_max_ms: 1000,
            ..Default::default()
        };
        assert!(app.to_chaos_config().is_err());
    }

    #[test]
    fn seed_items_convert() {
        let seeds = InventorySeedConfig {
            items: vec![SeedItem {
                item_id: "widget".to_string(),
                name: "Widget".to_string(),
                quantity: 0,
            }],
        };
        let items = seeds.to_items().unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_available());
    }

    #[test]
    fn blank_seed_id_rejected() {
        let seeds = InventorySeedConfig {
            items: vec![SeedItem {
                item_id: " ".to_string(),
                name: "Nothing".to_string(),
                quantity: 1,
            }],
        };
        assert!(seeds.to_items().is_err());
    }
}
