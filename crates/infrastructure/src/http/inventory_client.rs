//! Gateway-side client for the inventory service

use application::{ApplicationError, ports::InventoryServicePort};
use async_trait::async_trait;
use domain::{Availability, ItemId};
use reqwest::Url;
use tracing::{instrument, warn};

use super::{CorrelatedHttpClient, endpoint, parse_base_url};

/// Calls `GET {base}/api/inventory/{itemId}`
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: CorrelatedHttpClient,
    base_url: Url,
}

impl HttpInventoryClient {
    /// Create a client for the inventory service at `base_url`
    pub fn new(client: CorrelatedHttpClient, base_url: &str) -> Result<Self, ApplicationError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl InventoryServicePort for HttpInventoryClient {
    #[instrument(skip(self), fields(item_id = %item_id))]
    async fn check_availability(&self, item_id: &ItemId) -> Result<Availability, ApplicationError> {
        let url = endpoint(&self.base_url, &["api", "inventory", item_id.as_str()])?;

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Inventory service unreachable");
            ApplicationError::Downstream(format!("inventory service: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Inventory service returned an error");
            return Err(ApplicationError::Downstream(format!(
                "inventory service returned HTTP {}",
                status.as_u16()
            )));
        }

        response
            .json::<Availability>()
            .await
            .map_err(|e| ApplicationError::Downstream(format!("inventory service: {e}")))
    }
}
