//! Gateway-side client for the order service

use application::{ApplicationError, ports::OrderServicePort};
use async_trait::async_trait;
use domain::{ItemId, Order, Quantity};
use reqwest::{Response, StatusCode, Url};
use serde::Serialize;
use tracing::{instrument, warn};

use super::{CorrelatedHttpClient, endpoint, parse_base_url};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody<'a> {
    item_id: &'a str,
    quantity: u32,
}

/// Calls the order service's `/api/orders` endpoints
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    client: CorrelatedHttpClient,
    base_url: Url,
}

impl HttpOrderClient {
    /// Create a client for the order service at `base_url`
    pub fn new(client: CorrelatedHttpClient, base_url: &str) -> Result<Self, ApplicationError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }
}

fn unreachable_error(e: &reqwest::Error) -> ApplicationError {
    warn!(error = %e, "Order service unreachable");
    ApplicationError::Downstream(format!("order service: {e}"))
}

fn check_status(response: Response) -> Result<Response, ApplicationError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%status, "Order service returned an error");
        Err(ApplicationError::Downstream(format!(
            "order service returned HTTP {}",
            status.as_u16()
        )))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApplicationError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApplicationError::Downstream(format!("order service: {e}")))
}

#[async_trait]
impl OrderServicePort for HttpOrderClient {
    #[instrument(skip(self), fields(item_id = %item_id, quantity = quantity.value()))]
    async fn create_order(
        &self,
        item_id: &ItemId,
        quantity: Quantity,
    ) -> Result<Order, ApplicationError> {
        let url = endpoint(&self.base_url, &["api", "orders"])?;
        let body = CreateOrderBody {
            item_id: item_id.as_str(),
            quantity: quantity.value(),
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| unreachable_error(&e))?;

        decode(check_status(response)?).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, ApplicationError> {
        let url = endpoint(&self.base_url, &["api", "orders"])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable_error(&e))?;

        decode(check_status(response)?).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: &str) -> Result<Option<Order>, ApplicationError> {
        let url = endpoint(&self.base_url, &["api", "orders", order_id])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unreachable_error(&e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check_status(response)?).await.map(Some)
    }
}
