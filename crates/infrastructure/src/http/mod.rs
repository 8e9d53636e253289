//! Outgoing HTTP with request correlation
//!
//! Requests sent from within a request scope carry that scope's
//! `X-Request-Id` and the W3C `traceparent` of the current span, so logs and
//! traces line up across the gateway and the services behind it.

mod correlated_client;
mod inventory_client;
mod order_client;
mod propagation;

pub use correlated_client::{
    CorrelatedClientConfig, CorrelatedHttpClient, CorrelatedRequestBuilder, X_REQUEST_ID,
};
pub use inventory_client::HttpInventoryClient;
pub use order_client::HttpOrderClient;
pub use propagation::{attach_remote_parent, current_request_id, with_request_id};

use application::ApplicationError;
use reqwest::Url;

/// Append path segments to `base`, percent-encoding each one
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApplicationError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApplicationError::Internal(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parse a configured downstream base URL
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ApplicationError> {
    Url::parse(raw).map_err(|e| ApplicationError::Internal(format!("invalid service URL {raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_segments() {
        let base = parse_base_url("http://inventory:8081").unwrap();
        let url = endpoint(&base, &["api", "inventory", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://inventory:8081/api/inventory/a%20b%2Fc");
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = parse_base_url("http://proxy/orders-svc/").unwrap();
        let url = endpoint(&base, &["api", "orders"]).unwrap();
        assert_eq!(url.as_str(), "http://proxy/orders-svc/api/orders");
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(parse_base_url("not a url").is_err());
    }
}
