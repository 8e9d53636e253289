//! HTTP client with automatic request ID correlation
//!
//! Wraps `reqwest::Client` so every outgoing request carries the
//! `X-Request-Id` of the request being served and the current trace context.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url, header::HeaderMap};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::propagation::{current_request_id, inject_trace_context};
use crate::config::DownstreamServicesConfig;

/// Header name for request correlation ID
pub const X_REQUEST_ID: &str = "x-request-id";

/// Configuration for the correlated HTTP client
#[derive(Debug, Clone)]
pub struct CorrelatedClientConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for CorrelatedClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            user_agent: format!("fulfillment-gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CorrelatedClientConfig {
    /// Timeouts taken from the downstream services section
    pub fn from_services(config: &DownstreamServicesConfig) -> Self {
        Self::default()
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_connect_timeout(Duration::from_secs(config.connect_timeout_secs))
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// HTTP client that propagates request correlation IDs
#[derive(Debug, Clone)]
pub struct CorrelatedHttpClient {
    inner: Client,
}

impl CorrelatedHttpClient {
    /// Build a client from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn with_config(config: &CorrelatedClientConfig) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { inner })
    }

    /// Start a GET request
    pub fn get(&self, url: Url) -> CorrelatedRequestBuilder {
        CorrelatedRequestBuilder::new(self.inner.get(url))
    }

    /// Start a POST request
    pub fn post(&self, url: Url) -> CorrelatedRequestBuilder {
        CorrelatedRequestBuilder::new(self.inner.post(url))
    }
}

/// A request builder that attaches correlation headers on send
pub struct CorrelatedRequestBuilder {
    inner: RequestBuilder,
    request_id: Option<Uuid>,
}

impl std::fmt::Debug for CorrelatedRequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrelatedRequestBuilder")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

impl CorrelatedRequestBuilder {
    #[allow(clippy::missing_const_for_fn)]
    fn new(inner: RequestBuilder) -> Self {
        Self {
            inner,
            request_id: current_request_id(),
        }
    }

    /// Override the request ID taken from the current request scope
    #[must_use]
    pub const fn with_request_id(mut self, id: Uuid) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Set the request body as JSON
    #[must_use]
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }

    /// Send the request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(request_id = ?self.request_id))]
    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);

        let mut builder = self.inner.headers(headers);
        if let Some(request_id) = self.request_id {
            builder = builder.header(X_REQUEST_ID, request_id.to_string());
            debug!(request_id = %request_id, "Sending correlated HTTP request");
        }

        builder.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_services() {
        let services = DownstreamServicesConfig {
            timeout_secs: 3,
            connect_timeout_secs: 1,
            ..DownstreamServicesConfig::default()
        };
        let config = CorrelatedClientConfig::from_services(&services);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert!(config.user_agent.starts_with("fulfillment-gateway/"));
    }

    #[test]
    fn client_builds() {
        assert!(CorrelatedHttpClient::with_config(&CorrelatedClientConfig::default()).is_ok());
    }

    #[test]
    fn request_id_header_constant() {
        assert_eq!(X_REQUEST_ID, "x-request-id");
    }

    #[tokio::test]
    async fn builder_picks_up_scoped_request_id() {
        let client = CorrelatedHttpClient::with_config(&CorrelatedClientConfig::default()).unwrap();
        let url = Url::parse("http://localhost/").unwrap();
        let id = Uuid::now_v7();

        let builder = super::super::with_request_id(id, async { client.get(url.clone()) }).await;
        assert_eq!(builder.request_id, Some(id));

        let other = Uuid::now_v7();
        assert_eq!(client.get(url).with_request_id(other).request_id, Some(other));
    }
}
