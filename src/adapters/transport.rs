use reqwest::Method;
use reqwest::header::HeaderMap;
use serenity::async_trait;
use url::Url;

/// A fully prepared outbound HTTP request
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and raw body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Interface for performing HTTP requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request and read the whole response body
    ///
    /// # Returns
    ///
    /// * `Ok(TransportResponse)` - A response was received, whatever its status
    /// * `Err(_)` - The request could not be completed (connection, timeout, DNS, ...)
    async fn execute(&self, request: OutboundRequest) -> anyhow::Result<TransportResponse>;
}
