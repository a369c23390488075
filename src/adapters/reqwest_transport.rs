use super::transport::{OutboundRequest, Transport, TransportResponse};
use anyhow::Context as _;
use serenity::async_trait;
use std::time::Duration;
use tracing::debug;

/// Implementation for performing requests via reqwest
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport
    ///
    /// # Arguments
    ///
    /// * `timeout` - Total time allowed for a request, including reading the body
    /// * `connect_timeout` - Time allowed to establish the connection
    pub fn new(timeout: Duration, connect_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .context("Building HTTP Client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> anyhow::Result<TransportResponse> {
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = request;

        debug!(%method, %url, "Sending request");

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.context("Sending request")?;
        let status = response.status().as_u16();
        let body = response.text().await.context("Reading response body")?;

        Ok(TransportResponse { status, body })
    }
}
