use super::transport::{OutboundRequest, Transport};
use anyhow::Context as _;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Root of the versioned Discord REST API
pub const API_ROOT: &str = "https://discord.com/api/v10/";

/// Identity sent with every request
pub const CLIENT_USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Parsed body and status of a successful request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid endpoint {endpoint}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Endpoint {endpoint} resolves outside the API root")]
    ForeignEndpoint { endpoint: String },

    #[error("Request failed: {0:#}")]
    Transport(anyhow::Error),

    #[error("Discord API returned status {status}: {body}")]
    Status { status: u16, body: Value },

    #[error("Response was not JSON (status {status})")]
    NotJson { status: u16, body: String },

    #[error("Unexpected response shape (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of every Discord API call
///
/// Expected failures are returned as values, so call sites chain requests
/// with a single match per call.
pub type RequestOutcome<T> = Result<ApiResponse<T>, ApiError>;

/// Caller-controlled part of a request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. `Authorization`, `Content-Type` and `User-Agent` are
    /// always replaced by the client.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serialize `payload` as the JSON request body
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_string(payload)?);
        Ok(self)
    }
}

/// Client for the Discord REST API
pub struct DiscordClient {
    transport: Arc<dyn Transport>,
    api_root: Url,
    authorization: HeaderValue,
}

impl DiscordClient {
    /// Create a new DiscordClient
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport performing HTTP requests
    /// * `api_root` - Base URL every endpoint is joined onto
    /// * `token` - The bot token
    pub fn new(
        transport: Arc<dyn Transport>,
        api_root: Url,
        token: &str,
    ) -> anyhow::Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bot {token}"))
            .context("DISCORD_TOKEN is not a valid header value")?;
        authorization.set_sensitive(true);

        Ok(Self {
            transport,
            api_root,
            authorization,
        })
    }

    /// Send a request to the Discord API
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `endpoint` - Path below the API root, e.g. `channels/123/pins`
    /// * `options` - Extra headers and body
    ///
    /// # Returns
    ///
    /// `Ok` with the parsed body and status for 2xx responses whose body parses
    /// as `T`. An empty body is parsed as JSON `null`, so `T = ()` accepts
    /// `204 No Content`. Everything else is an `ApiError`; this never panics.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> RequestOutcome<T> {
        let url = self
            .api_root
            .join(endpoint.trim_start_matches('/'))
            .map_err(|source| ApiError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                source,
            })?;
        if url.origin() != self.api_root.origin() {
            return Err(ApiError::ForeignEndpoint {
                endpoint: endpoint.to_string(),
            });
        }

        let request = OutboundRequest {
            method: method.clone(),
            url,
            headers: self.forced_headers(options.headers),
            body: options.body,
        };

        let outcome = self.execute(request).await;
        match &outcome {
            Ok(response) => {
                debug!(
                    %method,
                    %endpoint,
                    status = response.status,
                    "Discord API request succeeded"
                );
            }
            Err(err) => {
                warn!(%method, %endpoint, %err, "Discord API request failed");
            }
        }
        outcome
    }

    async fn execute<T: DeserializeOwned>(&self, request: OutboundRequest) -> RequestOutcome<T> {
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status;

        if !(200..300).contains(&status) {
            let body = serde_json::from_str(&response.body)
                .unwrap_or(Value::String(response.body));
            return Err(ApiError::Status { status, body });
        }

        let value: Value = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body).map_err(|_| ApiError::NotJson {
                status,
                body: response.body.clone(),
            })?
        };

        let data =
            serde_json::from_value(value).map_err(|source| ApiError::Decode { status, source })?;
        Ok(ApiResponse { data, status })
    }

    /// Caller headers with the three client-owned headers replaced
    fn forced_headers(&self, mut headers: HeaderMap) -> HeaderMap {
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers
    }
}
