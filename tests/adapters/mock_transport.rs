use pinwheel::adapters::{DiscordClient, OutboundRequest, Transport, TransportResponse};
use reqwest::Method;
use serenity::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const TEST_API_ROOT: &str = "https://discord.test/api/v10/";
pub const TEST_TOKEN: &str = "test-token";

#[derive(Debug, Clone)]
enum MockReply {
    Response(TransportResponse),
    Failure(String),
}

/// Transport answering from a table of canned responses, keyed by method and
/// endpoint. Unmatched requests get a 404.
pub struct MockTransport {
    replies: Mutex<HashMap<(Method, String), MockReply>>,
    pub requests: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `method endpoint` with the given status and body
    pub fn respond(&self, method: Method, endpoint: &str, status: u16, body: &str) {
        self.replies.lock().unwrap().insert(
            (method, endpoint.to_string()),
            MockReply::Response(TransportResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    /// Fail `method endpoint` at the transport level
    pub fn fail(&self, method: Method, endpoint: &str, message: &str) {
        self.replies.lock().unwrap().insert(
            (method, endpoint.to_string()),
            MockReply::Failure(message.to_string()),
        );
    }

    pub fn get_requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests sent to `method endpoint`
    pub fn requests_to(&self, method: Method, endpoint: &str) -> Vec<OutboundRequest> {
        self.get_requests()
            .into_iter()
            .filter(|request| request.method == method && endpoint_of(&request.url) == endpoint)
            .collect()
    }
}

fn endpoint_of(url: &Url) -> String {
    url.path()
        .trim_start_matches(Url::parse(TEST_API_ROOT).unwrap().path())
        .to_string()
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: OutboundRequest) -> anyhow::Result<TransportResponse> {
        let key = (request.method.clone(), endpoint_of(&request.url));
        self.requests.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Failure(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(TransportResponse {
                status: 404,
                body: r#"{"message": "404: Not Found", "code": 0}"#.to_string(),
            }),
        }
    }
}

/// A DiscordClient backed by `transport`
pub fn mock_client(transport: &Arc<MockTransport>) -> Arc<DiscordClient> {
    Arc::new(
        DiscordClient::new(
            transport.clone(),
            Url::parse(TEST_API_ROOT).unwrap(),
            TEST_TOKEN,
        )
        .unwrap(),
    )
}
