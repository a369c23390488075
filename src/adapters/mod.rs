// Trait definitions
pub mod transport;

// Implementations
pub mod discord_client;
pub mod reqwest_transport;

// Re-exports for convenience
pub use discord_client::{
    API_ROOT, ApiError, ApiResponse, CLIENT_USER_AGENT, DiscordClient, RequestOptions,
    RequestOutcome,
};
pub use reqwest_transport::ReqwestTransport;
pub use transport::{OutboundRequest, Transport, TransportResponse};
