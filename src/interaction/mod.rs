pub mod endpoint;
pub mod headers;
pub mod payload;
pub mod response;
pub mod router;
pub mod signature;

pub use endpoint::{EndpointError, InteractionEndpoint};
pub use headers::Headers;
pub use payload::{GuildInteraction, Interaction, ShapeError};
pub use response::{CommandsModified, EndpointResponse, InteractionResponse};
pub use router::CommandRouter;
pub use signature::{SignatureError, SignatureVerifier};
