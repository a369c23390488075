use super::headers::{Headers, MODIFY_COMMANDS_HEADER};
use super::payload::{Interaction, ShapeError, UNKNOWN_INTERACTION_ID, correlation_id};
use super::response::{CommandsModified, EndpointResponse, InteractionResponse};
use super::router::CommandRouter;
use super::signature::{SignatureError, SignatureVerifier};
use crate::adapters::DiscordClient;
use crate::commands::CommandRegistry;
use crate::commands::helpers::install_global_commands;
use serde_json::Value;
use serenity::model::id::ApplicationId;
use std::sync::Arc;
use subtle::ConstantTimeEq as _;
use tracing::{error, info, warn};

/// Failures converted into the generic error reply
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error("Request body is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Command handler failed: {0:#}")]
    Handler(anyhow::Error),
}

/// Entry point for every inbound interaction request
pub struct InteractionEndpoint {
    verifier: SignatureVerifier,
    registry: Arc<CommandRegistry>,
    router: CommandRouter,
    client: Arc<DiscordClient>,
    application_id: ApplicationId,
    command_sync_secret: Option<String>,
}

impl InteractionEndpoint {
    /// Create a new InteractionEndpoint
    ///
    /// # Arguments
    ///
    /// * `verifier` - Verifier holding the application public key
    /// * `registry` - The commands this application serves
    /// * `client` - Discord API client used for command registration
    /// * `application_id` - The application the commands are registered for
    pub fn new(
        verifier: SignatureVerifier,
        registry: Arc<CommandRegistry>,
        client: Arc<DiscordClient>,
        application_id: ApplicationId,
    ) -> Self {
        Self {
            verifier,
            router: CommandRouter::new(registry.clone()),
            registry,
            client,
            application_id,
            command_sync_secret: None,
        }
    }

    /// Require the `modify-global-commands` header to carry this secret
    pub fn with_command_sync_secret(mut self, secret: Option<String>) -> Self {
        self.command_sync_secret = secret.filter(|secret| !secret.is_empty());
        self
    }

    /// Handle a single inbound request
    ///
    /// # Arguments
    ///
    /// * `headers` - The request headers
    /// * `body` - The raw request body, exactly as received
    ///
    /// # Returns
    ///
    /// Always a response: failures become the generic error reply carrying the
    /// interaction id (or `"unknown"`).
    pub async fn handle(&self, headers: &Headers, body: &[u8]) -> EndpointResponse {
        if self.is_command_sync_request(headers) {
            return self.modify_global_commands().await;
        }

        // The signed payload is the raw body, so nothing is parsed before this
        if let Err(err) = self.verifier.verify(headers, body) {
            let err = EndpointError::from(err);
            log_failure(&err, UNKNOWN_INTERACTION_ID, body);
            return EndpointResponse::Rejected(InteractionResponse::unknown_error(
                UNKNOWN_INTERACTION_ID,
            ));
        }

        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(err) => {
                log_failure(&EndpointError::from(err), UNKNOWN_INTERACTION_ID, body);
                return EndpointResponse::Interaction(InteractionResponse::unknown_error(
                    UNKNOWN_INTERACTION_ID,
                ));
            }
        };

        let interaction_id = correlation_id(&value);
        info!(%interaction_id, "Received interaction");

        match self.dispatch(&value).await {
            Ok(response) => EndpointResponse::Interaction(response),
            Err(err) => {
                log_failure(&err, &interaction_id, body);
                EndpointResponse::Interaction(InteractionResponse::unknown_error(&interaction_id))
            }
        }
    }

    async fn dispatch(&self, value: &Value) -> Result<InteractionResponse, EndpointError> {
        let interaction = Interaction::from_value(value)?;

        self.router
            .route(&interaction)
            .await
            .map_err(EndpointError::Handler)
    }

    fn is_command_sync_request(&self, headers: &Headers) -> bool {
        if !headers.is_truthy(MODIFY_COMMANDS_HEADER) {
            return false;
        }

        let Some(secret) = &self.command_sync_secret else {
            return true;
        };

        let matches = headers
            .get(MODIFY_COMMANDS_HEADER)
            .is_some_and(|value| constant_time_eq(value.as_bytes(), secret.as_bytes()));
        if !matches {
            warn!("Ignoring command modification request with a wrong secret");
        }
        matches
    }

    /// Replace the application's global commands with the registry contents
    async fn modify_global_commands(&self) -> EndpointResponse {
        let descriptors = self.registry.descriptors();

        match install_global_commands(&self.client, self.application_id, &descriptors).await {
            Ok(Ok(response)) => {
                info!(
                    application_id = %self.application_id,
                    commands = descriptors.len(),
                    status = response.status,
                    "Global commands modified"
                );
                EndpointResponse::CommandsModified(CommandsModified::success())
            }
            Ok(Err(err)) => {
                error!(
                    ?err,
                    application_id = %self.application_id,
                    "Failed to modify global commands"
                );
                EndpointResponse::CommandsModified(CommandsModified::failure())
            }
            Err(err) => {
                error!(
                    ?err,
                    application_id = %self.application_id,
                    "Failed to modify global commands"
                );
                EndpointResponse::CommandsModified(CommandsModified::failure())
            }
        }
    }
}

fn log_failure(err: &EndpointError, interaction_id: &str, body: &[u8]) {
    error!(
        ?err,
        %interaction_id,
        body = %String::from_utf8_lossy(body),
        "Failed to handle interaction"
    );
}

/// Constant-time byte comparison; slices of different lengths never match
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
