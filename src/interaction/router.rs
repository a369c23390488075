use super::payload::{GuildInteraction, Interaction};
use super::response::InteractionResponse;
use crate::commands::CommandRegistry;
use serenity::model::application::InteractionType;
use std::sync::Arc;
use tracing::{debug, info};

/// Routes classified interactions to command handlers
pub struct CommandRouter {
    registry: Arc<CommandRegistry>,
}

impl CommandRouter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Produce the response for an interaction
    ///
    /// Only the interaction type decides the route. Interactions this
    /// application does not handle (components, autocomplete, unknown types,
    /// unregistered commands) get the unknown-command reply.
    ///
    /// # Errors
    ///
    /// Only errors raised by a command handler are returned.
    pub async fn route(&self, interaction: &Interaction) -> anyhow::Result<InteractionResponse> {
        let interaction = match interaction {
            Interaction::Ping { .. } => return Ok(InteractionResponse::pong()),
            Interaction::Guild(interaction) => interaction,
        };

        match interaction.kind {
            InteractionType::Command => self.route_command(interaction).await,
            kind => {
                debug!(
                    interaction_id = %interaction.id,
                    ?kind,
                    "Unsupported interaction type"
                );
                Ok(InteractionResponse::unknown_command(
                    &interaction.id.to_string(),
                ))
            }
        }
    }

    async fn route_command(
        &self,
        interaction: &GuildInteraction,
    ) -> anyhow::Result<InteractionResponse> {
        let name = interaction.data.name.as_str();

        let Some(command) = self.registry.lookup(name) else {
            info!(
                interaction_id = %interaction.id,
                command = %name,
                "No handler registered for command"
            );
            return Ok(InteractionResponse::unknown_command(
                &interaction.id.to_string(),
            ));
        };

        debug!(
            interaction_id = %interaction.id,
            command = %name,
            guild_id = %interaction.guild_id,
            "Dispatching command"
        );
        command.handler.handle(interaction).await
    }
}
