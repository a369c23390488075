//! Message context-menu commands for managing channel pins.
//!
//! Both commands look at the current pins first, so repeating a command is a
//! no-op rather than a second API call.

use super::helpers::{AUDIT_LOG_REASON, audit_log_reason, channel_and_message_id};
use super::{CommandDescriptor, CommandHandler};
use crate::adapters::{ApiError, DiscordClient, RequestOptions};
use crate::interaction::payload::GuildInteraction;
use crate::interaction::response::InteractionResponse;
use reqwest::Method;
use serde::Deserialize;
use serenity::async_trait;
use serenity::model::application::CommandType;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const PIN_COMMAND_NAME: &str = "Pin this message";
pub const UNPIN_COMMAND_NAME: &str = "Remove this pin";

pub const ALREADY_PINNED: &str = "This message was already pinned. No action taken.";
pub const NOT_PINNED: &str = "This message was not in the pins. No action taken.";
pub const PIN_ADDED: &str = "Pin added successfully";
pub const PIN_REMOVED: &str = "Pin removed successfully";

/// Only the id of each pinned message is needed
#[derive(Debug, Deserialize)]
struct PinnedMessage {
    id: MessageId,
}

/// Pins the targeted message, unless it is already pinned
pub struct PinMessageCommand {
    client: Arc<DiscordClient>,
}

impl PinMessageCommand {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }

    pub fn descriptor() -> CommandDescriptor {
        CommandDescriptor::message_context_menu(PIN_COMMAND_NAME)
    }
}

#[async_trait]
impl CommandHandler for PinMessageCommand {
    async fn handle(&self, interaction: &GuildInteraction) -> anyhow::Result<InteractionResponse> {
        update_pin(&self.client, interaction, PinChange::Add).await
    }
}

/// Unpins the targeted message, if it is pinned
pub struct UnpinMessageCommand {
    client: Arc<DiscordClient>,
}

impl UnpinMessageCommand {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }

    pub fn descriptor() -> CommandDescriptor {
        CommandDescriptor::message_context_menu(UNPIN_COMMAND_NAME)
    }
}

#[async_trait]
impl CommandHandler for UnpinMessageCommand {
    async fn handle(&self, interaction: &GuildInteraction) -> anyhow::Result<InteractionResponse> {
        update_pin(&self.client, interaction, PinChange::Remove).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinChange {
    Add,
    Remove,
}

impl PinChange {
    fn method(self) -> Method {
        match self {
            PinChange::Add => Method::PUT,
            PinChange::Remove => Method::DELETE,
        }
    }

    /// Reply when the pin is already in the requested state
    fn unchanged(self) -> &'static str {
        match self {
            PinChange::Add => ALREADY_PINNED,
            PinChange::Remove => NOT_PINNED,
        }
    }

    fn done(self) -> &'static str {
        match self {
            PinChange::Add => PIN_ADDED,
            PinChange::Remove => PIN_REMOVED,
        }
    }
}

async fn update_pin(
    client: &DiscordClient,
    interaction: &GuildInteraction,
    change: PinChange,
) -> anyhow::Result<InteractionResponse> {
    let interaction_id = interaction.id.to_string();

    if interaction.data.kind != Some(CommandType::Message) {
        warn!(
            %interaction_id,
            kind = ?interaction.data.kind,
            "Pin command invoked with a non-message command type"
        );
        return Ok(InteractionResponse::unknown_error(&interaction_id));
    }

    let (channel_id, message_id) = channel_and_message_id(interaction)?;

    let pinned = match is_pinned(client, channel_id, message_id).await {
        Ok(pinned) => pinned,
        Err(err) => {
            error!(?err, %interaction_id, %channel_id, "Failed to fetch channel pins");
            return Ok(InteractionResponse::unknown_error(&interaction_id));
        }
    };

    // Already in the requested state
    if pinned == (change == PinChange::Add) {
        return Ok(InteractionResponse::ephemeral(change.unchanged()));
    }

    let options = RequestOptions::new().header(AUDIT_LOG_REASON, audit_log_reason(interaction)?);
    let outcome = client
        .send::<()>(
            change.method(),
            &format!("channels/{channel_id}/pins/{message_id}"),
            options,
        )
        .await;

    match outcome {
        Ok(response) if response.status == 204 => {
            info!(
                %interaction_id,
                %channel_id,
                %message_id,
                ?change,
                user = %interaction.member.user.username,
                "Pin updated"
            );
            Ok(InteractionResponse::ephemeral(change.done()))
        }
        Ok(response) => {
            warn!(
                %interaction_id,
                status = response.status,
                ?change,
                "Unexpected status while updating pin"
            );
            Ok(InteractionResponse::unknown_error(&interaction_id))
        }
        Err(err) => {
            error!(?err, %interaction_id, ?change, "Failed to update pin");
            Ok(InteractionResponse::unknown_error(&interaction_id))
        }
    }
}

/// Whether `message_id` is among the pins of `channel_id`
async fn is_pinned(
    client: &DiscordClient,
    channel_id: ChannelId,
    message_id: MessageId,
) -> Result<bool, ApiError> {
    let response = client
        .send::<Vec<PinnedMessage>>(
            Method::GET,
            &format!("channels/{channel_id}/pins"),
            RequestOptions::new(),
        )
        .await?;

    Ok(response.data.iter().any(|pin| pin.id == message_id))
}
