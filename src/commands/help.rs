use super::{CommandDescriptor, CommandHandler};
use crate::interaction::payload::GuildInteraction;
use crate::interaction::response::InteractionResponse;
use serenity::async_trait;

pub const HELP_TEXT: &str = "Right-click on a message, and find this bot's commands under Apps.";

/// `/help`: explains where the context-menu commands live
pub struct HelpCommand;

impl HelpCommand {
    pub fn descriptor() -> CommandDescriptor {
        CommandDescriptor::chat_input("help", "Get info about this bot")
    }
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn handle(&self, _: &GuildInteraction) -> anyhow::Result<InteractionResponse> {
        Ok(InteractionResponse::ephemeral(HELP_TEXT))
    }
}
