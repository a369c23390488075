pub mod help;
pub mod helpers;
pub mod pins;

use crate::adapters::DiscordClient;
use crate::interaction::payload::GuildInteraction;
use crate::interaction::response::InteractionResponse;
use serde::Serialize;
use serenity::async_trait;
use serenity::model::application::CommandType;
use std::collections::HashSet;
use std::sync::Arc;

pub use help::HelpCommand;
pub use pins::{PinMessageCommand, UnpinMessageCommand};

/// Declarative description of a command, as registered with Discord
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: CommandType,
}

impl CommandDescriptor {
    /// A slash command typed into the chat input
    pub fn chat_input(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            kind: CommandType::ChatInput,
        }
    }

    /// A command found in a message's right-click menu
    pub fn message_context_menu(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            kind: CommandType::Message,
        }
    }
}

/// Handles invocations of a single command
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Build the response for an invocation
    ///
    /// Errors are turned into a generic error reply by the entry point.
    async fn handle(&self, interaction: &GuildInteraction) -> anyhow::Result<InteractionResponse>;
}

/// A command descriptor paired with its handler
#[derive(Clone)]
pub struct CommandDefinition {
    pub descriptor: CommandDescriptor,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    pub fn new(descriptor: CommandDescriptor, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            descriptor,
            handler,
        }
    }
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Command registered more than once: {0}")]
    DuplicateName(String),
}

/// The set of commands this application serves
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    definitions: Vec<CommandDefinition>,
}

impl CommandRegistry {
    /// Create a registry, rejecting duplicate command names
    pub fn new(definitions: Vec<CommandDefinition>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.descriptor.name.as_str()) {
                return Err(RegistryError::DuplicateName(
                    definition.descriptor.name.clone(),
                ));
            }
        }

        Ok(Self { definitions })
    }

    /// Find a command by exact (case-sensitive) name
    pub fn lookup(&self, name: &str) -> Option<&CommandDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.descriptor.name == name)
    }

    /// All descriptors, in registration order
    pub fn descriptors(&self) -> Vec<&CommandDescriptor> {
        self.definitions
            .iter()
            .map(|definition| &definition.descriptor)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// The commands served by this application
pub fn application_commands(client: Arc<DiscordClient>) -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(HelpCommand::descriptor(), Arc::new(HelpCommand)),
        CommandDefinition::new(
            PinMessageCommand::descriptor(),
            Arc::new(PinMessageCommand::new(client.clone())),
        ),
        CommandDefinition::new(
            UnpinMessageCommand::descriptor(),
            Arc::new(UnpinMessageCommand::new(client)),
        ),
    ]
}
