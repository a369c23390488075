use serde::Serialize;

/// Interaction callback type acknowledging a ping
pub const PONG: u8 = 1;

/// Interaction callback type replying with a message
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// Message flag restricting visibility to the invoking user
pub const EPHEMERAL: u64 = 1 << 6;

const UNKNOWN_ERROR: &str =
    "Something went wrong while handling this command. Reference ID: ";
const UNKNOWN_COMMAND: &str = "This command is not supported. Reference ID: ";

/// Response body sent back to Discord for an interaction
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageData {
    pub content: String,
    pub flags: u64,
}

impl InteractionResponse {
    /// Acknowledge a ping
    pub fn pong() -> Self {
        Self {
            kind: PONG,
            data: None,
        }
    }

    /// A reply only visible to the user who invoked the command, not persisted to the channel
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data: Some(MessageData {
                content: content.into(),
                flags: EPHEMERAL,
            }),
        }
    }

    /// Ephemeral reply for failures the user cannot act on
    pub fn unknown_error(interaction_id: &str) -> Self {
        Self::ephemeral(format!("{UNKNOWN_ERROR}{interaction_id}"))
    }

    /// Ephemeral reply for interactions no handler is registered for
    pub fn unknown_command(interaction_id: &str) -> Self {
        Self::ephemeral(format!("{UNKNOWN_COMMAND}{interaction_id}"))
    }

    /// Message content, if this response carries one
    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.content.as_str())
    }
}

/// Acknowledgment of the global command registration path
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandsModified {
    pub status_code: u16,
    pub body: String,
}

impl CommandsModified {
    pub fn success() -> Self {
        Self {
            status_code: 200,
            body: "Commands modified successfully".to_string(),
        }
    }

    pub fn failure() -> Self {
        Self {
            status_code: 502,
            body: "Failed to modify commands".to_string(),
        }
    }
}

/// Everything the entry point can answer with
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum EndpointResponse {
    Interaction(InteractionResponse),
    CommandsModified(CommandsModified),
    /// Signature verification failed; the body is a generic error reply
    Rejected(InteractionResponse),
}

impl EndpointResponse {
    /// HTTP status the inbound adapter should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            EndpointResponse::Rejected(_) => 401,
            EndpointResponse::Interaction(_) | EndpointResponse::CommandsModified(_) => 200,
        }
    }
}
