use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serenity::model::application::{CommandType, InteractionType};
use serenity::model::id::{ChannelId, GuildId, InteractionId, MessageId, UserId};

/// Correlation id used when the payload carries no string `id`
pub const UNKNOWN_INTERACTION_ID: &str = "unknown";

/// Top-level keys every guild interaction must carry
const REQUIRED_GUILD_KEYS: [&str; 6] = ["id", "type", "data", "guild_id", "channel_id", "member"];

#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Expected interaction object")]
    NotAnObject,

    #[error("Expected guild interaction, missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Malformed guild interaction: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A classified inbound interaction
#[derive(Debug, Clone)]
pub enum Interaction {
    /// Endpoint health check sent by Discord
    Ping { id: String },
    /// Any other interaction, validated against the guild interaction shape
    Guild(GuildInteraction),
}

impl Interaction {
    /// Classify and validate a parsed request body
    ///
    /// Pings only need an `id`. Every other interaction type must carry all of
    /// the guild interaction keys, and application commands additionally need
    /// `data.name` and `data.type`.
    pub fn from_value(value: &Value) -> Result<Interaction, ShapeError> {
        let object = value.as_object().ok_or(ShapeError::NotAnObject)?;

        let kind = object
            .get("type")
            .and_then(Value::as_u64)
            .map(interaction_kind);

        if kind == Some(InteractionType::Ping) {
            return match object.get("id").and_then(Value::as_str) {
                Some(id) => Ok(Interaction::Ping { id: id.to_string() }),
                None => Err(ShapeError::MissingFields(vec!["id"])),
            };
        }

        let mut missing: Vec<&'static str> = REQUIRED_GUILD_KEYS
            .into_iter()
            .filter(|key| !object.contains_key(*key))
            .collect();

        if kind == Some(InteractionType::Command) {
            if let Some(data) = object.get("data") {
                for (key, path) in [("name", "data.name"), ("type", "data.type")] {
                    if data.get(key).is_none() {
                        missing.push(path);
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(ShapeError::MissingFields(missing));
        }

        let interaction = GuildInteraction::deserialize(value)?;
        Ok(Interaction::Guild(interaction))
    }

    /// The interaction id as used in error responses
    pub fn correlation_id(&self) -> String {
        match self {
            Interaction::Ping { id } => id.clone(),
            Interaction::Guild(interaction) => interaction.id.to_string(),
        }
    }
}

/// An interaction raised inside a guild channel
#[derive(Debug, Clone, Deserialize)]
pub struct GuildInteraction {
    pub id: InteractionId,
    #[serde(rename = "type", deserialize_with = "deserialize_interaction_kind")]
    pub kind: InteractionType,
    pub data: InteractionData,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub member: Member,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<CommandType>,
    /// Message targeted by a message context-menu command
    #[serde(default)]
    pub target_id: Option<MessageId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Discriminants wider than a byte are treated as an unknown interaction type
fn interaction_kind(value: u64) -> InteractionType {
    u8::try_from(value)
        .map(InteractionType::from)
        .unwrap_or(InteractionType::Unknown(u8::MAX))
}

fn deserialize_interaction_kind<'de, D>(deserializer: D) -> Result<InteractionType, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(interaction_kind)
}

/// Best-effort extraction of the interaction id
///
/// Never fails: anything without a string `id` yields `"unknown"`.
pub fn correlation_id(value: &Value) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_INTERACTION_ID)
        .to_string()
}
