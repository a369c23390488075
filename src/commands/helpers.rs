use super::CommandDescriptor;
use crate::adapters::{DiscordClient, RequestOptions, RequestOutcome};
use crate::interaction::payload::GuildInteraction;
use anyhow::Context as _;
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::Value;
use serenity::model::id::{ApplicationId, ChannelId, MessageId};

/// Header recording why an action was taken in the guild audit log
pub const AUDIT_LOG_REASON: HeaderName = HeaderName::from_static("x-audit-log-reason");

/// Replace every global command of the application with `commands`
pub async fn install_global_commands(
    client: &DiscordClient,
    application_id: ApplicationId,
    commands: &[&CommandDescriptor],
) -> anyhow::Result<RequestOutcome<Value>> {
    let options = RequestOptions::new()
        .json(commands)
        .context("Serializing command descriptors")?;

    Ok(client
        .send(
            Method::PUT,
            &format!("applications/{application_id}/commands"),
            options,
        )
        .await)
}

/// Channel and target message of a message context-menu invocation
pub fn channel_and_message_id(
    interaction: &GuildInteraction,
) -> anyhow::Result<(ChannelId, MessageId)> {
    let message_id = interaction
        .data
        .target_id
        .context("Interaction did not include a target message ID")?;

    Ok((interaction.channel_id, message_id))
}

/// Audit log reason naming the user the bot acted for
///
/// The reason is percent-encoded so non-ASCII usernames survive as a header value.
pub fn audit_log_reason(interaction: &GuildInteraction) -> anyhow::Result<HeaderValue> {
    let reason = format!(
        "Action performed on behalf of user {}",
        interaction.member.user.username
    );
    let encoded = url::form_urlencoded::byte_serialize(reason.as_bytes())
        .collect::<String>()
        .replace('+', "%20");

    HeaderValue::from_str(&encoded).context("Building audit log reason header")
}
