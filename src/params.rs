use crate::adapters::API_ROOT;
use anyhow::Context as _;
use serde::Deserialize;
use serenity::model::id::ApplicationId;
use std::time::Duration;
use url::Url;

/// Default listen address of the interactions endpoint
fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default root of the Discord REST API
fn default_discord_api_root() -> String {
    API_ROOT.to_string()
}

/// Default HTTP request timeout in seconds
fn default_http_timeout() -> u64 {
    10
}

/// Default HTTP connection timeout in seconds
fn default_http_connect_timeout() -> u64 {
    5
}

#[derive(Deserialize, Clone)]
pub struct Params {
    pub app_id: String,
    pub public_key: String,
    pub discord_token: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    // HTTP Client Configuration
    #[serde(default = "default_discord_api_root")]
    pub discord_api_root: String,
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,
    #[serde(default = "default_http_connect_timeout")]
    pub http_connect_timeout: u64,

    /// Expected value of the `modify-global-commands` header, when set
    #[serde(default)]
    pub command_sync_secret: Option<String>,
}

/// Mask sensitive strings by showing only first and last few characters
fn mask_token(s: &str) -> String {
    const VISIBLE_CHARS: usize = 4;

    let chars: Vec<char> = s.chars().collect();

    if chars.len() <= VISIBLE_CHARS * 2 {
        // If string is too short, mask everything except first char
        return match chars.first() {
            Some(first) => format!("{first}***"),
            None => "<empty>".to_string(),
        };
    }

    let head: String = chars[..VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - VISIBLE_CHARS..].iter().collect();
    format!("{head}***{tail}")
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("app_id", &self.app_id)
            .field("public_key", &self.public_key)
            .field("discord_token", &mask_token(&self.discord_token))
            .field("listen_addr", &self.listen_addr)
            .field("discord_api_root", &self.discord_api_root)
            .field("http_timeout", &self.http_timeout)
            .field("http_connect_timeout", &self.http_connect_timeout)
            .field(
                "command_sync_secret",
                &self.command_sync_secret.as_deref().map(mask_token),
            )
            .finish()
    }
}

impl Params {
    pub fn new() -> anyhow::Result<Params> {
        envy::from_env::<Params>().context("Failed to load configuration")
    }

    /// The application id as a Discord snowflake
    pub fn application_id(&self) -> anyhow::Result<ApplicationId> {
        let id: u64 = self
            .app_id
            .trim()
            .parse()
            .with_context(|| format!("APP_ID is not a valid snowflake: {}", self.app_id))?;
        anyhow::ensure!(id != 0, "APP_ID must not be zero");
        Ok(ApplicationId::new(id))
    }

    /// Parsed API root, always ending in `/` so endpoints join below it
    pub fn api_root(&self) -> anyhow::Result<Url> {
        let mut root = self.discord_api_root.clone();
        if !root.ends_with('/') {
            root.push('/');
        }
        Url::parse(&root).context("Parsing DISCORD_API_ROOT URL")
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn http_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.http_connect_timeout)
    }
}
