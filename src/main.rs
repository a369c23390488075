use anyhow::Context as _;
use pinwheel::adapters::{DiscordClient, ReqwestTransport};
use pinwheel::commands::{CommandRegistry, application_commands};
use pinwheel::interaction::{InteractionEndpoint, SignatureVerifier};
use pinwheel::params::Params;
use pinwheel::server;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber for structured logging
    // Default: pinwheel=info, serenity=warn
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinwheel=info,serenity=warn".into()),
        )
        .init();

    // Display startup banner with version information
    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        description = env!("CARGO_PKG_DESCRIPTION"),
        "Starting application"
    );

    // Missing or invalid configuration aborts startup
    let params = Params::new()?;
    info!(?params, "Application parameters loaded");

    let application_id = params.application_id()?;
    let verifier =
        SignatureVerifier::from_hex(&params.public_key).context("Parsing PUBLIC_KEY")?;

    let transport = Arc::new(ReqwestTransport::new(
        params.http_timeout(),
        params.http_connect_timeout(),
    )?);
    let client = Arc::new(DiscordClient::new(
        transport,
        params.api_root()?,
        &params.discord_token,
    )?);

    let registry = Arc::new(
        CommandRegistry::new(application_commands(client.clone()))
            .context("Building command registry")?,
    );
    info!(commands = registry.len(), "Command registry initialized");

    if params.command_sync_secret.is_none() {
        warn!(
            "COMMAND_SYNC_SECRET is not set; any request carrying the \
             modify-global-commands header can replace the global commands"
        );
    }

    let endpoint = Arc::new(
        InteractionEndpoint::new(verifier, registry, client, application_id)
            .with_command_sync_secret(params.command_sync_secret.clone()),
    );

    server::serve(&params.listen_addr, endpoint).await
}
