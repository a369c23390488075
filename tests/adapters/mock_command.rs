use pinwheel::commands::CommandHandler;
use pinwheel::interaction::{GuildInteraction, InteractionResponse};
use serenity::async_trait;
use std::sync::{Arc, Mutex};

/// Command handler recording the interactions it was invoked with
pub struct MockCommandHandler {
    pub invocations: Arc<Mutex<Vec<String>>>,
    response: Option<InteractionResponse>,
}

impl MockCommandHandler {
    /// A handler answering every invocation with `response`
    pub fn new(response: InteractionResponse) -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            response: Some(response),
        }
    }

    /// A handler failing every invocation
    pub fn failing() -> Self {
        Self {
            invocations: Arc::new(Mutex::new(Vec::new())),
            response: None,
        }
    }

    /// Interaction ids this handler was invoked with
    pub fn get_invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandHandler for MockCommandHandler {
    async fn handle(&self, interaction: &GuildInteraction) -> anyhow::Result<InteractionResponse> {
        self.invocations
            .lock()
            .unwrap()
            .push(interaction.id.to_string());

        self.response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("handler failed"))
    }
}
