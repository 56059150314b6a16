//! Serenity event handler feeding guild messages into the rewrite pipeline.

use crate::conversions::incoming_message;
use emojibot_bot::{RewriteOutcome, RewritePipeline};
use serenity::all::Ready;
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::channel::Message;
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Event handler for the emoji bot.
pub struct EmojiHandler {
    pipeline: Arc<RewritePipeline>,
}

impl EmojiHandler {
    /// Create a handler driving `pipeline`.
    pub fn new(pipeline: Arc<RewritePipeline>) -> Self {
        Self { pipeline }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
    }
}

#[async_trait]
impl EventHandler for EmojiHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "Emoji bot connected"
        );
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let Some(incoming) = incoming_message(&msg) else {
            return;
        };
        match self.pipeline.process(&incoming).await {
            RewriteOutcome::Rejected(notice) => {
                warn!(message_id = %msg.id, %notice, "Message rejected");
            }
            outcome => debug!(message_id = %msg.id, ?outcome, "Message handled"),
        }
    }
}
