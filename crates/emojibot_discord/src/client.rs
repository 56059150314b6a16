//! Discord bot client setup and lifecycle management.

use crate::{DiscordError, DiscordErrorKind, DiscordPlatform, EmojiHandler};
use emojibot_bot::{RewritePipeline, RewriteSettings};
use emojibot_core::{BuiltinNames, CatalogStore};
use serenity::Client;
use serenity::http::Http;
use std::sync::Arc;
use tracing::{info, instrument};

/// Discord client wired to a rewrite pipeline.
///
/// # Example
/// ```no_run
/// use emojibot_bot::RewriteSettings;
/// use emojibot_core::{BuiltinNames, CatalogStore};
/// use emojibot_discord::EmojiBot;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let store = Arc::new(CatalogStore::load("emojis.json").await?);
///     let builtins = Arc::new(BuiltinNames::load("builtins.json").await?);
///
///     let mut bot = EmojiBot::new(token, store, builtins, RewriteSettings::default()).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct EmojiBot {
    client: Client,
    pipeline: Arc<RewritePipeline>,
}

impl EmojiBot {
    /// Authenticate and build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the client cannot be built.
    #[instrument(skip_all, fields(token_len = token.len()))]
    pub async fn new(
        token: String,
        store: Arc<CatalogStore>,
        builtins: Arc<BuiltinNames>,
        settings: RewriteSettings,
    ) -> Result<Self, DiscordError> {
        info!("Initializing emoji bot");

        let http = Arc::new(Http::new(&token));
        let current_user = http.get_current_user().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Failed to authenticate: {}",
                e
            )))
        })?;
        info!(bot_user = %current_user.id, "Authenticated");

        let platform = Arc::new(DiscordPlatform::new(http, current_user.id));
        let pipeline = Arc::new(RewritePipeline::new(platform, store, builtins, settings));
        let handler = EmojiHandler::new(pipeline.clone());
        let intents = EmojiHandler::intents();

        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(&token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        Ok(Self { client, pipeline })
    }

    /// Pipeline shared with the event handler.
    pub fn pipeline(&self) -> &Arc<RewritePipeline> {
        &self.pipeline
    }

    /// Run until the gateway connection ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting emoji bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
