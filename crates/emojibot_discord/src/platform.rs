//! [`EmojiPlatform`] over the Discord HTTP API.

use crate::conversions::{channel_id, guild_id, image_data_uri, parse_snowflake};
use crate::proxies::{CachedProxy, ProxyCache};
use async_trait::async_trait;
use emojibot_core::{
    ChannelId, CommunityId, EmojiName, EmojiPlatform, IncomingMessage, NativeEmoji, NativeHandle,
    PlatformResult, ProxyHandle,
};
use emojibot_error::{PlatformError, PlatformErrorKind};
use serenity::all::{EmojiId, MessageId, UserId};
use serenity::builder::{CreateEmbed, CreateMessage, CreateWebhook, ExecuteWebhook};
use serenity::http::Http;
use serenity::model::guild::Emoji;
use serenity::model::webhook::Webhook;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Discord implementation of the chat platform capabilities.
///
/// Emoji registered by the bot's own user count as managed. Channel webhooks
/// are looked up or created once and cached; a webhook that fails to post
/// is evicted and replaced before a single retry.
pub struct DiscordPlatform {
    http: Arc<Http>,
    client: reqwest::Client,
    bot_user: UserId,
    webhooks: Mutex<ProxyCache<Webhook>>,
}

impl DiscordPlatform {
    /// Create a platform acting as `bot_user`.
    pub fn new(http: Arc<Http>, bot_user: UserId) -> Self {
        Self {
            http,
            client: reqwest::Client::new(),
            bot_user,
            webhooks: Mutex::new(ProxyCache::new()),
        }
    }

    fn http(&self) -> &Http {
        &self.http
    }

    async fn cached_proxy(&self, id: &str) -> PlatformResult<CachedProxy<Webhook>> {
        self.webhooks.lock().await.get(id).cloned().ok_or_else(|| {
            PlatformError::new(PlatformErrorKind::Proxy(format!("unknown webhook {}", id)))
        })
    }

    async fn execute_webhook(
        &self,
        hook: &Webhook,
        text: &str,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> PlatformResult<()> {
        let mut builder = ExecuteWebhook::new().content(text).username(display_name);
        if let Some(url) = avatar_url {
            builder = builder.avatar_url(url);
        }
        hook.execute(self.http(), false, builder)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Proxy(e.to_string())))?;
        Ok(())
    }

    fn native(&self, emoji: &Emoji) -> NativeEmoji {
        NativeEmoji {
            handle: NativeHandle(emoji.id.get().to_string()),
            name: emoji.name.clone(),
            managed: emoji
                .user
                .as_ref()
                .is_some_and(|user| user.id == self.bot_user),
            markup: emoji.to_string(),
        }
    }
}

#[async_trait]
impl EmojiPlatform for DiscordPlatform {
    #[instrument(skip(self))]
    async fn fetch_image_bytes(&self, url: &str) -> PlatformResult<Vec<u8>> {
        let fetch_error = |reason: String| {
            PlatformError::new(PlatformErrorKind::Fetch {
                url: url.to_string(),
                reason,
            })
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| fetch_error(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        debug!(len = bytes.len(), "Fetched image bytes");
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self), fields(community = %community))]
    async fn list_native_emoji(&self, community: &CommunityId) -> PlatformResult<Vec<NativeEmoji>> {
        let emojis = guild_id(community)?
            .emojis(self.http())
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::List(e.to_string())))?;
        debug!(count = emojis.len(), "Listed guild emoji");
        Ok(emojis.iter().map(|e| self.native(e)).collect())
    }

    #[instrument(skip(self, image), fields(community = %community, name = %name, len = image.len()))]
    async fn register_native_emoji(
        &self,
        community: &CommunityId,
        name: &EmojiName,
        image: &[u8],
    ) -> PlatformResult<NativeEmoji> {
        let emoji = guild_id(community)?
            .create_emoji(self.http(), name.as_str(), &image_data_uri(image))
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Register(e.to_string())))?;
        info!(emoji_id = %emoji.id, "Created guild emoji");
        // The create response omits the creator
        Ok(NativeEmoji {
            managed: true,
            ..self.native(&emoji)
        })
    }

    #[instrument(skip(self), fields(community = %community, handle = %handle))]
    async fn delete_native_emoji(
        &self,
        community: &CommunityId,
        handle: &NativeHandle,
    ) -> PlatformResult<()> {
        let emoji_id = EmojiId::new(parse_snowflake(&handle.0)?);
        guild_id(community)?
            .delete_emoji(self.http(), emoji_id)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Delete(e.to_string())))?;
        info!("Deleted guild emoji");
        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn delete_message(&self, message: &IncomingMessage) -> PlatformResult<()> {
        let message_id = MessageId::new(parse_snowflake(message.id.as_str())?);
        channel_id(&message.channel)?
            .delete_message(self.http(), message_id)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Message(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self), fields(channel = %channel))]
    async fn channel_proxy(&self, channel: &ChannelId, proxy_name: &str) -> PlatformResult<ProxyHandle> {
        let mut cache = self.webhooks.lock().await;
        if let Some(id) = cache.find(channel, proxy_name) {
            return Ok(ProxyHandle {
                channel: channel.clone(),
                id: id.to_string(),
            });
        }

        let proxy_error = |e: serenity::Error| PlatformError::new(PlatformErrorKind::Proxy(e.to_string()));
        let discord_channel = channel_id(channel)?;
        let existing = discord_channel
            .webhooks(self.http())
            .await
            .map_err(proxy_error)?
            .into_iter()
            .find(|h| h.name.as_deref() == Some(proxy_name) && h.token.is_some());

        let hook = match existing {
            Some(hook) => hook,
            None => {
                let hook = discord_channel
                    .create_webhook(self.http(), CreateWebhook::new(proxy_name))
                    .await
                    .map_err(proxy_error)?;
                info!(webhook_id = %hook.id, "Created channel webhook");
                hook
            }
        };

        let id = hook.id.get().to_string();
        cache.insert(id.clone(), channel.clone(), proxy_name, hook);
        Ok(ProxyHandle {
            channel: channel.clone(),
            id,
        })
    }

    #[instrument(skip(self, text, avatar_url), fields(proxy = %proxy.id))]
    async fn post_as_proxy(
        &self,
        proxy: &ProxyHandle,
        text: &str,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> PlatformResult<()> {
        let cached = self.cached_proxy(&proxy.id).await?;
        let Err(e) = self
            .execute_webhook(&cached.hook, text, display_name, avatar_url)
            .await
        else {
            return Ok(());
        };

        // The webhook may have been deleted; look it up or create it again
        warn!(error = %e, "Webhook post failed, refreshing proxy");
        self.webhooks.lock().await.evict(&proxy.id);
        let fresh = self
            .channel_proxy(&cached.channel, &cached.proxy_name)
            .await?;
        let cached = self.cached_proxy(&fresh.id).await?;
        self.execute_webhook(&cached.hook, text, display_name, avatar_url)
            .await
    }

    #[instrument(skip(self, text), fields(channel = %channel))]
    async fn send_notice(&self, channel: &ChannelId, text: &str) -> PlatformResult<()> {
        channel_id(channel)?
            .say(self.http(), text)
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Message(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self, body), fields(channel = %channel))]
    async fn send_listing(&self, channel: &ChannelId, title: &str, body: &str) -> PlatformResult<()> {
        let embed = CreateEmbed::new().title(title).description(body);
        channel_id(channel)?
            .send_message(self.http(), CreateMessage::new().embed(embed))
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Message(e.to_string())))?;
        Ok(())
    }

    async fn community_name(&self, community: &CommunityId) -> PlatformResult<String> {
        let guild = guild_id(community)?
            .to_partial_guild(self.http())
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Message(e.to_string())))?;
        Ok(guild.name)
    }
}
