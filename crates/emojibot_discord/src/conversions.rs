//! Conversions between serenity models and the platform-neutral types.

use crate::{DiscordError, DiscordErrorKind, DiscordResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use emojibot_core::{
    Attachment, AuthorBuilder, ChannelId, CommunityId, IncomingMessage, IncomingMessageBuilder,
};
use serenity::model::channel::Message;

/// Parse a snowflake stored as text.
///
/// Zero is rejected since serenity id constructors panic on it.
pub fn parse_snowflake(raw: &str) -> DiscordResult<u64> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(DiscordError::new(DiscordErrorKind::InvalidId(
            raw.to_string(),
        ))),
        Ok(id) => Ok(id),
    }
}

/// Serenity guild id for a community.
pub fn guild_id(community: &CommunityId) -> DiscordResult<serenity::all::GuildId> {
    parse_snowflake(community.as_str()).map(serenity::all::GuildId::new)
}

/// Serenity channel id for a channel.
pub fn channel_id(channel: &ChannelId) -> DiscordResult<serenity::all::ChannelId> {
    parse_snowflake(channel.as_str()).map(serenity::all::ChannelId::new)
}

/// Encode image bytes as the data URI Discord expects for emoji uploads.
pub fn image_data_uri(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/png");
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Whether a gateway message should enter the rewrite pipeline.
///
/// Bots and webhooks are skipped, which includes our own reposts, as are
/// direct messages.
pub fn is_processable(is_bot: bool, is_webhook: bool, in_guild: bool) -> bool {
    !is_bot && !is_webhook && in_guild
}

/// Convert a guild message, or `None` for anything we do not handle.
pub fn incoming_message(msg: &Message) -> Option<IncomingMessage> {
    if !is_processable(msg.author.bot, msg.webhook_id.is_some(), msg.guild_id.is_some()) {
        return None;
    }
    let guild = msg.guild_id?;

    let display_name = msg
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .or_else(|| msg.author.global_name.clone())
        .unwrap_or_else(|| msg.author.name.clone());

    let author = AuthorBuilder::default()
        .id(msg.author.id.get())
        .display_name(display_name)
        .avatar_url(Some(msg.author.face()))
        .build()
        .ok()?;

    IncomingMessageBuilder::default()
        .id(msg.id.get())
        .community(guild.get())
        .channel(msg.channel_id.get())
        .author(author)
        .content(msg.content.clone())
        .attachments(
            msg.attachments
                .iter()
                .map(|a| Attachment::new(a.url.clone(), a.filename.clone()))
                .collect::<Vec<_>>(),
        )
        .build()
        .ok()
}
