//! Capabilities consumed from the chat platform.

use crate::{
    ChannelId, CommunityId, EmojiName, IncomingMessage, NativeEmoji, NativeHandle, ProxyHandle,
};
use async_trait::async_trait;
use emojibot_error::PlatformError;

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// The narrow set of platform operations the rewrite pipeline needs.
///
/// Every method is a suspension point. There is no timeout layer; a hung
/// call stalls only the message being processed.
#[async_trait]
pub trait EmojiPlatform: Send + Sync {
    /// Download image bytes.
    ///
    /// # Errors
    ///
    /// Returns `Fetch` on transport failure or a non-success status.
    async fn fetch_image_bytes(&self, url: &str) -> PlatformResult<Vec<u8>>;

    /// List the native emoji of a community, tagged with whether this bot
    /// registered them.
    async fn list_native_emoji(&self, community: &CommunityId) -> PlatformResult<Vec<NativeEmoji>>;

    /// Register a native emoji and return it.
    ///
    /// # Errors
    ///
    /// Returns `Register` if the platform rejects the image or has no free slot.
    async fn register_native_emoji(
        &self,
        community: &CommunityId,
        name: &EmojiName,
        image: &[u8],
    ) -> PlatformResult<NativeEmoji>;

    /// Delete a native emoji.
    async fn delete_native_emoji(
        &self,
        community: &CommunityId,
        handle: &NativeHandle,
    ) -> PlatformResult<()>;

    /// Delete a message.
    async fn delete_message(&self, message: &IncomingMessage) -> PlatformResult<()>;

    /// Find or create the proxy identity for a channel.
    async fn channel_proxy(&self, channel: &ChannelId, proxy_name: &str)
    -> PlatformResult<ProxyHandle>;

    /// Post text through a proxy identity under another name and avatar.
    async fn post_as_proxy(
        &self,
        proxy: &ProxyHandle,
        text: &str,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> PlatformResult<()>;

    /// Post a short notice to a channel.
    async fn send_notice(&self, channel: &ChannelId, text: &str) -> PlatformResult<()>;

    /// Post a titled listing (an embed on Discord) to a channel.
    async fn send_listing(&self, channel: &ChannelId, title: &str, body: &str)
    -> PlatformResult<()>;

    /// Human-readable community name.
    async fn community_name(&self, community: &CommunityId) -> PlatformResult<String>;
}
